//! Match table loading and derived columns
//!
//! Each league file is a comma-separated table with one row per match. Only the
//! columns listed below are read; any other column in the file is ignored.
//!
//! ## Derived columns
//! `totgoal` and `goaldif` are materialized by some source files and not by
//! others. They are computed from `hgoal`/`vgoal` only when the column is absent,
//! so a table that already carries them is never recomputed.

use super::error::{ReportError, Result};
use csv::{ReaderBuilder, Trim};
use polars::prelude::*;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const SEASON: &str = "season";
pub const TIER: &str = "tier";
pub const HOME: &str = "home";
pub const VISITOR: &str = "visitor";
pub const HOME_GOALS: &str = "hgoal";
pub const VISITOR_GOALS: &str = "vgoal";
pub const RESULT: &str = "result";
pub const TOTAL_GOALS: &str = "totgoal";
pub const GOAL_DIFFERENCE: &str = "goaldif";

/// Columns every match table must provide
pub const REQUIRED_COLUMNS: [&str; 7] = [
    SEASON,
    TIER,
    HOME,
    VISITOR,
    HOME_GOALS,
    VISITOR_GOALS,
    RESULT,
];

/// Single-letter match outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    HomeWin,
    AwayWin,
    Draw,
}

impl ResultCode {
    pub fn code(&self) -> &'static str {
        match self {
            ResultCode::HomeWin => "H",
            ResultCode::AwayWin => "A",
            ResultCode::Draw => "D",
        }
    }

    /// Outcome implied by a final score
    pub fn from_score(home_goals: i64, visitor_goals: i64) -> Self {
        match home_goals.cmp(&visitor_goals) {
            std::cmp::Ordering::Greater => ResultCode::HomeWin,
            std::cmp::Ordering::Less => ResultCode::AwayWin,
            std::cmp::Ordering::Equal => ResultCode::Draw,
        }
    }
}

/// One match as stored in a league file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchRow {
    #[serde(alias = "Season")]
    pub season: i64,
    pub tier: i64,
    pub home: String,
    pub visitor: String,
    pub hgoal: i64,
    pub vgoal: i64,
    pub result: String,

    /// Empty or `NA` cells become None
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub totgoal: Option<i64>,

    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub goaldif: Option<i64>,
}

impl MatchRow {
    /// Build a row from a final score, deriving result, totgoal and goaldif
    pub fn new(season: i64, tier: i64, home: &str, visitor: &str, hgoal: i64, vgoal: i64) -> Self {
        MatchRow {
            season,
            tier,
            home: home.to_string(),
            visitor: visitor.to_string(),
            hgoal,
            vgoal,
            result: ResultCode::from_score(hgoal, vgoal).code().to_string(),
            totgoal: Some(hgoal + vgoal),
            goaldif: Some(hgoal - vgoal),
        }
    }
}

/// Rows of one table plus which optional columns its header declared
#[derive(Debug, Clone)]
pub struct ParsedMatches {
    pub rows: Vec<MatchRow>,
    pub has_total_goals: bool,
    pub has_goal_difference: bool,
}

impl ParsedMatches {
    /// Parse CSV data into match rows
    ///
    /// Fails with `MissingColumn` before reading any row if the header lacks a
    /// required column.
    pub fn from_csv<R: Read>(reader: R, table: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::Headers)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let has_header = |name: &str| {
            headers
                .iter()
                .any(|h| h == name || (name == SEASON && h == "Season"))
        };

        if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !has_header(c)) {
            return Err(ReportError::MissingColumn {
                table: table.to_string(),
                column: missing.to_string(),
            });
        }

        let mut rows = Vec::new();
        for record in reader.deserialize() {
            let row: MatchRow = record?;
            rows.push(row);
        }

        Ok(ParsedMatches {
            rows,
            has_total_goals: has_header(TOTAL_GOALS),
            has_goal_difference: has_header(GOAL_DIFFERENCE),
        })
    }

    /// Build the columnar table
    ///
    /// Optional columns are only emitted when the source declared them.
    pub fn into_dataframe(self) -> Result<DataFrame> {
        matches_to_dataframe(&self.rows, self.has_total_goals, self.has_goal_difference)
    }
}

/// Load one league file into a DataFrame
pub fn load_match_table(path: &Path, table: &str) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(ReportError::MissingInput {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    let parsed = ParsedMatches::from_csv(file, table)?;
    tracing::debug!(
        table,
        rows = parsed.rows.len(),
        totgoal = parsed.has_total_goals,
        goaldif = parsed.has_goal_difference,
        "parsed match table"
    );
    parsed.into_dataframe()
}

/// Convert match rows to a DataFrame
pub fn matches_to_dataframe(
    rows: &[MatchRow],
    with_total_goals: bool,
    with_goal_difference: bool,
) -> Result<DataFrame> {
    let mut columns = vec![
        Series::new(SEASON.into(), rows.iter().map(|r| r.season).collect::<Vec<i64>>()).into_column(),
        Series::new(TIER.into(), rows.iter().map(|r| r.tier).collect::<Vec<i64>>()).into_column(),
        Series::new(HOME.into(), rows.iter().map(|r| r.home.as_str()).collect::<Vec<&str>>())
            .into_column(),
        Series::new(
            VISITOR.into(),
            rows.iter().map(|r| r.visitor.as_str()).collect::<Vec<&str>>(),
        )
        .into_column(),
        Series::new(HOME_GOALS.into(), rows.iter().map(|r| r.hgoal).collect::<Vec<i64>>())
            .into_column(),
        Series::new(
            VISITOR_GOALS.into(),
            rows.iter().map(|r| r.vgoal).collect::<Vec<i64>>(),
        )
        .into_column(),
        Series::new(
            RESULT.into(),
            rows.iter().map(|r| r.result.as_str()).collect::<Vec<&str>>(),
        )
        .into_column(),
    ];

    if with_total_goals {
        columns.push(
            Series::new(
                TOTAL_GOALS.into(),
                rows.iter().map(|r| r.totgoal).collect::<Vec<Option<i64>>>(),
            )
            .into_column(),
        );
    }

    if with_goal_difference {
        columns.push(
            Series::new(
                GOAL_DIFFERENCE.into(),
                rows.iter().map(|r| r.goaldif).collect::<Vec<Option<i64>>>(),
            )
            .into_column(),
        );
    }

    Ok(DataFrame::new(columns)?)
}

/// Write match rows as CSV
///
/// Optional columns are written only when requested; missing values are `NA`.
pub fn write_matches_csv(
    rows: &[MatchRow],
    path: &Path,
    with_total_goals: bool,
    with_goal_difference: bool,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header: Vec<&str> = REQUIRED_COLUMNS.to_vec();
    if with_total_goals {
        header.push(TOTAL_GOALS);
    }
    if with_goal_difference {
        header.push(GOAL_DIFFERENCE);
    }
    writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![
            row.season.to_string(),
            row.tier.to_string(),
            row.home.clone(),
            row.visitor.clone(),
            row.hgoal.to_string(),
            row.vgoal.to_string(),
            row.result.clone(),
        ];
        if with_total_goals {
            record.push(optional_cell(row.totgoal));
        }
        if with_goal_difference {
            record.push(optional_cell(row.goaldif));
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

fn optional_cell(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "NA".to_string())
}

/// Whether a table has a column
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// Lazy view of a table with `totgoal` present
pub fn with_total_goals(df: &DataFrame) -> LazyFrame {
    let lf = df.clone().lazy();
    if has_column(df, TOTAL_GOALS) {
        lf
    } else {
        lf.with_column((col(HOME_GOALS) + col(VISITOR_GOALS)).alias(TOTAL_GOALS))
    }
}

/// Lazy view of a table with `goaldif` present
pub fn with_goal_difference(df: &DataFrame) -> LazyFrame {
    let lf = df.clone().lazy();
    if has_column(df, GOAL_DIFFERENCE) {
        lf
    } else {
        lf.with_column((col(HOME_GOALS) - col(VISITOR_GOALS)).alias(GOAL_DIFFERENCE))
    }
}
