//! The four report charts
//!
//! Each module has an `aggregate` step (lazy polars query producing a typed
//! table) and a `render` step that draws that table onto one document page.

pub mod goal_difference;
pub mod goal_distribution;
pub mod head_to_head;
pub mod scoring_trend;
mod style;

pub use goal_difference::{GoalDifferenceRow, GoalDifferenceShare};
pub use goal_distribution::{GoalCount, GoalDistribution};
pub use head_to_head::{HeadToHead, HeadToHeadRow};
pub use scoring_trend::{ScoringTrend, SeasonAverage};

use crate::soccer::error::{ReportError, Result};
use polars::prelude::*;

fn null_error(name: &str) -> ReportError {
    ReportError::Render(format!("unexpected null in column '{}'", name))
}

/// Non-null integer column values
pub(crate) fn i64_values(df: &DataFrame, name: &str) -> Result<Vec<i64>> {
    df.column(name)?
        .as_materialized_series()
        .i64()?
        .into_iter()
        .map(|v| v.ok_or_else(|| null_error(name)))
        .collect()
}

/// Float column values; nulls become NaN
pub(crate) fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    Ok(df
        .column(name)?
        .as_materialized_series()
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

/// Non-null string column values
pub(crate) fn string_values(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    df.column(name)?
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string).ok_or_else(|| null_error(name)))
        .collect()
}

/// Fail when a chart would have nothing to draw
pub(crate) fn ensure_rows(df: &DataFrame, what: &str) -> Result<()> {
    if df.height() == 0 {
        return Err(ReportError::EmptyResult(what.to_string()));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::soccer::data::{matches_to_dataframe, MatchRow};
    use polars::prelude::DataFrame;

    /// (season, tier, home, visitor, hgoal, vgoal)
    pub type Match = (i64, i64, &'static str, &'static str, i64, i64);

    pub fn table(matches: &[Match], with_total_goals: bool, with_goal_difference: bool) -> DataFrame {
        table_with_gaps(matches, &[], with_total_goals, with_goal_difference)
    }

    /// Like `table`, but the rows at `gaps` have `NA` totgoal and goaldif cells
    pub fn table_with_gaps(
        matches: &[Match],
        gaps: &[usize],
        with_total_goals: bool,
        with_goal_difference: bool,
    ) -> DataFrame {
        let rows: Vec<MatchRow> = matches
            .iter()
            .enumerate()
            .map(|(i, &(season, tier, home, visitor, hg, vg))| {
                let mut row = MatchRow::new(season, tier, home, visitor, hg, vg);
                if gaps.contains(&i) {
                    row.totgoal = None;
                    row.goaldif = None;
                }
                row
            })
            .collect();
        matches_to_dataframe(&rows, with_total_goals, with_goal_difference).unwrap()
    }
}
