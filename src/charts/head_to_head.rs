//! Page 2: the designated team against each opponent, home and away

use super::style::{self, CategoryChart, GROUPED_BAR_WIDTH};
use super::{ensure_rows, i64_values, string_values};
use crate::config::ChartColors;
use crate::soccer::data::{ResultCode, HOME, RESULT, SEASON, TIER, VISITOR};
use crate::soccer::error::Result;
use crate::soccer::pages::{DocumentWriter, PageSize};
use crate::soccer::pdf_backend::PdfBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use polars::prelude::*;

pub const PAGE: PageSize = PageSize::from_inches(14.0, 10.0);

const TEAM1: &str = "team1";
const TEAM2: &str = "team2";
const HOME_WINS: &str = "home_wins";
const AWAY_WINS: &str = "away_wins";
const OPPONENT_SUFFIX: &str = "opponent";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadToHeadRow {
    pub opponent: String,
    /// Team's home wins against this opponent
    pub home_wins_team: i64,
    /// Team's away wins at this opponent
    pub away_wins_team: i64,
    pub home_wins_opponent: i64,
    pub away_wins_opponent: i64,
}

/// Win counts between one team and every opponent it has beaten and lost to
/// both home and away
#[derive(Debug, Clone, PartialEq)]
pub struct HeadToHead {
    pub team: String,
    pub since: i64,
    pub rows: Vec<HeadToHeadRow>,
}

impl HeadToHead {
    pub fn opponents(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.opponent.clone()).collect()
    }
}

fn suffixed(name: &str, suffix: &str) -> String {
    format!("{}_{}", name, suffix)
}

/// Column suffix for the team side, e.g. `arsenal`
fn team_suffix(team: &str) -> String {
    let suffix: String = team
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    if suffix == OPPONENT_SUFFIX {
        format!("{}_team", suffix)
    } else {
        suffix
    }
}

/// Select a wins frame with every column suffixed
fn side(wins: LazyFrame, suffix: &str) -> LazyFrame {
    wins.select([
        col(TEAM1).alias(suffixed(TEAM1, suffix)),
        col(TEAM2).alias(suffixed(TEAM2, suffix)),
        col(HOME_WINS).alias(suffixed(HOME_WINS, suffix)),
        col(AWAY_WINS).alias(suffixed(AWAY_WINS, suffix)),
    ])
}

/// Compare `team` with its opponents in `tier` for seasons from `since`
///
/// Only pairings with at least one home win and one away win in the same
/// direction count, and an opponent is kept only when that holds both ways.
/// Rows are ordered by the opponent's away wins, most first, then by name.
pub fn aggregate(england: &DataFrame, team: &str, tier: i64, since: i64) -> Result<HeadToHead> {
    let top = england
        .clone()
        .lazy()
        .filter(col(TIER).eq(lit(tier)).and(col(SEASON).gt_eq(lit(since))));

    let home_wins = top
        .clone()
        .filter(col(RESULT).eq(lit(ResultCode::HomeWin.code())))
        .group_by([col(HOME), col(VISITOR)])
        .agg([len().cast(DataType::Int64).alias(HOME_WINS)])
        .select([
            col(HOME).alias(TEAM1),
            col(VISITOR).alias(TEAM2),
            col(HOME_WINS),
        ]);

    let away_wins = top
        .filter(col(RESULT).eq(lit(ResultCode::AwayWin.code())))
        .group_by([col(VISITOR), col(HOME)])
        .agg([len().cast(DataType::Int64).alias(AWAY_WINS)])
        .select([
            col(VISITOR).alias(TEAM1),
            col(HOME).alias(TEAM2),
            col(AWAY_WINS),
        ]);

    let wins = home_wins.join(
        away_wins,
        [col(TEAM1), col(TEAM2)],
        [col(TEAM1), col(TEAM2)],
        JoinArgs::new(JoinType::Inner),
    );

    let team_suffix = team_suffix(team);
    let team_side = side(wins.clone().filter(col(TEAM1).eq(lit(team))), &team_suffix);
    let opponent_side = side(wins.filter(col(TEAM2).eq(lit(team))), OPPONENT_SUFFIX);

    let opponent = suffixed(TEAM2, &team_suffix);
    let away_wins_opponent = suffixed(AWAY_WINS, OPPONENT_SUFFIX);

    let merged = team_side
        .join(
            opponent_side,
            [col(opponent.as_str())],
            [col(suffixed(TEAM1, OPPONENT_SUFFIX).as_str())],
            JoinArgs::new(JoinType::Inner),
        )
        .sort(
            [away_wins_opponent.as_str(), opponent.as_str()],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()?;

    ensure_rows(&merged, &format!("head to head of {}", team))?;

    let opponents = string_values(&merged, &opponent)?;
    let home_team = i64_values(&merged, &suffixed(HOME_WINS, &team_suffix))?;
    let away_team = i64_values(&merged, &suffixed(AWAY_WINS, &team_suffix))?;
    let home_opponent = i64_values(&merged, &suffixed(HOME_WINS, OPPONENT_SUFFIX))?;
    let away_opponent = i64_values(&merged, &away_wins_opponent)?;

    let rows = opponents
        .into_iter()
        .enumerate()
        .map(|(i, opponent)| HeadToHeadRow {
            opponent,
            home_wins_team: home_team[i],
            away_wins_team: away_team[i],
            home_wins_opponent: home_opponent[i],
            away_wins_opponent: away_opponent[i],
        })
        .collect();

    Ok(HeadToHead {
        team: team.to_string(),
        since,
        rows,
    })
}

struct Panel {
    title: String,
    y_desc: &'static str,
    team_label: String,
    opponent_label: &'static str,
    /// (team, opponent) per category
    values: Vec<(i64, i64)>,
}

/// Draw home wins on the upper panel and away wins on the lower one
pub fn render(data: &HeadToHead, colors: &ChartColors, writer: &mut DocumentWriter) -> Result<()> {
    let root = writer.add_page("Q7", PAGE)?.into_drawing_area();
    root.fill(&WHITE)?;

    let panels = root.split_evenly((2, 1));
    let labels = data.opponents();

    let home = Panel {
        title: format!(
            "Q7a: {} Home Wins vs Opponents Home Wins (Since {})",
            data.team, data.since
        ),
        y_desc: "Number of Home Wins",
        team_label: format!("{} Home Wins", data.team),
        opponent_label: "Opponent Home Wins",
        values: data
            .rows
            .iter()
            .map(|r| (r.home_wins_team, r.home_wins_opponent))
            .collect(),
    };
    let away = Panel {
        title: format!(
            "Q7b: {} Away Wins vs Opponents Away Wins (Since {})",
            data.team, data.since
        ),
        y_desc: "Number of Away Wins",
        team_label: format!("{} Away Wins", data.team),
        opponent_label: "Opponent Away Wins",
        values: data
            .rows
            .iter()
            .map(|r| (r.away_wins_team, r.away_wins_opponent))
            .collect(),
    };

    for (area, panel) in panels.iter().zip([home, away]) {
        draw_panel(&root, area, &panel, &labels, colors)?;
    }

    root.present()?;
    Ok(())
}

fn draw_panel(
    root: &DrawingArea<PdfBackend, Shift>,
    area: &DrawingArea<PdfBackend, Shift>,
    panel: &Panel,
    labels: &[String],
    colors: &ChartColors,
) -> Result<()> {
    let max = panel
        .values
        .iter()
        .map(|&(team, opponent)| team.max(opponent))
        .max()
        .unwrap_or(0) as f64;

    let mut chart: CategoryChart = ChartBuilder::on(area)
        .margin(15)
        .caption(&panel.title, style::bold(13))
        .x_label_area_size(120)
        .y_label_area_size(60)
        .build_cartesian_2d(style::category_axis(labels.len()), style::value_axis(max))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(style::grid_color())
        .x_labels(labels.len().max(1))
        .x_label_formatter(&|_| String::new())
        .y_label_formatter(&|y: &f64| format!("{:.0}", y))
        .x_desc("Opponent Team")
        .y_desc(panel.y_desc)
        .axis_desc_style(style::bold(11))
        .label_style(style::regular(9))
        .draw()?;

    let team_bars: Vec<(f64, f64)> = panel
        .values
        .iter()
        .enumerate()
        .map(|(i, &(team, _))| (i as f64, team as f64))
        .collect();
    let opponent_bars: Vec<(f64, f64)> = panel
        .values
        .iter()
        .enumerate()
        .map(|(i, &(_, opponent))| (i as f64, opponent as f64))
        .collect();

    style::edged_bars(
        &mut chart,
        &team_bars,
        -GROUPED_BAR_WIDTH / 2.0,
        GROUPED_BAR_WIDTH,
        colors.team.to_rgba(),
        &panel.team_label,
    )?;
    style::edged_bars(
        &mut chart,
        &opponent_bars,
        GROUPED_BAR_WIDTH / 2.0,
        GROUPED_BAR_WIDTH,
        colors.opponent.to_rgba(),
        panel.opponent_label,
    )?;

    style::draw_legend(&mut chart)?;
    style::draw_category_labels(root, &chart, labels, 9, true)?;
    Ok(())
}
