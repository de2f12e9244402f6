//! Page 4: share of top-tier matches per goal difference, France against England

use super::style::{self, CategoryChart, GROUPED_BAR_WIDTH};
use super::{ensure_rows, f64_values, i64_values};
use crate::config::ChartColors;
use crate::soccer::data::{with_goal_difference, GOAL_DIFFERENCE, TIER};
use crate::soccer::error::{ReportError, Result};
use crate::soccer::pages::{DocumentWriter, PageSize};
use plotters::prelude::*;
use polars::prelude::*;

pub const PAGE: PageSize = PageSize::from_inches(14.0, 7.0);

const FRANCE_SHARE: &str = "france_games";
const ENGLAND_SHARE: &str = "eng_games";

/// Bars are drawn translucent so overlaps stay readable
const BAR_ALPHA: f64 = 0.7;

#[derive(Debug, Clone, PartialEq)]
pub struct GoalDifferenceRow {
    pub goal_difference: i64,
    pub france_share: f64,
    pub england_share: f64,
}

/// Normalized goal-difference distributions, ascending by goal difference
///
/// Every goal difference seen in either league has a row; a league that never
/// produced it has share 0.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalDifferenceShare {
    pub tier: i64,
    pub rows: Vec<GoalDifferenceRow>,
}

impl GoalDifferenceShare {
    pub fn france_total(&self) -> f64 {
        self.rows.iter().map(|r| r.france_share).sum()
    }

    pub fn england_total(&self) -> f64 {
        self.rows.iter().map(|r| r.england_share).sum()
    }
}

/// Share of a league's `tier` matches per goal difference
fn share(df: &DataFrame, tier: i64, name: &str, league: &str) -> Result<LazyFrame> {
    // Rows without a goal difference are left out of both count and total
    let top = with_goal_difference(df)
        .filter(col(TIER).eq(lit(tier)))
        .filter(col(GOAL_DIFFERENCE).is_not_null());

    let total = top.clone().select([len().alias("n")]).collect()?;
    let total = total
        .column("n")?
        .as_materialized_series()
        .cast(&DataType::Int64)?
        .i64()?
        .get(0)
        .unwrap_or(0);
    if total == 0 {
        return Err(ReportError::EmptyResult(format!(
            "{} tier {} goal differences",
            league, tier
        )));
    }

    Ok(top
        .group_by([col(GOAL_DIFFERENCE)])
        .agg([(len().cast(DataType::Float64) / lit(total as f64)).alias(name)]))
}

/// Compare goal-difference distributions of France and England in `tier`
pub fn aggregate(france: &DataFrame, england: &DataFrame, tier: i64) -> Result<GoalDifferenceShare> {
    let france_share = share(france, tier, FRANCE_SHARE, "France")?;
    let england_share = share(england, tier, ENGLAND_SHARE, "England")?;

    // Every goal difference from either league, missing shares become 0
    let merged = france_share
        .join(
            england_share,
            [col(GOAL_DIFFERENCE)],
            [col(GOAL_DIFFERENCE)],
            JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
        )
        .with_columns([
            col(FRANCE_SHARE).fill_null(lit(0.0)),
            col(ENGLAND_SHARE).fill_null(lit(0.0)),
        ])
        .sort([GOAL_DIFFERENCE], SortMultipleOptions::default())
        .collect()?;

    ensure_rows(&merged, "goal difference share")?;

    let differences = i64_values(&merged, GOAL_DIFFERENCE)?;
    let france = f64_values(&merged, FRANCE_SHARE)?;
    let england = f64_values(&merged, ENGLAND_SHARE)?;

    let rows = differences
        .into_iter()
        .zip(france.into_iter().zip(england))
        .map(|(goal_difference, (france_share, england_share))| GoalDifferenceRow {
            goal_difference,
            france_share,
            england_share,
        })
        .collect();

    Ok(GoalDifferenceShare { tier, rows })
}

/// Draw grouped translucent bars, one pair per goal difference
pub fn render(
    data: &GoalDifferenceShare,
    colors: &ChartColors,
    writer: &mut DocumentWriter,
) -> Result<()> {
    let root = writer.add_page("Q10", PAGE)?.into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<String> = data
        .rows
        .iter()
        .map(|r| r.goal_difference.to_string())
        .collect();
    let max = data
        .rows
        .iter()
        .map(|r| r.france_share.max(r.england_share))
        .fold(0.0, f64::max);

    let mut chart: CategoryChart = ChartBuilder::on(&root)
        .margin(20)
        .caption(
            format!(
                "Q10: Normalized Goal Difference Distribution - France vs England (Tier {})",
                data.tier
            ),
            style::bold(14),
        )
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(style::category_axis(labels.len()), style::value_axis(max))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(style::grid_color())
        .x_labels(labels.len().max(1))
        .x_label_formatter(&|_| String::new())
        .y_label_formatter(&|y: &f64| format!("{:.2}", y))
        .x_desc("Goal Difference")
        .y_desc("Proportion of Games (Normalized)")
        .axis_desc_style(style::bold(12))
        .label_style(style::regular(10))
        .draw()?;

    let france: Vec<(f64, f64)> = data
        .rows
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.france_share))
        .collect();
    let england: Vec<(f64, f64)> = data
        .rows
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.england_share))
        .collect();

    style::edged_bars(
        &mut chart,
        &france,
        -GROUPED_BAR_WIDTH / 2.0,
        GROUPED_BAR_WIDTH,
        colors.france.mix(BAR_ALPHA),
        "France",
    )?;
    style::edged_bars(
        &mut chart,
        &england,
        GROUPED_BAR_WIDTH / 2.0,
        GROUPED_BAR_WIDTH,
        colors.england.mix(BAR_ALPHA),
        "England",
    )?;

    style::draw_legend(&mut chart)?;
    style::draw_category_labels(&root, &chart, &labels, 10, false)?;

    root.present()?;
    Ok(())
}
