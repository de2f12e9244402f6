//! Page 3: average goals per match by season, England against Italy

use super::style;
use super::{ensure_rows, f64_values, i64_values};
use crate::config::ChartColors;
use crate::soccer::data::{with_total_goals, SEASON, TOTAL_GOALS};
use crate::soccer::error::Result;
use crate::soccer::pages::{DocumentWriter, PageSize};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use polars::prelude::*;

pub const PAGE: PageSize = PageSize::from_inches(14.0, 7.0);

const ENGLAND_AVG: &str = "england_avg";
const ITALY_AVG: &str = "italy_avg";

const MARKER_SIZE: i32 = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct SeasonAverage {
    pub season: i64,
    pub england_avg: f64,
    pub italy_avg: f64,
}

/// Per-season scoring averages for seasons both leagues played
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringTrend {
    pub since: i64,
    pub rows: Vec<SeasonAverage>,
}

fn season_average(df: &DataFrame, since: i64, name: &str) -> LazyFrame {
    with_total_goals(df)
        .filter(col(SEASON).gt_eq(lit(since)))
        .filter(col(TOTAL_GOALS).is_not_null())
        .group_by([col(SEASON)])
        .agg([col(TOTAL_GOALS).cast(DataType::Float64).mean().alias(name)])
}

/// Average total goals per season from `since`, aligned on common seasons
pub fn aggregate(england: &DataFrame, italy: &DataFrame, since: i64) -> Result<ScoringTrend> {
    let merged = season_average(england, since, ENGLAND_AVG)
        .join(
            season_average(italy, since, ITALY_AVG),
            [col(SEASON)],
            [col(SEASON)],
            JoinArgs::new(JoinType::Inner),
        )
        .sort([SEASON], SortMultipleOptions::default())
        .collect()?;

    ensure_rows(&merged, "scoring trend")?;

    let seasons = i64_values(&merged, SEASON)?;
    let england_avg = f64_values(&merged, ENGLAND_AVG)?;
    let italy_avg = f64_values(&merged, ITALY_AVG)?;

    let rows = seasons
        .into_iter()
        .zip(england_avg.into_iter().zip(italy_avg))
        .map(|(season, (england_avg, italy_avg))| SeasonAverage {
            season,
            england_avg,
            italy_avg,
        })
        .collect();

    Ok(ScoringTrend { since, rows })
}

/// Draw both leagues as marked lines over the seasons
pub fn render(data: &ScoringTrend, colors: &ChartColors, writer: &mut DocumentWriter) -> Result<()> {
    let root = writer.add_page("Q9", PAGE)?.into_drawing_area();
    root.fill(&WHITE)?;

    let first = data.rows.first().map(|r| r.season).unwrap_or(0);
    let last = data.rows.last().map(|r| r.season).unwrap_or(0);

    let values = data
        .rows
        .iter()
        .flat_map(|r| [r.england_avg, r.italy_avg])
        .filter(|v| v.is_finite());
    let (low, high) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let (low, high) = if low.is_finite() && high > low {
        let pad = (high - low) * 0.1;
        (low - pad, high + pad)
    } else if low.is_finite() {
        (low - 0.5, low + 0.5)
    } else {
        (0.0, 1.0)
    };

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(
            format!(
                "Q9: Average Total Goals per Season - England vs Italy (Since {})",
                data.since
            ),
            style::bold(14),
        )
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d((first - 1)..(last + 1), low..high)?;

    chart
        .configure_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(style::grid_color())
        .x_labels(((last - first) as usize + 3).min(30))
        .x_label_formatter(&|season: &i64| season.to_string())
        .y_label_formatter(&|y: &f64| format!("{:.2}", y))
        .x_desc("Season")
        .y_desc("Average Total Goals")
        .axis_desc_style(style::bold(12))
        .label_style(style::regular(10))
        .draw()?;

    // Subtitle at the top of the plotting area
    let (left, top) = chart.backend_coord(&(first - 1, high));
    let (right, _) = chart.backend_coord(&(last + 1, high));
    root.draw(&Text::new(
        "(Testing the Catenaccio Hypothesis)",
        ((left + right) / 2, top + 6),
        style::bold(12).pos(Pos::new(HPos::Center, VPos::Top)),
    ))?;

    let england: Vec<(i64, f64)> = data
        .rows
        .iter()
        .filter(|r| r.england_avg.is_finite())
        .map(|r| (r.season, r.england_avg))
        .collect();
    let italy: Vec<(i64, f64)> = data
        .rows
        .iter()
        .filter(|r| r.italy_avg.is_finite())
        .map(|r| (r.season, r.italy_avg))
        .collect();

    let england_color = colors.england;
    chart
        .draw_series(LineSeries::new(england.clone(), england_color.stroke_width(2)))?
        .label("England")
        .legend(move |(x, y)| {
            EmptyElement::at((x + 10, y))
                + PathElement::new(vec![(-10, 0), (10, 0)], england_color.stroke_width(2))
                + Circle::new((0, 0), MARKER_SIZE, england_color.filled())
        });
    chart.draw_series(
        england
            .iter()
            .map(|&point| Circle::new(point, MARKER_SIZE, england_color.filled())),
    )?;

    let italy_color = colors.italy;
    chart
        .draw_series(LineSeries::new(italy.clone(), italy_color.stroke_width(2)))?
        .label("Italy")
        .legend(move |(x, y)| {
            EmptyElement::at((x + 10, y))
                + PathElement::new(vec![(-10, 0), (10, 0)], italy_color.stroke_width(2))
                + Rectangle::new(
                    [(-MARKER_SIZE, -MARKER_SIZE), (MARKER_SIZE, MARKER_SIZE)],
                    italy_color.filled(),
                )
        });
    chart.draw_series(italy.iter().map(|&point| {
        EmptyElement::at(point)
            + Rectangle::new(
                [(-MARKER_SIZE, -MARKER_SIZE), (MARKER_SIZE, MARKER_SIZE)],
                italy_color.filled(),
            )
    }))?;

    style::draw_legend(&mut chart)?;

    root.present()?;
    Ok(())
}
