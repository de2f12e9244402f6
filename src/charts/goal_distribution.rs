//! Page 1: how many goals English matches produce

use super::style::{self, CategoryChart};
use super::{ensure_rows, i64_values};
use crate::soccer::data::{with_total_goals, SEASON, TOTAL_GOALS};
use crate::soccer::error::Result;
use crate::soccer::pages::{DocumentWriter, PageSize};
use plotters::prelude::*;
use polars::prelude::*;

pub const PAGE: PageSize = PageSize::from_inches(12.0, 6.0);

const GAMES: &str = "num_games";

/// Bars are this wide on the goals axis
const BAR_WIDTH: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalCount {
    pub total_goals: i64,
    pub games: i64,
}

/// Match count per total-goals value, ascending by goals
#[derive(Debug, Clone, PartialEq)]
pub struct GoalDistribution {
    pub since: i64,
    pub rows: Vec<GoalCount>,
}

impl GoalDistribution {
    pub fn title(&self) -> String {
        format!(
            "Q2: Distribution of Total Goals per Game in England (Since {})",
            self.since
        )
    }

    pub fn total_games(&self) -> i64 {
        self.rows.iter().map(|r| r.games).sum()
    }
}

/// Count England matches per total goals for seasons from `since`
pub fn aggregate(england: &DataFrame, since: i64) -> Result<GoalDistribution> {
    let counts = with_total_goals(england)
        .filter(col(SEASON).gt_eq(lit(since)))
        .filter(col(TOTAL_GOALS).is_not_null())
        .group_by([col(TOTAL_GOALS)])
        .agg([len().cast(DataType::Int64).alias(GAMES)])
        .sort([TOTAL_GOALS], SortMultipleOptions::default())
        .collect()?;

    ensure_rows(&counts, "goal distribution")?;

    let goals = i64_values(&counts, TOTAL_GOALS)?;
    let games = i64_values(&counts, GAMES)?;
    let rows = goals
        .into_iter()
        .zip(games)
        .map(|(total_goals, games)| GoalCount { total_goals, games })
        .collect();

    Ok(GoalDistribution { since, rows })
}

/// Draw the distribution as one bar per total-goals value
pub fn render(data: &GoalDistribution, color: RGBColor, writer: &mut DocumentWriter) -> Result<()> {
    let root = writer.add_page("Q2", PAGE)?.into_drawing_area();
    root.fill(&WHITE)?;

    let min_goals = data.rows.first().map(|r| r.total_goals).unwrap_or(0) as f64;
    let max_goals = data.rows.last().map(|r| r.total_goals).unwrap_or(0) as f64;
    let max_games = data.rows.iter().map(|r| r.games).max().unwrap_or(0) as f64;

    let mut chart: CategoryChart = ChartBuilder::on(&root)
        .margin(20)
        .caption(data.title(), style::bold(14))
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(
            (min_goals - 0.6)..(max_goals + 0.6),
            style::value_axis(max_games),
        )?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(style::grid_color())
        .x_labels((max_goals - min_goals) as usize + 2)
        .x_label_formatter(&style::integer_label)
        .y_label_formatter(&|y: &f64| format!("{:.0}", y))
        .x_desc("Total Goals")
        .y_desc("Number of Games")
        .axis_desc_style(style::bold(12))
        .label_style(style::regular(10))
        .draw()?;

    chart.draw_series(
        data.rows
            .iter()
            .map(|r| style::bar(r.total_goals as f64, 0.0, BAR_WIDTH, r.games as f64, color.filled())),
    )?;
    chart.draw_series(data.rows.iter().map(|r| {
        style::bar(
            r.total_goals as f64,
            0.0,
            BAR_WIDTH,
            r.games as f64,
            BLACK.stroke_width(1),
        )
    }))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::fixtures::{table, table_with_gaps};
    use crate::soccer::error::ReportError;

    #[test]
    fn test_one_bar_per_distinct_total() {
        let england = table(
            &[
                (1979, 1, "A", "B", 9, 0),
                (1980, 1, "A", "B", 1, 0),
                (1980, 1, "C", "D", 2, 1),
                (1981, 2, "E", "F", 0, 1),
                (1985, 1, "B", "A", 0, 0),
                (1990, 1, "D", "C", 1, 2),
            ],
            true,
            true,
        );

        let dist = aggregate(&england, 1980).unwrap();
        assert_eq!(
            dist.rows,
            vec![
                GoalCount { total_goals: 0, games: 1 },
                GoalCount { total_goals: 1, games: 2 },
                GoalCount { total_goals: 3, games: 2 },
            ]
        );
        // 1979 row filtered out
        assert_eq!(dist.total_games(), 5);
    }

    #[test]
    fn test_total_goals_derived_when_absent() {
        let england = table(&[(1990, 1, "A", "B", 2, 2), (1990, 1, "B", "A", 3, 1)], false, false);
        let dist = aggregate(&england, 1980).unwrap();
        assert_eq!(dist.rows, vec![GoalCount { total_goals: 4, games: 2 }]);
    }

    #[test]
    fn test_missing_total_goals_not_counted() {
        let england = table_with_gaps(
            &[(1990, 1, "A", "B", 2, 2), (1990, 1, "B", "A", 3, 1), (1991, 1, "A", "B", 0, 1)],
            &[1],
            true,
            false,
        );
        let dist = aggregate(&england, 1980).unwrap();
        assert_eq!(
            dist.rows,
            vec![
                GoalCount { total_goals: 1, games: 1 },
                GoalCount { total_goals: 4, games: 1 },
            ]
        );
        assert_eq!(dist.total_games(), 2);
    }

    #[test]
    fn test_no_matches_since_is_empty_result() {
        let england = table(&[(1975, 1, "A", "B", 1, 0)], true, true);
        let err = aggregate(&england, 1980).unwrap_err();
        assert!(matches!(err, ReportError::EmptyResult(_)));
    }

    #[test]
    fn test_title_uses_since() {
        let dist = GoalDistribution {
            since: 1980,
            rows: vec![],
        };
        assert_eq!(
            dist.title(),
            "Q2: Distribution of Total Goals per Game in England (Since 1980)"
        );
    }

    #[test]
    fn test_render_adds_one_page() {
        let dist = GoalDistribution {
            since: 1980,
            rows: vec![
                GoalCount { total_goals: 0, games: 10 },
                GoalCount { total_goals: 1, games: 25 },
                GoalCount { total_goals: 2, games: 18 },
            ],
        };
        let mut writer = DocumentWriter::new("test");
        render(&dist, RGBColor(70, 130, 180), &mut writer).unwrap();
        assert_eq!(writer.page_count(), 1);
    }
}
