//! Shared chart styling and layout helpers

use crate::soccer::error::Result;
use crate::soccer::pdf_backend::PdfBackend;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::{CoordTranslate, Shift};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontStyle, FontTransform};
use std::ops::Range;

pub const FONT: &str = "sans-serif";

/// Grid lines are drawn at this opacity
pub const GRID_ALPHA: f64 = 0.3;

/// Width of one bar in a grouped pair, in category units
pub const GROUPED_BAR_WIDTH: f64 = 0.35;

pub type CategoryChart<'a> =
    ChartContext<'a, PdfBackend, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

pub fn bold(size: u32) -> TextStyle<'static> {
    (FONT, size).into_font().style(FontStyle::Bold).into()
}

pub fn regular(size: u32) -> TextStyle<'static> {
    (FONT, size).into_font().into()
}

pub fn grid_color() -> RGBAColor {
    RGBColor(176, 176, 176).mix(GRID_ALPHA)
}

/// x range with one slot per category, centered on 0..n
pub fn category_axis(n: usize) -> Range<f64> {
    -0.5..(n.max(1) as f64 - 0.5)
}

/// y range from zero with headroom above the largest value
pub fn value_axis(max: f64) -> Range<f64> {
    if max > 0.0 && max.is_finite() {
        0.0..max * 1.1
    } else {
        0.0..1.0
    }
}

/// Label integer positions only
pub fn integer_label(x: &f64) -> String {
    if (x - x.round()).abs() < 1e-6 {
        format!("{}", x.round() as i64)
    } else {
        String::new()
    }
}

/// Bar centered at `x` (plus `offset`) rising from zero
pub fn bar<S: Into<ShapeStyle>>(
    x: f64,
    offset: f64,
    width: f64,
    height: f64,
    style: S,
) -> Rectangle<(f64, f64)> {
    let center = x + offset;
    Rectangle::new(
        [(center - width / 2.0, 0.0), (center + width / 2.0, height)],
        style,
    )
}

/// Fill and black edge for one bar series
pub fn edged_bars(
    chart: &mut CategoryChart<'_>,
    bars: &[(f64, f64)],
    offset: f64,
    width: f64,
    fill: RGBAColor,
    label: &str,
) -> Result<()> {
    chart
        .draw_series(
            bars.iter()
                .map(|&(x, height)| bar(x, offset, width, height, fill.filled())),
        )?
        .label(label)
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 14, y + 5)], fill.filled()));

    chart.draw_series(
        bars.iter()
            .map(|&(x, height)| bar(x, offset, width, height, BLACK.stroke_width(1))),
    )?;
    Ok(())
}

/// Legend box in the upper right corner of the plotting area
pub fn draw_legend<CT: CoordTranslate>(chart: &mut ChartContext<'_, PdfBackend, CT>) -> Result<()> {
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.5))
        .label_font(regular(11))
        .draw()?;
    Ok(())
}

/// Category names under a categorical x axis
///
/// `root` must be the full page area so backend coordinates line up.
/// Rotated labels read bottom to top and end just under the axis.
pub fn draw_category_labels(
    root: &DrawingArea<PdfBackend, Shift>,
    chart: &CategoryChart<'_>,
    labels: &[String],
    size: u32,
    rotated: bool,
) -> Result<()> {
    let style = if rotated {
        regular(size)
            .transform(FontTransform::Rotate270)
            .pos(Pos::new(HPos::Right, VPos::Center))
    } else {
        regular(size).pos(Pos::new(HPos::Center, VPos::Top))
    };

    for (i, label) in labels.iter().enumerate() {
        let (x, y) = chart.backend_coord(&(i as f64, 0.0));
        root.draw(&Text::new(label.as_str(), (x, y + 8), style.clone()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotters::element::PointCollection;

    #[test]
    fn test_integer_label() {
        assert_eq!(integer_label(&3.0), "3");
        assert_eq!(integer_label(&-2.0), "-2");
        assert_eq!(integer_label(&0.5), "");
    }

    #[test]
    fn test_axes() {
        assert_eq!(category_axis(4), -0.5..3.5);
        assert_eq!(category_axis(0), -0.5..0.5);
        let values = value_axis(10.0);
        assert_eq!(values.start, 0.0);
        assert!((values.end - 11.0).abs() < 1e-9);
        assert_eq!(value_axis(0.0), 0.0..1.0);
        assert_eq!(value_axis(f64::NAN), 0.0..1.0);
    }

    #[test]
    fn test_bar_geometry() {
        let rect = bar(2.0, -GROUPED_BAR_WIDTH / 2.0, GROUPED_BAR_WIDTH, 5.0, BLACK.filled());
        let points: Vec<(f64, f64)> = rect.point_iter().to_vec();
        assert!((points[0].0 - 1.65).abs() < 1e-9);
        assert!((points[1].0 - 2.0).abs() < 1e-9);
        assert_eq!(points[1].1, 5.0);
    }
}
