//! plotters drawing backend that paints onto one PDF page
//!
//! Backend coordinates are points (1 px = 1 pt) with the origin at the top-left
//! corner; PDF user space has its origin at the bottom-left, so every y value is
//! flipped against the page height.
//!
//! Text is set in the PDF built-in Helvetica faces, so no font files are read.
//! Transparency is approximated by blending the color over white.

use plotters_backend::text_anchor::{HPos, VPos};
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
    FontStyle, FontTransform,
};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    Color, IndirectFontRef, Line, Mm, PdfLayerReference, Point, Polygon, Pt, Rgb, TextMatrix,
};
use std::convert::Infallible;

const MM_PER_PT: f32 = 25.4 / 72.0;

/// Average Helvetica glyph advance as a fraction of the font size
const AVG_CHAR_WIDTH: f64 = 0.52;

/// Vertices used to approximate a circle
const CIRCLE_SEGMENTS: usize = 24;

/// Fonts registered once per document and shared by every page
#[derive(Debug, Clone)]
pub struct PageFonts {
    pub regular: IndirectFontRef,
    pub bold: IndirectFontRef,
}

/// A plotters backend bound to one PDF page layer
pub struct PdfBackend {
    layer: PdfLayerReference,
    fonts: PageFonts,
    size: (u32, u32),
}

impl PdfBackend {
    pub fn new(layer: PdfLayerReference, fonts: PageFonts, size: (u32, u32)) -> Self {
        Self {
            layer,
            fonts,
            size,
        }
    }

    fn point(&self, coord: BackendCoord) -> Point {
        let (x, y) = page_point(self.size.1, coord);
        Point::new(Mm(x * MM_PER_PT), Mm(y * MM_PER_PT))
    }

    fn set_stroke(&self, color: BackendColor, width: u32) {
        self.layer.set_outline_color(pdf_color(color));
        self.layer.set_outline_thickness(width.max(1) as f32);
    }

    fn stroke_path(&self, points: Vec<Point>, closed: bool) {
        self.layer.add_line(Line {
            points: points.into_iter().map(|p| (p, false)).collect(),
            is_closed: closed,
        });
    }

    fn fill_path(&self, points: Vec<Point>, color: BackendColor) {
        self.layer.set_fill_color(pdf_color(color));
        self.layer.add_polygon(Polygon {
            rings: vec![points.into_iter().map(|p| (p, false)).collect()],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }
}

impl DrawingBackend for PdfBackend {
    type ErrorType = Infallible;

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Infallible>> {
        Ok(())
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<Infallible>> {
        Ok(())
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        if color.alpha <= 0.0 {
            return Ok(());
        }
        let (x, y) = point;
        let corners = vec![
            self.point((x, y)),
            self.point((x + 1, y)),
            self.point((x + 1, y + 1)),
            self.point((x, y + 1)),
        ];
        self.fill_path(corners, color);
        Ok(())
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        let color = style.color();
        if color.alpha <= 0.0 {
            return Ok(());
        }
        self.set_stroke(color, style.stroke_width());
        self.stroke_path(vec![self.point(from), self.point(to)], false);
        Ok(())
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        let color = style.color();
        if color.alpha <= 0.0 {
            return Ok(());
        }
        let (x0, y0) = upper_left;
        let (x1, y1) = bottom_right;
        let corners = vec![
            self.point((x0, y0)),
            self.point((x1, y0)),
            self.point((x1, y1)),
            self.point((x0, y1)),
        ];

        if fill {
            self.fill_path(corners, color);
        } else {
            self.set_stroke(color, style.stroke_width());
            self.stroke_path(corners, true);
        }
        Ok(())
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        let color = style.color();
        if color.alpha <= 0.0 {
            return Ok(());
        }
        let points: Vec<Point> = path.into_iter().map(|c| self.point(c)).collect();
        if points.len() < 2 {
            return Ok(());
        }
        self.set_stroke(color, style.stroke_width());
        self.stroke_path(points, false);
        Ok(())
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        let color = style.color();
        if color.alpha <= 0.0 || radius == 0 {
            return Ok(());
        }
        let points: Vec<Point> = circle_vertices(center, radius)
            .into_iter()
            .map(|c| self.point(c))
            .collect();

        if fill {
            self.fill_path(points, color);
        } else {
            self.set_stroke(color, style.stroke_width());
            self.stroke_path(points, true);
        }
        Ok(())
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        let color = style.color();
        if color.alpha <= 0.0 {
            return Ok(());
        }
        let points: Vec<Point> = vert.into_iter().map(|c| self.point(c)).collect();
        if points.len() < 3 {
            return Ok(());
        }
        self.fill_path(points, color);
        Ok(())
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        let color = style.color();
        if color.alpha <= 0.0 || text.trim().is_empty() {
            return Ok(());
        }

        let size = style.size();
        let anchor = style.anchor();
        let clockwise: f64 = match style.transform() {
            FontTransform::Rotate90 => 90.0,
            FontTransform::Rotate180 => 180.0,
            FontTransform::Rotate270 => 270.0,
            _ => 0.0,
        };

        let width = text_width(text, size);
        let along = match anchor.h_pos {
            HPos::Left => 0.0,
            HPos::Center => -width / 2.0,
            HPos::Right => -width,
        };
        let across = match anchor.v_pos {
            VPos::Top => size * 0.8,
            VPos::Center => size * 0.35,
            VPos::Bottom => 0.0,
        };

        // Baseline start in backend space, offset rotated with the text
        let (sin, cos) = clockwise.to_radians().sin_cos();
        let start_x = pos.0 as f64 + along * cos - across * sin;
        let start_y = pos.1 as f64 + along * sin + across * cos;
        let (x, y) = page_point_f64(self.size.1, start_x, start_y);

        let font = match style.style() {
            FontStyle::Bold => &self.fonts.bold,
            _ => &self.fonts.regular,
        };

        self.layer.set_fill_color(pdf_color(color));
        self.layer.begin_text_section();
        self.layer.set_font(font, size as f32);
        self.layer.set_text_matrix(TextMatrix::TranslateRotate(
            Pt(x),
            Pt(y),
            ((360.0 - clockwise) % 360.0) as f32,
        ));
        self.layer.write_text(text, font);
        self.layer.end_text_section();
        Ok(())
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<Infallible>> {
        let size = style.size();
        let (w, h) = (text_width(text, size).ceil() as u32, size.ceil() as u32);
        Ok(match style.transform() {
            FontTransform::Rotate90 | FontTransform::Rotate270 => (h, w),
            _ => (w, h),
        })
    }
}

/// Map a backend coordinate to PDF points on a page of the given height
pub fn page_point(page_height: u32, coord: BackendCoord) -> (f32, f32) {
    page_point_f64(page_height, coord.0 as f64, coord.1 as f64)
}

fn page_point_f64(page_height: u32, x: f64, y: f64) -> (f32, f32) {
    (x as f32, (page_height as f64 - y) as f32)
}

/// Approximate rendered width of a string in Helvetica
pub fn text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * AVG_CHAR_WIDTH
}

/// Blend a translucent color over white
pub fn blend_over_white(color: BackendColor) -> (u8, u8, u8) {
    let alpha = color.alpha.clamp(0.0, 1.0);
    let blend = |c: u8| (c as f64 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
    let (r, g, b) = color.rgb;
    (blend(r), blend(g), blend(b))
}

fn pdf_color(color: BackendColor) -> Color {
    let (r, g, b) = blend_over_white(color);
    Color::Rgb(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}

fn circle_vertices(center: BackendCoord, radius: u32) -> Vec<BackendCoord> {
    let r = radius as f64;
    (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let theta = i as f64 / CIRCLE_SEGMENTS as f64 * std::f64::consts::TAU;
            (
                center.0 + (r * theta.cos()).round() as i32,
                center.1 + (r * theta.sin()).round() as i32,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_point_flips_y() {
        assert_eq!(page_point(432, (0, 0)), (0.0, 432.0));
        assert_eq!(page_point(432, (100, 432)), (100.0, 0.0));
        assert_eq!(page_point(432, (10, 32)), (10.0, 400.0));
    }

    #[test]
    fn test_blend_over_white() {
        let opaque = BackendColor {
            alpha: 1.0,
            rgb: (0, 0, 255),
        };
        assert_eq!(blend_over_white(opaque), (0, 0, 255));

        let translucent = BackendColor {
            alpha: 0.7,
            rgb: (0, 0, 255),
        };
        assert_eq!(blend_over_white(translucent), (77, 77, 255));

        let invisible = BackendColor {
            alpha: 0.0,
            rgb: (0, 0, 0),
        };
        assert_eq!(blend_over_white(invisible), (255, 255, 255));
    }

    #[test]
    fn test_text_width_scales_with_length_and_size() {
        assert_eq!(text_width("", 12.0), 0.0);
        assert!(text_width("Arsenal", 12.0) > text_width("Arsenal", 9.0));
        assert!(text_width("Tottenham Hotspur", 9.0) > text_width("Arsenal", 9.0));
    }

    #[test]
    fn test_circle_vertices_on_radius() {
        let points = circle_vertices((50, 50), 10);
        assert_eq!(points.len(), CIRCLE_SEGMENTS);
        for (x, y) in points {
            let d = (((x - 50).pow(2) + (y - 50).pow(2)) as f64).sqrt();
            assert!((d - 10.0).abs() <= 1.0);
        }
    }
}
