//! SVG output - turn a figure into a standalone SVG document.
//!
//! The document is the single drawing format: the terminal preview and the
//! PNG/JPEG export both rasterize it, so what is saved is what was shown.
//!
//! ## Rust Lesson #12: `String` vs `&str`
//!
//! `String` is an owned, growable buffer (we build the document in one);
//! `&str` is a borrowed view into someone else's text (the color value we
//! only need to read).

use std::fmt::Write;

use crate::generator::Figure;
use crate::geometry::{Bounds, Viewport};
use crate::settings::PlotSettings;

/// Canvas width, in points, that line widths are specified against
/// (a 4-inch figure at 72 dpi).
pub const REFERENCE_WIDTH_PT: f64 = 288.0;

/// Fraction of the data extent left empty on each side of the curve.
pub const DATA_MARGIN: f64 = 0.05;

/// Stroke style for the curve.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle<'a> {
    pub color: &'a str,
    /// Width in points at `REFERENCE_WIDTH_PT`; scaled to the canvas.
    pub width: f64,
}

impl<'a> LineStyle<'a> {
    pub fn from_settings(settings: &'a PlotSettings) -> Self {
        Self {
            color: &settings.color,
            width: settings.width as f64,
        }
    }
}

/// Pixel dimensions of the drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Scale factor from points to canvas pixels.
    pub fn px_per_pt(&self) -> f64 {
        self.width as f64 / REFERENCE_WIDTH_PT
    }
}

/// Render a figure as an SVG document on a white background.
///
/// The curve is drawn as one `<polyline>`; samples that are not finite are
/// dropped. A figure with no drawable samples yields the background only.
pub fn figure_to_svg(figure: &Figure, style: &LineStyle<'_>, canvas: Canvas) -> String {
    let (w, h) = (canvas.width, canvas.height);

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
<rect width="100%" height="100%" fill="white"/>
"#
    );

    if let Some(bounds) = figure.bounds() {
        let points = polyline_points(figure, bounds, canvas);
        if !points.is_empty() {
            let _ = writeln!(
                svg,
                r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{:.3}" stroke-linejoin="round" stroke-linecap="round"/>"#,
                points,
                escape_attr(style.color),
                style.width * canvas.px_per_pt(),
            );
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Build the `points` attribute: "x1,y1 x2,y2 ...".
fn polyline_points(figure: &Figure, bounds: Bounds, canvas: Canvas) -> String {
    let viewport = Viewport::fit(
        bounds.non_degenerate().with_margin(DATA_MARGIN),
        canvas.width as f64,
        canvas.height as f64,
    );

    figure
        .points()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .map(|p| viewport.map(p))
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Color values come from a user-editable config file.
fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
