//! Rasterize figures with resvg.
//!
//! The figure is first written as an SVG document (`lissajous::svg`), then
//! parsed by usvg and painted onto a tiny-skia pixmap. The same image feeds
//! the terminal preview and the file export.

use image::{DynamicImage, RgbaImage};
use lissajous::{Canvas, Figure, LineStyle, PlotSettings, figure_to_svg};
use resvg::usvg;
use tiny_skia::Pixmap;

// 4:3, like a 4x3 inch figure; the preview is scaled down by the terminal protocol
pub const IMAGE_WIDTH: u32 = 1200;
pub const IMAGE_HEIGHT: u32 = 900;

pub const CANVAS: Canvas = Canvas {
    width: IMAGE_WIDTH,
    height: IMAGE_HEIGHT,
};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("generated SVG could not be parsed: {0}")]
    Svg(#[from] usvg::Error),
    #[error("cannot allocate a {0}x{1} pixmap")]
    Pixmap(u32, u32),
    #[error("pixmap size does not match image buffer")]
    Buffer,
}

/// Draw `figure` with the stroke from `settings`.
pub fn render_figure(
    figure: &Figure,
    settings: &PlotSettings,
    canvas: Canvas,
) -> Result<DynamicImage, RenderError> {
    let svg = figure_to_svg(figure, &LineStyle::from_settings(settings), canvas);
    render_svg(&svg, canvas)
}

/// Rasterize an SVG document at exactly `canvas` pixels.
pub fn render_svg(svg: &str, canvas: Canvas) -> Result<DynamicImage, RenderError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &options)?;

    let mut pixmap =
        Pixmap::new(canvas.width, canvas.height).ok_or(RenderError::Pixmap(canvas.width, canvas.height))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // The background is opaque, so premultiplied and straight RGBA agree
    let rgba = RgbaImage::from_raw(canvas.width, canvas.height, pixmap.take())
        .ok_or(RenderError::Buffer)?;

    Ok(DynamicImage::ImageRgba8(rgba))
}
