//! # lissajous
//!
//! Curve sampling, color tables and SVG output for Lissajous figures.
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level

pub mod color;
pub mod generator;
pub mod geometry;
pub mod settings;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use color::{ColorEntry, ColorError, ColorTable, Rgba, parse_color};
pub use generator::{
    CurveGenerator, DEFAULT_RESOLUTION, Figure, GenerationParameters, GeneratorError,
    MIN_RESOLUTION,
};
pub use geometry::{Bounds, Point, Viewport};
pub use settings::{LINE_WIDTHS, PlotSettings, SettingsError};
pub use svg::{Canvas, LineStyle, figure_to_svg};
