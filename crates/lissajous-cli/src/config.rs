//! Startup configuration: color table, default settings, title.
//!
//! Everything here is resolved once in `main` and then handed to the app by
//! value; nothing is read from globals afterwards.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context;
use lissajous::{ColorTable, PlotSettings};

/// File name searched for next to the executable.
pub const COLORS_FILE: &str = "colors.json";

/// Table compiled into the binary, used when no file is found.
pub const BUILTIN_COLORS: &str = include_str!("../assets/colors.json");

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Where the color table came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSource {
    File(PathBuf),
    Builtin,
}

impl std::fmt::Display for ColorSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorSource::File(path) => write!(f, "{}", path.display()),
            ColorSource::Builtin => write!(f, "built-in table"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub colors: ColorTable,
    pub color_source: ColorSource,
    pub defaults: PlotSettings,
}

impl AppConfig {
    /// Locate and load the color table, then pair it with the default settings.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&candidate_paths())
    }

    /// The first candidate that is a file wins; with none, the built-in table.
    ///
    /// A file that exists but can't be used is an error, not a reason to try
    /// the next candidate.
    pub fn load_from(candidates: &[PathBuf]) -> anyhow::Result<Self> {
        match candidates.iter().find(|p| p.is_file()) {
            Some(path) => Self::from_file(path),
            None => Self::builtin(),
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let colors = ColorTable::load(path)
            .with_context(|| format!("loading color table {}", path.display()))?;
        Self::from_parts(colors, ColorSource::File(path.to_path_buf()), PlotSettings::default())
    }

    pub fn builtin() -> anyhow::Result<Self> {
        let colors = ColorTable::from_json_str(BUILTIN_COLORS)
            .context("parsing built-in color table")?;
        Self::from_parts(colors, ColorSource::Builtin, PlotSettings::default())
    }

    /// Fails if the defaults name a color the table doesn't have.
    pub fn from_parts(
        colors: ColorTable,
        color_source: ColorSource,
        defaults: PlotSettings,
    ) -> anyhow::Result<Self> {
        defaults
            .check_against(&colors)
            .with_context(|| format!("checking default settings against {}", color_source))?;
        for name in colors.skipped() {
            log::warn!("{}: color {:?} has a non-string value, skipped", color_source, name);
        }
        for entry in colors.unparsed() {
            log::warn!(
                "{}: color {:?} = {:?} is not a color the renderer knows",
                color_source,
                entry.name,
                entry.value
            );
        }
        Ok(Self {
            colors,
            color_source,
            defaults,
        })
    }

    pub fn title(&self) -> String {
        format!("Lissajous figure generator. Version {}", VERSION)
    }
}

/// Places a color table may live, in lookup order.
///
/// `colors.json` next to the executable comes first (an installed copy), then
/// `assets/colors.json` under the working directory (running from a checkout).
pub fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(exe) = env::current_exe() {
        if let Some(dir) = exe.parent() {
            paths.push(dir.join(COLORS_FILE));
        }
    }

    if let Ok(cwd) = env::current_dir() {
        paths.push(cwd.join("assets").join(COLORS_FILE));
    }

    paths
}
