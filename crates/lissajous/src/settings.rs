//! Plot settings: what to sample plus how to stroke it.

use std::ops::RangeInclusive;

use crate::color::{ColorTable, parse_color};
use crate::generator::{DEFAULT_RESOLUTION, GenerationParameters, MIN_RESOLUTION};

/// Line widths offered by the width selector.
pub const LINE_WIDTHS: RangeInclusive<u32> = 1..=4;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("resolution must be at least {min}, got {got}", min = MIN_RESOLUTION)]
    Resolution { got: usize },
    #[error("line width must be between 1 and 4, got {0}")]
    Width(u32),
    #[error("unrecognized line color {0:?}")]
    Color(String),
    #[error("default color {0:?} is not in the color table")]
    ColorNotInTable(String),
}

/// Everything needed to draw one figure.
///
/// Built once from defaults at startup and rebuilt from the form on every
/// update; never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSettings {
    pub params: GenerationParameters,
    /// Color value as stored in the color table (e.g. `"midnightblue"`).
    pub color: String,
    pub width: u32,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            params: GenerationParameters {
                resolution: DEFAULT_RESOLUTION,
                freq_x: 2.0,
                freq_y: 3.0,
                phase_shift: 0.0,
            },
            color: "midnightblue".to_string(),
            width: 2,
        }
    }
}

impl PlotSettings {
    /// Check the parts the generator and renderer can't.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.params.resolution < MIN_RESOLUTION {
            return Err(SettingsError::Resolution {
                got: self.params.resolution,
            });
        }
        if !LINE_WIDTHS.contains(&self.width) {
            return Err(SettingsError::Width(self.width));
        }
        if parse_color(&self.color).is_none() {
            return Err(SettingsError::Color(self.color.clone()));
        }
        Ok(())
    }

    /// Defaults must name a color the selector can show.
    pub fn check_against(&self, colors: &ColorTable) -> Result<(), SettingsError> {
        self.validate()?;
        match colors.index_of_value(&self.color) {
            Some(_) => Ok(()),
            None => Err(SettingsError::ColorNotInTable(self.color.clone())),
        }
    }
}
