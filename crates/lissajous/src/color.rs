//! Display-name → color-value lookup table.
//!
//! The table is a flat JSON object:
//!
//! ```json
//! { "Midnight blue": "midnightblue", "Tomato": "#ff6347" }
//! ```
//!
//! Keys are what the user picks from; values are usually anything an SVG
//! `stroke` accepts (CSS color keywords, `#rgb`, `#rrggbb`, `rgb(...)`).
//! Every string pair is kept, even when the value isn't a color we can draw
//! with; such an entry is only refused once it is actually picked. Entries
//! keep file order because that is the order the selector shows them in.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
pub enum ColorError {
    #[error("failed to read color table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("color table is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("color table must be a JSON object of name -> color")]
    NotAnObject,
}

/// An 8-bit RGBA color parsed from a table value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

/// Parse an SVG/CSS color value.
pub fn parse_color(value: &str) -> Option<Rgba> {
    let c = svgtypes::Color::from_str(value.trim()).ok()?;
    Some(Rgba {
        red: c.red,
        green: c.green,
        blue: c.blue,
        alpha: c.alpha,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorEntry {
    pub name: String,
    pub value: String,
    /// `None` when `value` isn't a color the renderer understands.
    pub rgba: Option<Rgba>,
}

/// Ordered color table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTable {
    entries: Vec<ColorEntry>,
    /// Names whose value wasn't a string.
    skipped: Vec<String>,
}

impl ColorTable {
    /// Parse a table from JSON text.
    ///
    /// Only a document that isn't a JSON object fails. Pairs with a
    /// non-string value are left out and listed by `skipped`.
    pub fn from_json_str(json: &str) -> Result<Self, ColorError> {
        let root: Value = serde_json::from_str(json)?;
        let Value::Object(map) = root else {
            return Err(ColorError::NotAnObject);
        };
        Self::from_map(map)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ColorError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ColorError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    fn from_map(map: Map<String, Value>) -> Result<Self, ColorError> {
        let mut entries = Vec::with_capacity(map.len());
        let mut skipped = Vec::new();
        for (name, value) in map {
            let Value::String(value) = value else {
                skipped.push(name);
                continue;
            };
            let rgba = parse_color(&value);
            entries.push(ColorEntry { name, value, rgba });
        }

        Ok(Self { entries, skipped })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Entries whose value the renderer can't draw with.
    pub fn unparsed(&self) -> impl Iterator<Item = &ColorEntry> {
        self.entries.iter().filter(|e| e.rgba.is_none())
    }

    /// Index of the first entry whose value is `value`.
    ///
    /// Matches the literal value first, then falls back to comparing parsed
    /// colors so `"#191970"` finds an entry stored as `"midnightblue"`.
    pub fn index_of_value(&self, value: &str) -> Option<usize> {
        if let Some(i) = self.entries.iter().position(|e| e.value == value) {
            return Some(i);
        }
        let rgba = parse_color(value)?;
        self.entries.iter().position(|e| e.rgba == Some(rgba))
    }

    pub fn name_for_value(&self, value: &str) -> Option<&str> {
        self.index_of_value(value).map(|i| self.entries[i].name.as_str())
    }
}
