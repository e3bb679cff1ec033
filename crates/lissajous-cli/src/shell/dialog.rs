//! Save prompt state.

use std::path::PathBuf;

use crate::export::{ExportFormat, resolve_target};

#[derive(Debug, Clone, PartialEq)]
pub struct SaveDialog {
    file_name: String,
    filter: ExportFormat,
}

impl SaveDialog {
    pub fn new(file_name: impl Into<String>, filter: ExportFormat) -> Self {
        Self {
            file_name: file_name.into(),
            filter,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn filter(&self) -> ExportFormat {
        self.filter
    }

    pub fn type_char(&mut self, c: char) {
        if !c.is_control() {
            self.file_name.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.file_name.pop();
    }

    pub fn clear(&mut self) {
        self.file_name.clear();
    }

    /// Switch the format filter. If the name carries the old filter's
    /// extension, swap it for the new one.
    pub fn toggle_filter(&mut self) {
        let old = self.filter;
        self.filter = old.toggled();

        let suffix = format!(".{}", old.extension());
        if let Some(stem) = self.file_name.strip_suffix(suffix.as_str()) {
            self.file_name = format!("{}.{}", stem, self.filter.extension());
        }
    }

    /// Target path and format, or `None` when confirming should do nothing.
    pub fn resolve(&self) -> Option<(PathBuf, ExportFormat)> {
        resolve_target(&self.file_name, self.filter)
    }
}
