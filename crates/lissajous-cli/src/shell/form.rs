//! Parameter form: text fields with input masks, two selectors, two actions.
//!
//! Masks are checked on every edit, so a field can only ever hold text that
//! is a prefix of something valid. Turning that text into numbers happens
//! once, when the figure is updated.

use std::f64::consts::TAU;

use lissajous::{ColorTable, GenerationParameters, LINE_WIDTHS, PlotSettings};

/// Largest point count the form passes on. Above this a single update would
/// stall the UI for seconds.
pub const MAX_RESOLUTION: usize = 1_000_000;

/// What an edited text must keep matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMask {
    /// Digits with at most one decimal point: `[0-9]*\.?[0-9]*`.
    Decimal,
    /// Digits without a leading zero: `[1-9][0-9]*`, or empty while editing.
    PositiveInteger,
}

impl InputMask {
    pub fn accepts(self, text: &str) -> bool {
        match self {
            InputMask::Decimal => {
                let mut seen_point = false;
                text.chars().all(|c| match c {
                    '0'..='9' => true,
                    '.' if !seen_point => {
                        seen_point = true;
                        true
                    }
                    _ => false,
                })
            }
            InputMask::PositiveInteger => {
                let mut chars = text.chars();
                match chars.next() {
                    None => true,
                    Some('1'..='9') => chars.all(|c| c.is_ascii_digit()),
                    Some(_) => false,
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("{field}: {text:?} is not a number")]
    NotANumber { field: &'static str, text: String },
    #[error("{field}: value is too large")]
    TooLarge { field: &'static str },
}

/// Focusable rows, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    FreqX,
    FreqY,
    PhaseShift,
    Resolution,
    Color,
    Width,
    UpdateButton,
    SaveButton,
}

impl FieldId {
    pub const ALL: [FieldId; 8] = [
        FieldId::FreqX,
        FieldId::FreqY,
        FieldId::PhaseShift,
        FieldId::Resolution,
        FieldId::Color,
        FieldId::Width,
        FieldId::UpdateButton,
        FieldId::SaveButton,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FieldId::FreqX => "Frequency X",
            FieldId::FreqY => "Frequency Y",
            FieldId::PhaseShift => "Phase shift",
            FieldId::Resolution => "Points",
            FieldId::Color => "Line color",
            FieldId::Width => "Line width",
            FieldId::UpdateButton => "Update figure",
            FieldId::SaveButton => "Save figure",
        }
    }

    pub fn is_button(self) -> bool {
        matches!(self, FieldId::UpdateButton | FieldId::SaveButton)
    }
}

/// A single-line text input guarded by a mask.
#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    text: String,
    mask: InputMask,
}

impl TextField {
    /// Starting text that doesn't pass the mask is dropped.
    pub fn new(text: impl Into<String>, mask: InputMask) -> Self {
        let text = text.into();
        let text = if mask.accepts(&text) { text } else { String::new() };
        Self { text, mask }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Append `c` if the result still matches the mask.
    pub fn insert(&mut self, c: char) -> bool {
        let mut candidate = self.text.clone();
        candidate.push(c);
        if self.mask.accepts(&candidate) {
            self.text = candidate;
            true
        } else {
            false
        }
    }

    /// Remove the last character. Every prefix of an accepted text is
    /// accepted by both masks, so this can't break the invariant.
    pub fn backspace(&mut self) {
        self.text.pop();
    }
}

/// The whole parameter form.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    freq_x: TextField,
    freq_y: TextField,
    phase_shift: TextField,
    resolution: TextField,
    color_index: usize,
    width: u32,
    focus: usize,
}

impl Form {
    /// Fill the form from `defaults`, preselecting the color whose value
    /// matches `defaults.color` (or the first one).
    pub fn new(defaults: &PlotSettings, colors: &ColorTable) -> Self {
        let p = &defaults.params;
        Self {
            freq_x: TextField::new(format_number(p.freq_x), InputMask::Decimal),
            freq_y: TextField::new(format_number(p.freq_y), InputMask::Decimal),
            phase_shift: TextField::new(format_number(p.phase_shift), InputMask::Decimal),
            resolution: TextField::new(p.resolution.to_string(), InputMask::PositiveInteger),
            color_index: colors.index_of_value(&defaults.color).unwrap_or(0),
            width: defaults.width.clamp(*LINE_WIDTHS.start(), *LINE_WIDTHS.end()),
            focus: 0,
        }
    }

    pub fn focused(&self) -> FieldId {
        FieldId::ALL[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FieldId::ALL.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = if self.focus == 0 {
            FieldId::ALL.len() - 1
        } else {
            self.focus - 1
        };
    }

    pub fn text_field(&self, id: FieldId) -> Option<&TextField> {
        match id {
            FieldId::FreqX => Some(&self.freq_x),
            FieldId::FreqY => Some(&self.freq_y),
            FieldId::PhaseShift => Some(&self.phase_shift),
            FieldId::Resolution => Some(&self.resolution),
            _ => None,
        }
    }

    fn text_field_mut(&mut self, id: FieldId) -> Option<&mut TextField> {
        match id {
            FieldId::FreqX => Some(&mut self.freq_x),
            FieldId::FreqY => Some(&mut self.freq_y),
            FieldId::PhaseShift => Some(&mut self.phase_shift),
            FieldId::Resolution => Some(&mut self.resolution),
            _ => None,
        }
    }

    /// Type into the focused field. Returns false if the field rejected it
    /// (or the focus isn't on a text field).
    pub fn type_char(&mut self, c: char) -> bool {
        let id = self.focused();
        self.text_field_mut(id).is_some_and(|f| f.insert(c))
    }

    pub fn backspace(&mut self) {
        let id = self.focused();
        if let Some(f) = self.text_field_mut(id) {
            f.backspace();
        }
    }

    /// Step the focused selector by `delta`, wrapping around.
    pub fn cycle(&mut self, delta: i32, colors: &ColorTable) {
        match self.focused() {
            FieldId::Color if !colors.is_empty() => {
                let n = colors.len() as i64;
                let i = (self.color_index as i64 + delta as i64).rem_euclid(n);
                self.color_index = i as usize;
            }
            FieldId::Width => {
                let lo = *LINE_WIDTHS.start() as i64;
                let n = (*LINE_WIDTHS.end() - *LINE_WIDTHS.start() + 1) as i64;
                let i = (self.width as i64 - lo + delta as i64).rem_euclid(n);
                self.width = (lo + i) as u32;
            }
            _ => {}
        }
    }

    pub fn color_index(&self) -> usize {
        self.color_index
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Parse the form into settings for the next update.
    ///
    /// The resolution is passed through as typed; a value below the
    /// generator's minimum is the generator's to reject.
    pub fn to_settings(&self, colors: &ColorTable) -> Result<PlotSettings, FieldError> {
        let freq_x = parse_decimal(FieldId::FreqX, &self.freq_x)?;
        let freq_y = parse_decimal(FieldId::FreqY, &self.freq_y)?;
        let phase_shift = parse_decimal(FieldId::PhaseShift, &self.phase_shift)?;
        let resolution = parse_resolution(&self.resolution)?;

        let color = colors
            .entries()
            .get(self.color_index)
            .map(|e| e.value.clone())
            .unwrap_or_default();

        Ok(PlotSettings {
            params: GenerationParameters {
                resolution,
                freq_x,
                freq_y,
                phase_shift,
            },
            color,
            width: self.width,
        })
    }
}

fn parse_decimal(id: FieldId, field: &TextField) -> Result<f64, FieldError> {
    let text = field.text();
    let value: f64 = text.parse().map_err(|_| FieldError::NotANumber {
        field: id.label(),
        text: text.to_string(),
    })?;
    // The generator multiplies by up to 2π; that product must stay finite too
    if !value.is_finite() || !(value * TAU).is_finite() {
        return Err(FieldError::TooLarge { field: id.label() });
    }
    Ok(value)
}

fn parse_resolution(field: &TextField) -> Result<usize, FieldError> {
    let label = FieldId::Resolution.label();
    let text = field.text();
    if text.is_empty() {
        return Err(FieldError::NotANumber {
            field: label,
            text: String::new(),
        });
    }
    // The mask guarantees digits only, so a parse failure is overflow
    let value: usize = text
        .parse()
        .map_err(|_| FieldError::TooLarge { field: label })?;
    if value > MAX_RESOLUTION {
        return Err(FieldError::TooLarge { field: label });
    }
    Ok(value)
}

/// `2.0` -> `"2"`, `0.5` -> `"0.5"`.
fn format_number(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> ColorTable {
        ColorTable::from_json_str(
            r##"{"Black": "black", "Midnight blue": "midnightblue", "Tomato": "#ff6347"}"##,
        )
        .unwrap()
    }

    fn form() -> Form {
        Form::new(&PlotSettings::default(), &colors())
    }

    fn focus(form: &mut Form, id: FieldId) {
        while form.focused() != id {
            form.focus_next();
        }
    }

    #[test]
    fn decimal_mask() {
        let m = InputMask::Decimal;
        for ok in ["", "0", "12", "1.5", ".5", "5.", ".", "007.250"] {
            assert!(m.accepts(ok), "should accept {ok:?}");
        }
        for bad in ["-1", "1.2.3", "1e5", "abc", " 1", "1,5", "..", "+2"] {
            assert!(!m.accepts(bad), "should reject {bad:?}");
        }
    }

    #[test]
    fn positive_integer_mask() {
        let m = InputMask::PositiveInteger;
        for ok in ["", "1", "9", "100", "2048"] {
            assert!(m.accepts(ok), "should accept {ok:?}");
        }
        for bad in ["0", "01", "-5", "1.0", "1a", " 3"] {
            assert!(!m.accepts(bad), "should reject {bad:?}");
        }
    }

    #[test]
    fn starts_with_defaults() {
        let f = form();
        assert_eq!(f.text_field(FieldId::FreqX).unwrap().text(), "2");
        assert_eq!(f.text_field(FieldId::FreqY).unwrap().text(), "3");
        assert_eq!(f.text_field(FieldId::PhaseShift).unwrap().text(), "0");
        assert_eq!(f.text_field(FieldId::Resolution).unwrap().text(), "100");
        assert_eq!(f.color_index(), 1);
        assert_eq!(f.width(), 2);
        assert_eq!(f.focused(), FieldId::FreqX);
    }

    #[test]
    fn defaults_round_trip_to_settings() {
        let s = form().to_settings(&colors()).unwrap();
        assert_eq!(s, PlotSettings::default());
    }

    #[test]
    fn typing_respects_mask() {
        let mut f = form();
        assert!(f.type_char('.'));
        assert!(f.type_char('5'));
        assert!(!f.type_char('.'));
        assert!(!f.type_char('x'));
        assert_eq!(f.text_field(FieldId::FreqX).unwrap().text(), "2.5");

        focus(&mut f, FieldId::Resolution);
        for _ in 0..3 {
            f.backspace();
        }
        assert!(!f.type_char('0'));
        assert!(f.type_char('7'));
        assert!(f.type_char('0'));
        assert_eq!(f.text_field(FieldId::Resolution).unwrap().text(), "70");
    }

    #[test]
    fn typing_on_selector_is_ignored() {
        let mut f = form();
        focus(&mut f, FieldId::Color);
        assert!(!f.type_char('1'));
        f.backspace();
        assert_eq!(f.color_index(), 1);
    }

    #[test]
    fn focus_wraps() {
        let mut f = form();
        f.focus_prev();
        assert_eq!(f.focused(), FieldId::SaveButton);
        f.focus_next();
        assert_eq!(f.focused(), FieldId::FreqX);
    }

    #[test]
    fn selectors_cycle_and_wrap() {
        let table = colors();
        let mut f = form();

        focus(&mut f, FieldId::Color);
        f.cycle(1, &table);
        assert_eq!(f.color_index(), 2);
        f.cycle(1, &table);
        assert_eq!(f.color_index(), 0);
        f.cycle(-1, &table);
        assert_eq!(f.color_index(), 2);

        focus(&mut f, FieldId::Width);
        f.cycle(2, &table);
        assert_eq!(f.width(), 4);
        f.cycle(1, &table);
        assert_eq!(f.width(), 1);
        f.cycle(-1, &table);
        assert_eq!(f.width(), 4);

        let s = f.to_settings(&table).unwrap();
        assert_eq!(s.color, "#ff6347");
        assert_eq!(s.width, 4);
    }

    #[test]
    fn incomplete_numbers_are_reported() {
        let table = colors();
        let mut f = form();
        f.backspace();
        assert!(f.type_char('.'));
        let err = f.to_settings(&table).unwrap_err();
        assert_eq!(
            err,
            FieldError::NotANumber {
                field: "Frequency X",
                text: ".".to_string()
            }
        );

        let mut f = form();
        focus(&mut f, FieldId::Resolution);
        for _ in 0..3 {
            f.backspace();
        }
        assert!(matches!(
            f.to_settings(&table),
            Err(FieldError::NotANumber { field: "Points", .. })
        ));
    }

    #[test]
    fn trailing_point_parses() {
        let mut f = form();
        assert!(f.type_char('.'));
        let s = f.to_settings(&colors()).unwrap();
        assert_eq!(s.params.freq_x, 2.0);
    }

    #[test]
    fn huge_values_are_too_large() {
        let table = colors();

        let mut f = form();
        for _ in 0..400 {
            f.type_char('9');
        }
        assert_eq!(
            f.to_settings(&table),
            Err(FieldError::TooLarge { field: "Frequency X" })
        );

        let mut f = form();
        focus(&mut f, FieldId::Resolution);
        for _ in 0..5 {
            f.type_char('0');
        }
        assert_eq!(
            f.to_settings(&table),
            Err(FieldError::TooLarge { field: "Points" })
        );
    }

    #[test]
    fn frequency_that_overflows_one_period_is_too_large() {
        let table = colors();

        let mut f = form();
        f.backspace();
        f.type_char('1');
        for _ in 0..308 {
            f.type_char('0');
        }
        // 1e308 itself is finite; 1e308 * 2π is not
        assert_eq!(
            f.to_settings(&table),
            Err(FieldError::TooLarge { field: "Frequency X" })
        );

        let mut f = form();
        f.backspace();
        f.type_char('1');
        for _ in 0..307 {
            f.type_char('0');
        }
        let s = f.to_settings(&table).unwrap();
        assert_eq!(s.params.freq_x, 1e307);
    }

    #[test]
    fn resolution_one_passes_through() {
        let mut f = form();
        focus(&mut f, FieldId::Resolution);
        for _ in 0..3 {
            f.backspace();
        }
        f.type_char('1');
        let s = f.to_settings(&colors()).unwrap();
        assert_eq!(s.params.resolution, 1);
    }
}
