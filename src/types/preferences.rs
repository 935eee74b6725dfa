use serde::{Deserialize, Serialize};

/// Storage keys shared by every page of the reader.
pub const FONT_SIZE_KEY: &str = "fontSize";
pub const LINE_HEIGHT_KEY: &str = "lineHeight";
pub const FONT_FAMILY_KEY: &str = "fontFamily";
pub const LETTER_SPACING_KEY: &str = "letterSpacing";
pub const DARK_MODE_KEY: &str = "darkMode";

pub const DEFAULT_FONT_SIZE: f64 = 16.0;
pub const DEFAULT_LINE_HEIGHT: f64 = 1.8;
pub const DEFAULT_FONT_FAMILY: &str = "Georgia, serif";
pub const DEFAULT_LETTER_SPACING: f64 = 2.0;

/// Inclusive bounds of a numeric style attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const FONT_SIZE_RANGE: Range = Range::new(12.0, 30.0);
pub const LINE_HEIGHT_RANGE: Range = Range::new(1.2, 5.0);
pub const LETTER_SPACING_RANGE: Range = Range::new(1.0, 10.0);

/// Typography applied to the content container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StylePreferences {
    pub font_size: f64,
    pub line_height: f64,
    pub font_family: String,
    pub letter_spacing: f64,
}

impl Default for StylePreferences {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            line_height: DEFAULT_LINE_HEIGHT,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            letter_spacing: DEFAULT_LETTER_SPACING,
        }
    }
}

/// Parses the longest numeric prefix of `input`, the way a browser's
/// `parseFloat` does (`" 21px"` is 21, `"abc"` is `None`).
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        let value = if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Some(value);
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Reads a stored numeric preference, substituting `default` when the value
/// is absent, unparsable, zero or non-finite, then clamping into `range`.
pub fn stored_number_or(stored: Option<&str>, default: f64, range: Range) -> f64 {
    match stored.and_then(parse_float_prefix) {
        Some(v) if v.is_finite() && v != 0.0 => range.clamp(v),
        _ => default,
    }
}

/// Renders a number the way it is written to the store: shortest
/// round-trip form, no trailing `.0` for integral values.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}
