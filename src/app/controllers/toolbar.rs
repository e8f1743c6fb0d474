use std::sync::OnceLock;

use regex_lite::Regex;

use crate::app::domain::attributes::{CharAttributes, is_valid_font_size};
use crate::app::infrastructure::error::{AppError, Result};

/// The font family and size fields a front-end displays.
///
/// Document-to-control updates flow through this trait only; edits made in
/// the controls come back as explicit formatting calls.
pub trait FormattingControls {
    fn displayed_font_family(&self) -> &str;
    fn displayed_font_size(&self) -> u32;
    fn show_font_family(&mut self, family: &str);
    fn show_font_size(&mut self, size: u32);
}

/// In-memory state of the formatting toolbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarState {
    font_family: String,
    font_size: u32,
    /// Last size accepted from the size field, restored on bad input.
    previous_font_size: u32,
}

impl ToolbarState {
    pub fn new(defaults: &CharAttributes) -> Self {
        Self {
            font_family: defaults.family.clone(),
            font_size: defaults.size,
            previous_font_size: defaults.size,
        }
    }

    /// Validate text typed into the size field.
    ///
    /// On success the field keeps the new size; on failure it falls back to
    /// the previous accepted size and the error is returned for display.
    pub fn accept_font_size_input(&mut self, input: &str) -> Result<u32> {
        match parse_font_size(input) {
            Ok(size) => {
                self.font_size = size;
                self.previous_font_size = size;
                Ok(size)
            }
            Err(e) => {
                self.font_size = self.previous_font_size;
                Err(e)
            }
        }
    }
}

impl FormattingControls for ToolbarState {
    fn displayed_font_family(&self) -> &str {
        &self.font_family
    }

    fn displayed_font_size(&self) -> u32 {
        self.font_size
    }

    fn show_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    fn show_font_size(&mut self, size: u32) {
        self.font_size = size;
    }
}

fn digits_only() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+$").expect("static regex"))
}

/// Parse a font size typed by the user: digits only, between 1 and
/// `MAX_FONT_SIZE`.
pub fn parse_font_size(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    if !digits_only().is_match(trimmed) {
        return Err(AppError::InvalidFontSize(input.to_string()));
    }
    match trimmed.parse::<u32>() {
        Ok(size) if is_valid_font_size(size) => Ok(size),
        _ => Err(AppError::InvalidFontSize(input.to_string())),
    }
}

/// Sizes offered in the size drop-down.
pub fn font_size_choices() -> Vec<u32> {
    (2..100).step_by(2).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::attributes::MAX_FONT_SIZE;

    #[test]
    fn test_parse_font_size() {
        assert_eq!(parse_font_size("14").unwrap(), 14);
        assert_eq!(parse_font_size(" 8 ").unwrap(), 8);
        assert!(parse_font_size("0").is_err());
        assert!(parse_font_size("12pt").is_err());
        assert!(parse_font_size("-4").is_err());
        assert!(parse_font_size("").is_err());
        assert!(parse_font_size("99999999999").is_err());
    }

    #[test]
    fn test_font_size_upper_bound() {
        assert_eq!(parse_font_size("1638").unwrap(), MAX_FONT_SIZE);
        assert!(parse_font_size("1639").is_err());
        assert!(parse_font_size("4000000000").is_err());

        let mut toolbar = ToolbarState::new(&CharAttributes::default());
        assert!(toolbar.accept_font_size_input("4000000000").is_err());
        assert_eq!(toolbar.displayed_font_size(), 12);
    }

    #[test]
    fn test_bad_input_restores_previous_size() {
        let mut toolbar = ToolbarState::new(&CharAttributes::default());
        assert_eq!(toolbar.accept_font_size_input("20").unwrap(), 20);
        assert!(toolbar.accept_font_size_input("big").is_err());
        assert_eq!(toolbar.displayed_font_size(), 20);
    }

    #[test]
    fn test_font_size_choices_are_even() {
        let sizes = font_size_choices();
        assert_eq!(sizes.first(), Some(&2));
        assert_eq!(sizes.last(), Some(&98));
        assert!(sizes.iter().all(|s| s % 2 == 0));
    }
}
