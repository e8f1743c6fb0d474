pub const DEFAULT_FONT_FAMILY: &str = "Times New Roman";
pub const DEFAULT_FONT_SIZE: u32 = 12;
/// Largest font size in points. RTF stores sizes as signed 16-bit
/// half-points.
pub const MAX_FONT_SIZE: u32 = 1638;

/// Whether `size` can be applied to text and written to a styled file.
pub fn is_valid_font_size(size: u32) -> bool {
    (1..=MAX_FONT_SIZE).contains(&size)
}

/// Character-level formatting carried by every run of a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharAttributes {
    pub family: String,
    pub size: u32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl CharAttributes {
    pub fn new(family: impl Into<String>, size: u32) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
            italic: false,
            underline: false,
        }
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    /// True when no emphasis flag is set.
    pub fn is_plain(&self) -> bool {
        !self.bold && !self.italic && !self.underline
    }
}

impl Default for CharAttributes {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE)
    }
}

/// A single formatting change requested through the toolbar or a shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeChange {
    FontFamily(String),
    FontSize(u32),
    Bold(bool),
    Italic(bool),
    Underline(bool),
}

impl AttributeChange {
    pub fn apply(&self, attrs: &mut CharAttributes) {
        match self {
            AttributeChange::FontFamily(name) => attrs.family = name.clone(),
            AttributeChange::FontSize(size) => attrs.size = *size,
            AttributeChange::Bold(on) => attrs.bold = *on,
            AttributeChange::Italic(on) => attrs.italic = *on,
            AttributeChange::Underline(on) => attrs.underline = *on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_attributes() {
        let attrs = CharAttributes::default();
        assert_eq!(attrs.family, "Times New Roman");
        assert_eq!(attrs.size, 12);
        assert!(attrs.is_plain());
    }

    #[test]
    fn test_apply_change() {
        let mut attrs = CharAttributes::default();
        AttributeChange::Bold(true).apply(&mut attrs);
        AttributeChange::FontFamily("Arial".to_string()).apply(&mut attrs);
        AttributeChange::FontSize(18).apply(&mut attrs);
        assert!(attrs.bold);
        assert!(!attrs.is_plain());
        assert_eq!(attrs.family, "Arial");
        assert_eq!(attrs.size, 18);
    }
}
