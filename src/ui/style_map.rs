use std::collections::HashMap;

use fltk::enums::{Color, Font};
use fltk::text::StyleTableEntry;

use crate::app::domain::attributes::CharAttributes;

/// FLTK style characters run from 'A' upward; this keeps them in ASCII letters.
const MAX_STYLES: usize = 58;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    Sans,
    Serif,
    Mono,
}

fn face_of(family: &str) -> Face {
    let family = family.to_ascii_lowercase();
    if family.contains("courier") || family.contains("mono") || family.contains("consolas") {
        Face::Mono
    } else if family.contains("times") || family.contains("georgia") || (family.contains("serif") && !family.contains("sans")) {
        Face::Serif
    } else {
        Face::Sans
    }
}

/// Closest built-in FLTK font for a run. FLTK only ships three faces, and
/// its style table has no underline flag, so underline is not drawn.
pub fn fltk_font(attrs: &CharAttributes) -> Font {
    match (face_of(&attrs.family), attrs.bold, attrs.italic) {
        (Face::Sans, false, false) => Font::Helvetica,
        (Face::Sans, true, false) => Font::HelveticaBold,
        (Face::Sans, false, true) => Font::HelveticaItalic,
        (Face::Sans, true, true) => Font::HelveticaBoldItalic,
        (Face::Serif, false, false) => Font::Times,
        (Face::Serif, true, false) => Font::TimesBold,
        (Face::Serif, false, true) => Font::TimesItalic,
        (Face::Serif, true, true) => Font::TimesBoldItalic,
        (Face::Mono, false, false) => Font::Courier,
        (Face::Mono, true, false) => Font::CourierBold,
        (Face::Mono, false, true) => Font::CourierItalic,
        (Face::Mono, true, true) => Font::CourierBoldItalic,
    }
}

/// Maps character attributes to FLTK style characters ('A', 'B', 'C', ...).
/// Grows the StyleTableEntry table as new attribute sets show up.
pub struct StyleMap {
    attrs_to_char: HashMap<CharAttributes, char>,
    entries: Vec<StyleTableEntry>,
}

impl StyleMap {
    pub fn new(defaults: &CharAttributes) -> Self {
        let mut map = Self {
            attrs_to_char: HashMap::new(),
            entries: Vec::new(),
        };
        map.get_or_insert(defaults);
        map
    }

    /// Style character for `attrs`, adding an entry if needed. Once the
    /// table is full new attribute sets fall back to the first style.
    pub fn get_or_insert(&mut self, attrs: &CharAttributes) -> char {
        if let Some(&ch) = self.attrs_to_char.get(attrs) {
            return ch;
        }
        let idx = self.entries.len();
        if idx >= MAX_STYLES {
            return 'A';
        }
        let ch = (b'A' + idx as u8) as char;
        self.entries.push(StyleTableEntry {
            color: Color::Foreground,
            font: fltk_font(attrs),
            size: attrs.size.min(i32::MAX as u32) as i32,
        });
        self.attrs_to_char.insert(attrs.clone(), ch);
        ch
    }

    pub fn entries(&self) -> &[StyleTableEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_attributes_share_a_style() {
        let plain = CharAttributes::default();
        let bold = plain.clone().with_bold(true);
        let mut map = StyleMap::new(&plain);
        assert_eq!(map.get_or_insert(&plain), 'A');
        assert_eq!(map.get_or_insert(&bold), 'B');
        assert_eq!(map.get_or_insert(&bold), 'B');
        assert_eq!(map.entries().len(), 2);
    }

    #[test]
    fn test_font_faces() {
        let times = CharAttributes::new("Times New Roman", 12).with_italic(true);
        assert_eq!(fltk_font(&times), Font::TimesItalic);
        let arial = CharAttributes::new("Arial", 12).with_bold(true);
        assert_eq!(fltk_font(&arial), Font::HelveticaBold);
        let mono = CharAttributes::new("Courier New", 12);
        assert_eq!(fltk_font(&mono), Font::Courier);
    }
}
