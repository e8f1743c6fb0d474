//! RTF codec for the styled file format.
//!
//! Only character formatting is carried: font family, size, bold, italic
//! and underline. Paragraph formatting, colors, pictures and other
//! destinations are skipped on read and never written.

mod reader;
mod writer;

pub use reader::read_rtf;
pub use writer::{to_rtf_string, write_rtf};

/// Windows-1252 code points for bytes 0x80..=0x9F; the rest map to Latin-1.
const CP1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{FFFD}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{FFFD}', '\u{017D}', '\u{FFFD}',
    '\u{FFFD}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{FFFD}', '\u{017E}', '\u{0178}',
];

pub(crate) fn cp1252_to_char(byte: u8) -> char {
    match byte {
        0x80..=0x9F => CP1252_HIGH[(byte - 0x80) as usize],
        _ => byte as char,
    }
}
