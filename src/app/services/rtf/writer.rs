use std::fmt::Write as _;
use std::io::Write;
use std::ops::Range;

use crate::app::domain::attributes::MAX_FONT_SIZE;
use crate::app::domain::styled_text::StyledText;
use crate::app::infrastructure::error::Result;

/// Serialize the characters in `range` with their formatting.
///
/// A range reaching past the end of `text` is rejected with
/// `AppError::FormatBoundary` before anything is written.
pub fn write_rtf<W: Write>(out: &mut W, text: &StyledText, range: Range<usize>) -> Result<()> {
    let selected = text.slice(range)?;
    out.write_all(to_rtf_string(&selected).as_bytes())?;
    out.flush()?;
    Ok(())
}

pub fn to_rtf_string(text: &StyledText) -> String {
    let mut fonts: Vec<&str> = Vec::new();
    for run in text.runs() {
        if !fonts.contains(&run.attributes.family.as_str()) {
            fonts.push(&run.attributes.family);
        }
    }

    let mut rtf = String::from("{\\rtf1\\ansi\\ansicpg1252\\deff0\\uc1\n{\\fonttbl");
    if fonts.is_empty() {
        rtf.push_str("{\\f0\\fnil Times New Roman;}");
    }
    for (i, family) in fonts.iter().enumerate() {
        let _ = write!(rtf, "{{\\f{}\\fnil ", i);
        escape_font_name(&mut rtf, family);
        rtf.push_str(";}");
    }
    rtf.push_str("}\n");

    for run in text.runs() {
        let attrs = &run.attributes;
        let font = fonts
            .iter()
            .position(|f| *f == attrs.family)
            .unwrap_or(0);
        let half_points = attrs.size.clamp(1, MAX_FONT_SIZE) * 2;
        let _ = write!(rtf, "\\plain\\f{}\\fs{}", font, half_points);
        if attrs.bold {
            rtf.push_str("\\b");
        }
        if attrs.italic {
            rtf.push_str("\\i");
        }
        if attrs.underline {
            rtf.push_str("\\ul");
        }
        rtf.push(' ');
        escape_into(&mut rtf, &run.text);
    }

    rtf.push_str("\n}\n");
    rtf
}

/// A font-table entry ends at `;`, so literal ones are hex-escaped.
fn escape_font_name(rtf: &mut String, name: &str) {
    for (i, part) in name.split(';').enumerate() {
        if i > 0 {
            rtf.push_str("\\'3b");
        }
        escape_into(rtf, part);
    }
}

fn escape_into(rtf: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '\\' => rtf.push_str("\\\\"),
            '{' => rtf.push_str("\\{"),
            '}' => rtf.push_str("\\}"),
            '\n' => rtf.push_str("\\par\n"),
            '\t' => rtf.push_str("\\tab "),
            '\r' => rtf.push_str("\\'0d"),
            c if c.is_ascii() => rtf.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    // RTF takes signed 16-bit values.
                    let _ = write!(rtf, "\\u{}?", *unit as i16);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::attributes::CharAttributes;
    use crate::app::domain::styled_text::StyledRun;
    use crate::app::infrastructure::error::AppError;

    #[test]
    fn test_header_and_font_table() {
        let text = StyledText::from_runs(vec![
            StyledRun::new("a", CharAttributes::new("Arial", 10)),
            StyledRun::new("b", CharAttributes::new("Georgia", 10)),
            StyledRun::new("c", CharAttributes::new("Arial", 11)),
        ]);
        let rtf = to_rtf_string(&text);
        assert!(rtf.starts_with("{\\rtf1\\ansi"));
        assert!(rtf.contains("{\\fonttbl{\\f0\\fnil Arial;}{\\f1\\fnil Georgia;}}"));
        assert!(rtf.contains("\\plain\\f1\\fs20 b"));
        assert!(rtf.contains("\\plain\\f0\\fs22 c"));
        assert!(rtf.trim_end().ends_with('}'));
    }

    #[test]
    fn test_flags_and_escapes() {
        let attrs = CharAttributes::default()
            .with_bold(true)
            .with_italic(true)
            .with_underline(true);
        let text = StyledText::plain("{x}\\\ny\té", attrs);
        let rtf = to_rtf_string(&text);
        assert!(rtf.contains("\\fs24\\b\\i\\ul \\{x\\}\\\\\\par\ny\\tab \\u233?"));
    }

    #[test]
    fn test_supplementary_plane_uses_surrogates() {
        let text = StyledText::plain("🦀", CharAttributes::default());
        let rtf = to_rtf_string(&text);
        assert!(rtf.contains("\\u-10178?\\u-8832?"));
    }

    #[test]
    fn test_semicolon_in_font_name_is_escaped() {
        let text = StyledText::plain("a", CharAttributes::new("Foo;Bar", 12));
        let rtf = to_rtf_string(&text);
        assert!(rtf.contains("{\\f0\\fnil Foo\\'3bBar;}"));
    }

    #[test]
    fn test_carriage_return_is_kept() {
        let text = StyledText::plain("a\rb", CharAttributes::default());
        let rtf = to_rtf_string(&text);
        assert!(rtf.contains(" a\\'0db"));
    }

    #[test]
    fn test_oversized_font_is_clamped() {
        let text = StyledText::plain("big", CharAttributes::new("Arial", 4_000_000_000));
        let rtf = to_rtf_string(&text);
        assert!(rtf.contains("\\fs3276 big"));
    }

    #[test]
    fn test_range_outside_document_is_rejected() {
        let text = StyledText::plain("short", CharAttributes::default());
        let mut out = Vec::new();
        let err = write_rtf(&mut out, &text, 2..9).unwrap_err();
        assert!(matches!(err, AppError::FormatBoundary { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_partial_range() {
        let text = StyledText::plain("Hello world", CharAttributes::default());
        let mut out = Vec::new();
        write_rtf(&mut out, &text, 6..11).unwrap();
        let rtf = String::from_utf8(out).unwrap();
        assert!(rtf.contains(" world"));
        assert!(!rtf.contains("Hello"));
    }
}
