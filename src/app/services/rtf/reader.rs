use std::borrow::Cow;
use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

use super::cp1252_to_char;
use crate::app::domain::attributes::{CharAttributes, MAX_FONT_SIZE};
use crate::app::domain::styled_text::StyledText;
use crate::app::infrastructure::error::{AppError, Result};

const MAX_GROUP_DEPTH: usize = 1024;

/// Destinations whose content never reaches the document.
const SKIPPED_DESTINATIONS: &[&str] = &[
    "colortbl",
    "stylesheet",
    "info",
    "pict",
    "object",
    "header",
    "headerl",
    "headerr",
    "headerf",
    "footer",
    "footerl",
    "footerr",
    "footerf",
    "listtable",
    "listoverridetable",
    "rsidtbl",
    "generator",
    "xmlnstbl",
    "themedata",
    "colorschememapping",
    "latentstyles",
    "datastore",
    "fldinst",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Destination {
    Text,
    FontTable,
    Skip,
}

#[derive(Debug, Clone)]
struct GroupState {
    attrs: CharAttributes,
    destination: Destination,
    /// Fallback characters to skip after `\uN`.
    uc: usize,
}

struct Reader<'a> {
    defaults: &'a CharAttributes,
    fonts: HashMap<i32, String>,
    default_font: Option<i32>,
    font_number: i32,
    font_name: String,
    state: GroupState,
    stack: Vec<GroupState>,
    skip_fallback: usize,
    high_surrogate: Option<u16>,
    out: StyledText,
    pending: String,
    pending_attrs: Option<CharAttributes>,
}

/// Parse RTF into styled text.
///
/// The reader is lenient: unknown control words are ignored, unbalanced
/// closing braces are dropped and text outside any group is kept. Input
/// that is not valid UTF-8 is decoded as Windows-1252.
pub fn read_rtf(bytes: &[u8], defaults: &CharAttributes) -> Result<StyledText> {
    let input: Cow<'_, str> = match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => Cow::Owned(bytes.iter().map(|b| cp1252_to_char(*b)).collect()),
    };

    let mut reader = Reader {
        defaults,
        fonts: HashMap::new(),
        default_font: None,
        font_number: 0,
        font_name: String::new(),
        state: GroupState {
            attrs: defaults.clone(),
            destination: Destination::Text,
            uc: 1,
        },
        stack: Vec::new(),
        skip_fallback: 0,
        high_surrogate: None,
        out: StyledText::new(),
        pending: String::new(),
        pending_attrs: None,
    };
    reader.run(&mut input.chars().peekable())?;
    reader.flush();
    Ok(reader.out)
}

impl Reader<'_> {
    fn run(&mut self, chars: &mut Peekable<Chars<'_>>) -> Result<()> {
        while let Some(ch) = chars.next() {
            match ch {
                '{' => {
                    if self.stack.len() >= MAX_GROUP_DEPTH {
                        return Err(AppError::Rtf(format!(
                            "groups nested deeper than {}",
                            MAX_GROUP_DEPTH
                        )));
                    }
                    self.skip_fallback = 0;
                    self.stack.push(self.state.clone());
                }
                '}' => {
                    self.skip_fallback = 0;
                    if let Some(previous) = self.stack.pop() {
                        self.state = previous;
                    }
                }
                '\\' => self.control(chars),
                '\r' | '\n' => {}
                c => self.emit_char(c),
            }
        }
        Ok(())
    }

    fn control(&mut self, chars: &mut Peekable<Chars<'_>>) {
        let Some(&next) = chars.peek() else {
            return;
        };

        if next.is_ascii_alphabetic() {
            let mut word = String::new();
            while let Some(&c) = chars.peek() {
                if !c.is_ascii_alphabetic() {
                    break;
                }
                word.push(c);
                chars.next();
            }

            let mut digits = String::new();
            if chars.peek() == Some(&'-') {
                digits.push('-');
                chars.next();
            }
            while let Some(&c) = chars.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                digits.push(c);
                chars.next();
            }
            let param = digits.parse::<i32>().ok();

            if chars.peek() == Some(&' ') {
                chars.next();
            }
            self.word(&word, param);
            return;
        }

        chars.next();
        match next {
            '\'' => {
                let hex: String = chars.by_ref().take(2).collect();
                if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                    self.emit_hex(cp1252_to_char(byte));
                }
            }
            '\\' | '{' | '}' => self.emit_char(next),
            '*' => self.state.destination = Destination::Skip,
            '~' => self.emit_char('\u{00A0}'),
            '_' => self.emit_char('\u{2011}'),
            '\n' | '\r' => self.emit_text("\n"),
            _ => {}
        }
    }

    fn word(&mut self, word: &str, param: Option<i32>) {
        if self.state.destination == Destination::FontTable && word == "f" {
            self.font_number = param.unwrap_or(0);
            self.font_name.clear();
            return;
        }

        let on = param.is_none_or(|p| p != 0);
        match word {
            "fonttbl" => self.state.destination = Destination::FontTable,
            w if SKIPPED_DESTINATIONS.contains(&w) => self.state.destination = Destination::Skip,
            "deff" => self.default_font = param,
            "plain" => self.state.attrs = self.plain_attributes(),
            "f" => {
                self.state.attrs.family = param
                    .and_then(|n| self.fonts.get(&n).cloned())
                    .unwrap_or_else(|| self.defaults.family.clone());
            }
            "fs" => {
                if let Some(half_points) = param.filter(|p| *p > 0) {
                    self.state.attrs.size = ((half_points / 2).max(1) as u32).min(MAX_FONT_SIZE);
                }
            }
            "b" => self.state.attrs.bold = on,
            "i" => self.state.attrs.italic = on,
            "ul" | "uld" | "uldb" | "ulw" | "uldash" => self.state.attrs.underline = on,
            "ulnone" => self.state.attrs.underline = false,
            "par" | "line" | "sect" | "page" => self.emit_text("\n"),
            "tab" => self.emit_text("\t"),
            "emdash" => self.emit_text("\u{2014}"),
            "endash" => self.emit_text("\u{2013}"),
            "bullet" => self.emit_text("\u{2022}"),
            "lquote" => self.emit_text("\u{2018}"),
            "rquote" => self.emit_text("\u{2019}"),
            "ldblquote" => self.emit_text("\u{201C}"),
            "rdblquote" => self.emit_text("\u{201D}"),
            "uc" => self.state.uc = param.unwrap_or(1).max(0) as usize,
            "u" => {
                if let Some(code) = param {
                    self.unicode(code);
                }
            }
            _ => {}
        }
    }

    fn plain_attributes(&self) -> CharAttributes {
        let family = self
            .default_font
            .and_then(|n| self.fonts.get(&n).cloned())
            .unwrap_or_else(|| self.defaults.family.clone());
        CharAttributes::new(family, self.defaults.size)
    }

    fn unicode(&mut self, code: i32) {
        let unit = (if code < 0 { code + 0x10000 } else { code }) as u32;
        let decoded = match unit {
            0xD800..=0xDBFF => {
                self.high_surrogate = Some(unit as u16);
                None
            }
            0xDC00..=0xDFFF => self.high_surrogate.take().and_then(|high| {
                char::decode_utf16([high, unit as u16]).next()?.ok()
            }),
            _ => char::from_u32(unit),
        };
        if let Some(c) = decoded {
            self.emit_text(c.encode_utf8(&mut [0; 4]));
        }
        self.skip_fallback = self.state.uc;
    }

    /// A literal character, which may be the fallback of a preceding `\u`.
    fn emit_char(&mut self, c: char) {
        if self.skip_fallback > 0 {
            self.skip_fallback -= 1;
            return;
        }
        self.emit_text(c.encode_utf8(&mut [0; 4]));
    }

    /// A `\'hh` character. Inside the font table it is part of the name,
    /// even when it is `;`.
    fn emit_hex(&mut self, c: char) {
        if self.state.destination == Destination::FontTable && self.skip_fallback == 0 {
            self.font_name.push(c);
        } else {
            self.emit_char(c);
        }
    }

    fn emit_text(&mut self, text: &str) {
        match self.state.destination {
            Destination::Skip => {}
            Destination::FontTable => {
                for c in text.chars() {
                    if c == ';' {
                        let name = self.font_name.trim().to_string();
                        self.fonts.insert(self.font_number, name);
                        self.font_name.clear();
                    } else {
                        self.font_name.push(c);
                    }
                }
            }
            Destination::Text => {
                if self
                    .pending_attrs
                    .as_ref()
                    .is_some_and(|attrs| *attrs != self.state.attrs)
                {
                    self.flush();
                }
                if self.pending_attrs.is_none() {
                    self.pending_attrs = Some(self.state.attrs.clone());
                }
                self.pending.push_str(text);
            }
        }
    }

    fn flush(&mut self) {
        if let Some(attrs) = self.pending_attrs.take() {
            let text = std::mem::take(&mut self.pending);
            self.out.push(&text, attrs);
        }
    }
}
