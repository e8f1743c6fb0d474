use std::ops::Range;

use super::attributes::CharAttributes;
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::services::text_ops::char_to_byte;

/// A maximal stretch of characters sharing one set of attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub attributes: CharAttributes,
}

impl StyledRun {
    pub fn new(text: impl Into<String>, attributes: CharAttributes) -> Self {
        Self {
            text: text.into(),
            attributes,
        }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Run-based rich text. All offsets are character offsets.
///
/// Runs are kept normalized: none is empty and no two neighbours carry
/// equal attributes, so two texts with the same characters and formatting
/// always compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    runs: Vec<StyledRun>,
    len: usize,
}

impl StyledText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain(text: &str, attributes: CharAttributes) -> Self {
        let mut styled = Self::new();
        styled.push(text, attributes);
        styled
    }

    pub fn from_runs(runs: impl IntoIterator<Item = StyledRun>) -> Self {
        let mut styled = Self::new();
        for run in runs {
            styled.push(&run.text, run.attributes);
        }
        styled
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn runs(&self) -> &[StyledRun] {
        &self.runs
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Append text at the end, merging into the last run when possible.
    pub fn push(&mut self, text: &str, attributes: CharAttributes) {
        if text.is_empty() {
            return;
        }
        self.len += text.chars().count();
        match self.runs.last_mut() {
            Some(last) if last.attributes == attributes => last.text.push_str(text),
            _ => self.runs.push(StyledRun::new(text, attributes)),
        }
    }

    /// Insert `text` at `offset`; returns the number of characters inserted.
    pub fn insert(&mut self, offset: usize, text: &str, attributes: CharAttributes) -> Result<usize> {
        self.check_range(offset, 0)?;
        let inserted = text.chars().count();
        if inserted == 0 {
            return Ok(0);
        }
        let idx = self.split_at(offset);
        self.runs.insert(idx, StyledRun::new(text, attributes));
        self.len += inserted;
        self.normalize();
        Ok(inserted)
    }

    /// Insert another styled text at `offset`, keeping its runs.
    pub fn insert_styled(&mut self, offset: usize, other: &StyledText) -> Result<usize> {
        self.check_range(offset, 0)?;
        if other.is_empty() {
            return Ok(0);
        }
        let idx = self.split_at(offset);
        self.runs.splice(idx..idx, other.runs.iter().cloned());
        self.len += other.len;
        self.normalize();
        Ok(other.len)
    }

    pub fn remove(&mut self, offset: usize, len: usize) -> Result<()> {
        self.check_range(offset, len)?;
        if len == 0 {
            return Ok(());
        }
        let start = self.split_at(offset);
        let end = self.split_at(offset + len);
        self.runs.drain(start..end);
        self.len -= len;
        self.normalize();
        Ok(())
    }

    /// Attributes that apply at `offset`: those of the character before it,
    /// or of the first character when `offset` is 0.
    pub fn attributes_at(&self, offset: usize) -> Option<&CharAttributes> {
        if self.is_empty() {
            return None;
        }
        let target = offset.saturating_sub(1).min(self.len - 1);
        let mut acc = 0;
        for run in &self.runs {
            let run_len = run.char_len();
            if target < acc + run_len {
                return Some(&run.attributes);
            }
            acc += run_len;
        }
        None
    }

    pub fn update_range<F>(&mut self, range: Range<usize>, mut f: F) -> Result<()>
    where
        F: FnMut(&mut CharAttributes),
    {
        let len = range.end.saturating_sub(range.start);
        self.check_range(range.start, len)?;
        if len == 0 {
            return Ok(());
        }
        let start = self.split_at(range.start);
        let end = self.split_at(range.end);
        for run in &mut self.runs[start..end] {
            f(&mut run.attributes);
        }
        self.normalize();
        Ok(())
    }

    pub fn slice(&self, range: Range<usize>) -> Result<StyledText> {
        let len = range.end.saturating_sub(range.start);
        self.check_range(range.start, len)?;
        let mut out = StyledText::new();
        let mut acc = 0;
        for run in &self.runs {
            let run_len = run.char_len();
            let run_start = acc;
            acc += run_len;
            let lo = range.start.max(run_start);
            let hi = range.end.min(acc);
            if lo >= hi {
                continue;
            }
            let from = char_to_byte(&run.text, lo - run_start);
            let to = char_to_byte(&run.text, hi - run_start);
            out.push(&run.text[from..to], run.attributes.clone());
        }
        Ok(out)
    }

    fn check_range(&self, offset: usize, len: usize) -> Result<()> {
        match offset.checked_add(len) {
            Some(end) if end <= self.len => Ok(()),
            _ => Err(AppError::FormatBoundary {
                offset,
                len,
                available: self.len,
            }),
        }
    }

    /// Make sure a run boundary exists at `offset` and return the index of
    /// the first run starting there (`runs.len()` at the end).
    fn split_at(&mut self, offset: usize) -> usize {
        let mut acc = 0;
        for i in 0..self.runs.len() {
            if offset == acc {
                return i;
            }
            let run_len = self.runs[i].char_len();
            if offset < acc + run_len {
                let byte = char_to_byte(&self.runs[i].text, offset - acc);
                let tail = self.runs[i].text.split_off(byte);
                let attributes = self.runs[i].attributes.clone();
                self.runs.insert(i + 1, StyledRun::new(tail, attributes));
                return i + 1;
            }
            acc += run_len;
        }
        self.runs.len()
    }

    fn normalize(&mut self) {
        let mut merged: Vec<StyledRun> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if run.text.is_empty() {
                continue;
            }
            match merged.last_mut() {
                Some(last) if last.attributes == run.attributes => last.text.push_str(&run.text),
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> CharAttributes {
        CharAttributes::default().with_bold(true)
    }

    #[test]
    fn test_insert_into_middle_splits_run() {
        let mut text = StyledText::plain("Hello", CharAttributes::default());
        text.insert(2, "XY", bold()).unwrap();
        assert_eq!(text.text(), "HeXYllo");
        assert_eq!(text.len(), 7);
        assert_eq!(text.runs().len(), 3);
        assert_eq!(text.runs()[1].text, "XY");
        assert!(text.runs()[1].attributes.bold);
    }

    #[test]
    fn test_adjacent_equal_runs_merge() {
        let mut text = StyledText::plain("ab", CharAttributes::default());
        text.insert(2, "cd", CharAttributes::default()).unwrap();
        assert_eq!(text.runs().len(), 1);
        text.insert(1, "Z", bold()).unwrap();
        text.remove(1, 1).unwrap();
        assert_eq!(text.runs().len(), 1);
        assert_eq!(text.text(), "abcd");
    }

    #[test]
    fn test_remove_across_runs() {
        let mut text = StyledText::from_runs(vec![
            StyledRun::new("one ", CharAttributes::default()),
            StyledRun::new("two", bold()),
            StyledRun::new(" three", CharAttributes::default()),
        ]);
        text.remove(2, 7).unwrap();
        assert_eq!(text.text(), "onhree");
        assert_eq!(text.runs().len(), 1);
        assert_eq!(text.len(), 6);
    }

    #[test]
    fn test_out_of_range_is_format_boundary() {
        let mut text = StyledText::plain("abc", CharAttributes::default());
        assert!(matches!(
            text.insert(4, "x", CharAttributes::default()),
            Err(AppError::FormatBoundary { offset: 4, .. })
        ));
        assert!(matches!(text.remove(2, 5), Err(AppError::FormatBoundary { .. })));
        assert_eq!(text.text(), "abc");
    }

    #[test]
    fn test_multibyte_offsets_are_characters() {
        let mut text = StyledText::plain("héllo wörld", CharAttributes::default());
        assert_eq!(text.len(), 11);
        text.update_range(1..4, |a| a.italic = true).unwrap();
        assert_eq!(text.runs()[1].text, "éll");
        text.remove(7, 1).unwrap();
        assert_eq!(text.text(), "héllo wrld");
    }

    #[test]
    fn test_attributes_at_uses_previous_character() {
        let text = StyledText::from_runs(vec![
            StyledRun::new("ab", CharAttributes::default()),
            StyledRun::new("cd", bold()),
        ]);
        assert!(!text.attributes_at(0).unwrap().bold);
        assert!(!text.attributes_at(2).unwrap().bold);
        assert!(text.attributes_at(3).unwrap().bold);
        assert!(text.attributes_at(99).unwrap().bold);
        assert!(StyledText::new().attributes_at(0).is_none());
    }

    #[test]
    fn test_slice_keeps_formatting() {
        let text = StyledText::from_runs(vec![
            StyledRun::new("plain ", CharAttributes::default()),
            StyledRun::new("bold", bold()),
        ]);
        let slice = text.slice(4..8).unwrap();
        assert_eq!(slice.text(), "n bo");
        assert_eq!(slice.runs().len(), 2);
        assert!(slice.runs()[1].attributes.bold);
    }
}
