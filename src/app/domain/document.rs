use std::ops::Range;
use std::path::{Path, PathBuf};

use super::attributes::{AttributeChange, CharAttributes};
use super::file_format::FileFormat;
use super::styled_text::{StyledRun, StyledText};
use crate::app::controllers::attribute_tracker::{AttributeTracker, TextEdit};
use crate::app::infrastructure::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

/// One editable unit of rich text with an optional backing file.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: DocumentId,
    content: StyledText,
    file_path: Option<PathBuf>,
    /// Format derived when the file association was made.
    file_format: Option<FileFormat>,
    tracker: AttributeTracker,
    caret: usize,
    selection: Option<Range<usize>>,
}

impl Document {
    pub fn new(id: DocumentId, defaults: CharAttributes) -> Self {
        Self {
            id,
            content: StyledText::new(),
            file_path: None,
            file_format: None,
            tracker: AttributeTracker::new(defaults),
            caret: 0,
            selection: None,
        }
    }

    pub fn content(&self) -> &StyledText {
        &self.content
    }

    pub fn text(&self) -> String {
        self.content.text()
    }

    pub fn runs(&self) -> &[StyledRun] {
        self.content.runs()
    }

    /// Incrementally maintained count, equal to `content().len()`.
    pub fn character_count(&self) -> usize {
        self.tracker.character_count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn tracker(&self) -> &AttributeTracker {
        &self.tracker
    }

    pub fn active_attributes(&self) -> &CharAttributes {
        self.tracker.active_attributes()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn file_format(&self) -> Option<FileFormat> {
        self.file_format
    }

    pub(crate) fn associate_file(&mut self, path: PathBuf, format: FileFormat) {
        self.file_path = Some(path);
        self.file_format = Some(format);
    }

    /// Move the caret; the active attributes follow the character before it.
    pub fn set_caret(&mut self, offset: usize) -> Result<()> {
        self.check_offset(offset)?;
        self.caret = offset;
        self.selection = None;
        if let Some(attrs) = self.content.attributes_at(offset) {
            self.tracker.set_active_attributes(attrs.clone());
        }
        Ok(())
    }

    /// Select `range`; an empty range just places the caret.
    pub fn select(&mut self, range: Range<usize>) -> Result<()> {
        if range.start > range.end {
            return Err(AppError::FormatBoundary {
                offset: range.start,
                len: 0,
                available: self.content.len(),
            });
        }
        self.check_offset(range.end)?;
        if range.is_empty() {
            return self.set_caret(range.start);
        }
        if let Some(attrs) = self.content.attributes_at(range.start + 1) {
            self.tracker.set_active_attributes(attrs.clone());
        }
        self.caret = range.end;
        self.selection = Some(range);
        Ok(())
    }

    /// Insert `text` at `offset` using the active attributes.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<TextEdit> {
        let attrs = self.tracker.active_attributes().clone();
        let inserted = self.content.insert(offset, text, attrs)?;
        Ok(self.after_insert(offset, inserted))
    }

    /// Insert formatted text at `offset`, keeping its runs.
    pub fn insert_styled(&mut self, offset: usize, styled: &StyledText) -> Result<TextEdit> {
        let inserted = self.content.insert_styled(offset, styled)?;
        Ok(self.after_insert(offset, inserted))
    }

    pub fn remove(&mut self, offset: usize, len: usize) -> Result<TextEdit> {
        self.content.remove(offset, len)?;
        self.tracker.record_remove(len);
        self.caret = offset;
        self.selection = None;
        Ok(TextEdit::remove(offset, len))
    }

    /// Apply a formatting change to the selection and to the active
    /// attributes. Returns whether any stored character changed.
    pub fn apply(&mut self, change: &AttributeChange) -> Result<bool> {
        let mut restyled = false;
        if let Some(range) = self.selection.clone() {
            self.content.update_range(range, |attrs| change.apply(attrs))?;
            restyled = true;
        }
        change.apply(self.tracker.active_attributes_mut());
        Ok(restyled)
    }

    pub fn toggle_bold(&mut self) -> Result<bool> {
        let on = !self.active_attributes().bold;
        self.apply(&AttributeChange::Bold(on))
    }

    pub fn toggle_italic(&mut self) -> Result<bool> {
        let on = !self.active_attributes().italic;
        self.apply(&AttributeChange::Italic(on))
    }

    pub fn toggle_underline(&mut self) -> Result<bool> {
        let on = !self.active_attributes().underline;
        self.apply(&AttributeChange::Underline(on))
    }

    fn after_insert(&mut self, offset: usize, inserted: usize) -> TextEdit {
        self.caret = offset + inserted;
        self.selection = None;
        let at_caret = if inserted > 0 {
            self.content.attributes_at(self.caret)
        } else {
            None
        };
        self.tracker.record_insert(inserted, at_caret);
        TextEdit::insert(offset, inserted)
    }

    fn check_offset(&self, offset: usize) -> Result<()> {
        if offset > self.content.len() {
            return Err(AppError::FormatBoundary {
                offset,
                len: 0,
                available: self.content.len(),
            });
        }
        Ok(())
    }
}
