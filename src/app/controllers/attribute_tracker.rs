use super::toolbar::FormattingControls;
use crate::app::domain::attributes::CharAttributes;
use crate::app::services::status::StatusNotifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Insert,
    Remove,
}

/// One content mutation, in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEdit {
    pub kind: EditKind,
    pub offset: usize,
    pub len: usize,
}

impl TextEdit {
    pub fn insert(offset: usize, len: usize) -> Self {
        Self {
            kind: EditKind::Insert,
            offset,
            len,
        }
    }

    pub fn remove(offset: usize, len: usize) -> Self {
        Self {
            kind: EditKind::Remove,
            offset,
            len,
        }
    }
}

/// Keeps one document's character count and active attributes, and pushes
/// changes outward to the status bar and the formatting controls.
#[derive(Debug, Clone)]
pub struct AttributeTracker {
    character_count: usize,
    active_attributes: CharAttributes,
}

impl AttributeTracker {
    pub fn new(defaults: CharAttributes) -> Self {
        Self {
            character_count: 0,
            active_attributes: defaults,
        }
    }

    pub fn character_count(&self) -> usize {
        self.character_count
    }

    pub fn active_attributes(&self) -> &CharAttributes {
        &self.active_attributes
    }

    pub(crate) fn active_attributes_mut(&mut self) -> &mut CharAttributes {
        &mut self.active_attributes
    }

    pub(crate) fn set_active_attributes(&mut self, attributes: CharAttributes) {
        self.active_attributes = attributes;
    }

    /// Account for an insertion; `at_insertion` are the attributes found at
    /// the insertion point after the text went in.
    pub(crate) fn record_insert(&mut self, len: usize, at_insertion: Option<&CharAttributes>) {
        self.character_count += len;
        if let Some(attrs) = at_insertion {
            self.active_attributes = attrs.clone();
        }
    }

    /// Account for a deletion. Active attributes stay as they were.
    pub(crate) fn record_remove(&mut self, len: usize) {
        self.character_count = self.character_count.saturating_sub(len);
    }

    /// Report the count and bring the controls in line after `edit`.
    ///
    /// Family is compared first; size is only pushed when the family already
    /// matched, so a simultaneous change of both takes two edits to show.
    pub fn publish(
        &self,
        edit: &TextEdit,
        controls: &mut dyn FormattingControls,
        status: &dyn StatusNotifier,
    ) {
        status.report_character_count(self.character_count);
        if edit.kind == EditKind::Remove {
            return;
        }
        self.push_attributes(controls);
    }

    /// Push the family if it differs, otherwise the size if that differs.
    /// Tab switches show both fields directly instead.
    fn push_attributes(&self, controls: &mut dyn FormattingControls) {
        let attrs = &self.active_attributes;
        if attrs.family != controls.displayed_font_family() {
            controls.show_font_family(&attrs.family);
        } else if attrs.size != controls.displayed_font_size() {
            controls.show_font_size(attrs.size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::controllers::toolbar::ToolbarState;
    use crate::app::infrastructure::testing::RecordingStatus;

    #[test]
    fn test_counts_follow_edits() {
        let mut tracker = AttributeTracker::new(CharAttributes::default());
        tracker.record_insert(5, None);
        tracker.record_remove(2);
        assert_eq!(tracker.character_count(), 3);
        tracker.record_remove(10);
        assert_eq!(tracker.character_count(), 0);
    }

    #[test]
    fn test_family_is_pushed_before_size() {
        let defaults = CharAttributes::default();
        let mut toolbar = ToolbarState::new(&defaults);
        let status = RecordingStatus::default();
        let mut tracker = AttributeTracker::new(defaults);

        let arial_20 = CharAttributes::new("Arial", 20);
        tracker.record_insert(3, Some(&arial_20));
        tracker.publish(&TextEdit::insert(0, 3), &mut toolbar, &status);
        assert_eq!(toolbar.displayed_font_family(), "Arial");
        assert_eq!(toolbar.displayed_font_size(), 12);

        tracker.record_insert(1, Some(&arial_20));
        tracker.publish(&TextEdit::insert(3, 1), &mut toolbar, &status);
        assert_eq!(toolbar.displayed_font_size(), 20);
        assert_eq!(status.counts(), vec![3, 4]);
    }

    #[test]
    fn test_removal_reports_count_only() {
        let defaults = CharAttributes::default();
        let mut toolbar = ToolbarState::new(&defaults);
        let status = RecordingStatus::default();
        let mut tracker = AttributeTracker::new(CharAttributes::new("Courier", 9));
        tracker.record_insert(4, None);
        tracker.record_remove(1);
        tracker.publish(&TextEdit::remove(3, 1), &mut toolbar, &status);
        assert_eq!(status.counts(), vec![3]);
        assert_eq!(toolbar.displayed_font_family(), "Times New Roman");
    }
}
