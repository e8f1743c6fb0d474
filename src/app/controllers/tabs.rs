
use crate::app::domain::attributes::CharAttributes;
use crate::app::domain::document::{Document, DocumentId};
use crate::app::infrastructure::error::{AppError, Result};

/// One entry of the tab strip.
#[derive(Debug, Clone)]
pub struct Tab {
    pub title: String,
    pub document: Document,
}

/// Ordered registry of open documents.
pub struct SessionManager {
    tabs: Vec<Tab>,
    active: Option<usize>,
    next_id: u64,
    defaults: CharAttributes,
}

impl SessionManager {
    pub fn new(defaults: CharAttributes) -> Self {
        Self {
            tabs: Vec::new(),
            active: None,
            next_id: 1,
            defaults,
        }
    }

    fn next_document_id(&mut self) -> DocumentId {
        let id = DocumentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append an empty document, select it and return its index.
    ///
    /// The default title numbers tabs by the count at creation time, so a
    /// title can repeat after tabs were closed.
    pub fn create_document(&mut self) -> usize {
        let id = self.next_document_id();
        let title = format!("New File {}", self.tabs.len() + 1);
        let document = Document::new(id, self.defaults.clone());
        self.tabs.push(Tab { title, document });
        let index = self.tabs.len() - 1;
        self.active = Some(index);
        tracing::debug!("Created tab {} ({:?})", index, id);
        index
    }

    /// Remove the tab at `index`. Unknown indices are ignored.
    ///
    /// The last remaining tab may be closed, leaving the registry empty.
    pub fn close_document(&mut self, index: usize) {
        if index >= self.tabs.len() {
            tracing::debug!("Ignoring close of missing tab {}", index);
            return;
        }
        self.tabs.remove(index);

        self.active = match self.active {
            _ if self.tabs.is_empty() => None,
            Some(active) if active > index => Some(active - 1),
            Some(active) if active == index => Some(index.min(self.tabs.len() - 1)),
            other => other,
        };
    }

    pub fn select_document(&mut self, index: usize) -> Result<()> {
        if index >= self.tabs.len() {
            return Err(AppError::InvalidIndex(index));
        }
        self.active = Some(index);
        Ok(())
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_document(&self) -> Option<&Document> {
        self.active.and_then(|i| self.document(i))
    }

    pub fn active_document_mut(&mut self) -> Option<&mut Document> {
        let index = self.active?;
        self.document_mut(index)
    }

    pub fn document(&self, index: usize) -> Option<&Document> {
        self.tabs.get(index).map(|t| &t.document)
    }

    pub fn document_mut(&mut self, index: usize) -> Option<&mut Document> {
        self.tabs.get_mut(index).map(|t| &mut t.document)
    }

    pub fn set_title(&mut self, index: usize, title: impl Into<String>) -> Result<()> {
        let tab = self.tabs.get_mut(index).ok_or(AppError::InvalidIndex(index))?;
        tab.title = title.into();
        Ok(())
    }

    pub fn title(&self, index: usize) -> Option<&str> {
        self.tabs.get(index).map(|t| t.title.as_str())
    }

    pub fn titles(&self) -> Vec<&str> {
        self.tabs.iter().map(|t| t.title.as_str()).collect()
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> SessionManager {
        SessionManager::new(CharAttributes::default())
    }

    #[test]
    fn test_create_selects_and_numbers() {
        let mut tabs = manager();
        assert_eq!(tabs.create_document(), 0);
        assert_eq!(tabs.create_document(), 1);
        assert_eq!(tabs.active_index(), Some(1));
        assert_eq!(tabs.titles(), vec!["New File 1", "New File 2"]);
    }

    #[test]
    fn test_titles_can_repeat_after_close() {
        let mut tabs = manager();
        tabs.create_document();
        tabs.create_document();
        tabs.close_document(0);
        tabs.create_document();
        assert_eq!(tabs.titles(), vec!["New File 2", "New File 2"]);
    }

    #[test]
    fn test_close_collapses_indices() {
        let mut tabs = manager();
        for _ in 0..3 {
            tabs.create_document();
        }
        tabs.set_title(2, "third.rtf").unwrap();
        tabs.close_document(1);
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs.title(1), Some("third.rtf"));
        assert_eq!(tabs.active_index(), Some(1));
    }

    #[test]
    fn test_close_keeps_selection_on_same_document() {
        let mut tabs = manager();
        for _ in 0..3 {
            tabs.create_document();
        }
        tabs.select_document(2).unwrap();
        let id = tabs.active_document().unwrap().id;
        tabs.close_document(0);
        assert_eq!(tabs.active_index(), Some(1));
        assert_eq!(tabs.active_document().unwrap().id, id);
    }

    #[test]
    fn test_invalid_indices() {
        let mut tabs = manager();
        tabs.create_document();
        tabs.close_document(7);
        assert_eq!(tabs.len(), 1);
        assert!(matches!(tabs.select_document(1), Err(AppError::InvalidIndex(1))));
        assert!(tabs.set_title(4, "x").is_err());
        assert!(tabs.document(4).is_none());
    }

    #[test]
    fn test_last_tab_can_be_closed() {
        // Allowed at this layer; EditorSession replaces the tab.
        let mut tabs = manager();
        tabs.create_document();
        tabs.close_document(0);
        assert!(tabs.is_empty());
        assert!(tabs.active_document().is_none());
    }

    #[test]
    fn test_tab_isolation() {
        let mut tabs = manager();
        tabs.create_document();
        tabs.create_document();
        tabs.document_mut(0).unwrap().insert(0, "left").unwrap();
        tabs.document_mut(1).unwrap().insert(0, "right side").unwrap();
        tabs.document_mut(0).unwrap().remove(0, 2).unwrap();
        let b = tabs.document(1).unwrap();
        assert_eq!(b.text(), "right side");
        assert_eq!(b.character_count(), 10);
        assert!(b.file_path().is_none());
        assert_eq!(tabs.document(0).unwrap().character_count(), 2);
    }
}
