use std::ops::Range;
use std::sync::Arc;

use super::controllers::attribute_tracker::TextEdit;
use super::controllers::tabs::SessionManager;
use super::controllers::toolbar::{FormattingControls, ToolbarState};
use super::domain::attributes::{AttributeChange, is_valid_font_size};
use super::domain::document::Document;
use super::domain::messages::Message;
use super::domain::settings::AppSettings;
use super::infrastructure::error::{AppError, Result};
use super::infrastructure::error_report::ErrorSink;
use super::infrastructure::prompts::UserPrompts;
use super::services::persistence::{Opened, Outcome, PersistenceService, Saved};
use super::services::status::{StatusNotifier, StatusReverter};

/// Everything one editor window works with, passed around explicitly.
pub struct EditorSession {
    tabs: SessionManager,
    toolbar: ToolbarState,
    status: Arc<dyn StatusNotifier>,
    persistence: PersistenceService,
    settings: AppSettings,
}

impl EditorSession {
    pub fn new(settings: AppSettings, status: Arc<dyn StatusNotifier>, errors: Arc<dyn ErrorSink>) -> Self {
        let defaults = settings.default_attributes();
        let reverter = StatusReverter::new(status.clone(), settings.status_revert_delay());
        let persistence = PersistenceService::new(reverter, errors, settings.plain_save_mode);

        let mut session = Self {
            tabs: SessionManager::new(defaults.clone()),
            toolbar: ToolbarState::new(&defaults),
            status,
            persistence,
            settings,
        };
        session.tabs.create_document();
        session.refresh_active();
        session
    }

    pub fn tabs(&self) -> &SessionManager {
        &self.tabs
    }

    pub fn toolbar(&self) -> &ToolbarState {
        &self.toolbar
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn active_document(&self) -> Option<&Document> {
        self.tabs.active_document()
    }

    // --- Editing ---

    /// Type `text` at the caret, replacing the selection if there is one.
    pub fn insert_text(&mut self, text: &str) -> Result<()> {
        let Some(doc) = self.tabs.active_document_mut() else {
            return Ok(());
        };
        let mut offset = doc.caret();
        if let Some(range) = doc.selection() {
            offset = range.start;
            let edit = doc.remove(range.start, range.len())?;
            self.publish(&edit);
        }
        let Some(doc) = self.tabs.active_document_mut() else {
            return Ok(());
        };
        let edit = doc.insert(offset, text)?;
        self.publish(&edit);
        Ok(())
    }

    /// Backspace: drop the selection, or the character before the caret.
    pub fn delete_backward(&mut self) -> Result<()> {
        let Some(doc) = self.tabs.active_document() else {
            return Ok(());
        };
        match doc.selection() {
            Some(range) => self.remove(range.start, range.len()),
            None if doc.caret() > 0 => {
                let caret = doc.caret();
                self.remove(caret - 1, 1)
            }
            None => Ok(()),
        }
    }

    pub fn remove(&mut self, offset: usize, len: usize) -> Result<()> {
        let Some(doc) = self.tabs.active_document_mut() else {
            return Ok(());
        };
        let edit = doc.remove(offset, len)?;
        self.publish(&edit);
        Ok(())
    }

    pub fn set_caret(&mut self, offset: usize) -> Result<()> {
        match self.tabs.active_document_mut() {
            Some(doc) => doc.set_caret(offset),
            None => Ok(()),
        }
    }

    pub fn select(&mut self, range: Range<usize>) -> Result<()> {
        match self.tabs.active_document_mut() {
            Some(doc) => doc.select(range),
            None => Ok(()),
        }
    }

    // --- Formatting ---

    pub fn apply_font_family(&mut self, family: &str) -> Result<bool> {
        self.toolbar.show_font_family(family);
        self.apply(&AttributeChange::FontFamily(family.to_string()))
    }

    pub fn apply_font_size(&mut self, size: u32) -> Result<bool> {
        if !is_valid_font_size(size) {
            return Err(AppError::InvalidFontSize(size.to_string()));
        }
        self.toolbar.show_font_size(size);
        self.apply(&AttributeChange::FontSize(size))
    }

    /// Validate text from the size field and apply it. Bad input restores
    /// the field's previous size and leaves the document alone.
    pub fn apply_font_size_input(&mut self, input: &str) -> Result<bool> {
        let size = self.toolbar.accept_font_size_input(input)?;
        self.apply_font_size(size)
    }

    pub fn toggle_bold(&mut self) -> Result<bool> {
        match self.tabs.active_document_mut() {
            Some(doc) => doc.toggle_bold(),
            None => Ok(false),
        }
    }

    pub fn toggle_italic(&mut self) -> Result<bool> {
        match self.tabs.active_document_mut() {
            Some(doc) => doc.toggle_italic(),
            None => Ok(false),
        }
    }

    pub fn toggle_underline(&mut self) -> Result<bool> {
        match self.tabs.active_document_mut() {
            Some(doc) => doc.toggle_underline(),
            None => Ok(false),
        }
    }

    fn apply(&mut self, change: &AttributeChange) -> Result<bool> {
        match self.tabs.active_document_mut() {
            Some(doc) => doc.apply(change),
            None => Ok(false),
        }
    }

    // --- Files and tabs ---

    pub fn file_new(&mut self) -> usize {
        let index = self.tabs.create_document();
        self.refresh_active();
        index
    }

    pub fn file_open(&mut self, prompts: &mut dyn UserPrompts) -> Outcome<Opened> {
        let outcome = self.persistence.open(&mut self.tabs, prompts);
        self.refresh_active();
        if let Outcome::Done(opened) = &outcome {
            self.publish(&opened.edit);
        }
        outcome
    }

    pub fn file_save(&mut self, prompts: &mut dyn UserPrompts) -> Outcome<Saved> {
        self.persistence.save_active(&mut self.tabs, prompts)
    }

    /// Close the tab at `index`. Closing the last tab opens a fresh one.
    pub fn close_tab(&mut self, index: usize) {
        self.tabs.close_document(index);
        if self.tabs.is_empty() {
            self.tabs.create_document();
        }
        self.refresh_active();
    }

    pub fn select_tab(&mut self, index: usize) {
        if let Err(e) = self.tabs.select_document(index) {
            tracing::warn!("Tab selection ignored: {}", e);
            return;
        }
        self.refresh_active();
    }

    /// Handle one command. Outcomes of file commands are reported through
    /// `prompts` and the status surface, so only editing errors come back.
    pub fn dispatch(&mut self, message: Message, prompts: &mut dyn UserPrompts) -> Result<()> {
        match message {
            Message::FileNew => {
                self.file_new();
            }
            Message::FileOpen => {
                self.file_open(prompts);
            }
            Message::FileSave => {
                self.file_save(prompts);
            }
            Message::CloseTab(index) => self.close_tab(index),
            Message::SelectTab(index) => self.select_tab(index),
            Message::ToggleBold => {
                self.toggle_bold()?;
            }
            Message::ToggleItalic => {
                self.toggle_italic()?;
            }
            Message::ToggleUnderline => {
                self.toggle_underline()?;
            }
            Message::SetFontFamily(family) => {
                self.apply_font_family(&family)?;
            }
            Message::SetFontSize(size) => {
                self.apply_font_size(size)?;
            }
            Message::FontSizeInput(input) => {
                self.apply_font_size_input(&input)?;
            }
        }
        Ok(())
    }

    fn publish(&mut self, edit: &TextEdit) {
        if let Some(doc) = self.tabs.active_document() {
            doc.tracker()
                .publish(edit, &mut self.toolbar, self.status.as_ref());
        }
    }

    /// Show the active document's count and both of its attribute fields.
    fn refresh_active(&mut self) {
        if let Some(doc) = self.tabs.active_document() {
            let attrs = doc.active_attributes();
            self.status.report_character_count(doc.character_count());
            self.toolbar.show_font_family(&attrs.family);
            self.toolbar.show_font_size(attrs.size);
        }
    }
}
