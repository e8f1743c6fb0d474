//! Scripted stand-ins for the front-end collaborators, used by unit tests.

use std::collections::VecDeque;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Mutex;

use super::error_report::ErrorSink;
use super::prompts::UserPrompts;
use crate::app::services::status::StatusNotifier;

/// Answers prompts from queues and records what was shown.
#[derive(Default)]
pub struct ScriptedPrompts {
    pub save_paths: VecDeque<Option<PathBuf>>,
    pub open_paths: VecDeque<Option<PathBuf>>,
    pub confirmations: VecDeque<bool>,
    pub warnings_shown: Vec<String>,
    pub errors_shown: Vec<String>,
    pub save_prompts: usize,
}

impl ScriptedPrompts {
    pub fn saving_to(path: impl Into<PathBuf>) -> Self {
        let mut prompts = Self::default();
        prompts.save_paths.push_back(Some(path.into()));
        prompts
    }

    pub fn opening(path: impl Into<PathBuf>) -> Self {
        let mut prompts = Self::default();
        prompts.open_paths.push_back(Some(path.into()));
        prompts
    }

    pub fn confirm(mut self, answer: bool) -> Self {
        self.confirmations.push_back(answer);
        self
    }
}

impl UserPrompts for ScriptedPrompts {
    fn choose_save_path(&mut self) -> Option<PathBuf> {
        self.save_prompts += 1;
        self.save_paths.pop_front().flatten()
    }

    fn choose_open_path(&mut self) -> Option<PathBuf> {
        self.open_paths.pop_front().flatten()
    }

    fn confirm_format_loss(&mut self, file_name: &str) -> bool {
        self.warnings_shown.push(file_name.to_string());
        self.confirmations.pop_front().unwrap_or(false)
    }

    fn show_error(&mut self, message: &str) {
        self.errors_shown.push(message.to_string());
    }
}

/// Keeps every status update in order.
#[derive(Default)]
pub struct RecordingStatus {
    counts: Mutex<Vec<usize>>,
    messages: Mutex<Vec<String>>,
}

impl RecordingStatus {
    pub fn counts(&self) -> Vec<usize> {
        self.counts.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl StatusNotifier for RecordingStatus {
    fn report_character_count(&self, count: usize) {
        self.counts.lock().unwrap().push(count);
    }

    fn report_status(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Error sink that keeps records in memory, or fails on demand.
#[derive(Default)]
pub struct MemoryErrorSink {
    pub records: Mutex<Vec<String>>,
    pub broken: bool,
}

impl MemoryErrorSink {
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Default::default()
        }
    }

    pub fn records(&self) -> Vec<String> {
        self.records.lock().unwrap().clone()
    }
}

impl ErrorSink for MemoryErrorSink {
    fn report(&self, error: &dyn Error) -> std::io::Result<PathBuf> {
        if self.broken {
            return Err(std::io::Error::other("disk full"));
        }
        self.records.lock().unwrap().push(error.to_string());
        Ok(PathBuf::from("memory.err"))
    }
}
