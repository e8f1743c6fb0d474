use std::path::PathBuf;

use fltk::dialog;

use super::file_dialogs::{native_open_dialog, native_save_dialog};
use crate::app::infrastructure::prompts::{FORMAT_LOSS_WARNING, UserPrompts};

/// Modal FLTK dialogs behind the persistence workflows.
#[derive(Debug, Default)]
pub struct FltkPrompts;

impl UserPrompts for FltkPrompts {
    fn choose_save_path(&mut self) -> Option<PathBuf> {
        native_save_dialog()
    }

    fn choose_open_path(&mut self) -> Option<PathBuf> {
        native_open_dialog()
    }

    fn confirm_format_loss(&mut self, file_name: &str) -> bool {
        let choice = dialog::choice2_default(
            &format!("\"{}\"\n{}", file_name, FORMAT_LOSS_WARNING),
            "Yes",
            "No",
            "",
        );
        choice == Some(0)
    }

    fn show_error(&mut self, message: &str) {
        dialog::alert_default(message);
    }
}
