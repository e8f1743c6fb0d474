use std::path::PathBuf;

/// Modal interactions the persistence workflows need from the front-end.
///
/// Every call blocks until the user answers.
pub trait UserPrompts {
    /// Ask where to save. `None` means the user cancelled.
    fn choose_save_path(&mut self) -> Option<PathBuf>;

    /// Ask which file to open. `None` means the user cancelled.
    fn choose_open_path(&mut self) -> Option<PathBuf>;

    /// Warn that saving `file_name` as plain text drops all formatting.
    /// Returns true when the user accepts the loss.
    fn confirm_format_loss(&mut self, file_name: &str) -> bool;

    /// Blocking error notification.
    fn show_error(&mut self, message: &str);
}

pub const FORMAT_LOSS_WARNING: &str =
    "You are saving the file in a format where styles may be lost. Do you accept?";
pub const SAVE_ERROR: &str = "Error saving file...";
/// Shown when a plain text save or an overwrite fails.
pub const WRITE_ERROR: &str = "An error occured while saving the file.";
pub const OPEN_ERROR: &str = "Error opening file.";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occured...";
pub const REPORT_WRITE_ERROR: &str = "An error occured while writing the error file.";
