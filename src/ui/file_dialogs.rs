use std::path::PathBuf;

use fltk::dialog;

/// Filter shown in the open and save choosers. FLTK adds "All Files" itself.
pub const DOCUMENT_FILTER: &str = "Rich Text\t*.rtf\nText Files\t*.txt";

pub fn native_open_dialog() -> Option<PathBuf> {
    dialog::file_chooser("Open File", DOCUMENT_FILTER, ".", false).map(PathBuf::from)
}

pub fn native_save_dialog() -> Option<PathBuf> {
    dialog::file_chooser("Save As", DOCUMENT_FILTER, ".", false).map(PathBuf::from)
}
