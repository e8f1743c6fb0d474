//! FLTK front-end. Renders the active document and turns widget activity
//! into `UiEvent`s for the dispatch loop in `main`.

pub mod editor_bridge;
pub mod file_dialogs;
pub mod formatting_bar;
pub mod main_window;
pub mod menu;
pub mod prompts;
pub mod style_map;
pub mod tab_bar;

use crate::app::domain::messages::Message;

/// Everything that travels through the FLTK channel.
#[derive(Debug, Clone)]
pub enum UiEvent {
    Command(Message),
    /// Text typed or pasted into the editor, in character offsets.
    Inserted { offset: usize, text: String },
    Deleted { offset: usize, len: usize },
    /// Periodic wake-up so the status line picks up background reverts.
    Tick,
    Quit,
}
