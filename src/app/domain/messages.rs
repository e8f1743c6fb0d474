/// Commands that reach the editor session.
///
/// Toolbar buttons, menu items and keyboard shortcuts all produce one of
/// these; `EditorSession::dispatch` handles them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // File
    FileNew,
    FileOpen,
    FileSave,

    // Tabs
    CloseTab(usize),
    SelectTab(usize),

    // Format
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    SetFontFamily(String),
    SetFontSize(u32),
    /// Raw text from the size field, validated before use.
    FontSizeInput(String),
}

impl Message {
    /// Map a key pressed with or without Ctrl to its command.
    pub fn from_shortcut(ctrl: bool, key: char) -> Option<Message> {
        if !ctrl {
            return None;
        }
        match key.to_ascii_lowercase() {
            'b' => Some(Message::ToggleBold),
            'i' => Some(Message::ToggleItalic),
            'u' => Some(Message::ToggleUnderline),
            'n' => Some(Message::FileNew),
            's' => Some(Message::FileSave),
            'o' => Some(Message::FileOpen),
            _ => None,
        }
    }
}
