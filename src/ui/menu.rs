use fltk::{
    app::Sender,
    enums::Shortcut,
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use super::UiEvent;
use crate::app::domain::messages::Message;

fn command(sender: &Sender<UiEvent>, message: Message) -> impl FnMut(&mut MenuBar) + 'static {
    let s = *sender;
    move |_| s.send(UiEvent::Command(message.clone()))
}

pub fn build_menu(menu: &mut MenuBar, sender: &Sender<UiEvent>) {
    let s = sender;

    // File
    menu.add("File/New", Shortcut::Ctrl | 'n', MenuFlag::Normal, command(s, Message::FileNew));
    menu.add("File/Open...", Shortcut::Ctrl | 'o', MenuFlag::Normal, command(s, Message::FileOpen));
    menu.add("File/Save", Shortcut::Ctrl | 's', MenuFlag::MenuDivider, command(s, Message::FileSave));
    menu.add("File/Quit", Shortcut::Ctrl | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(UiEvent::Quit) });

    // Format
    menu.add("Format/Bold", Shortcut::Ctrl | 'b', MenuFlag::Normal, command(s, Message::ToggleBold));
    menu.add("Format/Italic", Shortcut::Ctrl | 'i', MenuFlag::Normal, command(s, Message::ToggleItalic));
    menu.add("Format/Underline", Shortcut::Ctrl | 'u', MenuFlag::Normal, command(s, Message::ToggleUnderline));
}
