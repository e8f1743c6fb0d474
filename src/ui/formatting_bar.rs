use fltk::{
    app::Sender,
    button::ToggleButton,
    enums::{CallbackTrigger, Font},
    group::Flex,
    menu::Choice,
    misc::InputChoice,
    prelude::*,
};

use super::UiEvent;
use crate::app::controllers::toolbar::{FormattingControls, ToolbarState, font_size_choices};
use crate::app::domain::attributes::CharAttributes;
use crate::app::domain::messages::Message;

pub const FORMATTING_BAR_HEIGHT: i32 = 30;

/// Families offered in the drop-down. Families read from files are added
/// on demand.
pub const FONT_FAMILIES: &[&str] = &["Times New Roman", "Arial", "Courier New", "Georgia", "Helvetica"];

pub struct FormattingBar {
    pub row: Flex,
    family: Choice,
    size: InputChoice,
    bold: ToggleButton,
    italic: ToggleButton,
    underline: ToggleButton,
}

impl FormattingBar {
    pub fn new(sender: &Sender<UiEvent>) -> Self {
        let mut row = Flex::default().row();

        let mut family = Choice::default();
        family.add_choice(&FONT_FAMILIES.join("|"));
        row.fixed(&family, 170);
        family.set_callback({
            let s = *sender;
            move |c| {
                if let Some(name) = c.choice() {
                    s.send(UiEvent::Command(Message::SetFontFamily(name)));
                }
            }
        });

        let mut size = InputChoice::default();
        for choice in font_size_choices() {
            size.add(&choice.to_string());
        }
        row.fixed(&size, 70);
        size.set_trigger(CallbackTrigger::EnterKeyAlways);
        size.set_callback({
            let s = *sender;
            move |c| {
                if let Some(value) = c.value() {
                    s.send(UiEvent::Command(Message::FontSizeInput(value)));
                }
            }
        });

        let bold = toggle("B", Font::HelveticaBold, Message::ToggleBold, sender);
        row.fixed(&bold, 30);
        let italic = toggle("I", Font::HelveticaItalic, Message::ToggleItalic, sender);
        row.fixed(&italic, 30);
        let underline = toggle("U", Font::Helvetica, Message::ToggleUnderline, sender);
        row.fixed(&underline, 30);

        row.end();

        Self {
            row,
            family,
            size,
            bold,
            italic,
            underline,
        }
    }

    /// Mirror the session's controls and the active attributes.
    pub fn sync(&mut self, toolbar: &ToolbarState, active: &CharAttributes) {
        let name = toolbar.displayed_font_family();
        let mut index = self.family.find_index(name);
        if index < 0 {
            self.family.add_choice(name);
            index = self.family.find_index(name);
        }
        self.family.set_value(index);
        self.size.set_value(&toolbar.displayed_font_size().to_string());

        self.bold.set_value(active.bold);
        self.italic.set_value(active.italic);
        self.underline.set_value(active.underline);
    }
}

fn toggle(label: &str, font: Font, message: Message, sender: &Sender<UiEvent>) -> ToggleButton {
    let mut button = ToggleButton::default().with_label(label);
    button.set_label_font(font);
    button.clear_visible_focus();
    let s = *sender;
    button.set_callback(move |_| s.send(UiEvent::Command(message.clone())));
    button
}
