use fltk::{
    app::Sender,
    enums::{Align, FrameType},
    frame::Frame,
    group::Flex,
    menu::MenuBar,
    prelude::*,
    text::{TextEditor, WrapMode},
    window::Window,
};

use super::UiEvent;
use super::formatting_bar::{FORMATTING_BAR_HEIGHT, FormattingBar};
use super::tab_bar::{TAB_BAR_HEIGHT, TabBar};

pub const STATUS_BAR_HEIGHT: i32 = 24;

pub struct MainWidgets {
    pub wind: Window,
    pub menu: MenuBar,
    pub formatting: FormattingBar,
    pub tab_bar: TabBar,
    pub text_editor: TextEditor,
    pub status_frame: Frame,
    pub count_frame: Frame,
}

pub fn build_main_window(sender: &Sender<UiEvent>) -> MainWidgets {
    let mut wind = Window::new(100, 100, 800, 600, "RichPad");
    wind.set_xclass("RichPad");

    let mut flex = Flex::new(0, 0, 800, 600, None);
    flex.set_type(fltk::group::FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, 30, "");
    flex.fixed(&menu, 30);

    let formatting = FormattingBar::new(sender);
    flex.fixed(&formatting.row, FORMATTING_BAR_HEIGHT);

    let tab_bar = TabBar::new(*sender);
    flex.fixed(&tab_bar.widget, TAB_BAR_HEIGHT);

    let mut text_editor = TextEditor::new(0, 0, 0, 0, "");
    text_editor.wrap_mode(WrapMode::AtBounds, 0);

    let mut status_row = Flex::default().row();
    let mut status_frame = Frame::default().with_label("Status: Active");
    status_frame.set_align(Align::Left | Align::Inside);
    let mut count_frame = Frame::default().with_label("Character Count: 0");
    count_frame.set_align(Align::Right | Align::Inside);
    status_row.end();
    status_row.set_frame(FrameType::ThinUpBox);
    flex.fixed(&status_row, STATUS_BAR_HEIGHT);

    flex.end();
    wind.resizable(&flex);
    wind.end();

    MainWidgets {
        wind,
        menu,
        formatting,
        tab_bar,
        text_editor,
        status_frame,
        count_frame,
    }
}
