use fltk::{
    app::Sender,
    button::Button,
    enums::{Color, FrameType},
    group::Flex,
    prelude::*,
};

use super::UiEvent;
use crate::app::controllers::tabs::SessionManager;
use crate::app::domain::messages::Message;

pub const TAB_BAR_HEIGHT: i32 = 28;

const MIN_TAB_WIDTH: i32 = 60;
const MAX_TAB_WIDTH: i32 = 180;
const CLOSE_BTN_WIDTH: i32 = 22;
const CHAR_WIDTH: i32 = 7;

/// Row of tab buttons, rebuilt whenever the tab list changes.
pub struct TabBar {
    pub widget: Flex,
    sender: Sender<UiEvent>,
    /// Titles and active index currently drawn.
    shown: Option<(Vec<String>, Option<usize>)>,
}

impl TabBar {
    pub fn new(sender: Sender<UiEvent>) -> Self {
        let mut widget = Flex::default().row();
        widget.set_margin(0);
        widget.set_pad(1);
        widget.end();
        Self {
            widget,
            sender,
            shown: None,
        }
    }

    /// Redraw the tabs if the titles or the active tab changed.
    pub fn rebuild(&mut self, tabs: &SessionManager) {
        let titles: Vec<String> = tabs.titles().into_iter().map(String::from).collect();
        let active = tabs.active_index();
        if self.shown.as_ref() == Some(&(titles.clone(), active)) {
            return;
        }

        self.widget.clear();
        self.widget.begin();

        for (index, title) in titles.iter().enumerate() {
            let width = (title.chars().count() as i32 * CHAR_WIDTH + 20).clamp(MIN_TAB_WIDTH, MAX_TAB_WIDTH);

            let mut tab = Button::default().with_label(title);
            tab.set_frame(FrameType::FlatBox);
            tab.clear_visible_focus();
            if active == Some(index) {
                tab.set_color(Color::Background2);
            }
            let s = self.sender;
            tab.set_callback(move |_| s.send(UiEvent::Command(Message::SelectTab(index))));
            self.widget.fixed(&tab, width);

            let mut close = Button::default().with_label("x");
            close.set_frame(FrameType::FlatBox);
            close.clear_visible_focus();
            close.set_tooltip("Close tab");
            let s = self.sender;
            close.set_callback(move |_| s.send(UiEvent::Command(Message::CloseTab(index))));
            self.widget.fixed(&close, CLOSE_BTN_WIDTH);
        }
        // Filler keeps the tabs left-aligned.
        fltk::frame::Frame::default();

        self.widget.end();
        // end() made the parent current; later dialogs must not nest in it.
        fltk::group::Group::set_current(None::<&fltk::group::Group>);
        self.widget.layout();
        self.widget.redraw();
        self.shown = Some((titles, active));
    }
}
