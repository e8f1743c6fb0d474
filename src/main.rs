use std::sync::Arc;

use fltk::{
    app,
    dialog,
    enums::{Event, Key},
    frame::Frame,
    prelude::*,
    text::TextEditor,
};
use tracing_subscriber::EnvFilter;

use rich_pad::app::{AppError, AppSettings, EditorSession, ErrorReporter, Message, StatusBar};
use rich_pad::ui::UiEvent;
use rich_pad::ui::editor_bridge::EditorBridge;
use rich_pad::ui::main_window::{MainWidgets, build_main_window};
use rich_pad::ui::menu::build_menu;
use rich_pad::ui::prompts::FltkPrompts;

const TICK_SECS: f64 = 0.25;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut settings = AppSettings::load();
    if let Err(e) = settings.validate() {
        tracing::warn!("{}. Using defaults.", e);
        settings = AppSettings::default();
    }
    let defaults = settings.default_attributes();
    let status = Arc::new(StatusBar::new());
    let errors = Arc::new(ErrorReporter::new(settings.report_dir()));
    let mut session = EditorSession::new(settings, status.clone(), errors);

    let app = app::App::default();
    let (sender, receiver) = app::channel::<UiEvent>();

    let mut widgets = build_main_window(&sender);
    build_menu(&mut widgets.menu, &sender);
    let mut bridge = EditorBridge::new(widgets.text_editor.clone(), &defaults, sender);
    install_shortcuts(&mut bridge.editor, sender);
    let mut prompts = FltkPrompts;

    widgets.wind.set_callback(move |_| {
        if app::event() == Event::Close {
            sender.send(UiEvent::Quit);
        }
    });
    app::add_timeout3(TICK_SECS, move |handle| {
        sender.send(UiEvent::Tick);
        app::repeat_timeout3(TICK_SECS, handle);
    });

    if let Some(doc) = session.active_document() {
        bridge.render(doc);
    }
    refresh_chrome(&session, &mut widgets, &status, true);
    widgets.wind.show();

    while app.wait() {
        let Some(event) = receiver.recv() else {
            continue;
        };
        let ticked = matches!(event, UiEvent::Tick);
        match event {
            UiEvent::Inserted { offset, text } => {
                let typed = move_caret_for_edit(&mut session, offset)
                    .and_then(|_| session.insert_text(&text));
                after_edit(&session, &mut bridge, typed);
            }
            UiEvent::Deleted { offset, len } => {
                let removed = session.remove(offset, len);
                after_edit(&session, &mut bridge, removed);
            }
            UiEvent::Command(message) => {
                handle_command(&mut session, &mut bridge, &mut prompts, message);
            }
            UiEvent::Tick => {}
            UiEvent::Quit => {
                tracing::info!("Exiting");
                app.quit();
                break;
            }
        }
        // Ticks leave the controls alone so typing in the size field survives.
        refresh_chrome(&session, &mut widgets, &status, !ticked);
    }
}

/// Route Ctrl shortcuts typed in the editor through the same messages the
/// toolbar sends.
fn install_shortcuts(editor: &mut TextEditor, sender: app::Sender<UiEvent>) {
    editor.handle(move |_, ev| {
        if ev != Event::KeyDown || !app::is_event_ctrl() {
            return false;
        }
        let key = app::event_key();
        if key == Key::Tab {
            return false;
        }
        match key.to_char().and_then(|c| Message::from_shortcut(true, c)) {
            Some(message) => {
                sender.send(UiEvent::Command(message));
                true
            }
            None => false,
        }
    });
}

/// Typing continues at the document caret unless the user moved it.
fn move_caret_for_edit(session: &mut EditorSession, offset: usize) -> rich_pad::app::Result<()> {
    let moved = session
        .active_document()
        .map(|doc| doc.caret() != offset || doc.selection().is_some())
        .unwrap_or(false);
    if moved {
        session.set_caret(offset)?;
    }
    Ok(())
}

fn after_edit(session: &EditorSession, bridge: &mut EditorBridge, result: rich_pad::app::Result<()>) {
    let Some(doc) = session.active_document() else {
        return;
    };
    match result {
        Ok(()) => bridge.restyle(doc),
        Err(e) => {
            tracing::warn!("Editor out of step with document: {}", e);
            bridge.render(doc);
        }
    }
}

/// Copy the editor's caret and selection into the active document.
fn sync_cursor(session: &mut EditorSession, bridge: &EditorBridge) -> rich_pad::app::Result<()> {
    let (caret, selection) = bridge.cursor();
    match selection {
        Some(range) => session.select(range),
        None => move_caret_for_edit(session, caret),
    }
}

fn handle_command(
    session: &mut EditorSession,
    bridge: &mut EditorBridge,
    prompts: &mut FltkPrompts,
    message: Message,
) {
    if let Err(e) = sync_cursor(session, bridge) {
        tracing::debug!("Cursor sync skipped: {}", e);
    }
    let before = session.active_document().map(|doc| doc.id);

    if let Err(e) = session.dispatch(message, prompts) {
        match e {
            AppError::InvalidFontSize(input) => {
                dialog::alert_default(&format!("\"{}\" is not a valid font size.", input));
            }
            other => tracing::warn!("Command failed: {}", other),
        }
    }

    let Some(doc) = session.active_document() else {
        return;
    };
    if before != Some(doc.id) {
        bridge.render(doc);
    } else {
        bridge.restyle(doc);
    }
    bridge.editor.take_focus().ok();
}

fn refresh_chrome(session: &EditorSession, widgets: &mut MainWidgets, status: &StatusBar, controls: bool) {
    set_label_if_changed(&mut widgets.status_frame, &status.status_label());
    set_label_if_changed(&mut widgets.count_frame, &status.count_label());

    let tabs = session.tabs();
    let title = tabs
        .active_index()
        .and_then(|i| tabs.title(i))
        .map(|t| format!("{} - RichPad", t))
        .unwrap_or_else(|| "RichPad".to_string());
    if widgets.wind.label() != title {
        widgets.wind.set_label(&title);
    }
    widgets.tab_bar.rebuild(tabs);

    if !controls {
        return;
    }
    if let Some(doc) = session.active_document() {
        widgets.formatting.sync(session.toolbar(), doc.active_attributes());
    }
}

fn set_label_if_changed(frame: &mut Frame, label: &str) {
    if frame.label() != label {
        frame.set_label(label);
        frame.redraw();
    }
}
