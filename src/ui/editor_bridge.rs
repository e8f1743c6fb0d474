use std::cell::Cell;
use std::ops::Range;
use std::rc::Rc;

use fltk::{
    app::Sender,
    prelude::*,
    text::{TextBuffer, TextEditor},
};

use super::UiEvent;
use super::style_map::StyleMap;
use crate::app::domain::attributes::CharAttributes;
use crate::app::domain::document::Document;
use crate::app::services::text_ops::{byte_to_char, char_to_byte};

/// Copy the buffer's text and free FLTK's malloc'd copy.
///
/// `TextBuffer::text()` leaks the C string it receives, which adds up when
/// the whole document is read after every edit.
pub fn buffer_text_no_leak(buf: &TextBuffer) -> String {
    unsafe extern "C" {
        fn Fl_Text_Buffer_text(buf: *mut std::ffi::c_void) -> *mut std::ffi::c_char;
        fn free(ptr: *mut std::ffi::c_void);
    }

    // SAFETY: `buf` is a live buffer, Fl_Text_Buffer_text returns a
    // NUL-terminated malloc'd string or null, and it is freed exactly once
    // after being copied.
    unsafe {
        let ptr = Fl_Text_Buffer_text(buf.as_ptr() as *mut std::ffi::c_void);
        if ptr.is_null() {
            return String::new();
        }
        let text = std::ffi::CStr::from_ptr(ptr).to_string_lossy().into_owned();
        free(ptr as *mut std::ffi::c_void);
        text
    }
}

/// Shows one document in the FLTK editor and reports user edits back as
/// character-offset events.
///
/// Documents live in the session; the editor only ever holds a rendering of
/// the active one. Re-rendering is done with the modify callback muted so it
/// does not echo back as edits.
pub struct EditorBridge {
    pub editor: TextEditor,
    buffer: TextBuffer,
    style_buffer: TextBuffer,
    styles: StyleMap,
    muted: Rc<Cell<bool>>,
}

impl EditorBridge {
    pub fn new(mut editor: TextEditor, defaults: &CharAttributes, sender: Sender<UiEvent>) -> Self {
        let mut buffer = TextBuffer::default();
        let style_buffer = TextBuffer::default();
        let muted = Rc::new(Cell::new(false));

        let flag = muted.clone();
        let buf = buffer.clone();
        buffer.add_modify_callback(move |pos, inserted, deleted, _restyled, deleted_text| {
            if flag.get() || (inserted == 0 && deleted == 0) {
                return;
            }
            let offset = buf
                .text_range(0, pos)
                .map(|before| before.chars().count())
                .unwrap_or(0);
            if deleted > 0 {
                sender.send(UiEvent::Deleted {
                    offset,
                    len: deleted_text.chars().count(),
                });
            }
            if inserted > 0 {
                if let Some(text) = buf.text_range(pos, pos + inserted) {
                    sender.send(UiEvent::Inserted { offset, text });
                }
            }
        });

        editor.set_buffer(buffer.clone());
        Self {
            editor,
            buffer,
            style_buffer,
            styles: StyleMap::new(defaults),
            muted,
        }
    }

    /// Replace the editor's content with `doc` and place the caret.
    pub fn render(&mut self, doc: &Document) {
        let text = doc.text();
        self.muted.set(true);
        self.buffer.set_text(&text);
        self.muted.set(false);
        self.restyle(doc);
        self.editor
            .set_insert_position(char_to_byte(&text, doc.caret()) as i32);
        self.editor.show_insert_position();
    }

    /// Rebuild the style buffer from the document's runs. FLTK styles are
    /// per byte, so multi-byte characters repeat their style character.
    pub fn restyle(&mut self, doc: &Document) {
        let mut styles = String::with_capacity(doc.character_count());
        for run in doc.runs() {
            let ch = self.styles.get_or_insert(&run.attributes);
            for c in run.text.chars() {
                for _ in 0..c.len_utf8() {
                    styles.push(ch);
                }
            }
        }
        self.style_buffer.set_text(&styles);
        self.editor
            .set_highlight_data(self.style_buffer.clone(), self.styles.entries().to_vec());
        self.editor.redraw();
    }

    /// Caret and selection in character offsets.
    pub fn cursor(&self) -> (usize, Option<Range<usize>>) {
        let text = buffer_text_no_leak(&self.buffer);
        let caret = byte_to_char(&text, self.editor.insert_position().max(0) as usize);
        let selection = self
            .buffer
            .selection_position()
            .filter(|(start, end)| start != end)
            .map(|(start, end)| {
                byte_to_char(&text, start.max(0) as usize)..byte_to_char(&text, end.max(0) as usize)
            });
        (caret, selection)
    }
}
