//! Editor state: cursor, selection, viewport, and the undo history over a
//! single buffer.
//!
//! `EditorState` is the single mutation point for the edit pipeline. The
//! components read the buffer but never observe one another; the dispatcher
//! in `etch-actions` coordinates them and keeps `selection.head` equal to
//! the cursor position after every operation.

use etch_config::Settings;
use etch_text::Buffer;
use tracing::debug;

mod cursor;
mod history;
mod selection;
mod viewport;

pub use cursor::Cursor;
pub use history::{Caret, EditRecord, HISTORY_MAX, History, Transaction};
pub use selection::Selection;
pub use viewport::Viewport;

#[derive(Debug)]
pub struct EditorState {
    pub buffer: Buffer,
    pub cursor: Cursor,
    pub selection: Selection,
    pub viewport: Viewport,
    pub history: History,
    pub settings: Settings,
    /// True once any transaction has been recorded (or undone/redone) since
    /// the last bulk text load. Hosts use it for unsaved-changes chrome.
    pub dirty: bool,
}

impl EditorState {
    pub fn new(settings: Settings) -> Self {
        settings.validate().expect("invalid editor settings");
        Self {
            buffer: Buffer::new(),
            cursor: Cursor::origin(),
            selection: Selection::default(),
            viewport: Viewport::new(settings.viewport_rows),
            history: History::new(),
            settings,
            dirty: false,
        }
    }

    pub fn with_text(settings: Settings, text: &str) -> Self {
        let mut state = Self::new(settings);
        state.set_text(text);
        state
    }

    /// Snapshot the caret (cursor + selection) by value for history records.
    pub fn caret(&self) -> Caret {
        Caret {
            cursor: self.cursor,
            selection: self.selection,
        }
    }

    /// Bulk text replacement. Always succeeds: clamps the cursor onto the
    /// new document, collapses the selection, clears history (the prior
    /// edits no longer refer to valid state), and re-follows the viewport.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        let clamped = self.buffer.clamp(self.cursor.pos());
        self.cursor.jump(clamped);
        self.selection.collapse_to(clamped);
        self.history.clear();
        self.viewport.follow(self.cursor.row);
        self.dirty = false;
        debug!(target: "state.editor", lines = self.buffer.line_count(), "text_loaded");
    }
}
