//! Embeddable editor facade.
//!
//! `Editor` owns the whole core (buffer, cursor, selection, viewport,
//! history) and exposes the embedding surface hosts drive: programmatic
//! state access, gesture injection, and pure render snapshots. Hosts feed
//! normalized keyboard gestures in and draw whatever `render()` returns;
//! the core holds no platform handles and persists nothing.

use tracing::debug;

pub use etch_config::{Settings, SettingsError, from_toml, load_from};
pub use etch_input::{Gesture, Key, Mods, Motion, Op};
pub use etch_render::{
    CursorMarker, RenderRow, RenderSnapshot, SelectionSegment, snapshot,
};
pub use etch_state::{Caret, EditorState, HISTORY_MAX, Selection};
pub use etch_text::Position;

/// Capability interface for optional extensions (highlighters, overlay
/// widgets). Slots are typed and attached up front; the core never does
/// dynamic member lookup. Hooks run on the host thread around the edit
/// pipeline and observe fully-settled state only.
pub trait Extension {
    fn before_edit(&mut self, _state: &EditorState) {}
    fn after_edit(&mut self, _state: &EditorState) {}
    fn render_overlay(&mut self, _snapshot: &RenderSnapshot) {}
}

pub struct Editor {
    state: EditorState,
    extensions: Vec<Box<dyn Extension>>,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("state", &self.state)
            .field("extensions", &self.extensions.len())
            .finish()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Editor {
    pub fn new(settings: Settings) -> Self {
        debug!(target: "editor", spaces = settings.spaces, rows = settings.viewport_rows, "editor_created");
        Self {
            state: EditorState::new(settings),
            extensions: Vec::new(),
        }
    }

    pub fn with_text(settings: Settings, text: &str) -> Self {
        Self {
            state: EditorState::with_text(settings, text),
            extensions: Vec::new(),
        }
    }

    /// Attach an extension slot. Meant to be called right after
    /// construction, before the host starts feeding gestures.
    pub fn attach(&mut self, extension: Box<dyn Extension>) {
        self.extensions.push(extension);
    }

    fn edit_scope<R>(&mut self, f: impl FnOnce(&mut EditorState) -> R) -> R {
        for ext in &mut self.extensions {
            ext.before_edit(&self.state);
        }
        let result = f(&mut self.state);
        for ext in &mut self.extensions {
            ext.after_edit(&self.state);
        }
        result
    }

    /// Direct state access for advanced hosts and extensions.
    pub fn state(&self) -> &EditorState {
        &self.state
    }
    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    // ---- model -------------------------------------------------------

    pub fn text(&self) -> String {
        self.state.buffer.text()
    }

    pub fn set_text(&mut self, text: &str) {
        self.edit_scope(|st| st.set_text(text));
    }

    pub fn line_count(&self) -> usize {
        self.state.buffer.line_count()
    }

    pub fn line(&self, row: usize) -> String {
        self.state.buffer.line(row)
    }

    pub fn lines(&self) -> Vec<String> {
        (0..self.line_count()).map(|r| self.line(r)).collect()
    }

    // ---- settings ----------------------------------------------------

    pub fn settings(&self) -> Settings {
        self.state.settings
    }

    /// Change the soft-tab width. Zero is a precondition error.
    pub fn set_spaces(&mut self, spaces: usize) {
        assert!(spaces >= 1, "spaces must be at least 1");
        self.state.settings.spaces = spaces;
    }

    // ---- cursor and selection ----------------------------------------

    /// The presented cursor: the selection head.
    pub fn cursor(&self) -> Position {
        self.state.cursor.pos()
    }

    pub fn selection(&self) -> Selection {
        self.state.selection
    }

    pub fn is_forward_selection(&self) -> bool {
        self.state.selection.is_forward()
    }

    pub fn set_cursor(&mut self, row: usize, col: usize) {
        etch_actions::set_cursor(&mut self.state, row, col);
    }

    pub fn set_selection(&mut self, tail: Position, head: Position) {
        etch_actions::set_selection(&mut self.state, tail, head);
    }

    /// Insert text at the selection: an atomic replacement when the
    /// selection is active, a plain insert at the cursor otherwise.
    pub fn insert(&mut self, text: &str) {
        self.edit_scope(|st| etch_actions::insert_text(st, text));
    }

    // ---- input -------------------------------------------------------

    /// Inject one gesture. Returns true when observable state changed.
    pub fn press(&mut self, gesture: Gesture) -> bool {
        self.edit_scope(|st| etch_actions::dispatch(st, &gesture).dirty)
    }

    /// Inject an unmodified key once.
    pub fn key(&mut self, key: Key) -> bool {
        self.press(Gesture::new(key))
    }

    pub fn key_with(&mut self, key: Key, mods: Mods) -> bool {
        self.press(Gesture::with_mods(key, mods))
    }

    /// Inject one key event per character.
    pub fn type_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.key(Key::Char(ch));
        }
    }

    // ---- history -----------------------------------------------------

    pub fn undo(&mut self) -> bool {
        self.edit_scope(etch_actions::undo)
    }

    pub fn redo(&mut self) -> bool {
        self.edit_scope(etch_actions::redo)
    }

    pub fn undo_depth(&self) -> usize {
        self.state.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.state.history.redo_depth()
    }

    /// Close the current typing run; hosts call this from their own timers
    /// to bound coalesced undo units.
    pub fn break_coalescing(&mut self) {
        self.state.history.break_coalescing();
    }

    // ---- viewport ----------------------------------------------------

    pub fn viewport_start(&self) -> usize {
        self.state.viewport.start
    }

    pub fn viewport_rows(&self) -> usize {
        self.state.viewport.rows
    }

    pub fn scroll(&mut self, delta: isize) {
        let line_count = self.state.buffer.line_count();
        self.state.viewport.scroll(delta, line_count);
    }

    // ---- rendering ---------------------------------------------------

    pub fn render(&self) -> RenderSnapshot {
        etch_render::snapshot(&self.state)
    }

    /// Snapshot, then hand the result to every extension's overlay hook.
    pub fn render_with_overlays(&mut self) -> RenderSnapshot {
        let snapshot = etch_render::snapshot(&self.state);
        for ext in &mut self.extensions {
            ext.render_overlay(&snapshot);
        }
        snapshot
    }

    pub fn status_line(&self) -> String {
        etch_render::status::status_line(&self.state)
    }

    pub fn is_dirty(&self) -> bool {
        self.state.dirty
    }
}
