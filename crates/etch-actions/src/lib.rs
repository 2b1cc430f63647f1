//! Operation dispatch: the single mutation path through the editor state.
//!
//! Every user-initiated change runs the same pipeline: capture the
//! before-caret, mutate the buffer, update cursor and selection, record one
//! transaction, then re-follow the viewport. Rendering reads the resulting
//! state between pipeline calls and never observes a partial edit.
//!
//! `apply` is the exhaustive dispatcher over the `Op` algebra; `dispatch`
//! translates a gesture and applies its op `repeat` times as distinct
//! observable steps (each step records and follows on its own, though
//! coalescing may fold repeated typing into one transaction).

use etch_input::{Gesture, Op, translate};
use etch_state::EditorState;
use etch_text::Position;
use tracing::trace;

mod edit;
mod motion;

pub use edit::insert_text;

/// Whether a dispatched operation changed observable state. Hosts use this
/// to skip re-rendering after no-op gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self { dirty: true }
    }
    pub fn clean() -> Self {
        Self { dirty: false }
    }
}

/// Apply one operation once.
pub fn apply(state: &mut EditorState, op: Op) -> DispatchResult {
    let result = match op {
        Op::Move(m) => motion::handle_move(state, m),
        Op::Extend(m) => motion::handle_extend(state, m),
        Op::InsertChar(c) => edit::insert_char(state, c),
        Op::InsertNewline => edit::insert_newline(state),
        Op::DeleteBackward => edit::delete_backward(state),
        Op::Indent => edit::indent(state),
        Op::Unindent => edit::unindent(state),
    };
    trace!(target: "actions.dispatch", ?op, dirty = result.dirty, "applied");
    result
}

/// Translate a gesture and apply it `repeat` times.
pub fn dispatch(state: &mut EditorState, gesture: &Gesture) -> DispatchResult {
    let Some(op) = translate(gesture) else {
        return DispatchResult::clean();
    };
    let mut dirty = false;
    for _ in 0..gesture.repeat {
        dirty |= apply(state, op).dirty;
    }
    if dirty {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

/// Undo the newest transaction. Empty stack is a silent no-op.
pub fn undo(state: &mut EditorState) -> bool {
    let applied = state
        .history
        .undo(&mut state.buffer, &mut state.cursor, &mut state.selection);
    if applied {
        state.dirty = true;
        state.viewport.follow(state.cursor.row);
    }
    applied
}

/// Redo the newest undone transaction. Empty stack is a silent no-op.
pub fn redo(state: &mut EditorState) -> bool {
    let applied = state
        .history
        .redo(&mut state.buffer, &mut state.cursor, &mut state.selection);
    if applied {
        state.dirty = true;
        state.viewport.follow(state.cursor.row);
    }
    applied
}

/// Programmatic cursor placement (host click). Clamps, collapses the
/// selection, closes the typing run, and follows.
pub fn set_cursor(state: &mut EditorState, row: usize, col: usize) {
    state.history.break_coalescing();
    state.cursor.set(&state.buffer, row, col);
    state.selection.collapse_to(state.cursor.pos());
    state.viewport.follow(state.cursor.row);
}

/// Programmatic selection placement (host drag). Both ends are clamped; the
/// cursor lands on the head.
pub fn set_selection(state: &mut EditorState, tail: Position, head: Position) {
    state.history.break_coalescing();
    let tail = state.buffer.clamp(tail);
    let head = state.buffer.clamp(head);
    state.selection.tail = tail;
    state.selection.extend_to(head);
    state.cursor.set(&state.buffer, head.row, head.col);
    state.viewport.follow(state.cursor.row);
}

#[cfg(test)]
mod tests {
    use super::*;
    use etch_config::Settings;
    use etch_input::{Key, Mods};

    fn state(text: &str) -> EditorState {
        EditorState::with_text(Settings::default(), text)
    }

    #[test]
    fn unmapped_gesture_is_clean_and_records_nothing() {
        let mut st = state("abc");
        let r = dispatch(&mut st, &Gesture::with_mods(Key::Up, Mods::META));
        assert!(!r.dirty);
        assert_eq!(st.history.undo_depth(), 0);
    }

    #[test]
    fn repeat_applies_n_observable_steps() {
        let mut st = state("abcdef");
        dispatch(&mut st, &Gesture::new(Key::Right).repeated(4));
        assert_eq!(st.cursor.pos(), Position::new(0, 4));
    }

    #[test]
    fn undo_with_empty_stack_is_a_silent_no_op() {
        let mut st = state("abc");
        assert!(!undo(&mut st));
        assert!(!st.dirty);
    }

    #[test]
    fn set_selection_clamps_both_ends() {
        let mut st = state("ab\ncdef");
        set_selection(&mut st, Position::new(0, 99), Position::new(9, 9));
        assert_eq!(st.selection.tail, Position::new(0, 2));
        assert_eq!(st.selection.head, Position::new(1, 4));
        assert_eq!(st.cursor.pos(), Position::new(1, 4));
    }
}
