//! Motion dispatch: moves collapse the selection, extensions move the head.
//!
//! Motions never record history, but they close the typing run so that the
//! next character insert starts a fresh transaction. Two state-dependent
//! rules live here rather than in the translator: a plain horizontal arrow
//! on an active selection collapses onto the ordered edge without moving,
//! and the backward word step at the top visible row scrolls first.

use crate::DispatchResult;
use etch_input::Motion;
use etch_state::{Caret, EditorState};
use etch_text::Position;
use tracing::trace;

pub(crate) fn handle_move(state: &mut EditorState, motion: Motion) -> DispatchResult {
    state.history.break_coalescing();
    let before = state.caret();
    if state.selection.is_active() && matches!(motion, Motion::Left | Motion::Right) {
        // collapse to the ordered edge without moving
        let (start, end) = state.selection.ordered();
        let dest = if matches!(motion, Motion::Left) {
            start
        } else {
            end
        };
        state.cursor.jump(dest);
        state.selection.collapse_to(dest);
    } else {
        step(state, motion);
        state.selection.collapse_to(state.cursor.pos());
    }
    state.viewport.follow(state.cursor.row);
    changed(state, before, motion)
}

pub(crate) fn handle_extend(state: &mut EditorState, motion: Motion) -> DispatchResult {
    state.history.break_coalescing();
    let before = state.caret();
    step(state, motion);
    state.selection.extend_to(state.cursor.pos());
    state.viewport.follow(state.cursor.row);
    changed(state, before, motion)
}

fn step(state: &mut EditorState, motion: Motion) {
    match motion {
        Motion::Left => state.cursor.move_left(&state.buffer),
        Motion::Right => state.cursor.move_right(&state.buffer),
        Motion::Up => state.cursor.move_up(&state.buffer),
        Motion::Down => state.cursor.move_down(&state.buffer),
        Motion::LineStart => state.cursor.move_line_start(&state.buffer),
        Motion::LineEnd => state.cursor.move_line_end(&state.buffer),
        Motion::WordForward => state.cursor.move_word(&state.buffer),
        Motion::WordBackward => word_backward(state),
    }
}

/// The backward word step carries a viewport rule: issued at column 0 of
/// the top visible row it scrolls up one row (clamped at the document
/// start) and lands at the end of the newly-topmost row. At `start == 0`
/// that is the end of line 0.
fn word_backward(state: &mut EditorState) {
    if state.cursor.col == 0 && state.cursor.row == state.viewport.start {
        let target_row = state.cursor.row.saturating_sub(1);
        let line_count = state.buffer.line_count();
        state.viewport.scroll(-1, line_count);
        let col = state.buffer.line_len(target_row);
        state.cursor.jump(Position::new(target_row, col));
        return;
    }
    state.cursor.move_back_word(&state.buffer);
}

fn changed(state: &EditorState, before: Caret, motion: Motion) -> DispatchResult {
    let after = state.caret();
    if after != before {
        trace!(
            target: "actions.dispatch",
            ?motion,
            row = state.cursor.row,
            col = state.cursor.col,
            "motion"
        );
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}
