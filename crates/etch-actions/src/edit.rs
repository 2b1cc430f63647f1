//! Edit application: every mutation runs capture → mutate → record → follow.
//!
//! Selection-consuming edits (replace, selection delete) record a
//! normalized before-caret with the head on `ordered().start`, so undoing
//! them re-selects the original range and presents the cursor at the range
//! start.

use crate::DispatchResult;
use etch_state::{Caret, Cursor, EditRecord, EditorState, Selection};
use etch_text::Position;
use tracing::trace;

/// Before-caret for an edit that consumes the ordered range `[start, end)`:
/// cursor on the start, original range kept as a backward selection.
fn consumed_before(start: Position, end: Position) -> Caret {
    let mut cursor = Cursor::origin();
    cursor.jump(start);
    Caret {
        cursor,
        selection: Selection {
            tail: end,
            head: start,
        },
    }
}

fn finish(state: &mut EditorState, kind: &'static str) -> DispatchResult {
    state.dirty = true;
    state.viewport.follow(state.cursor.row);
    trace!(
        target: "actions.dispatch",
        kind,
        row = state.cursor.row,
        col = state.cursor.col,
        "edit"
    );
    DispatchResult::dirty()
}

/// Replace the active selection with `text` as one atomic transaction. The
/// cursor lands immediately after the inserted text.
pub(crate) fn replace_selection(state: &mut EditorState, text: &str) -> DispatchResult {
    debug_assert!(state.selection.is_active(), "replace needs an active selection");
    let (start, end) = state.selection.ordered();
    let before = consumed_before(start, end);
    let deleted = state.buffer.delete_range(start, end);
    let new_end = state.buffer.insert_text(start, text);
    state.cursor.jump(new_end);
    state.selection.collapse_to(new_end);
    let after = state.caret();
    state.history.record(
        EditRecord::Replace {
            start,
            deleted,
            inserted: text.to_string(),
        },
        before,
        after,
    );
    finish(state, "replace")
}

/// Delete the active selection. The cursor lands on the ordered start.
pub(crate) fn delete_selection(state: &mut EditorState) -> DispatchResult {
    debug_assert!(state.selection.is_active(), "delete needs an active selection");
    let (start, end) = state.selection.ordered();
    let before = consumed_before(start, end);
    let text = state.buffer.delete_range(start, end);
    state.cursor.jump(start);
    state.selection.collapse_to(start);
    let after = state.caret();
    state
        .history
        .record(EditRecord::Delete { start, end, text }, before, after);
    finish(state, "delete_selection")
}

/// A typed printable character: replacement when a selection is active,
/// otherwise a coalescable single-character insert.
pub(crate) fn insert_char(state: &mut EditorState, ch: char) -> DispatchResult {
    if state.selection.is_active() {
        return replace_selection(state, &ch.to_string());
    }
    let before = state.caret();
    let at = state.cursor.pos();
    let end = state.buffer.insert_text(at, &ch.to_string());
    state.cursor.jump(end);
    state.selection.collapse_to(end);
    let after = state.caret();
    state.history.record_typed_char(at, ch, before, after);
    finish(state, "insert_char")
}

/// Programmatic insertion: replacement when a selection is active, plain
/// (non-coalescing) insert at the cursor otherwise.
pub fn insert_text(state: &mut EditorState, text: &str) -> DispatchResult {
    if state.selection.is_active() {
        return replace_selection(state, text);
    }
    if text.is_empty() {
        return DispatchResult::clean();
    }
    let before = state.caret();
    let at = state.cursor.pos();
    let end = state.buffer.insert_text(at, text);
    state.cursor.jump(end);
    state.selection.collapse_to(end);
    let after = state.caret();
    state.history.record(
        EditRecord::Insert {
            at,
            text: text.to_string(),
        },
        before,
        after,
    );
    finish(state, "insert_text")
}

/// Enter: replace an active selection with a newline, otherwise split the
/// line. Either way the cursor advances to the start of the next row.
pub(crate) fn insert_newline(state: &mut EditorState) -> DispatchResult {
    if state.selection.is_active() {
        return replace_selection(state, "\n");
    }
    let before = state.caret();
    let at = state.cursor.pos();
    state.buffer.split_line(at);
    state.cursor.jump(Position::new(at.row + 1, 0));
    state.selection.collapse_to(state.cursor.pos());
    let after = state.caret();
    state.history.record(EditRecord::Split { at }, before, after);
    finish(state, "newline")
}

/// Backspace: selection delete, character delete, or line join. At the
/// document origin it is a silent no-op.
pub(crate) fn delete_backward(state: &mut EditorState) -> DispatchResult {
    if state.selection.is_active() {
        return delete_selection(state);
    }
    let at = state.cursor.pos();
    if at.row == 0 && at.col == 0 {
        return DispatchResult::clean();
    }
    let before = state.caret();
    if at.col > 0 {
        let start = Position::new(at.row, at.col - 1);
        let text = state.buffer.delete_range(start, at);
        state.cursor.jump(start);
        state.selection.collapse_to(start);
        let after = state.caret();
        state
            .history
            .record(EditRecord::Delete { start, end: at, text }, before, after);
    } else {
        let join = state.buffer.join_lines(at.row - 1);
        state.cursor.jump(join);
        state.selection.collapse_to(join);
        let after = state.caret();
        state
            .history
            .record(EditRecord::Join { at: join }, before, after);
    }
    finish(state, "backspace")
}

/// Rows a multi-row selection indents/unindents: the trailing row is
/// excluded when the selection ends exactly at its column 0.
fn affected_last_row(start: Position, end: Position) -> usize {
    if end.row > start.row && end.col == 0 {
        end.row - 1
    } else {
        end.row
    }
}

/// Tab: indent the selected rows when the selection spans rows; otherwise
/// insert a soft tab (replacing a single-row selection like any typed text).
pub(crate) fn indent(state: &mut EditorState) -> DispatchResult {
    let pad = " ".repeat(state.settings.spaces);
    if !state.selection.is_active() {
        return insert_text(state, &pad);
    }
    let (start, end) = state.selection.ordered();
    if end.row == start.row {
        return replace_selection(state, &pad);
    }
    let spaces = state.settings.spaces;
    let last = affected_last_row(start, end);
    let before = state.caret();
    state.history.begin_group(before);
    for row in start.row..=last {
        let at = Position::new(row, 0);
        state.buffer.insert_text(at, &pad);
        state.history.record(
            EditRecord::Insert {
                at,
                text: pad.clone(),
            },
            before,
            before,
        );
    }
    let shift = |pos: Position| {
        if pos.row >= start.row && pos.row <= last {
            Position::new(pos.row, pos.col + spaces)
        } else {
            pos
        }
    };
    state.selection.tail = shift(state.selection.tail);
    let head = shift(state.selection.head);
    state.selection.extend_to(head);
    state.cursor.jump(head);
    let after = state.caret();
    state.history.end_group(after);
    finish(state, "indent")
}

/// Shift+Tab: each affected row loses `min(leading, spaces)` leading space
/// characters, judged per row. Fully-flush rows record nothing; when no row
/// changes the whole gesture is a no-op.
pub(crate) fn unindent(state: &mut EditorState) -> DispatchResult {
    let spaces = state.settings.spaces;
    let (start, end) = state.selection.ordered();
    let first = start.row;
    let last = if state.selection.is_active() {
        affected_last_row(start, end)
    } else {
        start.row
    };
    let before = state.caret();
    state.history.begin_group(before);
    let mut removed_per_row = vec![0usize; last - first + 1];
    for row in first..=last {
        let line = state.buffer.line(row);
        let leading = line.chars().take_while(|c| *c == ' ').count();
        let removed = leading.min(spaces);
        if removed > 0 {
            let s = Position::new(row, 0);
            let e = Position::new(row, removed);
            let text = state.buffer.delete_range(s, e);
            state
                .history
                .record(EditRecord::Delete { start: s, end: e, text }, before, before);
        }
        removed_per_row[row - first] = removed;
    }
    if removed_per_row.iter().all(|r| *r == 0) {
        state.history.end_group(before);
        return DispatchResult::clean();
    }
    let pull = |pos: Position| {
        if pos.row >= first && pos.row <= last {
            Position::new(pos.row, pos.col.saturating_sub(removed_per_row[pos.row - first]))
        } else {
            pos
        }
    };
    state.selection.tail = pull(state.selection.tail);
    let head = pull(state.selection.head);
    state.selection.extend_to(head);
    state.cursor.jump(head);
    let after = state.caret();
    state.history.end_group(after);
    finish(state, "unindent")
}
