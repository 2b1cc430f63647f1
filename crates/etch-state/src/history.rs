//! Two-stack undo/redo log of atomic edit transactions.
//!
//! Each transaction bundles one or more typed edit records with the full
//! caret (cursor + selection) before and after, and a monotonically
//! increasing sequence number. Undo inverts the records in reverse order
//! against the live buffer and restores the before-caret; redo reapplies
//! them and restores the after-caret. Recording anything new clears the
//! redo stack.
//!
//! Coalescing: a run of single-character non-whitespace inserts on one row
//! at strictly adjacent ascending columns merges into the open transaction.
//! Whitespace, multi-character payloads, deletions, motions, undo/redo,
//! group brackets, and `break_coalescing` all close the run. The engine has
//! no clock; hosts wanting time-based boundaries call `break_coalescing`
//! from their own timer.

use crate::{Cursor, Selection};
use etch_text::{Buffer, Position, end_of_insert};
use tracing::trace;

/// Maximum retained undo transactions; the oldest is discarded on overflow.
pub const HISTORY_MAX: usize = 200;

/// One invertible buffer mutation with the payload needed for both
/// directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditRecord {
    Insert {
        at: Position,
        text: String,
    },
    Delete {
        start: Position,
        end: Position,
        text: String,
    },
    Split {
        at: Position,
    },
    Join {
        at: Position,
    },
    Replace {
        start: Position,
        deleted: String,
        inserted: String,
    },
}

/// Cursor and selection captured together, by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caret {
    pub cursor: Cursor,
    pub selection: Selection,
}

/// The smallest undoable unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub records: Vec<EditRecord>,
    pub before: Caret,
    pub after: Caret,
    pub seq: u64,
}

#[derive(Debug)]
struct PendingGroup {
    records: Vec<EditRecord>,
    before: Caret,
}

#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<Transaction>,
    redo_stack: Vec<Transaction>,
    group: Option<PendingGroup>,
    typing_run: bool,
    next_seq: u64,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Close the current typing run; the next character insert starts a new
    /// transaction.
    pub fn break_coalescing(&mut self) {
        self.typing_run = false;
    }

    /// Drop all recorded transactions (bulk text replacement).
    pub fn clear(&mut self) {
        assert!(self.group.is_none(), "history cleared inside an open group");
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.typing_run = false;
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn push(&mut self, txn: Transaction) {
        self.undo_stack.push(txn);
        if self.undo_stack.len() > HISTORY_MAX {
            self.undo_stack.remove(0);
            trace!(target: "state.history", "undo_stack_trimmed");
        }
        self.redo_stack.clear();
        trace!(
            target: "state.history",
            undo_depth = self.undo_stack.len(),
            "transaction_recorded"
        );
    }

    /// Open a composite transaction. Records fed to `record` until
    /// `end_group` land in one undoable unit with `before` as its pre-state.
    /// Nesting is a precondition error.
    pub fn begin_group(&mut self, before: Caret) {
        assert!(
            self.group.is_none(),
            "unbalanced history group: begin_group while a group is open"
        );
        self.typing_run = false;
        self.group = Some(PendingGroup {
            records: Vec::new(),
            before,
        });
    }

    /// Close the open composite transaction. An empty group records
    /// nothing, so no-op gestures leave the stacks untouched.
    pub fn end_group(&mut self, after: Caret) {
        let group = self
            .group
            .take()
            .expect("unbalanced history group: end_group without begin_group");
        if group.records.is_empty() {
            return;
        }
        let seq = self.next_seq();
        self.push(Transaction {
            records: group.records,
            before: group.before,
            after,
            seq,
        });
    }

    /// Record one edit. Inside an open group the record joins the group and
    /// the caret arguments are ignored in favor of the group's brackets;
    /// otherwise it becomes a single-record transaction. Always closes the
    /// typing run.
    pub fn record(&mut self, record: EditRecord, before: Caret, after: Caret) {
        self.typing_run = false;
        if let Some(group) = &mut self.group {
            group.records.push(record);
            return;
        }
        let seq = self.next_seq();
        self.push(Transaction {
            records: vec![record],
            before,
            after,
            seq,
        });
    }

    /// Record a single typed character, coalescing non-whitespace runs.
    /// The merged transaction keeps the run's original before-caret, so
    /// undoing the run lands at the pre-typing position.
    pub fn record_typed_char(&mut self, at: Position, ch: char, before: Caret, after: Caret) {
        assert!(
            self.group.is_none(),
            "typed-character record inside an open group"
        );
        if !ch.is_whitespace()
            && self.typing_run
            && let Some(top) = self.undo_stack.last_mut()
            && let [EditRecord::Insert { at: run_at, text }] = &mut top.records[..]
            && run_at.row == at.row
            && run_at.col + text.chars().count() == at.col
        {
            text.push(ch);
            top.after = after;
            trace!(target: "state.history", row = at.row, len = text.len(), "typing_run_coalesced");
            return;
        }
        let seq = self.next_seq();
        self.push(Transaction {
            records: vec![EditRecord::Insert {
                at,
                text: ch.to_string(),
            }],
            before,
            after,
            seq,
        });
        self.typing_run = !ch.is_whitespace();
    }

    /// Pop and invert the newest transaction. Returns false on an empty
    /// stack (silent no-op for the caller).
    pub fn undo(
        &mut self,
        buffer: &mut Buffer,
        cursor: &mut Cursor,
        selection: &mut Selection,
    ) -> bool {
        assert!(self.group.is_none(), "undo inside an open history group");
        self.typing_run = false;
        let Some(txn) = self.undo_stack.pop() else {
            return false;
        };
        for record in txn.records.iter().rev() {
            invert(record, buffer);
        }
        *cursor = txn.before.cursor;
        *selection = txn.before.selection;
        trace!(target: "state.history", seq = txn.seq, redo_depth = self.redo_stack.len() + 1, "undo");
        self.redo_stack.push(txn);
        true
    }

    /// Pop and reapply the newest undone transaction.
    pub fn redo(
        &mut self,
        buffer: &mut Buffer,
        cursor: &mut Cursor,
        selection: &mut Selection,
    ) -> bool {
        assert!(self.group.is_none(), "redo inside an open history group");
        self.typing_run = false;
        let Some(txn) = self.redo_stack.pop() else {
            return false;
        };
        for record in &txn.records {
            reapply(record, buffer);
        }
        *cursor = txn.after.cursor;
        *selection = txn.after.selection;
        trace!(target: "state.history", seq = txn.seq, undo_depth = self.undo_stack.len() + 1, "redo");
        self.undo_stack.push(txn);
        true
    }
}

fn invert(record: &EditRecord, buffer: &mut Buffer) {
    match record {
        EditRecord::Insert { at, text } => {
            buffer.delete_range(*at, end_of_insert(*at, text));
        }
        EditRecord::Delete { start, text, .. } => {
            buffer.insert_text(*start, text);
        }
        EditRecord::Split { at } => {
            buffer.join_lines(at.row);
        }
        EditRecord::Join { at } => {
            buffer.split_line(*at);
        }
        EditRecord::Replace {
            start,
            deleted,
            inserted,
        } => {
            buffer.delete_range(*start, end_of_insert(*start, inserted));
            buffer.insert_text(*start, deleted);
        }
    }
}

fn reapply(record: &EditRecord, buffer: &mut Buffer) {
    match record {
        EditRecord::Insert { at, text } => {
            buffer.insert_text(*at, text);
        }
        EditRecord::Delete { start, end, .. } => {
            buffer.delete_range(*start, *end);
        }
        EditRecord::Split { at } => {
            buffer.split_line(*at);
        }
        EditRecord::Join { at } => {
            buffer.join_lines(at.row);
        }
        EditRecord::Replace {
            start,
            deleted,
            inserted,
        } => {
            buffer.delete_range(*start, end_of_insert(*start, deleted));
            buffer.insert_text(*start, inserted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caret_at(row: usize, col: usize) -> Caret {
        let mut cursor = Cursor::origin();
        cursor.row = row;
        cursor.col = col;
        cursor.desired_col = col;
        Caret {
            cursor,
            selection: Selection::collapsed(Position::new(row, col)),
        }
    }

    fn type_word(h: &mut History, buf: &mut Buffer, row: usize, start_col: usize, word: &str) {
        for (i, ch) in word.chars().enumerate() {
            let at = Position::new(row, start_col + i);
            buf.insert_text(at, &ch.to_string());
            h.record_typed_char(at, ch, caret_at(row, start_col + i), caret_at(row, start_col + i + 1));
        }
    }

    #[test]
    fn coalesced_run_is_one_transaction() {
        let mut h = History::new();
        let mut buf = Buffer::new();
        type_word(&mut h, &mut buf, 0, 0, "hello");
        assert_eq!(buf.text(), "hello");
        assert_eq!(h.undo_depth(), 1);
    }

    #[test]
    fn whitespace_splits_typing_runs() {
        let mut h = History::new();
        let mut buf = Buffer::new();
        type_word(&mut h, &mut buf, 0, 0, "hello world");
        assert_eq!(h.undo_depth(), 3); // "hello", " ", "world"
    }

    #[test]
    fn undo_of_a_run_restores_pre_typing_caret() {
        let mut h = History::new();
        let mut buf = Buffer::new();
        type_word(&mut h, &mut buf, 0, 0, "abc");
        let mut cursor = caret_at(0, 3).cursor;
        let mut selection = caret_at(0, 3).selection;
        assert!(h.undo(&mut buf, &mut cursor, &mut selection));
        assert_eq!(buf.text(), "");
        assert_eq!((cursor.row, cursor.col), (0, 0));
    }

    #[test]
    fn motion_breaks_coalescing() {
        let mut h = History::new();
        let mut buf = Buffer::new();
        type_word(&mut h, &mut buf, 0, 0, "ab");
        h.break_coalescing();
        type_word(&mut h, &mut buf, 0, 2, "cd");
        assert_eq!(h.undo_depth(), 2);
    }

    #[test]
    fn non_adjacent_insert_does_not_merge() {
        let mut h = History::new();
        let mut buf = Buffer::from_text("xxxx");
        let at = Position::new(0, 4);
        buf.insert_text(at, "a");
        h.record_typed_char(at, 'a', caret_at(0, 4), caret_at(0, 5));
        // same row but a column gap: must not join the run
        let at = Position::new(0, 1);
        buf.insert_text(at, "b");
        h.record_typed_char(at, 'b', caret_at(0, 1), caret_at(0, 2));
        assert_eq!(h.undo_depth(), 2);
    }

    #[test]
    fn undo_then_redo_round_trips_state() {
        let mut h = History::new();
        let mut buf = Buffer::from_text("hello world");
        let before = caret_at(0, 0);
        let after = caret_at(0, 1);
        let deleted = buf.delete_range(Position::new(0, 0), Position::new(0, 5));
        buf.insert_text(Position::new(0, 0), "X");
        h.record(
            EditRecord::Replace {
                start: Position::new(0, 0),
                deleted,
                inserted: "X".to_string(),
            },
            before,
            after,
        );
        assert_eq!(buf.text(), "X world");

        let mut cursor = after.cursor;
        let mut selection = after.selection;
        assert!(h.undo(&mut buf, &mut cursor, &mut selection));
        assert_eq!(buf.text(), "hello world");
        assert_eq!((cursor.row, cursor.col), (0, 0));

        assert!(h.redo(&mut buf, &mut cursor, &mut selection));
        assert_eq!(buf.text(), "X world");
        assert_eq!((cursor.row, cursor.col), (0, 1));
        assert_eq!(h.redo_depth(), 0);
    }

    #[test]
    fn recording_clears_redo() {
        let mut h = History::new();
        let mut buf = Buffer::new();
        type_word(&mut h, &mut buf, 0, 0, "a");
        let mut cursor = Cursor::origin();
        let mut selection = Selection::default();
        h.undo(&mut buf, &mut cursor, &mut selection);
        assert_eq!(h.redo_depth(), 1);
        type_word(&mut h, &mut buf, 0, 0, "b");
        assert_eq!(h.redo_depth(), 0);
    }

    #[test]
    fn undo_breaks_coalescing_for_later_typing() {
        let mut h = History::new();
        let mut buf = Buffer::new();
        type_word(&mut h, &mut buf, 0, 0, "ab");
        let mut cursor = Cursor::origin();
        let mut selection = Selection::default();
        h.undo(&mut buf, &mut cursor, &mut selection);
        assert_eq!(buf.text(), "");
        type_word(&mut h, &mut buf, 0, 0, "cd");
        assert_eq!(h.undo_depth(), 1);
        assert_eq!(buf.text(), "cd");
    }

    #[test]
    fn grouped_records_undo_atomically() {
        let mut h = History::new();
        let mut buf = Buffer::from_text("    a\n  b");
        h.begin_group(caret_at(0, 4));
        for row in 0..2 {
            let lead = buf.line(row).chars().take_while(|c| *c == ' ').count();
            let removed = lead.min(2);
            let text = buf.delete_range(Position::new(row, 0), Position::new(row, removed));
            h.record(
                EditRecord::Delete {
                    start: Position::new(row, 0),
                    end: Position::new(row, removed),
                    text,
                },
                caret_at(0, 0),
                caret_at(0, 0),
            );
        }
        h.end_group(caret_at(0, 2));
        assert_eq!(buf.text(), "  a\nb");
        assert_eq!(h.undo_depth(), 1);

        let mut cursor = Cursor::origin();
        let mut selection = Selection::default();
        assert!(h.undo(&mut buf, &mut cursor, &mut selection));
        assert_eq!(buf.text(), "    a\n  b");
        assert_eq!((cursor.row, cursor.col), (0, 4));
    }

    #[test]
    fn empty_group_records_nothing() {
        let mut h = History::new();
        h.begin_group(caret_at(0, 0));
        h.end_group(caret_at(0, 0));
        assert_eq!(h.undo_depth(), 0);
    }

    #[test]
    #[should_panic(expected = "unbalanced history group")]
    fn nested_groups_are_a_precondition_error() {
        let mut h = History::new();
        h.begin_group(caret_at(0, 0));
        h.begin_group(caret_at(0, 0));
    }

    #[test]
    #[should_panic(expected = "unbalanced history group")]
    fn stray_end_group_is_a_precondition_error() {
        let mut h = History::new();
        h.end_group(caret_at(0, 0));
    }

    #[test]
    fn split_and_join_records_invert() {
        let mut h = History::new();
        let mut buf = Buffer::from_text("hello");
        buf.split_line(Position::new(0, 2));
        h.record(
            EditRecord::Split {
                at: Position::new(0, 2),
            },
            caret_at(0, 2),
            caret_at(1, 0),
        );
        assert_eq!(buf.text(), "he\nllo");

        let mut cursor = Cursor::origin();
        let mut selection = Selection::default();
        h.undo(&mut buf, &mut cursor, &mut selection);
        assert_eq!(buf.text(), "hello");
        h.redo(&mut buf, &mut cursor, &mut selection);
        assert_eq!(buf.text(), "he\nllo");
        assert_eq!((cursor.row, cursor.col), (1, 0));
    }

    #[test]
    fn stack_is_capped() {
        let mut h = History::new();
        let mut buf = Buffer::new();
        for i in 0..(HISTORY_MAX + 20) {
            let at = Position::new(0, i);
            buf.insert_text(at, " ");
            h.record(
                EditRecord::Insert {
                    at,
                    text: " ".to_string(),
                },
                caret_at(0, i),
                caret_at(0, i + 1),
            );
        }
        assert_eq!(h.undo_depth(), HISTORY_MAX);
    }
}
