//! Rope-based line store and character-cell positions.
//!
//! Lines are the unit of addressing: a `Position` is `(row, col)` where `col`
//! counts characters within the row and `col == line_len(row)` is the
//! end-of-line cell. Advancing one character past end-of-line lands on
//! `(row + 1, 0)`, the newline step. All mutation primitives assert their
//! arguments; out-of-range positions are programmer errors, not user errors.

use ropey::Rope;

pub mod word;

/// A position inside a buffer expressed as (row index, character column).
///
/// Ordering is lexicographic: row first, then column. `col` may equal the
/// line length (end-of-line); it is never past it in a validated position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
    pub fn origin() -> Self {
        Self { row: 0, col: 0 }
    }
}

/// The authoritative ordered sequence of lines, backed by a `ropey::Rope`.
///
/// The buffer always contains at least one (possibly empty) line, and no
/// line ever contains a line terminator; terminators are implicit between
/// adjacent lines.
#[derive(Debug, Clone)]
pub struct Buffer {
    rope: Rope,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// An empty buffer: a single empty line.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Construct from newline-joined text. `"a\n"` yields two lines: `"a"`, `""`.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Total number of lines. At least 1, even when the buffer is empty.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// The requested line without its trailing newline.
    pub fn line(&self, row: usize) -> String {
        assert!(
            row < self.line_count(),
            "line row {row} out of range (lines: {})",
            self.line_count()
        );
        let mut s = self.rope.line(row).to_string();
        if s.ends_with('\n') {
            s.pop();
        }
        s
    }

    /// Character length of a line, excluding the implicit terminator.
    pub fn line_len(&self, row: usize) -> usize {
        assert!(
            row < self.line_count(),
            "line_len row {row} out of range (lines: {})",
            self.line_count()
        );
        let line = self.rope.line(row);
        let mut len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len -= 1;
        }
        len
    }

    /// The whole document joined by newlines.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Bulk replacement. Always succeeds; derived state held by callers
    /// (cursors, history) must be reset or re-clamped by them.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    /// Clamp an arbitrary (row, col) pair onto a valid position.
    pub fn clamp(&self, pos: Position) -> Position {
        let row = pos.row.min(self.line_count() - 1);
        let col = pos.col.min(self.line_len(row));
        Position::new(row, col)
    }

    fn assert_pos(&self, pos: Position) {
        assert!(
            pos.row < self.line_count(),
            "position row {} out of range (lines: {})",
            pos.row,
            self.line_count()
        );
        assert!(
            pos.col <= self.line_len(pos.row),
            "position col {} past end of line {} (len: {})",
            pos.col,
            pos.row,
            self.line_len(pos.row)
        );
    }

    /// Absolute character index of a validated position. The end-of-line cell
    /// of row `r` and the origin of row `r + 1` are one character apart.
    fn char_index(&self, pos: Position) -> usize {
        self.rope.line_to_char(pos.row) + pos.col
    }

    /// Insert `text` (which may contain newlines) at `at`; returns the
    /// position immediately after the inserted text.
    pub fn insert_text(&mut self, at: Position, text: &str) -> Position {
        self.assert_pos(at);
        self.rope.insert(self.char_index(at), text);
        end_of_insert(at, text)
    }

    /// Delete the half-open range `[start, end)`, returning the removed text
    /// (newlines included) so callers can record the inverse edit.
    pub fn delete_range(&mut self, start: Position, end: Position) -> String {
        self.assert_pos(start);
        self.assert_pos(end);
        assert!(start <= end, "delete_range start {start:?} after end {end:?}");
        let a = self.char_index(start);
        let b = self.char_index(end);
        let removed = self.rope.slice(a..b).to_string();
        self.rope.remove(a..b);
        removed
    }

    /// Split the line at `at` by inserting a newline. The text after `at`
    /// becomes line `at.row + 1`.
    pub fn split_line(&mut self, at: Position) {
        self.assert_pos(at);
        self.rope.insert(self.char_index(at), "\n");
    }

    /// Join line `row` with the following line by removing the terminator
    /// between them. Returns the join point (the old end of line `row`).
    pub fn join_lines(&mut self, row: usize) -> Position {
        assert!(
            row + 1 < self.line_count(),
            "join_lines row {row} has no following line (lines: {})",
            self.line_count()
        );
        let join = Position::new(row, self.line_len(row));
        let idx = self.char_index(join);
        self.rope.remove(idx..idx + 1);
        join
    }
}

/// Position immediately after inserting `text` at `at`, without touching a
/// buffer. Single-line text advances the column; multi-line text lands at
/// the end of the final segment.
pub fn end_of_insert(at: Position, text: &str) -> Position {
    let extra = text.matches('\n').count();
    if extra == 0 {
        Position::new(at.row, at.col + text.chars().count())
    } else {
        let last = text.rsplit('\n').next().unwrap_or("");
        Position::new(at.row + extra, last.chars().count())
    }
}
