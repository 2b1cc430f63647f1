//! Cursor with desired-column memory.
//!
//! Horizontal motions (including word steps and line start/end) reassign
//! `desired_col` to the landing column. Vertical motions never touch it:
//! they reposition to `min(desired_col, line_len(new_row))`, so crossing a
//! shorter line and coming back restores the original column.
//!
//! Motions that would leave the document (left at the origin, right at the
//! end, up on row 0, down on the last row) are whole no-ops: they change
//! nothing, `desired_col` included.

use etch_text::{Buffer, Position, word};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
    pub desired_col: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::origin()
    }
}

impl Cursor {
    pub fn origin() -> Self {
        Self {
            row: 0,
            col: 0,
            desired_col: 0,
        }
    }

    pub fn pos(&self) -> Position {
        Position::new(self.row, self.col)
    }

    /// Place the cursor at a (clamped) position. Counts as horizontal
    /// motion: `desired_col` follows the landing column.
    pub fn set(&mut self, buf: &Buffer, row: usize, col: usize) {
        let clamped = buf.clamp(Position::new(row, col));
        self.row = clamped.row;
        self.col = clamped.col;
        self.desired_col = clamped.col;
    }

    /// Restore from a recorded position without clamping. The caller
    /// guarantees validity (history snapshots).
    pub fn jump(&mut self, pos: Position) {
        self.row = pos.row;
        self.col = pos.col;
        self.desired_col = pos.col;
    }

    pub fn move_left(&mut self, buf: &Buffer) {
        if self.col == 0 && self.row == 0 {
            return;
        }
        if self.col > 0 {
            self.col -= 1;
        } else {
            self.row -= 1;
            self.col = buf.line_len(self.row);
        }
        self.desired_col = self.col;
    }

    pub fn move_right(&mut self, buf: &Buffer) {
        let len = buf.line_len(self.row);
        if self.col < len {
            self.col += 1;
        } else if self.row + 1 < buf.line_count() {
            self.row += 1;
            self.col = 0;
        } else {
            return;
        }
        self.desired_col = self.col;
    }

    pub fn move_up(&mut self, buf: &Buffer) {
        if self.row == 0 {
            return;
        }
        self.row -= 1;
        self.col = self.desired_col.min(buf.line_len(self.row));
    }

    pub fn move_down(&mut self, buf: &Buffer) {
        if self.row + 1 >= buf.line_count() {
            return;
        }
        self.row += 1;
        self.col = self.desired_col.min(buf.line_len(self.row));
    }

    pub fn move_line_start(&mut self, _buf: &Buffer) {
        self.col = 0;
        self.desired_col = 0;
    }

    pub fn move_line_end(&mut self, buf: &Buffer) {
        self.col = buf.line_len(self.row);
        self.desired_col = self.col;
    }

    /// Step to the next word start. At end-of-line the step crosses the
    /// newline and stops; at end of document it is a no-op.
    pub fn move_word(&mut self, buf: &Buffer) {
        let len = buf.line_len(self.row);
        if self.col >= len {
            if self.row + 1 < buf.line_count() {
                self.row += 1;
                self.col = 0;
                self.desired_col = 0;
            }
            return;
        }
        let line = buf.line(self.row);
        self.col = word::next_word_start(&line, self.col);
        self.desired_col = self.col;
    }

    /// Step to the previous word start. At column 0 the step crosses to the
    /// end of the previous line; at the document origin it is a no-op.
    pub fn move_back_word(&mut self, buf: &Buffer) {
        if self.col == 0 {
            if self.row > 0 {
                self.row -= 1;
                self.col = buf.line_len(self.row);
                self.desired_col = self.col;
            }
            return;
        }
        let line = buf.line(self.row);
        self.col = word::prev_word_start(&line, self.col);
        self.desired_col = self.col;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(text: &str) -> Buffer {
        Buffer::from_text(text)
    }

    #[test]
    fn left_at_line_start_wraps_to_previous_line_end() {
        let b = buf("abc\nde");
        let mut c = Cursor::origin();
        c.set(&b, 1, 0);
        c.move_left(&b);
        assert_eq!((c.row, c.col), (0, 3));
        assert_eq!(c.desired_col, 3);
    }

    #[test]
    fn left_at_origin_is_a_whole_no_op() {
        let b = buf("abc\nde");
        let mut c = Cursor::origin();
        c.set(&b, 1, 0);
        c.move_up(&b); // (0, 0), desired_col still 0
        c.desired_col = 7; // simulate stale desired column from a longer line
        c.move_left(&b);
        assert_eq!((c.row, c.col, c.desired_col), (0, 0, 7));
    }

    #[test]
    fn right_at_line_end_steps_onto_next_line() {
        let b = buf("ab\ncd");
        let mut c = Cursor::origin();
        c.set(&b, 0, 2);
        c.move_right(&b);
        assert_eq!((c.row, c.col), (1, 0));
    }

    #[test]
    fn right_at_document_end_is_a_no_op() {
        let b = buf("ab");
        let mut c = Cursor::origin();
        c.set(&b, 0, 2);
        c.move_right(&b);
        assert_eq!((c.row, c.col), (0, 2));
    }

    #[test]
    fn vertical_round_trip_restores_column_through_shorter_line() {
        let b = buf("longline\nhi\nlongline");
        let mut c = Cursor::origin();
        c.set(&b, 0, 7);
        c.move_down(&b);
        assert_eq!((c.row, c.col), (1, 2));
        c.move_down(&b);
        assert_eq!((c.row, c.col), (2, 7));
        c.move_up(&b);
        c.move_up(&b);
        assert_eq!((c.row, c.col), (0, 7));
    }

    #[test]
    fn horizontal_motion_reassigns_desired_col() {
        let b = buf("longline\nhi");
        let mut c = Cursor::origin();
        c.set(&b, 0, 7);
        c.move_down(&b); // (1, 2), desired stays 7
        assert_eq!(c.desired_col, 7);
        c.move_left(&b); // horizontal: desired becomes 1
        assert_eq!((c.col, c.desired_col), (1, 1));
        c.move_up(&b);
        assert_eq!((c.row, c.col), (0, 1));
    }

    #[test]
    fn line_end_then_vertical_keeps_tracking_line_ends_of_equal_length() {
        let b = buf("hello world\nhi");
        let mut c = Cursor::origin();
        c.move_line_end(&b);
        assert_eq!((c.col, c.desired_col), (11, 11));
        c.move_down(&b);
        assert_eq!((c.row, c.col), (1, 2));
        c.move_up(&b);
        assert_eq!((c.row, c.col), (0, 11));
    }

    #[test]
    fn up_at_first_row_is_a_no_op() {
        let b = buf("abc\ndef");
        let mut c = Cursor::origin();
        c.set(&b, 0, 2);
        c.move_up(&b);
        assert_eq!((c.row, c.col), (0, 2));
    }

    #[test]
    fn word_forward_stops_at_word_starts_then_line_end() {
        let b = buf("foo bar\nnext");
        let mut c = Cursor::origin();
        c.move_word(&b);
        assert_eq!((c.row, c.col), (0, 4));
        c.move_word(&b);
        assert_eq!((c.row, c.col), (0, 7));
        c.move_word(&b); // newline step
        assert_eq!((c.row, c.col), (1, 0));
        c.move_word(&b);
        assert_eq!((c.row, c.col), (1, 4));
        c.move_word(&b); // end of document
        assert_eq!((c.row, c.col), (1, 4));
    }

    #[test]
    fn word_backward_mirrors_forward() {
        let b = buf("foo bar\nnext");
        let mut c = Cursor::origin();
        c.set(&b, 1, 4);
        c.move_back_word(&b);
        assert_eq!((c.row, c.col), (1, 0));
        c.move_back_word(&b); // newline step
        assert_eq!((c.row, c.col), (0, 7));
        c.move_back_word(&b);
        assert_eq!((c.row, c.col), (0, 4));
        c.move_back_word(&b);
        assert_eq!((c.row, c.col), (0, 0));
        c.move_back_word(&b);
        assert_eq!((c.row, c.col), (0, 0));
    }

    #[test]
    fn set_clamps_and_updates_desired() {
        let b = buf("ab\ncdef");
        let mut c = Cursor::origin();
        c.set(&b, 0, 99);
        assert_eq!((c.row, c.col, c.desired_col), (0, 2, 2));
        c.set(&b, 99, 1);
        assert_eq!((c.row, c.col), (1, 1));
    }
}
