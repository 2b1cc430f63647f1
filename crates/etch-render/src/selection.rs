//! Selection geometry in character cells.
//!
//! The highlighted cells are the half-open ordered range `[start, end)`,
//! where every non-final document line owns one phantom cell past its last
//! character: the line terminator. A row's segment therefore runs to
//! `line_len + 1` when the selection continues past it, and stops at
//! `end.col` on the final selected row (the head/tail cell itself is drawn
//! by the cursor chrome, not the selection). Zero-width segments are not
//! emitted, and an empty selection emits nothing.

use etch_state::EditorState;

/// One highlighted span on a visible row, in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSegment {
    pub row: usize,
    pub left: usize,
    pub width: usize,
}

impl SelectionSegment {
    pub fn css_left(&self) -> String {
        format!("{}ch", self.left)
    }
    pub fn css_width(&self) -> String {
        format!("{}ch", self.width)
    }
}

/// Visible selection segments, ordered top to bottom.
pub fn selection_segments(state: &EditorState) -> Vec<SelectionSegment> {
    if state.selection.is_empty() {
        return Vec::new();
    }
    let (start, end) = state.selection.ordered();
    let visible = state.viewport.visible_range(state.buffer.line_count());
    let mut segments = Vec::new();
    for row in start.row..=end.row {
        if row < visible.start || row >= visible.end {
            continue;
        }
        let left = if row == start.row { start.col } else { 0 };
        let right = if row == end.row {
            end.col
        } else {
            // continues past this row: include the phantom newline cell
            state.buffer.line_len(row) + 1
        };
        if right > left {
            segments.push(SelectionSegment {
                row,
                left,
                width: right - left,
            });
        }
    }
    segments
}
