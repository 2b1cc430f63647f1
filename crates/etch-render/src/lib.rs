//! Rendering glue: a pure snapshot of what a host should draw.
//!
//! The snapshot is a function of the editor state and holds owned data
//! only, never references into the live model. Geometry is in character
//! cells (fixed-width columns); the `css_*` helpers format the `"<N>ch"`
//! values a DOM host feeds straight into style properties. Node lifecycle
//! and class tokens stay on the host side.

use etch_state::EditorState;
use tracing::trace;

pub mod gutter;
pub mod status;

mod selection;

pub use selection::{SelectionSegment, selection_segments};

/// One visible buffer row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRow {
    /// Buffer row index.
    pub row: usize,
    /// 1-based line number for the gutter.
    pub number: usize,
    pub text: String,
}

/// Cursor chrome: drawn only when its row is inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorMarker {
    pub row: usize,
    pub col: usize,
    pub visible: bool,
}

impl CursorMarker {
    pub fn css_left(&self) -> String {
        format!("{}ch", self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSnapshot {
    pub rows: Vec<RenderRow>,
    pub cursor: CursorMarker,
    /// Visible selection segments, ordered top to bottom.
    pub selection: Vec<SelectionSegment>,
    pub gutter_digits: usize,
    pub gutter_cols: usize,
    pub status: String,
}

/// Snapshot the state for drawing. Pure: mutates nothing, observes the
/// state after the edit pipeline has fully completed.
pub fn snapshot(state: &EditorState) -> RenderSnapshot {
    let line_count = state.buffer.line_count();
    let visible = state.viewport.visible_range(line_count);
    let rows: Vec<RenderRow> = visible
        .clone()
        .map(|row| RenderRow {
            row,
            number: row + 1,
            text: state.buffer.line(row),
        })
        .collect();

    let cursor = CursorMarker {
        row: state.cursor.row,
        col: state.cursor.col,
        visible: state.viewport.is_visible(state.cursor.row),
    };

    let selection = selection_segments(state);
    let gutter_digits = gutter::gutter_digits(&state.viewport, line_count);

    trace!(
        target: "render.snapshot",
        rows = rows.len(),
        segments = selection.len(),
        "snapshot"
    );
    RenderSnapshot {
        rows,
        cursor,
        selection,
        gutter_digits,
        gutter_cols: gutter_digits + 1,
        status: status::status_line(state),
    }
}
