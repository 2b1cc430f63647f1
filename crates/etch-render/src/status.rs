//! Status line composition.
//!
//! The position shown is the selection head (the presented cursor),
//! 1-based in both coordinates.

use etch_state::EditorState;

/// Discrete status segments, order-sensitive. Hosts that want their own
/// layout can consume these instead of the joined string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment {
    Position { line_1: usize, col_1: usize },
    Dirty(bool),
}

pub fn compose_status(state: &EditorState) -> Vec<StatusSegment> {
    vec![
        StatusSegment::Position {
            line_1: state.selection.head.row + 1,
            col_1: state.selection.head.col + 1,
        },
        StatusSegment::Dirty(state.dirty),
    ]
}

/// Render the segments into the default status text.
pub fn format_status(segments: &[StatusSegment]) -> String {
    let mut s = String::with_capacity(24);
    for seg in segments {
        match seg {
            StatusSegment::Position { line_1, col_1 } => {
                s.push_str(&format!("Ln {line_1}, Col {col_1}"));
            }
            StatusSegment::Dirty(dirty) => {
                if *dirty {
                    s.push_str(" *");
                }
            }
        }
    }
    s
}

pub fn status_line(state: &EditorState) -> String {
    format_status(&compose_status(state))
}
