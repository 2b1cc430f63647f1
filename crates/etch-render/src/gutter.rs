//! Gutter sizing from the largest visible line number.

use etch_state::Viewport;

/// Decimal digits of `n`, treating 0 as 1.
pub fn digits(n: usize) -> usize {
    (n.max(1).ilog10() + 1) as usize
}

/// The largest 1-based line number the viewport currently shows.
pub fn max_visible_line_number(viewport: &Viewport, line_count: usize) -> usize {
    viewport.start + viewport.rows.min(line_count.saturating_sub(viewport.start))
}

/// Digit cells the gutter reserves for numbers: at least 2, growing with
/// the largest visible line number. The full gutter adds one padding cell.
pub fn gutter_digits(viewport: &Viewport, line_count: usize) -> usize {
    digits(max_visible_line_number(viewport, line_count)).max(2)
}
