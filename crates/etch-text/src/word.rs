//! Word-boundary scanning over a single line.
//!
//! A word character is alphanumeric or underscore; a word boundary is the
//! position between a non-word and a word character. Scans stop at the line
//! edges when no boundary remains; crossing lines is the caller's job.

/// Word classification used by word-wise motions.
pub fn is_word_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// Column of the next word start strictly after `col`, or the line length
/// when no further word starts on this line. `col` must be below the line
/// length (end-of-line is handled by the caller's newline step).
pub fn next_word_start(line: &str, col: usize) -> usize {
    let chars: Vec<char> = line.chars().collect();
    assert!(col < chars.len(), "next_word_start col {col} at or past end of line");
    for j in (col + 1)..chars.len() {
        if is_word_char(chars[j]) && !is_word_char(chars[j - 1]) {
            return j;
        }
    }
    chars.len()
}

/// Column of the previous word start strictly before `col`, or 0 when no
/// earlier word starts on this line. `col` must be above 0.
pub fn prev_word_start(line: &str, col: usize) -> usize {
    let chars: Vec<char> = line.chars().collect();
    assert!(col > 0, "prev_word_start col must be above 0");
    let col = col.min(chars.len());
    for j in (1..col).rev() {
        if is_word_char(chars[j]) && !is_word_char(chars[j - 1]) {
            return j;
        }
    }
    0
}
