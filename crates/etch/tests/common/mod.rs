#![allow(dead_code)] // Shared across test binaries; each uses a subset of helpers.

use etch::{Editor, Settings};

/// Opt-in tracing for debugging test runs (`RUST_LOG=trace cargo test`).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn editor() -> Editor {
    init_tracing();
    Editor::default()
}

pub fn editor_with(text: &str) -> Editor {
    init_tracing();
    Editor::with_text(Settings::default(), text)
}

pub fn editor_rows(text: &str, rows: usize) -> Editor {
    init_tracing();
    Editor::with_text(Settings::new(4, rows).unwrap(), text)
}

/// `"line0\nline1\n…"` with `n` lines.
pub fn numbered_lines(n: usize) -> String {
    (0..n).map(|i| format!("line{i}")).collect::<Vec<_>>().join("\n")
}
