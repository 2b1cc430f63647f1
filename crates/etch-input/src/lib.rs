//! Gesture vocabulary and the pure gesture-to-operation translator.
//!
//! Translation is deterministic and stateless: a `Gesture` (key + modifier
//! set + repeat count) maps to at most one `Op`. Anything the table does
//! not name yields `None`; unmapped gestures have no effect. State-aware
//! decisions (collapse vs. move, replace vs. insert, indent vs. tab) belong
//! to the dispatcher, which sees the selection; the translator does not.
//!
//! `meta` is the platform line-level modifier (Ctrl on non-Apple hosts, Cmd
//! on Apple); `alt` is the word-level modifier. Hosts normalize their
//! native events into this vocabulary before constructing gestures.

use tracing::trace;

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Mods: u8 {
        const SHIFT = 0b0000_0001;
        const META  = 0b0000_0010;
        const ALT   = 0b0000_0100;
    }
}

/// Platform-neutral key names. Printable keys carry their character; hosts
/// deliver the already-shifted character, so shift is meaningless on `Char`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Tab,
    Left,
    Right,
    Up,
    Down,
}

/// One keyboard gesture. `repeat` must be at least 1; the dispatcher applies
/// the resulting op that many times as distinct observable steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gesture {
    pub key: Key,
    pub mods: Mods,
    pub repeat: u32,
}

impl Gesture {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            mods: Mods::empty(),
            repeat: 1,
        }
    }

    pub fn with_mods(key: Key, mods: Mods) -> Self {
        Self {
            key,
            mods,
            repeat: 1,
        }
    }

    pub fn repeated(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }
}

/// Cursor motions shared by plain moves and shift-extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    WordBackward,
    WordForward,
}

/// The operation algebra consumed by `apply`. One tagged variant per kind
/// of state change, so dispatch is exhaustive and free of stringly-typed
/// branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Motion that collapses the selection onto its destination.
    Move(Motion),
    /// Motion that moves the selection head only.
    Extend(Motion),
    InsertChar(char),
    InsertNewline,
    /// Tab: soft-tab insertion, or line indent on a multi-row selection.
    Indent,
    /// Shift+Tab: per-line leading-space removal.
    Unindent,
    /// Backspace: selection delete, character delete, or line join.
    DeleteBackward,
}

/// Map a gesture onto an operation. Pure; `None` means "no effect".
///
/// A zero repeat count is a precondition error (the vocabulary promises
/// `repeat >= 1`), checked here so every entry point inherits it.
pub fn translate(gesture: &Gesture) -> Option<Op> {
    assert!(gesture.repeat >= 1, "gesture repeat count must be at least 1");
    let shift = gesture.mods.contains(Mods::SHIFT);
    let meta = gesture.mods.contains(Mods::META);
    let alt = gesture.mods.contains(Mods::ALT);

    let motion = |m: Motion| {
        if shift {
            Some(Op::Extend(m))
        } else {
            Some(Op::Move(m))
        }
    };

    let op = match gesture.key {
        Key::Char(c) => Some(Op::InsertChar(c)),
        Key::Enter => Some(Op::InsertNewline),
        Key::Backspace => Some(Op::DeleteBackward),
        Key::Tab => {
            if shift {
                Some(Op::Unindent)
            } else {
                Some(Op::Indent)
            }
        }
        Key::Left => {
            if meta {
                motion(Motion::LineStart)
            } else if alt {
                motion(Motion::WordBackward)
            } else {
                motion(Motion::Left)
            }
        }
        Key::Right => {
            if meta {
                motion(Motion::LineEnd)
            } else if alt {
                motion(Motion::WordForward)
            } else {
                motion(Motion::Right)
            }
        }
        // Vertical keys take no line- or word-level modifier.
        Key::Up => {
            if meta || alt {
                None
            } else {
                motion(Motion::Up)
            }
        }
        Key::Down => {
            if meta || alt {
                None
            } else {
                motion(Motion::Down)
            }
        }
    };
    trace!(target: "input.translate", gesture = ?gesture, op = ?op, "translated");
    op
}
