//! Bounded line store with cursor and viewport tracking.
//!
//! Text is kept as a vector of owned byte lines. Every line holds printable
//! ASCII only; control bytes are folded to `?` on the way in. Both the number
//! of lines and the length of each line are bounded by [`StoreLimits`], and
//! every mutating operation validates those bounds before touching the store
//! so a rejected edit leaves the contents byte-for-byte unchanged.

use std::fmt;

pub mod motion;
mod store;
mod viewport;

pub use store::{LineStore, StoreLimits};
pub use viewport::{Viewport, compute_scroll_intent};

/// One line of text without its terminator.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Line {
    bytes: Vec<u8>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a line, folding control bytes to `?`.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let mut bytes = bytes.into();
        for b in bytes.iter_mut() {
            *b = fold_control(*b);
        }
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lossless for the printable ASCII a line can hold.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes).unwrap_or("")
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut Vec<u8> {
        &mut self.bytes
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Line::from_bytes(s.as_bytes())
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(&self.bytes))
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.bytes))
    }
}

/// Map anything a line cannot hold to `?`.
pub fn fold_control(b: u8) -> u8 {
    if core_events::keys::is_printable(b) && b.is_ascii() {
        b
    } else {
        b'?'
    }
}

/// A cursor position expressed as (line index, byte column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
    pub fn origin() -> Self {
        Self { line: 0, col: 0 }
    }
    pub fn clamp_to<F>(&mut self, line_count: usize, mut line_len_fn: F)
    where
        F: FnMut(usize) -> usize,
    {
        if line_count == 0 {
            self.line = 0;
            self.col = 0;
            return;
        }
        if self.line >= line_count {
            self.line = line_count - 1;
        }
        let max_len = line_len_fn(self.line);
        if self.col > max_len {
            self.col = max_len;
        }
    }
}

/// Cursor motions understood by [`LineStore::move_cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    Up,
    Down,
    Left,
    Right,
    Begin,
    End,
    Top,
    Bottom,
    PageUp,
    PageDown,
    WordLeft,
    WordRight,
}
