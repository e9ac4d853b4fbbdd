//! Line clipboard holding at most one captured run of lines.

use core_text::Line;
use tracing::trace;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Clipboard {
    lines: Option<Vec<Line>>,
}

impl Clipboard {
    /// Replace the contents with `lines` (already deep copies).
    pub fn set(&mut self, lines: Vec<Line>) {
        trace!(target: "state.clipboard", lines = lines.len(), "set");
        self.lines = Some(lines);
    }

    pub fn clear(&mut self) {
        if self.lines.take().is_some() {
            trace!(target: "state.clipboard", "clear");
        }
    }

    pub fn lines(&self) -> Option<&[Line]> {
        self.lines.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_none()
    }

    pub fn len(&self) -> usize {
        self.lines.as_ref().map(Vec::len).unwrap_or(0)
    }
}
