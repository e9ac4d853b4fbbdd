//! Vertical viewport over the line store.

/// Compute a new first visible line so the cursor line is inside the box,
/// honoring a context margin. Returns `None` when no scroll is needed.
pub fn compute_scroll_intent(
    first: usize,
    cursor_line: usize,
    text_height: usize,
    margin: usize,
) -> Option<usize> {
    if text_height == 0 {
        return None;
    }
    let m = margin.min(text_height.saturating_sub(1) / 2);
    let top = first;
    let bottom = first + text_height;
    if cursor_line < top + m {
        let new_first = cursor_line.saturating_sub(m);
        if new_first != first {
            return Some(new_first);
        }
    } else if cursor_line + m >= bottom {
        let new_first = cursor_line + m + 1 - text_height;
        if new_first != first {
            return Some(new_first);
        }
    }
    None
}

/// First visible line plus box height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub first_line: usize,
    pub height: usize,
    pub margin: usize,
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Self {
            first_line: 0,
            height: height.max(1),
            margin: 0,
        }
    }

    pub fn contains(&self, line: usize) -> bool {
        line >= self.first_line && line < self.first_line + self.height
    }

    /// Scroll so `cursor_line` is visible. Returns true when the first line changed.
    pub fn follow(&mut self, cursor_line: usize) -> bool {
        match compute_scroll_intent(self.first_line, cursor_line, self.height, self.margin) {
            Some(first) => {
                self.first_line = first;
                true
            }
            None => false,
        }
    }
}
