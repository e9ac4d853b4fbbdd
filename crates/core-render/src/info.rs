//! Info line composition.
//!
//! Layout of the top row:
//! `te: <file>` on the left, then right-aligned
//! `CLP | Lin:cur/now/max Col:cur/max Len:len` where `CLP` reads `---` while
//! the clipboard is empty. Counters are 1-based and zero padded to the
//! widths of the classic layout (4 digits for lines, 2 for columns); larger
//! values simply widen their field.

use core_state::EditorState;
use std::fmt::Write as _;

/// Snapshot of everything the info line shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoContext {
    pub file: String,
    pub clipboard: bool,
    pub line: usize,
    pub lines: usize,
    pub max_lines: usize,
    pub col: usize,
    pub max_cols: usize,
    pub len: usize,
}

impl InfoContext {
    pub fn from_state(state: &EditorState) -> Self {
        let store = &state.lines;
        let cursor = store.cursor();
        let limits = store.limits();
        Self {
            file: state.file_label(),
            clipboard: !state.clipboard.is_empty(),
            line: cursor.line + 1,
            lines: store.line_count(),
            max_lines: limits.max_lines,
            col: cursor.col + 1,
            max_cols: limits.max_line_len + 1,
            len: store.current_line().map(|l| l.len()).unwrap_or(0),
        }
    }
}

/// Right-hand counters block.
pub fn format_counters(ctx: &InfoContext) -> String {
    let mut s = String::with_capacity(41);
    s.push_str(if ctx.clipboard { "CLP" } else { "---" });
    let _ = write!(
        s,
        " | Lin:{:04}/{:04}/{:04} Col:{:02}/{:02} Len:{:02}",
        ctx.line, ctx.lines, ctx.max_lines, ctx.col, ctx.max_cols, ctx.len
    );
    s
}

/// Full info row for a screen `columns` wide. The file name is cut short
/// when it would run into the counters.
pub fn format_info(ctx: &InfoContext, columns: usize) -> String {
    let counters = format_counters(ctx);
    let head = format!("te: {}", ctx.file);
    let room = columns.saturating_sub(counters.len() + 1);
    let mut row: String = head.chars().take(room).collect();
    let pad = columns.saturating_sub(row.chars().count() + counters.len());
    row.extend(std::iter::repeat_n(' ', pad));
    row.push_str(&counters);
    row.chars().take(columns).collect()
}
