//! Terminal size probing.
//!
//! Detection runs once at startup. When the size query fails (not a tty,
//! unsupported platform) the classic 80x24 layout is assumed.

use tracing::warn;

pub const DEFAULT_COLUMNS: u16 = 80;
pub const DEFAULT_ROWS: u16 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    pub columns: u16,
    pub rows: u16,
}

impl Default for TerminalCapabilities {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
        }
    }
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        match crossterm::terminal::size() {
            Ok((columns, rows)) if columns > 0 && rows > 0 => Self { columns, rows },
            Ok(_) => Self::default(),
            Err(e) => {
                warn!(target: "terminal", error = %e, "size_query_failed");
                Self::default()
            }
        }
    }

    /// `(columns, rows)`.
    pub fn size(&self) -> (u16, u16) {
        (self.columns, self.rows)
    }
}
