//! Screen painter for the editor.
//!
//! Layout, top to bottom:
//! * row 0: info line (file name, clipboard status, line/column counters);
//! * rows `BOX_ROW..rows - 1`: the text box, one document line per row,
//!   optionally preceded by a right-aligned line number gutter;
//! * last row: the status line, owned by [`StatusBar`].
//!
//! The renderer only reads editor state. It keeps a snapshot of every row it
//! painted and re-emits a row only when its snapshot changed, so a cursor
//! move inside a line touches nothing but the info line. [`Renderer::invalidate`]
//! drops the snapshots (document replaced) and forces a
//! full repaint on the next frame.
//!
//! Lines inside the active block are drawn in reverse video, followed by one
//! reversed blank so empty selected lines remain visible.

use anyhow::Result;
use core_events::Options;
use core_state::EditorState;
use core_terminal::Screen;
use core_text::StoreLimits;
use tracing::debug;

pub mod info;
mod status;

pub use info::{InfoContext, format_info};
pub use status::{StatusBar, StatusMemo};

pub const INFO_ROW: u16 = 0;
/// First row of the text box.
pub const BOX_ROW: u16 = 1;
/// Separator between the line number and the text.
pub const NUM_SEP: char = '|';

#[derive(Debug, Clone, PartialEq, Eq)]
struct RowSnapshot {
    number: String,
    text: String,
    selected: bool,
}

/// Stateful painter; one per terminal.
#[derive(Debug, Default)]
pub struct Renderer {
    rows: Vec<Option<RowSnapshot>>,
    info: Option<String>,
    status: StatusMemo,
    full_pending: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            full_pending: true,
            ..Self::default()
        }
    }

    /// Repaint everything on the next frame.
    pub fn invalidate(&mut self) {
        self.full_pending = true;
    }

    /// Status line collaborator drawing on the bottom row of `screen`.
    pub fn status_bar<'a, S: Screen + ?Sized>(&'a mut self, screen: &'a mut S) -> StatusBar<'a, S> {
        StatusBar::new(screen, &mut self.status)
    }

    /// Paint one frame and leave the terminal cursor on the text cursor.
    pub fn render<S: Screen + ?Sized>(&mut self, screen: &mut S, state: &EditorState) -> Result<()> {
        let (columns, rows) = screen.size();
        let columns = usize::from(columns);
        let box_rows = usize::from(rows.saturating_sub(BOX_ROW + 1));

        if self.full_pending || self.rows.len() != box_rows {
            screen.clear_screen()?;
            self.rows = vec![None; box_rows];
            self.info = None;
            self.status = StatusMemo::default();
            self.full_pending = false;
            debug!(target: "render.frame", columns, box_rows, "full_repaint");
        }

        let info = format_info(&InfoContext::from_state(state), columns);
        if self.info.as_deref() != Some(info.as_str()) {
            screen.move_to(INFO_ROW, 0)?;
            screen.write_str(&info)?;
            screen.clear_eol()?;
            self.info = Some(info);
        }

        let store = &state.lines;
        let gutter = StoreLimits::gutter_width(
            store.limits().max_lines,
            state.options.contains(Options::LINE_NUMBERS),
        );
        let text_width = columns.saturating_sub(gutter + 1);
        let first = store.viewport().first_line;
        let mut repainted = 0usize;
        for i in 0..box_rows {
            let idx = first + i;
            let snap = store.line(idx).map(|line| RowSnapshot {
                number: if gutter > 0 {
                    format!("{:>w$}{NUM_SEP}", idx + 1, w = gutter - 1)
                } else {
                    String::new()
                },
                text: line.as_str().chars().take(text_width).collect(),
                selected: state.selection.contains(idx),
            });
            if self.rows[i] == snap {
                continue;
            }
            let row = BOX_ROW + i as u16;
            screen.move_to(row, 0)?;
            screen.clear_eol()?;
            if let Some(s) = &snap {
                screen.write_str(&s.number)?;
                if s.selected {
                    screen.set_reverse(true)?;
                }
                screen.write_str(&s.text)?;
                if s.selected {
                    screen.write_char(' ')?;
                    screen.set_reverse(false)?;
                }
            }
            self.rows[i] = snap;
            repainted += 1;
        }

        if self.status.visible && !self.status.fresh {
            screen.move_to(rows.saturating_sub(1), 0)?;
            screen.clear_eol()?;
            self.status.visible = false;
        }
        self.status.fresh = false;

        let cursor = store.cursor();
        let cursor_row = BOX_ROW as usize + cursor.line.saturating_sub(first);
        screen.move_to(
            cursor_row.min(usize::from(u16::MAX)) as u16,
            (gutter + cursor.col).min(usize::from(u16::MAX)) as u16,
        )?;
        screen.flush()?;
        tracing::trace!(target: "render.frame", repainted, first, "frame");
        Ok(())
    }
}
