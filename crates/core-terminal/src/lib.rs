//! Terminal backend abstraction and crossterm implementation.
//!
//! The editor core never emits escape sequences itself. Output goes through
//! the [`Screen`] trait; raw keys come in through [`CrosstermKeys`], which
//! implements `core_input::KeySource` by translating terminal key events into
//! the control codes the default bindings expect.

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::{BufWriter, Stdout, Write, stdout};

pub mod bindings;
pub mod capabilities;
mod keys;

pub use bindings::default_bindings;
pub use capabilities::TerminalCapabilities;
pub use keys::{CrosstermKeys, translate_key};

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
}

/// Character-cell output surface. Rows and columns are 0-based.
pub trait Screen {
    /// `(columns, rows)`.
    fn size(&self) -> (u16, u16);
    fn move_to(&mut self, row: u16, col: u16) -> Result<()>;
    fn write_str(&mut self, s: &str) -> Result<()>;
    fn write_char(&mut self, c: char) -> Result<()> {
        let mut buf = [0u8; 4];
        self.write_str(c.encode_utf8(&mut buf))
    }
    fn clear_screen(&mut self) -> Result<()>;
    /// Clear from the cursor to the end of the current row.
    fn clear_eol(&mut self) -> Result<()>;
    fn set_reverse(&mut self, on: bool) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

pub struct CrosstermBackend {
    entered: bool,
}

/// RAII guard ensuring terminal state restoration even if caller early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
    active: bool,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { entered: false }
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard {
            backend: self,
            active: true,
        })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen)?;
            self.entered = true;
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), SetAttribute(Attribute::Reset), LeaveAlternateScreen)?;
            disable_raw_mode()?;
            self.entered = false;
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl<'a> Drop for TerminalGuard<'a> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.backend.leave();
        }
    }
}

/// Buffered stdout screen. Commands are queued and written on `flush`.
pub struct CrosstermScreen {
    out: BufWriter<Stdout>,
    columns: u16,
    rows: u16,
}

impl CrosstermScreen {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            out: BufWriter::new(stdout()),
            columns,
            rows,
        }
    }
}

impl Screen for CrosstermScreen {
    fn size(&self) -> (u16, u16) {
        (self.columns, self.rows)
    }

    fn move_to(&mut self, row: u16, col: u16) -> Result<()> {
        queue!(self.out, MoveTo(col, row))?;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(self.out, Print(s))?;
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(())
    }

    fn clear_eol(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    fn set_reverse(&mut self, on: bool) -> Result<()> {
        let attr = if on {
            Attribute::Reverse
        } else {
            Attribute::NoReverse
        };
        queue!(self.out, SetAttribute(attr))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
