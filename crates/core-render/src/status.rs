//! Status line on the last screen row.

use core_actions::StatusLine;
use core_terminal::Screen;

/// Whether a message occupies the status row, and whether it was shown
/// during the current step. Messages that are not refreshed are wiped by
/// the next frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusMemo {
    pub visible: bool,
    pub fresh: bool,
}

/// [`StatusLine`] writing to the bottom row of a [`Screen`].
pub struct StatusBar<'a, S: Screen + ?Sized> {
    screen: &'a mut S,
    memo: &'a mut StatusMemo,
}

impl<'a, S: Screen + ?Sized> StatusBar<'a, S> {
    pub fn new(screen: &'a mut S, memo: &'a mut StatusMemo) -> Self {
        Self { screen, memo }
    }

    fn row(&self) -> u16 {
        self.screen.size().1.saturating_sub(1)
    }
}

impl<S: Screen + ?Sized> StatusLine for StatusBar<'_, S> {
    fn show(&mut self, msg: &str) -> anyhow::Result<()> {
        let width = usize::from(self.screen.size().0).saturating_sub(1);
        let row = self.row();
        self.screen.move_to(row, 0)?;
        self.screen.clear_eol()?;
        // keep the tail visible: the end of a prompt is where typing happens
        let skip = msg.chars().count().saturating_sub(width);
        let visible: String = msg.chars().skip(skip).collect();
        self.screen.write_str(&visible)?;
        self.screen.flush()?;
        self.memo.visible = true;
        self.memo.fresh = true;
        tracing::trace!(target: "render.status", len = msg.len(), "show");
        Ok(())
    }

    fn clear(&mut self) -> anyhow::Result<()> {
        let row = self.row();
        self.screen.move_to(row, 0)?;
        self.screen.clear_eol()?;
        self.screen.flush()?;
        self.memo.visible = false;
        self.memo.fresh = false;
        Ok(())
    }
}
