//! Crossterm key events to raw key codes.
//!
//! Cursor and function keys are folded onto the WordStar-style control codes
//! the default bindings use, so `Up` and `^E` are the same key to the editor.

use core_events::keys::*;
use core_input::KeySource;
use crossterm::event::{
    self, Event as CEvent, KeyCode as CKeyCode, KeyEvent as CKeyEvent,
    KeyEventKind as CKeyEventKind, KeyModifiers as CKeyModifiers,
};
use std::collections::VecDeque;
use std::io;
use std::time::Duration;
use tracing::trace;

/// Translate one key event. `None` for releases and keys with no raw code.
pub fn translate_key(event: &CKeyEvent) -> Option<u8> {
    if event.kind == CKeyEventKind::Release {
        return None;
    }
    let ctrl = event.modifiers.contains(CKeyModifiers::CONTROL);
    let raw = match event.code {
        CKeyCode::Char(c) if ctrl => control_of(c)?,
        CKeyCode::Char(c) if c.is_ascii() && !c.is_ascii_control() => c as u8,
        CKeyCode::Char(_) => b'?',
        CKeyCode::Up => CTL_E,
        CKeyCode::Down => CTL_X,
        CKeyCode::Left => CTL_S,
        CKeyCode::Right => CTL_D,
        CKeyCode::Home if ctrl => CTL_P,
        CKeyCode::End if ctrl => CTL_F,
        CKeyCode::Home => CTL_V,
        CKeyCode::End => CTL_A,
        CKeyCode::PageUp => CTL_R,
        CKeyCode::PageDown => CTL_C,
        CKeyCode::F(1) => CTL_U,
        CKeyCode::F(2) => CTL_O,
        CKeyCode::F(3) => CTL_W,
        CKeyCode::F(4) => CTL_G,
        CKeyCode::Delete => DEL,
        CKeyCode::Backspace => CTL_H,
        CKeyCode::Enter => CTL_M,
        CKeyCode::Tab => CTL_I,
        CKeyCode::Esc => ESC,
        _ => return None,
    };
    Some(raw)
}

fn control_of(c: char) -> Option<u8> {
    match c.to_ascii_uppercase() {
        c @ '@'..='_' => Some(c as u8 - b'@'),
        _ => None,
    }
}

/// Live keyboard source. Events are translated eagerly into a pending queue
/// so `key_available` is exact even when non-key events are interleaved.
#[derive(Debug, Default)]
pub struct CrosstermKeys {
    pending: VecDeque<u8>,
}

impl CrosstermKeys {
    pub fn new() -> Self {
        Self::default()
    }

    fn absorb(&mut self, ev: CEvent) {
        match ev {
            CEvent::Key(key) => {
                if let Some(raw) = translate_key(&key) {
                    self.pending.push_back(raw);
                } else {
                    trace!(target: "terminal.keys", ?key, "untranslated");
                }
            }
            CEvent::Paste(text) => {
                self.pending.extend(text.bytes().map(|b| match b {
                    b'\n' => CTL_M,
                    b'\t' => CTL_I,
                    b if is_printable(b) && b < 128 => b,
                    _ => b'?',
                }));
            }
            _ => {}
        }
    }
}

impl KeySource for CrosstermKeys {
    fn read_key(&mut self) -> io::Result<u8> {
        loop {
            if let Some(raw) = self.pending.pop_front() {
                return Ok(raw);
            }
            let ev = event::read()?;
            self.absorb(ev);
        }
    }

    fn key_available(&mut self) -> io::Result<bool> {
        while self.pending.is_empty() && event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            self.absorb(ev);
        }
        Ok(!self.pending.is_empty())
    }
}
