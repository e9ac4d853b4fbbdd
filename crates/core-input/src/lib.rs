//! Input pipeline: live keys, forced input and macro playback.
//!
//! Units are pulled in a fixed order:
//! 1. the [`ForcedQueue`] (synthetic input: macro expansions, tab fill);
//! 2. the [`MacroPlayer`], pumped one script unit at a time while running;
//! 3. the live [`KeySource`], resolved through the binding table.
//!
//! While a macro runs, a pending live key that resolves to `Escape` cancels
//! it before the next script unit is read.

mod forced;
pub mod macro_player;

pub use forced::ForcedQueue;
pub use macro_player::{MacroPlayer, with_default_extension};

use core_events::{Command, EditorError, KeyUnit, Options};
use core_keymap::{BindingTable, Resolved};
use std::collections::VecDeque;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Raw key provider (terminal driver or scripted source).
pub trait KeySource {
    /// Block until the next raw key is available.
    fn read_key(&mut self) -> io::Result<u8>;
    /// True when `read_key` would not block.
    fn key_available(&mut self) -> io::Result<bool>;
}

/// Pre-recorded raw keys. Reading past the end is an `UnexpectedEof` error.
#[derive(Debug, Default, Clone)]
pub struct ScriptedKeys {
    keys: VecDeque<u8>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = u8>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn push(&mut self, keys: impl IntoIterator<Item = u8>) {
        self.keys.extend(keys);
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> io::Result<u8> {
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more keys"))
    }

    fn key_available(&mut self) -> io::Result<bool> {
        Ok(!self.keys.is_empty())
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    /// Recoverable; report on the status line and continue.
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error("key input failed: {0}")]
    Io(#[from] io::Error),
}

/// Owns the binding table, forced queue and macro player.
#[derive(Debug)]
pub struct InputPipeline {
    table: BindingTable,
    forced: ForcedQueue,
    player: MacroPlayer,
}

impl InputPipeline {
    pub fn new(table: BindingTable) -> Self {
        Self {
            table,
            forced: ForcedQueue::default(),
            player: MacroPlayer::new(),
        }
    }

    pub fn table(&self) -> &BindingTable {
        &self.table
    }

    pub fn forced(&mut self) -> &mut ForcedQueue {
        &mut self.forced
    }

    pub fn macro_running(&self) -> bool {
        self.player.is_running()
    }

    pub fn start_macro(&mut self, path: &Path, raw: bool, options: &mut Options) -> Result<(), EditorError> {
        self.player.start(path, raw, &mut self.forced, options)
    }

    pub fn start_macro_reader(
        &mut self,
        reader: impl io::BufRead + 'static,
        name: &str,
        raw: bool,
        options: &mut Options,
    ) {
        self.player
            .start_reader(reader, name, raw, &mut self.forced, options);
    }

    pub fn stop_macro(&mut self, options: &mut Options) {
        self.player.stop(&mut self.forced, options);
    }

    fn read_live(&mut self, keys: &mut dyn KeySource) -> io::Result<KeyUnit> {
        let raw = keys.read_key()?;
        let resolved = self.table.resolve(raw, || keys.read_key())?;
        Ok(resolved.into())
    }

    /// Pull the next unit. `file_name` feeds the `{filename}` macro symbol.
    pub fn next_unit(
        &mut self,
        keys: &mut dyn KeySource,
        options: &mut Options,
        file_name: &str,
    ) -> Result<KeyUnit, InputError> {
        loop {
            if let Some(unit) = self.forced.pop() {
                return Ok(unit);
            }
            if !self.player.is_running() {
                return Ok(self.read_live(keys)?);
            }
            if keys.key_available()? {
                // A chord leader is not completed here; playback must not block on a follower.
                let raw = keys.read_key()?;
                let typed = self
                    .table
                    .resolve(raw, || Err(()))
                    .unwrap_or(Resolved::Unresolved);
                if typed == Resolved::Command(Command::Escape) {
                    info!(target: "input.macro", "cancelled");
                    self.player.stop(&mut self.forced, options);
                    continue;
                }
                debug!(target: "input.macro", ?typed, "typed_key_ignored");
            }
            self.player.pump(&mut self.forced, options, file_name)?;
        }
    }
}
