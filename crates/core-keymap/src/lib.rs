//! core-keymap: raw key -> editor command resolution.
//!
//! A binding is a primary control key, optionally followed by a secondary
//! key (a chord such as `^B S`). Resolution is two-staged:
//! - printable raw keys are returned verbatim without any lookup;
//! - a control key is looked up among primaries. The binding registered for
//!   the earliest command slot decides whether the key is a single-key
//!   command or a chord leader. For a chord one more raw key is read,
//!   upper-cased and matched against the leader's followers.
//!
//! An unmatched chord follower is consumed and reported as `Unresolved`; it
//! is not fed back as a fresh primary key.
//!
//! Tables are assembled once through [`BindingTableBuilder`] with "set if
//! absent" semantics so configuration can claim commands before platform
//! defaults fill the remaining slots.

use core_events::{Command, KeyUnit, keys};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

mod notation;

pub use notation::NotationError;

// -------------------------------------------------------------------------------------------------
// Key bindings
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub primary: u8,
    pub secondary: Option<u8>,
}

impl KeyBinding {
    pub const fn single(primary: u8) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    /// Chord binding. The secondary key is stored upper-cased.
    pub const fn chord(primary: u8, secondary: u8) -> Self {
        Self {
            primary,
            secondary: Some(secondary.to_ascii_uppercase()),
        }
    }

    pub fn is_chord(&self) -> bool {
        self.secondary.is_some()
    }

    /// Parse `^A`, `^?`, `^BS` or `^K^B` style notation.
    pub fn parse(notation: &str) -> Result<Self, NotationError> {
        notation::parse(notation)
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        notation::write_key(f, self.primary)?;
        if let Some(s) = self.secondary {
            notation::write_key(f, s)?;
        }
        Ok(())
    }
}

// -------------------------------------------------------------------------------------------------
// Builder
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Default)]
pub struct BindingTableBuilder {
    slots: [Option<KeyBinding>; Command::COUNT],
}

impl BindingTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `cmd` unless it already has a binding. Returns true when stored.
    pub fn bind(&mut self, cmd: Command, binding: KeyBinding) -> bool {
        let slot = &mut self.slots[cmd.slot()];
        if slot.is_some() || binding.primary == 0 {
            trace!(target: "input.keymap", cmd = cmd.name(), binding = %binding, "bind_skipped");
            return false;
        }
        let binding = KeyBinding {
            primary: binding.primary,
            secondary: binding.secondary.map(|s| s.to_ascii_uppercase()),
        };
        *slot = Some(binding);
        trace!(target: "input.keymap", cmd = cmd.name(), binding = %binding, "bind");
        true
    }

    pub fn bind_key(&mut self, cmd: Command, primary: u8) -> bool {
        self.bind(cmd, KeyBinding::single(primary))
    }

    pub fn bind_chord(&mut self, cmd: Command, primary: u8, secondary: u8) -> bool {
        self.bind(cmd, KeyBinding::chord(primary, secondary))
    }

    pub fn build(self) -> BindingTable {
        let mut leaders: HashMap<u8, Leader> = HashMap::new();
        let mut entries: HashMap<(u8, Option<u8>), Command> = HashMap::new();
        for (cmd, slot) in Command::ALL.iter().zip(self.slots.iter()) {
            let Some(b) = slot else { continue };
            leaders.entry(b.primary).or_insert(if b.is_chord() {
                Leader::Chord
            } else {
                Leader::Single(*cmd)
            });
            entries.entry((b.primary, b.secondary)).or_insert(*cmd);
        }
        let bound = self.slots.iter().filter(|s| s.is_some()).count();
        debug!(target: "input.keymap", bound, leaders = leaders.len(), "binding_table_built");
        BindingTable {
            slots: self.slots,
            leaders,
            entries,
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Table
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leader {
    Single(Command),
    Chord,
}

/// Outcome of resolving one raw key (plus an optional chord follower).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    Char(u8),
    Command(Command),
    Unresolved,
}

impl From<Resolved> for KeyUnit {
    fn from(r: Resolved) -> Self {
        match r {
            Resolved::Char(b) => KeyUnit::Char(b),
            Resolved::Command(c) => KeyUnit::Command(c),
            Resolved::Unresolved => KeyUnit::Unresolved,
        }
    }
}

/// Immutable binding table.
#[derive(Debug, Clone)]
pub struct BindingTable {
    slots: [Option<KeyBinding>; Command::COUNT],
    leaders: HashMap<u8, Leader>,
    entries: HashMap<(u8, Option<u8>), Command>,
}

impl BindingTable {
    /// Resolve `raw`, pulling a follower through `next` only when `raw` leads a chord.
    pub fn resolve<E>(
        &self,
        raw: u8,
        next: impl FnOnce() -> Result<u8, E>,
    ) -> Result<Resolved, E> {
        if keys::is_printable(raw) {
            return Ok(Resolved::Char(raw));
        }
        let resolved = match self.leaders.get(&raw) {
            None => Resolved::Unresolved,
            Some(Leader::Single(cmd)) => Resolved::Command(*cmd),
            Some(Leader::Chord) => {
                let follower = next()?.to_ascii_uppercase();
                match self.entries.get(&(raw, Some(follower))) {
                    Some(cmd) => Resolved::Command(*cmd),
                    None => {
                        debug!(target: "input.keymap", primary = raw, follower, "chord_unmatched");
                        Resolved::Unresolved
                    }
                }
            }
        };
        trace!(target: "input.keymap", raw, ?resolved, "resolve");
        Ok(resolved)
    }

    pub fn binding_of(&self, cmd: Command) -> Option<KeyBinding> {
        self.slots[cmd.slot()]
    }
}
