//! Core input vocabulary shared across the editor crates.
//!
//! Everything that flows from the keyboard (live or synthesized) to the
//! dispatcher is expressed with the types in this crate:
//! * raw key codes (`keys`): plain bytes, control keys are `0..=31` plus `DEL`.
//! * [`Command`]: the abstract editor commands a binding resolves to.
//! * [`KeyUnit`]: one unit of input after resolution.
//! * [`Options`]: runtime toggles that input and editing consult.
//! * [`EditorError`]: the recoverable error taxonomy.

use bitflags::bitflags;

mod command;
mod error;

pub use command::Command;
pub use error::{EditorError, EditorResult};

/// Raw key codes as produced by a terminal driver.
pub mod keys {
    pub const CTL_A: u8 = 1;
    pub const CTL_B: u8 = 2;
    pub const CTL_C: u8 = 3;
    pub const CTL_D: u8 = 4;
    pub const CTL_E: u8 = 5;
    pub const CTL_F: u8 = 6;
    pub const CTL_G: u8 = 7;
    pub const CTL_H: u8 = 8;
    pub const CTL_I: u8 = 9;
    pub const CTL_J: u8 = 10;
    pub const CTL_K: u8 = 11;
    pub const CTL_L: u8 = 12;
    pub const CTL_M: u8 = 13;
    pub const CTL_N: u8 = 14;
    pub const CTL_O: u8 = 15;
    pub const CTL_P: u8 = 16;
    pub const CTL_Q: u8 = 17;
    pub const CTL_R: u8 = 18;
    pub const CTL_S: u8 = 19;
    pub const CTL_T: u8 = 20;
    pub const CTL_U: u8 = 21;
    pub const CTL_V: u8 = 22;
    pub const CTL_W: u8 = 23;
    pub const CTL_X: u8 = 24;
    pub const CTL_Y: u8 = 25;
    pub const CTL_Z: u8 = 26;
    pub const ESC: u8 = 27;
    pub const DEL: u8 = 127;

    /// True for bytes that are inserted verbatim (never looked up in the binding table).
    pub const fn is_printable(raw: u8) -> bool {
        raw > 31 && raw != DEL
    }
}

/// Size of the forced-input queue; also the upper bound of a macro repeat count.
pub const FORCED_MAX: usize = 128;

/// Longest pattern accepted by the find prompt.
pub const FIND_MAX: usize = 32;

/// One resolved unit of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyUnit {
    /// Printable byte to insert.
    Char(u8),
    /// Abstract editor command.
    Command(Command),
    /// Synthetic no-op marker (end of macro, comment, option toggles).
    Null,
    /// A control key or chord with no binding; shown as `?`.
    Unresolved,
}

impl KeyUnit {
    pub fn is_command(&self, cmd: Command) -> bool {
        matches!(self, KeyUnit::Command(c) if *c == cmd)
    }
}

impl From<Command> for KeyUnit {
    fn from(cmd: Command) -> Self {
        KeyUnit::Command(cmd)
    }
}

bitflags! {
    /// Editing options toggled by configuration and by macros.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Options: u8 {
        const AUTO_INDENT  = 0b0000_0001;
        const AUTO_LIST    = 0b0000_0010;
        const LINE_NUMBERS = 0b0000_0100;
        const WORD_MOTIONS = 0b0000_1000;
    }
}

impl Default for Options {
    fn default() -> Self {
        Options::LINE_NUMBERS | Options::WORD_MOTIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_excludes_control_and_del() {
        assert!(keys::is_printable(b' '));
        assert!(keys::is_printable(b'~'));
        assert!(!keys::is_printable(keys::CTL_B));
        assert!(!keys::is_printable(keys::ESC));
        assert!(!keys::is_printable(keys::DEL));
    }

    #[test]
    fn default_options_enable_numbers_and_words_only() {
        let o = Options::default();
        assert!(o.contains(Options::LINE_NUMBERS | Options::WORD_MOTIONS));
        assert!(!o.intersects(Options::AUTO_INDENT | Options::AUTO_LIST));
    }

    #[test]
    fn key_unit_is_command() {
        let u: KeyUnit = Command::Escape.into();
        assert!(u.is_command(Command::Escape));
        assert!(!u.is_command(Command::Up));
        assert!(!KeyUnit::Null.is_command(Command::Escape));
    }
}
