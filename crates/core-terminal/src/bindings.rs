//! Built-in key layout.
//!
//! Applied after the configured bindings; [`BindingTableBuilder::bind`] keeps
//! the first binding per command, so anything the configuration claimed wins.

use core_events::Command;
use core_events::keys::*;
use core_keymap::{BindingTableBuilder, KeyBinding};

const DEFAULTS: [(Command, KeyBinding); Command::COUNT] = [
    (Command::Up, KeyBinding::single(CTL_E)),
    (Command::Down, KeyBinding::single(CTL_X)),
    (Command::Left, KeyBinding::single(CTL_S)),
    (Command::Right, KeyBinding::single(CTL_D)),
    (Command::Begin, KeyBinding::single(CTL_V)),
    (Command::End, KeyBinding::single(CTL_A)),
    (Command::Top, KeyBinding::single(CTL_P)),
    (Command::Bottom, KeyBinding::single(CTL_F)),
    (Command::PageUp, KeyBinding::single(CTL_R)),
    (Command::PageDown, KeyBinding::single(CTL_C)),
    (Command::Indent, KeyBinding::single(CTL_I)),
    (Command::Newline, KeyBinding::single(CTL_M)),
    (Command::Escape, KeyBinding::single(ESC)),
    (Command::DelRight, KeyBinding::single(DEL)),
    (Command::DelLeft, KeyBinding::single(CTL_H)),
    (Command::Cut, KeyBinding::single(CTL_U)),
    (Command::Copy, KeyBinding::single(CTL_O)),
    (Command::Paste, KeyBinding::single(CTL_W)),
    (Command::Delete, KeyBinding::single(CTL_G)),
    (Command::ClearClip, KeyBinding::single(CTL_T)),
    (Command::Find, KeyBinding::single(CTL_K)),
    (Command::FindNext, KeyBinding::single(CTL_L)),
    (Command::GoLine, KeyBinding::single(CTL_J)),
    (Command::WordLeft, KeyBinding::chord(CTL_Q, b'L')),
    (Command::WordRight, KeyBinding::chord(CTL_Q, b'R')),
    (Command::BlockStart, KeyBinding::chord(CTL_B, b'S')),
    (Command::BlockEnd, KeyBinding::chord(CTL_B, b'E')),
    (Command::BlockUnset, KeyBinding::chord(CTL_B, b'U')),
    (Command::Macro, KeyBinding::single(CTL_Y)),
];

/// Fill every still-unbound command with its default key.
pub fn default_bindings(builder: &mut BindingTableBuilder) {
    for (cmd, binding) in DEFAULTS {
        builder.bind(cmd, binding);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_keymap::Resolved;

    #[test]
    fn every_command_has_a_default() {
        let mut b = BindingTableBuilder::new();
        default_bindings(&mut b);
        let table = b.build();
        for cmd in Command::ALL {
            assert!(table.binding_of(cmd).is_some(), "{cmd} unbound");
        }
    }

    #[test]
    fn chords_resolve_case_insensitively() {
        let mut b = BindingTableBuilder::new();
        default_bindings(&mut b);
        let table = b.build();
        let r: Result<_, ()> = table.resolve(CTL_B, || Ok(b'u'));
        assert_eq!(r, Ok(Resolved::Command(Command::BlockUnset)));
        let r: Result<_, ()> = table.resolve(CTL_Q, || Ok(b'x'));
        assert_eq!(r, Ok(Resolved::Unresolved));
    }
}
