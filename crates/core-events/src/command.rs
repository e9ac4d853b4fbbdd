//! Abstract editor commands.

use std::fmt;

/// Editor command a key binding resolves to.
///
/// Declaration order is the binding table slot order: when several bindings
/// share a primary key, the one registered for the earliest command decides
/// whether that key starts a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum Command {
    Up = 1000,
    Down,
    Left,
    Right,
    Begin,
    End,
    Top,
    Bottom,
    PageUp,
    PageDown,
    Indent,
    Newline,
    Escape,
    DelRight,
    DelLeft,
    Cut,
    Copy,
    Paste,
    Delete,
    ClearClip,
    Find,
    FindNext,
    GoLine,
    WordLeft,
    WordRight,
    BlockStart,
    BlockEnd,
    BlockUnset,
    Macro,
}

impl Command {
    pub const COUNT: usize = 29;

    /// All commands in slot order.
    pub const ALL: [Command; Self::COUNT] = [
        Command::Up,
        Command::Down,
        Command::Left,
        Command::Right,
        Command::Begin,
        Command::End,
        Command::Top,
        Command::Bottom,
        Command::PageUp,
        Command::PageDown,
        Command::Indent,
        Command::Newline,
        Command::Escape,
        Command::DelRight,
        Command::DelLeft,
        Command::Cut,
        Command::Copy,
        Command::Paste,
        Command::Delete,
        Command::ClearClip,
        Command::Find,
        Command::FindNext,
        Command::GoLine,
        Command::WordLeft,
        Command::WordRight,
        Command::BlockStart,
        Command::BlockEnd,
        Command::BlockUnset,
        Command::Macro,
    ];

    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Zero-based slot in the binding table.
    pub const fn slot(self) -> usize {
        (self.code() - Command::Up.code()) as usize
    }

    /// Human readable description.
    pub fn what(self) -> &'static str {
        match self {
            Command::Up => "Up",
            Command::Down => "Down",
            Command::Left => "Left",
            Command::Right => "Right",
            Command::Begin => "Begin",
            Command::End => "End",
            Command::Top => "Top",
            Command::Bottom => "Bottom",
            Command::PageUp => "PgUp",
            Command::PageDown => "PgDown",
            Command::Indent => "Indent",
            Command::Newline => "NewLine",
            Command::Escape => "Escape",
            Command::DelRight => "DelRight",
            Command::DelLeft => "DelLeft",
            Command::Cut => "Cut",
            Command::Copy => "Copy",
            Command::Paste => "Paste",
            Command::Delete => "Delete",
            Command::ClearClip => "ClearClip",
            Command::Find => "Find",
            Command::FindNext => "FindNext",
            Command::GoLine => "GoLine",
            Command::WordLeft => "WordLeft",
            Command::WordRight => "WordRight",
            Command::BlockStart => "BlockStart",
            Command::BlockEnd => "BlockEnd",
            Command::BlockUnset => "BlockUnset",
            Command::Macro => "Macro",
        }
    }

    /// Lower-case identifier used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Command::Up => "up",
            Command::Down => "down",
            Command::Left => "left",
            Command::Right => "right",
            Command::Begin => "begin",
            Command::End => "end",
            Command::Top => "top",
            Command::Bottom => "bottom",
            Command::PageUp => "pgup",
            Command::PageDown => "pgdown",
            Command::Indent => "indent",
            Command::Newline => "newline",
            Command::Escape => "escape",
            Command::DelRight => "delright",
            Command::DelLeft => "delleft",
            Command::Cut => "cut",
            Command::Copy => "copy",
            Command::Paste => "paste",
            Command::Delete => "delete",
            Command::ClearClip => "clearclip",
            Command::Find => "find",
            Command::FindNext => "findnext",
            Command::GoLine => "goline",
            Command::WordLeft => "wordleft",
            Command::WordRight => "wordright",
            Command::BlockStart => "blockstart",
            Command::BlockEnd => "blockend",
            Command::BlockUnset => "blockunset",
            Command::Macro => "macro",
        }
    }

    /// Case-insensitive inverse of [`Command::name`].
    pub fn from_name(name: &str) -> Option<Command> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Commands a macro script may emit through `{symbol}`.
    ///
    /// `symbol` must already be lower-case.
    pub fn from_macro_symbol(symbol: &str) -> Option<Command> {
        let cmd = match symbol {
            "up" => Command::Up,
            "down" => Command::Down,
            "left" => Command::Left,
            "right" => Command::Right,
            "begin" => Command::Begin,
            "end" => Command::End,
            "top" => Command::Top,
            "bottom" => Command::Bottom,
            "newline" => Command::Newline,
            "indent" => Command::Indent,
            "delright" => Command::DelRight,
            "delleft" => Command::DelLeft,
            "cut" => Command::Cut,
            "copy" => Command::Copy,
            "paste" => Command::Paste,
            "delete" => Command::Delete,
            "clearclip" => Command::ClearClip,
            "blockstart" => Command::BlockStart,
            "blockend" => Command::BlockEnd,
            _ => return None,
        };
        Some(cmd)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.what())
    }
}
