//! Dispatcher applying resolved input units to the editor.
//!
//! Sub-modules by concern:
//! * `motion`  - cursor movement
//! * `edit`    - character insertion, line split/join, deletion, tab fill
//! * `block`   - block marks and clipboard commands
//! * `command` - find, go-to-line and the macro prompt
//! * `menu`    - the escape menu (new/open/save/insert/exit)
//!
//! Handlers return `EditorResult<DispatchResult>`; a recoverable error is
//! shown on the status line here and the loop continues with the state the
//! failed operation left untouched.

use crate::{Editor, Ui, prompt};
use anyhow::Result;
use core_events::{Command, EditorError, EditorResult, KeyUnit};

mod block;
mod command;
mod edit;
mod menu;
mod motion;

/// Result of dispatching a single unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
    /// The whole document was replaced (new/open); the renderer should
    /// repaint everything.
    pub buffer_replaced: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
            buffer_replaced: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
            buffer_replaced: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
            buffer_replaced: false,
        }
    }
    pub fn buffer_replaced() -> Self {
        Self {
            dirty: true,
            quit: false,
            buffer_replaced: true,
        }
    }
}

/// Apply one unit. Terminal failures propagate; editor errors are reported.
pub fn dispatch(unit: KeyUnit, editor: &mut Editor, ui: &mut Ui<'_>) -> Result<DispatchResult> {
    let outcome = match unit {
        KeyUnit::Null => Ok(DispatchResult::clean()),
        KeyUnit::Unresolved => {
            tracing::trace!(target: "actions.dispatch", "unresolved_key");
            prompt::notify(ui, &EditorError::UnresolvedKeyChord.to_string())?;
            Ok(DispatchResult::clean())
        }
        KeyUnit::Char(b) => edit::insert(editor, b),
        KeyUnit::Command(cmd) => dispatch_command(cmd, editor, ui)?,
    };
    match outcome {
        Ok(r) => Ok(r),
        Err(e) => {
            prompt::report(editor, ui, e)?;
            Ok(DispatchResult::dirty())
        }
    }
}

fn dispatch_command(
    cmd: Command,
    editor: &mut Editor,
    ui: &mut Ui<'_>,
) -> Result<EditorResult<DispatchResult>> {
    tracing::trace!(target: "actions.dispatch", cmd = %cmd, "command");
    let r = match cmd {
        Command::Up
        | Command::Down
        | Command::Left
        | Command::Right
        | Command::Begin
        | Command::End
        | Command::Top
        | Command::Bottom
        | Command::PageUp
        | Command::PageDown
        | Command::WordLeft
        | Command::WordRight => motion::handle_motion(cmd, editor),
        Command::Newline => edit::newline(editor),
        Command::Indent => edit::indent(editor),
        Command::DelRight => edit::delete_right(editor),
        Command::DelLeft => edit::delete_left(editor),
        Command::BlockStart
        | Command::BlockEnd
        | Command::BlockUnset
        | Command::Cut
        | Command::Copy
        | Command::Paste
        | Command::Delete
        | Command::ClearClip => block::handle_block(cmd, editor),
        Command::Find => return command::find(editor, ui, true),
        Command::FindNext => return command::find(editor, ui, false),
        Command::GoLine => return command::goto_line(editor, ui),
        Command::Macro => return command::run_macro(editor, ui),
        Command::Escape => return menu::run(editor, ui),
    };
    Ok(r)
}
