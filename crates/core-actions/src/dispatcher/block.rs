//! Block marks and clipboard commands.
//!
//! Cut, copy and delete act on the active block or, without one, on the
//! cursor line. Paste inserts the clipboard before the cursor line.

use super::DispatchResult;
use crate::Editor;
use core_events::{Command, EditorResult};

pub(crate) fn handle_block(cmd: Command, editor: &mut Editor) -> EditorResult<DispatchResult> {
    let state = &mut editor.state;
    let line = state.lines.cursor().line;
    let had_block = state.selection.is_active();
    match cmd {
        Command::BlockStart => state.selection.mark_start(line),
        Command::BlockEnd => state.selection.mark_end(line),
        Command::BlockUnset => state.selection.unset(),
        Command::Cut => state.cut()?,
        Command::Copy => state.copy()?,
        Command::Paste => state.paste()?,
        Command::Delete => state.delete_lines(),
        Command::ClearClip => state.clear_clipboard(),
        _ => return Ok(DispatchResult::clean()),
    }
    tracing::trace!(
        target: "actions.dispatch",
        op = %cmd,
        line,
        had_block,
        span = state.selection.span_len(),
        clipboard = state.clipboard.len(),
        "block"
    );
    Ok(DispatchResult::dirty())
}
