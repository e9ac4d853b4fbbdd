//! Text edits: character insertion, line split and join, deletion, tab fill.
//!
//! All mutation goes through `EditorState::edit` / `edit_if` so the dirty
//! flag and block invalidation stay consistent. A failed store operation
//! leaves the document untouched and surfaces as an error for the dispatcher
//! to report.

use super::DispatchResult;
use crate::Editor;
use core_events::EditorResult;

pub(crate) fn insert(editor: &mut Editor, b: u8) -> EditorResult<DispatchResult> {
    let before = editor.state.lines.cursor();
    editor.state.edit(|l| l.insert_char(b))?;
    tracing::trace!(target: "actions.dispatch", op = "insert_char", ch = %char::from(b), line = before.line, col = before.col, "edit");
    Ok(DispatchResult::dirty())
}

pub(crate) fn newline(editor: &mut Editor) -> EditorResult<DispatchResult> {
    let prefix = editor.state.continuation_prefix();
    let before = editor.state.lines.cursor();
    editor.state.edit(|l| l.split_line(&prefix))?;
    tracing::trace!(target: "actions.dispatch", op = "newline", line = before.line, col = before.col, prefix = prefix.len(), "edit");
    Ok(DispatchResult::dirty())
}

/// Fill spaces up to the next tab stop in one edit, or not at all.
pub(crate) fn indent(editor: &mut Editor) -> EditorResult<DispatchResult> {
    let tab = editor.state.tab_size.max(1);
    let col = editor.state.lines.cursor().col;
    let fill = tab - col % tab;
    editor.state.edit(|l| l.insert_run(b' ', fill))?;
    tracing::trace!(target: "actions.dispatch", op = "indent", col, fill, "edit");
    Ok(DispatchResult::dirty())
}

pub(crate) fn delete_right(editor: &mut Editor) -> EditorResult<DispatchResult> {
    let changed = editor.state.edit_if(|l| l.delete_char())?;
    tracing::trace!(target: "actions.dispatch", op = "delete_right", changed, "edit");
    Ok(if changed {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    })
}

pub(crate) fn delete_left(editor: &mut Editor) -> EditorResult<DispatchResult> {
    let changed = editor.state.edit_if(|l| l.delete_left())?;
    tracing::trace!(target: "actions.dispatch", op = "delete_left", changed, "edit");
    Ok(if changed {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    })
}
