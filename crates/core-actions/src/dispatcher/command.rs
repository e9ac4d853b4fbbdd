//! Prompted commands: find, find next, go to line, run macro.

use super::DispatchResult;
use crate::{Editor, Ui, prompt};
use anyhow::Result;
use core_events::{EditorResult, FIND_MAX};

/// Longest file name accepted at a prompt.
pub(crate) const FILENAME_MAX: usize = 64;

/// `ask` forces the pattern prompt; otherwise the remembered pattern is reused
/// and the prompt only appears when there is none yet.
pub(crate) fn find(
    editor: &mut Editor,
    ui: &mut Ui<'_>,
    ask: bool,
) -> Result<EditorResult<DispatchResult>> {
    if ask || editor.state.find_pattern.is_empty() {
        let current = String::from_utf8_lossy(&editor.state.find_pattern).into_owned();
        match prompt::ask_string(editor, ui, "Find", &current, FIND_MAX)? {
            Some(p) => editor.state.find_pattern = p.into_bytes(),
            None => return Ok(Ok(DispatchResult::clean())),
        }
    }
    let pattern = editor.state.find_pattern.clone();
    let found = editor.state.lines.find_next(&pattern);
    tracing::debug!(target: "actions.dispatch", op = "find", found, len = pattern.len(), "command");
    if !found {
        prompt::notify(ui, "Not found")?;
    }
    Ok(Ok(DispatchResult::dirty()))
}

pub(crate) fn goto_line(editor: &mut Editor, ui: &mut Ui<'_>) -> Result<EditorResult<DispatchResult>> {
    let Some(answer) = prompt::ask_string(editor, ui, "Line number", "", 5)? else {
        return Ok(Ok(DispatchResult::clean()));
    };
    match answer.trim().parse::<usize>() {
        Ok(n) if n > 0 => {
            editor.state.lines.goto_line(n);
            tracing::debug!(target: "actions.dispatch", op = "goto_line", n, "command");
            Ok(Ok(DispatchResult::dirty()))
        }
        _ => Ok(Ok(DispatchResult::clean())),
    }
}

pub(crate) fn run_macro(editor: &mut Editor, ui: &mut Ui<'_>) -> Result<EditorResult<DispatchResult>> {
    let Some(name) = prompt::ask_string(editor, ui, "Macro", "", FILENAME_MAX)? else {
        return Ok(Ok(DispatchResult::clean()));
    };
    Ok(editor.start_macro(&name).map(|()| DispatchResult::clean()))
}
