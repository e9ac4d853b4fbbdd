//! The escape menu.
//!
//! Options: New, Open, Save, save As, Insert, eXit. Options that would drop
//! unsaved changes ask for confirmation first. Escape returns to editing.

use super::DispatchResult;
use super::command::FILENAME_MAX;
use crate::io_ops::{OpenFileResult, WriteFileResult, insert_file, open_file, write_file};
use crate::{Editor, Ui, prompt};
use anyhow::Result;
use core_events::{Command, EditorError, EditorResult, KeyUnit};
use std::path::PathBuf;

/// What a menu option asks of the menu loop.
enum Next {
    /// Stay in the menu and ask again.
    Stay,
    Leave(DispatchResult),
}

pub(crate) fn run(editor: &mut Editor, ui: &mut Ui<'_>) -> Result<EditorResult<DispatchResult>> {
    let legend = format!(
        "New Open Save save As Insert eXit - Option ({} = back): ",
        editor.key_names.escape
    );
    loop {
        ui.status.show(&legend)?;
        let choice = match prompt::read_unit(editor, ui)? {
            KeyUnit::Command(Command::Escape) => {
                ui.status.clear()?;
                return Ok(Ok(DispatchResult::clean()));
            }
            KeyUnit::Char(b) => b.to_ascii_uppercase(),
            _ => continue,
        };
        let next = match choice {
            b'N' => new_file(editor, ui)?,
            b'O' => open(editor, ui)?,
            b'S' => save(editor, ui, false)?,
            b'A' => save(editor, ui, true)?,
            b'I' => insert(editor, ui)?,
            b'X' => exit(editor, ui)?,
            _ => continue,
        };
        match next {
            Ok(Next::Stay) => {}
            Ok(Next::Leave(r)) => {
                ui.status.clear()?;
                return Ok(Ok(r));
            }
            Err(e) => return Ok(Err(e)),
        }
    }
}

fn new_file(editor: &mut Editor, ui: &mut Ui<'_>) -> Result<EditorResult<Next>> {
    if !prompt::confirm_discard(editor, ui)? {
        return Ok(Ok(Next::Stay));
    }
    editor.state.reset();
    tracing::info!(target: "actions.dispatch", op = "new", "menu");
    Ok(Ok(Next::Leave(DispatchResult::buffer_replaced())))
}

fn ask_file_name(editor: &mut Editor, ui: &mut Ui<'_>, initial: &str) -> Result<Option<PathBuf>> {
    Ok(prompt::ask_string(editor, ui, "Filename", initial, FILENAME_MAX)?.map(PathBuf::from))
}

fn open(editor: &mut Editor, ui: &mut Ui<'_>) -> Result<EditorResult<Next>> {
    if !prompt::confirm_discard(editor, ui)? {
        return Ok(Ok(Next::Stay));
    }
    let Some(path) = ask_file_name(editor, ui, "")? else {
        return Ok(Ok(Next::Stay));
    };
    Ok(match open_file(&mut editor.state, &path) {
        OpenFileResult::Success { .. } => Ok(Next::Leave(DispatchResult::buffer_replaced())),
        OpenFileResult::Error(e) => Err(e),
    })
}

fn save(editor: &mut Editor, ui: &mut Ui<'_>, ask: bool) -> Result<EditorResult<Next>> {
    let target = if ask || editor.state.file_name.is_none() {
        let current = editor
            .state
            .file_name
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        match ask_file_name(editor, ui, &current)? {
            Some(p) => Some(p),
            None => return Ok(Ok(Next::Stay)),
        }
    } else {
        None
    };
    Ok(match write_file(&mut editor.state, target.as_deref()) {
        WriteFileResult::Success => Ok(Next::Leave(DispatchResult::dirty())),
        WriteFileResult::NoFilename => Ok(Next::Stay),
        WriteFileResult::Error => Err(EditorError::CannotWriteFile),
    })
}

fn insert(editor: &mut Editor, ui: &mut Ui<'_>) -> Result<EditorResult<Next>> {
    let Some(path) = ask_file_name(editor, ui, "")? else {
        return Ok(Ok(Next::Stay));
    };
    Ok(match insert_file(&mut editor.state, &path) {
        OpenFileResult::Success { .. } => Ok(Next::Leave(DispatchResult::dirty())),
        OpenFileResult::Error(e) => Err(e),
    })
}

fn exit(editor: &mut Editor, ui: &mut Ui<'_>) -> Result<EditorResult<Next>> {
    if !prompt::confirm_discard(editor, ui)? {
        return Ok(Ok(Next::Stay));
    }
    tracing::info!(target: "actions.dispatch", op = "exit", "menu");
    Ok(Ok(Next::Leave(DispatchResult::quit())))
}
