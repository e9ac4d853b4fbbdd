//! Status-line prompts.
//!
//! Prompts read through the same pipeline as the dispatcher, so a running
//! macro can answer them. A macro error while a prompt is waiting cancels the
//! prompt as if the escape key had been pressed.

use crate::{Editor, Ui, log_input_error};
use anyhow::Result;
use core_events::{Command, EditorError, KeyUnit};
use core_input::InputError;
use tracing::warn;

pub(crate) fn read_unit(editor: &mut Editor, ui: &mut Ui<'_>) -> Result<KeyUnit> {
    match editor.next_unit(ui.keys) {
        Ok(unit) => Ok(unit),
        Err(InputError::Editor(e)) => {
            log_input_error(&e);
            Ok(KeyUnit::Command(Command::Escape))
        }
        Err(InputError::Io(e)) => Err(e.into()),
    }
}

/// Show `msg` with its key legend and wait for the newline key (when `on_cr`
/// is given) or the escape key. Returns true when newline ended the wait.
pub fn wait(
    editor: &mut Editor,
    ui: &mut Ui<'_>,
    msg: Option<&str>,
    on_cr: Option<&str>,
    on_esc: &str,
) -> Result<bool> {
    let mut legend = Vec::new();
    if let Some(cr) = on_cr {
        legend.push(format!("{} = {cr}", editor.key_names.newline));
    }
    legend.push(format!("{} = {on_esc}", editor.key_names.escape));
    let line = match msg {
        Some(m) => format!("{m} ({}): ", legend.join(", ")),
        None => format!("{}: ", legend.join(", ")),
    };
    ui.status.show(&line)?;
    let confirmed = loop {
        let unit = read_unit(editor, ui)?;
        if on_cr.is_some() && unit.is_command(Command::Newline) {
            break true;
        }
        if unit.is_command(Command::Escape) {
            break false;
        }
    };
    ui.status.clear()?;
    Ok(confirmed)
}

/// Report a recoverable error and wait for the escape key. A running macro is
/// stopped first so the acknowledgement comes from the keyboard.
pub fn report(editor: &mut Editor, ui: &mut Ui<'_>, err: EditorError) -> Result<()> {
    warn!(target: "actions.dispatch", error = %err, "error_reported");
    if editor.input.macro_running() {
        editor.stop_macro();
    }
    wait(editor, ui, Some(&err.to_string()), None, "continue")?;
    Ok(())
}

/// Ask for confirmation: newline continues, escape cancels.
pub fn confirm(editor: &mut Editor, ui: &mut Ui<'_>, msg: &str) -> Result<bool> {
    wait(editor, ui, Some(msg), Some("continue"), "cancel")
}

/// The "changes will be lost" confirmation; true straight away when clean.
pub fn confirm_discard(editor: &mut Editor, ui: &mut Ui<'_>) -> Result<bool> {
    if !editor.state.dirty {
        return Ok(true);
    }
    confirm(editor, ui, "Changes will be lost!")
}

/// Read a line of text, starting from `initial`, at most `max` bytes.
/// `None` when cancelled or left empty.
pub fn ask_string(
    editor: &mut Editor,
    ui: &mut Ui<'_>,
    what: &str,
    initial: &str,
    max: usize,
) -> Result<Option<String>> {
    let head = format!("{what} ({} = cancel): ", editor.key_names.escape);
    let mut buf: String = initial.chars().take(max).collect();
    let accepted = loop {
        ui.status.show(&format!("{head}{buf}"))?;
        match read_unit(editor, ui)? {
            KeyUnit::Command(Command::Newline) => break true,
            KeyUnit::Command(Command::Escape) => break false,
            KeyUnit::Command(Command::DelLeft) => {
                buf.pop();
            }
            KeyUnit::Char(b) if buf.len() < max => buf.push(char::from(b)),
            _ => {}
        }
    };
    ui.status.clear()?;
    Ok((accepted && !buf.is_empty()).then_some(buf))
}

/// Show a transient message that needs no acknowledgement.
pub fn notify(ui: &mut Ui<'_>, msg: &str) -> Result<()> {
    ui.status.show(msg)
}
