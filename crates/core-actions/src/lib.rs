//! Command dispatch for the editor.
//!
//! [`Editor`] is the single explicit context: document state plus the input
//! pipeline. Terminal collaborators are passed per call through [`Ui`] so the
//! same code runs against crossterm in the binary and scripted keys in tests.
//!
//! One call to [`Editor::step`] pulls one unit from the pipeline, dispatches
//! it and reports any recoverable [`EditorError`] on the status line. State
//! invariants hold between steps, which is when the renderer runs.

use anyhow::Result;
use core_events::{EditorError, KeyUnit};
use core_input::{InputError, InputPipeline, KeySource, with_default_extension};
use core_state::EditorState;
use tracing::warn;

pub mod dispatcher;
pub mod io_ops;
pub mod prompt;

pub use dispatcher::{DispatchResult, dispatch};

/// Message area collaborator (the bottom row of the screen).
pub trait StatusLine {
    /// Replace the message area content.
    fn show(&mut self, msg: &str) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

/// Terminal collaborators for one dispatch.
pub struct Ui<'a> {
    pub keys: &'a mut dyn KeySource,
    pub status: &'a mut dyn StatusLine,
}

impl<'a> Ui<'a> {
    pub fn new(keys: &'a mut dyn KeySource, status: &'a mut dyn StatusLine) -> Self {
        Self { keys, status }
    }
}

/// Display names of the confirm and cancel keys used in prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyNames {
    pub newline: String,
    pub escape: String,
}

impl Default for KeyNames {
    fn default() -> Self {
        Self {
            newline: "ENTER".to_string(),
            escape: "ESC".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct Editor {
    pub state: EditorState,
    pub input: InputPipeline,
    pub key_names: KeyNames,
}

impl Editor {
    pub fn new(state: EditorState, input: InputPipeline) -> Self {
        Self {
            state,
            input,
            key_names: KeyNames::default(),
        }
    }

    pub fn with_key_names(mut self, key_names: KeyNames) -> Self {
        self.key_names = key_names;
        self
    }

    /// Next unit from forced input, the running macro or the keyboard.
    pub fn next_unit(&mut self, keys: &mut dyn KeySource) -> Result<KeyUnit, InputError> {
        let label = self.state.file_label();
        self.input.next_unit(keys, &mut self.state.options, &label)
    }

    /// Start a symbolic macro; `name` gets the `.m` extension when it has none.
    pub fn start_macro(&mut self, name: &str) -> Result<(), EditorError> {
        let path = with_default_extension(name);
        self.input.start_macro(&path, false, &mut self.state.options)
    }

    pub fn stop_macro(&mut self) {
        self.input.stop_macro(&mut self.state.options);
    }

    /// Pull and dispatch one unit. Only terminal failures are returned as errors.
    pub fn step(&mut self, ui: &mut Ui<'_>) -> Result<DispatchResult> {
        let unit = match self.next_unit(ui.keys) {
            Ok(unit) => unit,
            Err(InputError::Editor(e)) => {
                prompt::report(self, ui, e)?;
                return Ok(DispatchResult::dirty());
            }
            Err(InputError::Io(e)) => return Err(e.into()),
        };
        dispatch(unit, self, ui)
    }
}

/// Log and swallow an error from a prompt read that the user cannot act on.
pub(crate) fn log_input_error(e: &EditorError) {
    warn!(target: "actions.dispatch", error = %e, "prompt_input_error");
}
