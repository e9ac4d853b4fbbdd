//! File IO helpers used by the menu and start-up.
//!
//! Synchronous and minimal. Reading goes through `EditorState::load` (atomic:
//! a failed load leaves an empty store the caller must reset). Writing emits
//! each line followed by `\n`.

use core_events::EditorError;
use core_state::EditorState;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Result of attempting to open a file.
#[derive(Debug, PartialEq, Eq)]
pub enum OpenFileResult {
    Success { lines: usize },
    Error(EditorError),
}

/// Replace the document with the contents of `path`. On failure the document
/// is reset to a new unnamed one.
pub fn open_file(state: &mut EditorState, path: &Path) -> OpenFileResult {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::error!(target: "io", ?e, path = %path.display(), "file_open_error");
            state.reset();
            return OpenFileResult::Error(EditorError::CannotOpenFile);
        }
    };
    match state.load(BufReader::new(file)) {
        Ok(lines) => {
            state.set_file_name(Some(path));
            tracing::info!(target: "io", path = %path.display(), lines, "file_opened");
            OpenFileResult::Success { lines }
        }
        Err(e) => {
            tracing::error!(target: "io", %e, path = %path.display(), "file_load_error");
            state.reset();
            OpenFileResult::Error(e)
        }
    }
}

/// Insert the contents of `path` before the cursor line.
pub fn insert_file(state: &mut EditorState, path: &Path) -> OpenFileResult {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::error!(target: "io", ?e, path = %path.display(), "file_open_error");
            return OpenFileResult::Error(EditorError::CannotOpenFile);
        }
    };
    match state.insert_text(BufReader::new(file)) {
        Ok(lines) => OpenFileResult::Success { lines },
        Err(e) => {
            tracing::error!(target: "io", %e, path = %path.display(), "file_insert_error");
            OpenFileResult::Error(e)
        }
    }
}

/// Result of a write attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum WriteFileResult {
    Success,
    NoFilename,
    Error,
}

/// Write the document to `target`, or to its own file name. A successful
/// write to `target` renames the document and marks it clean.
pub fn write_file(state: &mut EditorState, target: Option<&Path>) -> WriteFileResult {
    let path = if let Some(p) = target {
        p.to_path_buf()
    } else if let Some(existing) = state.file_name.clone() {
        existing
    } else {
        return WriteFileResult::NoFilename;
    };
    let written = File::create(&path).and_then(|f| {
        let mut w = BufWriter::new(f);
        state.lines.write_to(&mut w)?;
        w.flush()
    });
    match written {
        Ok(()) => {
            state.set_file_name(Some(&path));
            state.dirty = false;
            tracing::info!(target: "io", path = %path.display(), lines = state.lines.line_count(), "file_written");
            WriteFileResult::Success
        }
        Err(e) => {
            tracing::error!(target: "io", ?e, path = %path.display(), "file_write_error");
            WriteFileResult::Error
        }
    }
}
