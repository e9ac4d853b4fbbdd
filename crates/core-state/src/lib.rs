//! Editor state: line store, block selection, clipboard and document metadata.
//!
//! `EditorState` is the single mutable context the dispatcher works on. Line
//! edits go through [`EditorState::edit`] so that any change in line count
//! drops the block selection (its indices would otherwise dangle) and marks
//! the document dirty. Clipboard operations act on the active block or, when
//! no block is active, on the cursor line.

use core_events::{EditorError, EditorResult, Options};
use core_text::{Line, LineStore};
use std::io::Read;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::debug;

mod clipboard;
mod selection;

pub use clipboard::Clipboard;
pub use selection::{BlockSelection, BlockState};

/// Name shown for a document that has never been saved.
pub const UNNAMED: &str = "-";

/// Top-level editor state container.
#[derive(Debug, Clone)]
pub struct EditorState {
    pub lines: LineStore,
    pub selection: BlockSelection,
    pub clipboard: Clipboard,
    pub options: Options,
    pub tab_size: usize,
    pub list_bullets: Vec<u8>,
    pub file_name: Option<PathBuf>,
    pub dirty: bool,
    /// Last pattern entered at the find prompt.
    pub find_pattern: Vec<u8>,
}

impl EditorState {
    pub fn new(lines: LineStore) -> Self {
        Self {
            lines,
            selection: BlockSelection::default(),
            clipboard: Clipboard::default(),
            options: Options::default(),
            tab_size: 8,
            list_bullets: b"-*>".to_vec(),
            file_name: None,
            dirty: false,
            find_pattern: Vec::new(),
        }
    }

    /// File name as displayed and as substituted by the `{filename}` macro symbol.
    pub fn file_label(&self) -> String {
        self.file_name
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| UNNAMED.to_string())
    }

    pub fn set_file_name(&mut self, path: Option<&Path>) {
        self.file_name = path.map(Path::to_path_buf);
    }

    /// Bullets eligible for list continuation, when auto-list is on.
    pub fn bullets(&self) -> Option<&[u8]> {
        self.options
            .contains(Options::AUTO_LIST)
            .then_some(self.list_bullets.as_slice())
    }

    /// Prefix for a new line split off the cursor line.
    pub fn continuation_prefix(&self) -> Vec<u8> {
        self.lines.continuation_prefix(
            self.options.contains(Options::AUTO_INDENT),
            self.bullets(),
        )
    }

    /// Apply a line edit. On success the document is dirty and, if the line
    /// count changed, the block selection is dropped. Errors leave everything untouched.
    pub fn edit<R>(
        &mut self,
        f: impl FnOnce(&mut LineStore) -> EditorResult<R>,
    ) -> EditorResult<R> {
        let before = self.lines.line_count();
        let out = f(&mut self.lines)?;
        self.dirty = true;
        if self.lines.line_count() != before {
            self.selection.unset();
        }
        Ok(out)
    }

    /// Like [`EditorState::edit`] for operations reporting whether they changed
    /// anything; a `false` outcome leaves the dirty flag alone.
    pub fn edit_if(
        &mut self,
        f: impl FnOnce(&mut LineStore) -> EditorResult<bool>,
    ) -> EditorResult<bool> {
        let before = self.lines.line_count();
        let changed = f(&mut self.lines)?;
        if changed {
            self.dirty = true;
        }
        if self.lines.line_count() != before {
            self.selection.unset();
        }
        Ok(changed)
    }

    /// Lines targeted by clipboard commands: the active block, else the cursor line.
    pub fn target_range(&self) -> Range<usize> {
        match self.selection.range() {
            Some((s, e)) => s..(e + 1).min(self.lines.line_count()),
            None => {
                let l = self.lines.cursor().line;
                l..(l + 1).min(self.lines.line_count())
            }
        }
    }

    pub fn copy(&mut self) -> EditorResult<()> {
        let range = self.target_range();
        if range.is_empty() {
            self.selection.unset();
            return Ok(());
        }
        let copied = self.lines.lines_in(range.clone())?;
        debug!(target: "state.clipboard", start = range.start, end = range.end, "copy");
        self.clipboard.set(copied);
        self.selection.unset();
        Ok(())
    }

    pub fn cut(&mut self) -> EditorResult<()> {
        let range = self.target_range();
        if range.is_empty() {
            self.selection.unset();
            return Ok(());
        }
        let removed = self.lines.remove_lines(range.clone());
        debug!(target: "state.clipboard", start = range.start, end = range.end, "cut");
        self.clipboard.set(removed);
        self.selection.unset();
        self.dirty = true;
        Ok(())
    }

    /// Remove the target lines without touching the clipboard.
    pub fn delete_lines(&mut self) {
        let range = self.target_range();
        if range.is_empty() {
            self.selection.unset();
            return;
        }
        self.lines.remove_lines(range);
        self.selection.unset();
        self.dirty = true;
    }

    /// Insert the clipboard before the cursor line.
    pub fn paste(&mut self) -> EditorResult<()> {
        let Some(clip) = self.clipboard.lines() else {
            return Ok(());
        };
        let at = self.lines.cursor().line;
        let clip: &[Line] = clip;
        self.lines.insert_lines(at, clip)?;
        self.selection.unset();
        self.dirty = true;
        Ok(())
    }

    pub fn clear_clipboard(&mut self) {
        self.clipboard.clear();
    }

    /// Replace the document with text from `reader`. On failure the store is
    /// left empty and the error returned.
    pub fn load<R: Read>(&mut self, reader: R) -> EditorResult<usize> {
        self.selection.unset();
        self.dirty = false;
        self.lines.load(reader, self.tab_size)
    }

    /// Start a fresh, unnamed document.
    pub fn reset(&mut self) {
        self.lines.clear();
        self.selection.unset();
        self.file_name = None;
        self.dirty = false;
    }

    /// Insert the contents of `reader` before the cursor line.
    pub fn insert_text<R: Read>(&mut self, reader: R) -> EditorResult<usize> {
        let mut scratch = LineStore::new(
            core_text::StoreLimits::new(
                self.lines.limits().max_lines,
                self.lines.limits().max_line_len,
            ),
            1,
        );
        let n = scratch.load(reader, self.tab_size)?;
        if self.lines.line_count() + n > self.lines.limits().max_lines {
            return Err(EditorError::TooManyLines);
        }
        let at = self.lines.cursor().line;
        self.edit(|store| store.insert_lines(at, scratch.lines()))?;
        Ok(n)
    }
}
