use crate::{Line, Motion, Position, Viewport, fold_control, motion};
use core_events::{EditorError, EditorResult};
use std::io::{self, Read, Write};
use std::ops::Range;
use tracing::{debug, trace};

/// Capacity bounds of a [`LineStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLimits {
    pub max_lines: usize,
    pub max_line_len: usize,
}

impl StoreLimits {
    pub fn new(max_lines: usize, max_line_len: usize) -> Self {
        Self {
            max_lines: max_lines.max(1),
            max_line_len: max_line_len.max(1),
        }
    }

    /// Width of the line number gutter (digits plus one separator column).
    pub fn gutter_width(max_lines: usize, line_numbers: bool) -> usize {
        if line_numbers {
            max_lines.max(1).to_string().len() + 1
        } else {
            0
        }
    }

    /// Limits for a screen `columns` wide: a line fills the row minus the
    /// gutter, keeping the last column free for the cursor.
    pub fn for_screen(max_lines: usize, columns: usize, line_numbers: bool) -> Self {
        let gutter = Self::gutter_width(max_lines, line_numbers);
        Self::new(max_lines, columns.saturating_sub(gutter + 1))
    }
}

/// Ordered, bounded sequence of lines plus cursor and viewport.
///
/// Invariants after every public call:
/// * `line_count() <= limits.max_lines` and each line is at most `max_line_len` bytes;
/// * `cursor.line < line_count()` (or the cursor is at the origin of an empty store);
/// * `cursor.col <= len(current line)`;
/// * the viewport contains the cursor line.
#[derive(Debug, Clone)]
pub struct LineStore {
    lines: Vec<Line>,
    limits: StoreLimits,
    cursor: Position,
    viewport: Viewport,
    word_motions: bool,
}

impl LineStore {
    pub fn new(limits: StoreLimits, height: usize) -> Self {
        Self {
            lines: vec![Line::new()],
            limits,
            cursor: Position::origin(),
            viewport: Viewport::new(height),
            word_motions: true,
        }
    }

    pub fn limits(&self) -> StoreLimits {
        self.limits
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn current_line(&self) -> Option<&Line> {
        self.lines.get(self.cursor.line)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_scroll_margin(&mut self, margin: usize) {
        self.viewport.margin = margin;
        self.follow_cursor();
    }

    pub fn set_word_motions(&mut self, enabled: bool) {
        self.word_motions = enabled;
    }

    fn follow_cursor(&mut self) {
        self.viewport.follow(self.cursor.line);
    }

    fn clamp_cursor(&mut self) {
        let lines = &self.lines;
        self.cursor
            .clamp_to(lines.len(), |i| lines.get(i).map(Line::len).unwrap_or(0));
        self.follow_cursor();
    }

    /// Place the cursor, clamping it to the store contents.
    pub fn set_cursor(&mut self, pos: Position) {
        self.cursor = pos;
        self.clamp_cursor();
    }

    /// A failed load leaves the store empty; editing starts over from one empty line.
    /// Callers validate the edit before seeding so a rejected edit leaves the store empty.
    fn ensure_line(&mut self) -> EditorResult<()> {
        if self.lines.is_empty() {
            self.lines.try_reserve(1)?;
            self.lines.push(Line::new());
            self.cursor = Position::origin();
        }
        Ok(())
    }

    // ---------------------------------------------------------------------------------------------
    // Editing
    // ---------------------------------------------------------------------------------------------

    /// Insert one byte at the cursor and advance it. Control bytes are stored as `?`.
    pub fn insert_char(&mut self, b: u8) -> EditorResult<()> {
        self.insert_run(b, 1)
    }

    /// Insert `count` copies of `b` at the cursor, all or nothing.
    pub fn insert_run(&mut self, b: u8, count: usize) -> EditorResult<()> {
        let len = self.current_line().map_or(0, Line::len);
        if len + count > self.limits.max_line_len {
            return Err(EditorError::LineTooLong);
        }
        self.ensure_line()?;
        let Position { line, col } = self.cursor;
        let bytes = self.lines[line].bytes_mut();
        bytes.try_reserve(count)?;
        bytes.splice(col..col, std::iter::repeat_n(fold_control(b), count));
        self.cursor.col += count;
        trace!(target: "text.store", op = "insert_run", line, col, count, "edit");
        Ok(())
    }

    /// Text a new line should start with when splitting at the cursor: the
    /// leading spaces of the current line and, when `bullets` is given, a
    /// list bullet followed by a space.
    pub fn continuation_prefix(&self, auto_indent: bool, bullets: Option<&[u8]>) -> Vec<u8> {
        let Some(line) = self.current_line() else {
            return Vec::new();
        };
        let head = &line.as_bytes()[..self.cursor.col.min(line.len())];
        if !auto_indent && bullets.is_none() {
            return Vec::new();
        }
        let indent = head.iter().take_while(|b| **b == b' ').count();
        let mut prefix = head[..indent].to_vec();
        if let Some(bullets) = bullets
            && let [bullet, b' ', ..] = &head[indent..]
            && bullets.contains(bullet)
        {
            prefix.extend_from_slice(&[*bullet, b' ']);
        }
        prefix
    }

    /// Break the current line at the cursor. The new line starts with `prefix`
    /// followed by the text that was right of the cursor.
    pub fn split_line(&mut self, prefix: &[u8]) -> EditorResult<()> {
        if self.lines.len().max(1) >= self.limits.max_lines {
            return Err(EditorError::TooManyLines);
        }
        let tail_len = self
            .current_line()
            .map_or(0, |l| l.len().saturating_sub(self.cursor.col));
        if prefix.len() + tail_len > self.limits.max_line_len {
            return Err(EditorError::LineTooLong);
        }
        self.ensure_line()?;
        let Position { line, col } = self.cursor;
        let mut new_bytes = Vec::new();
        new_bytes.try_reserve(prefix.len() + tail_len)?;
        self.lines.try_reserve(1)?;
        new_bytes.extend(prefix.iter().map(|b| fold_control(*b)));
        new_bytes.extend_from_slice(&self.lines[line].as_bytes()[col..]);
        self.lines[line].bytes_mut().truncate(col);
        self.lines.insert(line + 1, Line { bytes: new_bytes });
        self.cursor = Position::new(line + 1, prefix.len());
        self.follow_cursor();
        trace!(target: "text.store", op = "split_line", line, col, prefix = prefix.len(), "edit");
        Ok(())
    }

    /// Append the next line to the current one. Returns false on the last line.
    pub fn join_with_next(&mut self) -> EditorResult<bool> {
        let line = self.cursor.line;
        if line + 1 >= self.lines.len() {
            return Ok(false);
        }
        let joined = self.lines[line].len() + self.lines[line + 1].len();
        if joined > self.limits.max_line_len {
            return Err(EditorError::LineTooLong);
        }
        let extra = self.lines[line + 1].len();
        self.lines[line].bytes_mut().try_reserve(extra)?;
        let next = self.lines.remove(line + 1);
        self.lines[line].bytes_mut().extend_from_slice(next.as_bytes());
        trace!(target: "text.store", op = "join_with_next", line, "edit");
        Ok(true)
    }

    /// Delete the byte under the cursor, joining with the next line at end of line.
    pub fn delete_char(&mut self) -> EditorResult<bool> {
        let Some(current) = self.current_line() else {
            return Ok(false);
        };
        let Position { line, col } = self.cursor;
        if col < current.len() {
            self.lines[line].bytes_mut().remove(col);
            trace!(target: "text.store", op = "delete_char", line, col, "edit");
            Ok(true)
        } else {
            self.join_with_next()
        }
    }

    /// Delete the byte left of the cursor, joining with the previous line at column 0.
    pub fn delete_left(&mut self) -> EditorResult<bool> {
        if self.lines.is_empty() {
            return Ok(false);
        }
        let Position { line, col } = self.cursor;
        if col > 0 {
            self.lines[line].bytes_mut().remove(col - 1);
            self.cursor.col -= 1;
            trace!(target: "text.store", op = "delete_left", line, col, "edit");
            return Ok(true);
        }
        if line == 0 {
            return Ok(false);
        }
        let prev_len = self.lines[line - 1].len();
        if prev_len + self.lines[line].len() > self.limits.max_line_len {
            return Err(EditorError::LineTooLong);
        }
        self.cursor = Position::new(line - 1, prev_len);
        let joined = self.join_with_next()?;
        self.follow_cursor();
        Ok(joined)
    }

    // ---------------------------------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------------------------------

    pub fn move_cursor(&mut self, m: Motion) -> EditorResult<()> {
        if matches!(m, Motion::WordLeft | Motion::WordRight) && !self.word_motions {
            return Err(EditorError::Unsupported);
        }
        if self.lines.is_empty() {
            return Ok(());
        }
        let page = self.viewport.height;
        let lines = &self.lines;
        let pos = &mut self.cursor;
        match m {
            Motion::Up => motion::up(lines, pos, 1),
            Motion::Down => motion::down(lines, pos, 1),
            Motion::Left => motion::left(lines, pos),
            Motion::Right => motion::right(lines, pos),
            Motion::Begin => motion::line_start(pos),
            Motion::End => motion::line_end(lines, pos),
            Motion::Top => motion::top(pos),
            Motion::Bottom => motion::bottom(lines, pos),
            Motion::PageUp => {
                motion::up(lines, pos, page);
                self.viewport.first_line = self.viewport.first_line.saturating_sub(page);
            }
            Motion::PageDown => {
                motion::down(lines, pos, page);
                let max_first = lines.len().saturating_sub(page);
                self.viewport.first_line = (self.viewport.first_line + page).min(max_first);
            }
            Motion::WordLeft => motion::word_left(lines, pos),
            Motion::WordRight => motion::word_right(lines, pos),
        }
        self.follow_cursor();
        Ok(())
    }

    /// Jump to 1-based line `n`; out of range values clamp to the first/last line.
    pub fn goto_line(&mut self, n: usize) {
        let last = self.lines.len().saturating_sub(1);
        self.cursor = Position::new(n.saturating_sub(1).min(last), 0);
        self.follow_cursor();
    }

    /// Search forward from just after the cursor to the end of the buffer.
    /// On a hit the cursor lands on the first byte of the match.
    pub fn find_next(&mut self, pattern: &[u8]) -> bool {
        if pattern.is_empty() || self.lines.is_empty() {
            return false;
        }
        let Position { line, col } = self.cursor;
        for (idx, l) in self.lines.iter().enumerate().skip(line) {
            let from = if idx == line { col + 1 } else { 0 };
            let hay = l.as_bytes();
            if from > hay.len() {
                continue;
            }
            if let Some(off) = hay[from..]
                .windows(pattern.len())
                .position(|w| w == pattern)
            {
                self.cursor = Position::new(idx, from + off);
                self.follow_cursor();
                debug!(target: "text.store", line = idx, col = from + off, "find_hit");
                return true;
            }
        }
        debug!(target: "text.store", "find_miss");
        false
    }

    // ---------------------------------------------------------------------------------------------
    // Whole-line operations
    // ---------------------------------------------------------------------------------------------

    /// Deep copies of the lines in `range` (clamped to the store).
    pub fn lines_in(&self, range: Range<usize>) -> EditorResult<Vec<Line>> {
        let end = range.end.min(self.lines.len());
        let start = range.start.min(end);
        let mut out = Vec::new();
        out.try_reserve(end - start)?;
        for l in &self.lines[start..end] {
            let mut bytes = Vec::new();
            bytes.try_reserve(l.len())?;
            bytes.extend_from_slice(l.as_bytes());
            out.push(Line { bytes });
        }
        Ok(out)
    }

    /// Insert copies of `src` before line `at`; the cursor moves to the first inserted line.
    pub fn insert_lines(&mut self, at: usize, src: &[Line]) -> EditorResult<()> {
        if src.is_empty() {
            return Ok(());
        }
        if self.lines.len() + src.len() > self.limits.max_lines {
            return Err(EditorError::TooManyLines);
        }
        if src.iter().any(|l| l.len() > self.limits.max_line_len) {
            return Err(EditorError::LineTooLong);
        }
        let copies = self.copy_lines(src)?;
        self.lines.try_reserve(copies.len())?;
        let at = at.min(self.lines.len());
        self.lines.splice(at..at, copies);
        self.cursor = Position::new(at, 0);
        self.follow_cursor();
        trace!(target: "text.store", op = "insert_lines", at, count = src.len(), "edit");
        Ok(())
    }

    fn copy_lines(&self, src: &[Line]) -> EditorResult<Vec<Line>> {
        let mut out = Vec::new();
        out.try_reserve(src.len())?;
        for l in src {
            let mut bytes = Vec::new();
            bytes.try_reserve(l.len())?;
            bytes.extend_from_slice(l.as_bytes());
            out.push(Line { bytes });
        }
        Ok(out)
    }

    /// Remove the lines in `range` (clamped) and hand them back. A store
    /// emptied this way is re-seeded with one empty line.
    pub fn remove_lines(&mut self, range: Range<usize>) -> Vec<Line> {
        let end = range.end.min(self.lines.len());
        let start = range.start.min(end);
        let removed: Vec<Line> = self.lines.drain(start..end).collect();
        if self.lines.is_empty() {
            self.lines.push(Line::new());
        }
        self.cursor = Position::new(start, 0);
        self.clamp_cursor();
        trace!(target: "text.store", op = "remove_lines", start, end, "edit");
        removed
    }

    /// Reset to a single empty line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.lines.push(Line::new());
        self.cursor = Position::origin();
        self.viewport.first_line = 0;
    }

    // ---------------------------------------------------------------------------------------------
    // File contents
    // ---------------------------------------------------------------------------------------------

    /// Replace the contents with text read from `reader`.
    ///
    /// Lines end at LF, CRLF or a lone CR. Tabs expand to `tab_size` stops and
    /// other control bytes become `?`. On any limit violation the store is
    /// left empty and the error is returned. Returns the number of lines read.
    pub fn load<R: Read>(&mut self, mut reader: R, tab_size: usize) -> EditorResult<usize> {
        self.lines = Vec::new();
        self.cursor = Position::origin();
        self.viewport.first_line = 0;

        let mut raw = Vec::new();
        reader
            .read_to_end(&mut raw)
            .map_err(|_| EditorError::CannotOpenFile)?;
        match self.parse_into_lines(&raw, tab_size.max(1)) {
            Ok(lines) => {
                self.lines = lines;
                if self.lines.is_empty() {
                    self.lines.push(Line::new());
                }
                debug!(target: "text.store", lines = self.lines.len(), bytes = raw.len(), "load_ok");
                Ok(self.lines.len())
            }
            Err(e) => {
                debug!(target: "text.store", error = %e, "load_failed");
                Err(e)
            }
        }
    }

    fn parse_into_lines(&self, raw: &[u8], tab_size: usize) -> EditorResult<Vec<Line>> {
        let max_len = self.limits.max_line_len;
        let mut lines: Vec<Line> = Vec::new();
        let mut current: Vec<u8> = Vec::new();
        let mut pending = false;
        let mut iter = raw.iter().copied().peekable();
        while let Some(b) = iter.next() {
            match b {
                b'\r' | b'\n' => {
                    if b == b'\r' && iter.peek() == Some(&b'\n') {
                        iter.next();
                    }
                    push_line(&mut lines, &mut current, self.limits.max_lines)?;
                    pending = false;
                    continue;
                }
                b'\t' => {
                    let spaces = tab_size - current.len() % tab_size;
                    if current.len() + spaces > max_len {
                        return Err(EditorError::LineTooLong);
                    }
                    current.try_reserve(spaces)?;
                    current.extend(std::iter::repeat_n(b' ', spaces));
                }
                other => {
                    if current.len() >= max_len {
                        return Err(EditorError::LineTooLong);
                    }
                    current.try_reserve(1)?;
                    current.push(fold_control(other));
                }
            }
            pending = true;
        }
        if pending {
            push_line(&mut lines, &mut current, self.limits.max_lines)?;
        }
        Ok(lines)
    }

    /// Write every line followed by `\n`.
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        for l in &self.lines {
            w.write_all(l.as_bytes())?;
            w.write_all(b"\n")?;
        }
        w.flush()
    }
}

fn push_line(lines: &mut Vec<Line>, current: &mut Vec<u8>, max_lines: usize) -> EditorResult<()> {
    if lines.len() >= max_lines {
        return Err(EditorError::TooManyLines);
    }
    lines.try_reserve(1)?;
    lines.push(Line {
        bytes: std::mem::take(current),
    });
    Ok(())
}
