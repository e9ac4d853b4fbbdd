//! Cursor motion helpers.
//!
//! These operate purely on a slice of lines plus a `Position` and are free of
//! viewport concerns; `LineStore::move_cursor` re-derives the viewport after
//! calling them. All helpers expect a non-empty slice and a valid position.

use crate::{Line, Position};

fn line_len(lines: &[Line], idx: usize) -> usize {
    lines.get(idx).map(Line::len).unwrap_or(0)
}

/// Move left one byte, wrapping to the end of the previous line.
pub fn left(lines: &[Line], pos: &mut Position) {
    if pos.col > 0 {
        pos.col -= 1;
    } else if pos.line > 0 {
        pos.line -= 1;
        pos.col = line_len(lines, pos.line);
    }
}

/// Move right one byte, wrapping to the start of the next line.
pub fn right(lines: &[Line], pos: &mut Position) {
    if pos.col < line_len(lines, pos.line) {
        pos.col += 1;
    } else if pos.line + 1 < lines.len() {
        pos.line += 1;
        pos.col = 0;
    }
}

pub fn line_start(pos: &mut Position) {
    pos.col = 0;
}

pub fn line_end(lines: &[Line], pos: &mut Position) {
    pos.col = line_len(lines, pos.line);
}

/// Move `n` lines up, clamping at the first line.
pub fn up(lines: &[Line], pos: &mut Position, n: usize) {
    pos.line = pos.line.saturating_sub(n);
    pos.col = pos.col.min(line_len(lines, pos.line));
}

/// Move `n` lines down, clamping at the last line.
pub fn down(lines: &[Line], pos: &mut Position, n: usize) {
    let last = lines.len().saturating_sub(1);
    pos.line = pos.line.saturating_add(n).min(last);
    pos.col = pos.col.min(line_len(lines, pos.line));
}

pub fn top(pos: &mut Position) {
    *pos = Position::origin();
}

pub fn bottom(lines: &[Line], pos: &mut Position) {
    pos.line = lines.len().saturating_sub(1);
    pos.col = line_len(lines, pos.line);
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

/// Move to the start of the next word. At the end of a line continue on the next one.
pub fn word_right(lines: &[Line], pos: &mut Position) {
    let bytes = lines[pos.line].as_bytes();
    let mut col = pos.col;
    if col >= bytes.len() {
        if pos.line + 1 >= lines.len() {
            return;
        }
        pos.line += 1;
        let next = lines[pos.line].as_bytes();
        pos.col = next.iter().position(|b| is_word(*b)).unwrap_or(0);
        return;
    }
    while col < bytes.len() && is_word(bytes[col]) {
        col += 1;
    }
    while col < bytes.len() && !is_word(bytes[col]) {
        col += 1;
    }
    pos.col = col;
}

/// Move to the start of the previous word. At column 0 continue at the end of the previous line.
pub fn word_left(lines: &[Line], pos: &mut Position) {
    if pos.col == 0 {
        if pos.line > 0 {
            pos.line -= 1;
            pos.col = line_len(lines, pos.line);
        }
        return;
    }
    let bytes = lines[pos.line].as_bytes();
    let mut col = pos.col.min(bytes.len());
    while col > 0 && !is_word(bytes[col - 1]) {
        col -= 1;
    }
    while col > 0 && is_word(bytes[col - 1]) {
        col -= 1;
    }
    pos.col = col;
}
