//! Cursor movement.

use super::DispatchResult;
use crate::Editor;
use core_events::{Command, EditorResult, Options};
use core_text::Motion;

fn motion_of(cmd: Command) -> Option<Motion> {
    Some(match cmd {
        Command::Up => Motion::Up,
        Command::Down => Motion::Down,
        Command::Left => Motion::Left,
        Command::Right => Motion::Right,
        Command::Begin => Motion::Begin,
        Command::End => Motion::End,
        Command::Top => Motion::Top,
        Command::Bottom => Motion::Bottom,
        Command::PageUp => Motion::PageUp,
        Command::PageDown => Motion::PageDown,
        Command::WordLeft => Motion::WordLeft,
        Command::WordRight => Motion::WordRight,
        _ => return None,
    })
}

pub(crate) fn handle_motion(cmd: Command, editor: &mut Editor) -> EditorResult<DispatchResult> {
    let Some(m) = motion_of(cmd) else {
        return Ok(DispatchResult::clean());
    };
    let state = &mut editor.state;
    state
        .lines
        .set_word_motions(state.options.contains(Options::WORD_MOTIONS));
    let before = state.lines.cursor();
    state.lines.move_cursor(m)?;
    let after = state.lines.cursor();
    tracing::trace!(target: "actions.dispatch", op = ?m, line = before.line, col = before.col, to_line = after.line, to_col = after.col, "motion");
    Ok(if before == after {
        DispatchResult::clean()
    } else {
        DispatchResult::dirty()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_motion_command_maps() {
        let motions = Command::ALL.iter().filter_map(|c| motion_of(*c)).count();
        assert_eq!(motions, 12);
        assert_eq!(motion_of(Command::Paste), None);
    }
}
