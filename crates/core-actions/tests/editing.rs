mod common;
use common::*;

use core_events::Options;
use core_events::keys::*;
use core_text::{Position, StoreLimits};
use pretty_assertions::assert_eq;

#[test]
fn typing_and_newline_build_lines() {
    let mut ed = editor("");
    let mut status = RecordingStatus::default();
    let mut keys: Vec<u8> = b"hello".to_vec();
    keys.push(CTL_M);
    keys.extend_from_slice(b"world");
    run_keys(&mut ed, keys, &mut status);
    assert_eq!(texts(&ed), vec!["hello", "world"]);
    assert_eq!(ed.state.lines.cursor(), Position::new(1, 5));
    assert!(ed.state.dirty);
}

#[test]
fn auto_indent_and_auto_list_continue_lines() {
    let mut ed = editor_with(
        "",
        StoreLimits::new(16, 40),
        Options::AUTO_INDENT | Options::AUTO_LIST,
    );
    let mut status = RecordingStatus::default();
    let mut keys = b"  - one".to_vec();
    keys.push(CTL_M);
    keys.extend_from_slice(b"two");
    run_keys(&mut ed, keys, &mut status);
    assert_eq!(texts(&ed), vec!["  - one", "  - two"]);
}

#[test]
fn tab_fills_to_next_stop() {
    let mut ed = editor("ab");
    ed.state.tab_size = 4;
    let mut status = RecordingStatus::default();
    run_keys(&mut ed, [CTL_A, CTL_I, b'x'], &mut status);
    assert_eq!(texts(&ed), vec!["ab  x"]);
}

#[test]
fn delete_keys_join_lines() {
    let mut ed = editor("ab\ncd");
    let mut status = RecordingStatus::default();
    // end of first line, delete right joins; then backspace removes 'b'
    run_keys(&mut ed, [CTL_A, DEL, CTL_H], &mut status);
    assert_eq!(texts(&ed), vec!["acd"]);
    assert_eq!(ed.state.lines.cursor(), Position::new(0, 1));
}

#[test]
fn no_op_delete_keeps_document_clean() {
    let mut ed = editor("ab");
    let mut status = RecordingStatus::default();
    run_keys(&mut ed, [CTL_A, DEL], &mut status);
    assert!(!ed.state.dirty);
}

#[test]
fn line_too_long_is_reported_and_state_kept() {
    let mut ed = editor_with("abc", StoreLimits::new(16, 3), Options::default());
    let mut status = RecordingStatus::default();
    run_keys(&mut ed, [b'x', ESC], &mut status);
    assert_eq!(texts(&ed), vec!["abc"]);
    assert!(status.saw("Line too long (ESC = continue): "));
    assert_eq!(status.current, None);
}

#[test]
fn reported_errors_are_logged() {
    let mut ed = editor_with("abc", StoreLimits::new(16, 3), Options::default());
    let mut status = RecordingStatus::default();
    let logs = with_captured_logs(|| {
        run_keys(&mut ed, [b'x', ESC], &mut status);
    });
    assert!(logs.contains("actions.dispatch"));
    assert!(logs.contains("error_reported"));
    assert!(logs.contains("Line too long"));
}

#[test]
fn too_many_lines_on_newline() {
    let mut ed = editor_with("a\nb", StoreLimits::new(2, 10), Options::default());
    let mut status = RecordingStatus::default();
    run_keys(&mut ed, [CTL_M, ESC], &mut status);
    assert_eq!(texts(&ed), vec!["a", "b"]);
    assert!(status.saw("Too many lines"));
}

#[test]
fn unresolved_chord_shows_question_mark() {
    let mut ed = editor("abc");
    let mut status = RecordingStatus::default();
    run_keys(&mut ed, [CTL_B, b'x', b'z'], &mut status);
    assert_eq!(texts(&ed), vec!["zabc"]);
    assert!(status.shown.iter().any(|m| m == "?"));
}

#[test]
fn word_motion_disabled_reports_unsupported() {
    let mut ed = editor_with("one two", StoreLimits::new(16, 40), Options::LINE_NUMBERS);
    let mut status = RecordingStatus::default();
    run_keys(&mut ed, [CTL_Q, b'r', ESC], &mut status);
    assert!(status.saw("Not supported"));
    assert_eq!(ed.state.lines.cursor(), Position::new(0, 0));

    let mut ed = editor("one two");
    run_keys(&mut ed, [CTL_Q, b'R'], &mut status);
    assert_eq!(ed.state.lines.cursor(), Position::new(0, 4));
}

#[test]
fn block_cut_and_paste_through_keys() {
    let mut ed = editor("1\n2\n3\n4");
    let mut status = RecordingStatus::default();
    // mark lines 2..=3, cut, move to top, paste
    run_keys(
        &mut ed,
        [CTL_X, CTL_B, b's', CTL_X, CTL_B, b'e', CTL_U],
        &mut status,
    );
    assert_eq!(texts(&ed), vec!["1", "4"]);
    assert!(!ed.state.selection.is_active());
    run_keys(&mut ed, [CTL_P, CTL_W], &mut status);
    assert_eq!(texts(&ed), vec!["2", "3", "1", "4"]);
}

#[test]
fn copy_without_block_takes_current_line_and_clear_clip_empties() {
    let mut ed = editor("x\ny");
    let mut status = RecordingStatus::default();
    run_keys(&mut ed, [CTL_X, CTL_O, CTL_W], &mut status);
    assert_eq!(texts(&ed), vec!["x", "y", "y"]);
    run_keys(&mut ed, [CTL_T, CTL_W], &mut status);
    assert_eq!(texts(&ed), vec!["x", "y", "y"]);
    assert!(ed.state.clipboard.is_empty());
}

#[test]
fn delete_block_leaves_clipboard_alone() {
    let mut ed = editor("a\nb\nc");
    let mut status = RecordingStatus::default();
    run_keys(&mut ed, [CTL_O, CTL_X, CTL_G], &mut status);
    assert_eq!(texts(&ed), vec!["a", "c"]);
    assert_eq!(ed.state.clipboard.len(), 1);
}

#[test]
fn find_and_find_next() {
    let mut ed = editor("cat dog\ndog cat\ncat");
    let mut status = RecordingStatus::default();
    let mut keys = vec![CTL_K];
    keys.extend_from_slice(b"cat");
    keys.push(CTL_M);
    run_keys(&mut ed, keys, &mut status);
    assert_eq!(ed.state.lines.cursor(), Position::new(1, 4));
    run_keys(&mut ed, [CTL_L], &mut status);
    assert_eq!(ed.state.lines.cursor(), Position::new(2, 0));
    run_keys(&mut ed, [CTL_L], &mut status);
    assert_eq!(ed.state.lines.cursor(), Position::new(2, 0));
    assert!(status.saw("Not found"));
}

#[test]
fn find_prompt_edits_and_cancels() {
    let mut ed = editor("abc");
    let mut status = RecordingStatus::default();
    run_keys(&mut ed, [CTL_K, b'x', CTL_H, b'b', ESC], &mut status);
    assert!(ed.state.find_pattern.is_empty());
    assert!(status.saw("Find (ESC = cancel): b"));
    assert_eq!(ed.state.lines.cursor(), Position::new(0, 0));
}

#[test]
fn goto_line_is_one_based_and_clamped() {
    let mut ed = editor("a\nb\nc");
    let mut status = RecordingStatus::default();
    run_keys(&mut ed, [CTL_J, b'2', CTL_M], &mut status);
    assert_eq!(ed.state.lines.cursor().line, 1);
    run_keys(&mut ed, [CTL_J, b'9', b'9', CTL_M], &mut status);
    assert_eq!(ed.state.lines.cursor().line, 2);
}
