mod common;
use common::*;

use core_events::keys::*;
use pretty_assertions::assert_eq;

fn with_name(prefix: &[u8], name: &str) -> Vec<u8> {
    let mut keys = prefix.to_vec();
    keys.extend_from_slice(name.as_bytes());
    keys.push(CTL_M);
    keys
}

#[test]
fn escape_opens_menu_and_escape_leaves_it() {
    let mut ed = editor("abc");
    let mut status = RecordingStatus::default();
    let results = run_keys(&mut ed, [ESC, b'?', ESC], &mut status);
    assert!(status.saw("New Open Save save As Insert eXit - Option (ESC = back): "));
    assert_eq!(status.current, None);
    assert!(results.iter().all(|r| !r.quit));
    assert_eq!(texts(&ed), vec!["abc"]);
}

#[test]
fn save_as_writes_file_and_clears_dirty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let mut ed = editor("");
    let mut status = RecordingStatus::default();
    let mut keys = b"hi".to_vec();
    keys.extend(with_name(&[ESC, b'a'], path.to_str().unwrap()));
    run_keys(&mut ed, keys, &mut status);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "hi\n");
    assert!(!ed.state.dirty);
    assert_eq!(ed.state.file_name.as_deref(), Some(path.as_path()));
    assert!(status.saw("Filename (ESC = cancel): "));
}

#[test]
fn save_reuses_the_document_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.txt");
    std::fs::write(&path, "old\n").unwrap();
    let mut ed = editor("");
    let mut status = RecordingStatus::default();
    run_keys(&mut ed, with_name(&[ESC, b'o'], path.to_str().unwrap()), &mut status);
    run_keys(&mut ed, [CTL_A, b'!', ESC, b's'], &mut status);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "old!\n");
    assert!(!ed.state.dirty);
}

#[test]
fn save_failure_reports_cannot_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("out.txt");
    let mut ed = editor("x");
    let mut status = RecordingStatus::default();
    let mut keys = with_name(&[ESC, b'A'], path.to_str().unwrap());
    keys.push(ESC);
    run_keys(&mut ed, keys, &mut status);
    assert!(status.saw("Can't write (ESC = continue): "));
    assert!(ed.state.file_name.is_none());
}

#[test]
fn exit_on_dirty_document_confirms() {
    let mut ed = editor("");
    let mut status = RecordingStatus::default();
    let results = run_keys(&mut ed, [b'x', ESC, b'x', CTL_M], &mut status);
    assert!(status.saw("Changes will be lost! (ENTER = continue, ESC = cancel): "));
    assert!(results.last().unwrap().quit);
}

#[test]
fn cancelled_exit_returns_to_menu() {
    let mut ed = editor("");
    let mut status = RecordingStatus::default();
    let results = run_keys(&mut ed, [b'x', ESC, b'x', ESC, ESC], &mut status);
    assert!(results.iter().all(|r| !r.quit));
    assert_eq!(texts(&ed), vec!["x"]);
    assert!(ed.state.dirty);
}

#[test]
fn exit_on_clean_document_quits_at_once() {
    let mut ed = editor("saved");
    let mut status = RecordingStatus::default();
    let results = run_keys(&mut ed, [ESC, b'X'], &mut status);
    assert!(results.last().unwrap().quit);
    assert!(!status.saw("Changes will be lost!"));
}

#[test]
fn open_loads_file_and_replaces_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.txt");
    std::fs::write(&path, "one\ntwo\n").unwrap();
    let mut ed = editor("scratch");
    let mut status = RecordingStatus::default();
    let results = run_keys(&mut ed, with_name(&[ESC, b'o'], path.to_str().unwrap()), &mut status);
    assert_eq!(texts(&ed), vec!["one", "two"]);
    assert!(results.last().unwrap().buffer_replaced);
    assert!(!ed.state.dirty);
    assert_eq!(ed.state.file_label(), path.display().to_string());
}

#[test]
fn opening_missing_file_reports_and_starts_new_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.txt");
    let mut ed = editor("scratch");
    let mut status = RecordingStatus::default();
    let mut keys = with_name(&[ESC, b'o'], path.to_str().unwrap());
    keys.push(ESC);
    run_keys(&mut ed, keys, &mut status);
    assert!(status.saw("Can't open (ESC = continue): "));
    assert_eq!(texts(&ed), vec![""]);
    assert!(ed.state.file_name.is_none());
}

#[test]
fn new_on_dirty_document_needs_confirmation() {
    let mut ed = editor("");
    let mut status = RecordingStatus::default();
    run_keys(&mut ed, [b'q', ESC, b'n', ESC, ESC], &mut status);
    assert_eq!(texts(&ed), vec!["q"]);
    run_keys(&mut ed, [ESC, b'n', CTL_M], &mut status);
    assert_eq!(texts(&ed), vec![""]);
    assert!(!ed.state.dirty);
}

#[test]
fn insert_puts_file_before_cursor_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("part.txt");
    std::fs::write(&path, "mid\n").unwrap();
    let mut ed = editor("top\nbottom");
    let mut status = RecordingStatus::default();
    let mut keys = vec![CTL_X];
    keys.extend(with_name(&[ESC, b'i'], path.to_str().unwrap()));
    run_keys(&mut ed, keys, &mut status);
    assert_eq!(texts(&ed), vec!["top", "mid", "bottom"]);
    assert!(ed.state.dirty);
}
