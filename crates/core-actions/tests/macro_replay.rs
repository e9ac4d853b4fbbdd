mod common;
use common::*;

use core_events::Options;
use core_events::keys::*;
use core_text::StoreLimits;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

fn write_macro(dir: &Path, name: &str, script: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, script).unwrap();
    path
}

/// Keys that open the macro prompt, type `name` and accept it.
fn macro_keys(name: &str) -> Vec<u8> {
    let mut keys = vec![CTL_Y];
    keys.extend_from_slice(name.as_bytes());
    keys.push(CTL_M);
    keys
}

#[test]
fn replay_matches_typing_the_same_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_macro(
        dir.path(),
        "greet.m",
        "hello{newline}\n  world{left:2}X{# move back and insert}\n",
    );

    let mut typed = editor("");
    let mut status = RecordingStatus::default();
    let mut keys = b"hello".to_vec();
    keys.push(CTL_M);
    keys.extend_from_slice(b"  world");
    keys.extend_from_slice(&[CTL_S, CTL_S, b'X']);
    run_keys(&mut typed, keys, &mut status);

    let mut replayed = editor("");
    // the extension is optional at the prompt
    let name = path.with_extension("");
    run_patient(
        &mut replayed,
        macro_keys(name.to_str().unwrap()),
        &mut status,
    );

    assert_eq!(texts(&replayed), texts(&typed));
    assert_eq!(texts(&replayed), vec!["hello", "  worXld"]);
    assert_eq!(replayed.state.lines.cursor(), typed.state.lines.cursor());
    assert!(!replayed.input.macro_running());
}

/// Play `script` through the macro prompt and type `keys` into a second
/// editor; both must end with the same document, cursor and clipboard.
fn assert_replay_matches(script: &str, keys: Vec<u8>) -> Vec<String> {
    let dir = tempfile::tempdir().unwrap();
    let path = write_macro(dir.path(), "steps.m", script);

    let mut typed = editor("");
    let mut status = RecordingStatus::default();
    run_keys(&mut typed, keys, &mut status);

    let mut replayed = editor("");
    run_patient(&mut replayed, macro_keys(path.to_str().unwrap()), &mut status);

    assert!(status.shown.iter().all(|m| !m.contains("ESC = continue")));
    assert_eq!(texts(&replayed), texts(&typed));
    assert_eq!(replayed.state.lines.cursor(), typed.state.lines.cursor());
    assert_eq!(
        replayed.state.clipboard.is_empty(),
        typed.state.clipboard.is_empty()
    );
    texts(&replayed)
}

#[test]
fn repeated_indent_matches_repeated_tab() {
    let mut keys = b"abc".to_vec();
    keys.extend_from_slice(&[CTL_I, CTL_I, b'x']);
    let lines = assert_replay_matches("abc{indent:2}x", keys);
    assert_eq!(lines, vec![format!("abc{}x", " ".repeat(13))]);
}

#[test]
fn every_repeatable_symbol_matches_typing() {
    let steps: &[(&str, &[u8])] = &[
        ("ab", b"ab"),
        ("{indent:2}", &[CTL_I, CTL_I]),
        ("c{newline:3}line", &[b'c', CTL_M, CTL_M, CTL_M, b'l', b'i', b'n', b'e']),
        ("{up:2}", &[CTL_E, CTL_E]),
        ("{down:2}", &[CTL_X, CTL_X]),
        ("{left:2}", &[CTL_S, CTL_S]),
        ("{right:2}", &[CTL_D, CTL_D]),
        ("{begin:2}", &[CTL_V, CTL_V]),
        ("{end:2}", &[CTL_A, CTL_A]),
        ("{delleft:2}", &[CTL_H, CTL_H]),
        ("{top:2}", &[CTL_P, CTL_P]),
        ("{delright:2}", &[DEL, DEL]),
        ("{blockstart:2}", &[CTL_B, b'S', CTL_B, b'S']),
        ("{down:2}", &[CTL_X, CTL_X]),
        ("{blockend:2}", &[CTL_B, b'E', CTL_B, b'E']),
        ("{copy:2}", &[CTL_O, CTL_O]),
        ("{bottom:2}", &[CTL_F, CTL_F]),
        ("{paste:2}", &[CTL_W, CTL_W]),
        ("{cut:2}", &[CTL_U, CTL_U]),
        ("{delete:2}", &[CTL_G, CTL_G]),
        ("{paste:2}", &[CTL_W, CTL_W]),
        ("{clearclip:2}", &[CTL_T, CTL_T]),
        ("z", b"z"),
    ];
    let mut script = String::new();
    let mut keys = Vec::new();
    for (symbols, typed) in steps {
        script.push_str(symbols);
        keys.extend_from_slice(typed);
    }
    let lines = assert_replay_matches(&script, keys);
    assert!(lines.len() > 1);
}

#[test]
fn auto_indent_is_off_while_playing_and_restored_after() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_macro(dir.path(), "indent.m", "  a{newline}b");
    let mut ed = editor_with(
        "",
        StoreLimits::new(16, 40),
        Options::default() | Options::AUTO_INDENT,
    );
    let mut status = RecordingStatus::default();
    run_patient(&mut ed, macro_keys(path.to_str().unwrap()), &mut status);
    assert_eq!(texts(&ed), vec!["  a", "b"]);
    assert!(ed.state.options.contains(Options::AUTO_INDENT));

    run_keys(&mut ed, [CTL_P, CTL_A, CTL_M, b'c'], &mut status);
    assert_eq!(texts(&ed), vec!["  a", "  c", "b"]);
}

#[test]
fn filename_symbol_types_the_document_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_macro(dir.path(), "name.m", "[{filename}]");
    let mut ed = editor("");
    ed.state.set_file_name(Some(Path::new("notes.txt")));
    let mut status = RecordingStatus::default();
    run_patient(&mut ed, macro_keys(path.to_str().unwrap()), &mut status);
    assert_eq!(texts(&ed), vec!["[notes.txt]"]);
}

#[test]
fn bad_symbol_stops_the_macro_and_is_acknowledged() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_macro(dir.path(), "bad.m", "ab{bogus}cd");
    let mut ed = editor("");
    let mut status = RecordingStatus::default();
    let mut keys = macro_keys(path.to_str().unwrap());
    keys.push(ESC);
    run_patient(&mut ed, keys, &mut status);
    assert_eq!(texts(&ed), vec!["ab"]);
    assert!(status.saw("Bad symbol (ESC = continue): "));
    assert!(!ed.input.macro_running());
}

#[test]
fn missing_macro_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent");
    let mut ed = editor("x");
    let mut status = RecordingStatus::default();
    let mut keys = macro_keys(path.to_str().unwrap());
    keys.push(ESC);
    run_keys(&mut ed, keys, &mut status);
    assert!(status.saw("Can't open"));
    assert_eq!(texts(&ed), vec!["x"]);
}

#[test]
fn escape_typed_during_playback_cancels_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_macro(dir.path(), "long.m", "abc{autoindent:1}def");
    let mut ed = editor_with(
        "",
        StoreLimits::new(16, 40),
        Options::default() | Options::AUTO_LIST,
    );
    let mut status = RecordingStatus::default();
    let mut keys = macro_keys(path.to_str().unwrap());
    keys.push(ESC);
    run_keys(&mut ed, keys, &mut status);
    assert_eq!(texts(&ed), vec![""]);
    assert!(!ed.input.macro_running());
    assert!(ed.state.options.contains(Options::AUTO_LIST));
    assert!(!ed.state.options.contains(Options::AUTO_INDENT));
}
