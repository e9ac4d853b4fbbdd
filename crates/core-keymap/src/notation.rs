//! Textual key notation used by configuration files and log output.
//!
//! `^A`..`^_` are control keys, `^?` is DEL and `^[` is ESC. A binding is one
//! or two keys; the second key may be a control key or any printable
//! character (stored upper-cased).

use crate::KeyBinding;
use core_events::keys;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("empty key notation")]
    Empty,
    #[error("primary key must be a control key: {0:?}")]
    NotControl(String),
    #[error("bad control key in {0:?}")]
    BadControl(String),
    #[error("trailing characters in {0:?}")]
    Trailing(String),
}

pub(crate) fn parse(notation: &str) -> Result<KeyBinding, NotationError> {
    let bytes = notation.trim().as_bytes();
    if bytes.is_empty() {
        return Err(NotationError::Empty);
    }
    let (primary, rest) = match take_key(bytes) {
        Some((Key::Control(c), rest)) => (c, rest),
        Some((Key::Plain(_), _)) => return Err(NotationError::NotControl(notation.to_string())),
        None => return Err(NotationError::BadControl(notation.to_string())),
    };
    if rest.is_empty() {
        return Ok(KeyBinding::single(primary));
    }
    let (secondary, rest) = match take_key(rest) {
        Some((Key::Control(c), rest)) | Some((Key::Plain(c), rest)) => (c, rest),
        None => return Err(NotationError::BadControl(notation.to_string())),
    };
    if !rest.is_empty() {
        return Err(NotationError::Trailing(notation.to_string()));
    }
    Ok(KeyBinding::chord(primary, secondary))
}

enum Key {
    Control(u8),
    Plain(u8),
}

fn take_key(bytes: &[u8]) -> Option<(Key, &[u8])> {
    match bytes {
        [b'^', c, rest @ ..] => control_code(*c).map(|k| (Key::Control(k), rest)),
        [c, rest @ ..] if keys::is_printable(*c) => Some((Key::Plain(*c), rest)),
        _ => None,
    }
}

fn control_code(c: u8) -> Option<u8> {
    match c.to_ascii_uppercase() {
        b'?' => Some(keys::DEL),
        c @ b'A'..=b'_' => Some(c - b'@'),
        _ => None,
    }
}

pub(crate) fn write_key(f: &mut fmt::Formatter<'_>, key: u8) -> fmt::Result {
    match key {
        keys::DEL => f.write_str("^?"),
        1..=31 => write!(f, "^{}", (key + b'@') as char),
        _ => write!(f, "{}", key as char),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::keys::*;

    #[test]
    fn parses_single_and_chords() {
        assert_eq!(parse("^A"), Ok(KeyBinding::single(CTL_A)));
        assert_eq!(parse("^?"), Ok(KeyBinding::single(DEL)));
        assert_eq!(parse("^["), Ok(KeyBinding::single(ESC)));
        assert_eq!(parse("^bs"), Ok(KeyBinding::chord(CTL_B, b'S')));
        assert_eq!(parse("^K^B"), Ok(KeyBinding::chord(CTL_K, CTL_B)));
    }

    #[test]
    fn rejects_bad_notation() {
        assert_eq!(parse("  "), Err(NotationError::Empty));
        assert!(matches!(parse("A"), Err(NotationError::NotControl(_))));
        assert!(matches!(parse("^@"), Err(NotationError::BadControl(_))));
        assert!(matches!(parse("^1"), Err(NotationError::BadControl(_))));
        assert!(matches!(parse("^BSX"), Err(NotationError::Trailing(_))));
        // names and spaced chords are not part of the notation
        assert!(matches!(parse("ESC"), Err(NotationError::NotControl(_))));
        assert!(matches!(parse("DEL"), Err(NotationError::NotControl(_))));
        assert!(matches!(parse("^B S"), Err(NotationError::Trailing(_))));
    }

    #[test]
    fn display_matches_notation() {
        assert_eq!(KeyBinding::single(DEL).to_string(), "^?");
        assert_eq!(KeyBinding::chord(CTL_B, b's').to_string(), "^BS");
        assert_eq!(KeyBinding::chord(CTL_Q, CTL_F).to_string(), "^Q^F");
    }
}
