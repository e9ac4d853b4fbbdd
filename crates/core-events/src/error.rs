//! Recoverable editor errors.
//!
//! None of these end the session: the dispatcher reports the message on the
//! status line and returns to the input loop with the buffer untouched.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("Not enough memory")]
    OutOfMemory,
    #[error("Line too long")]
    LineTooLong,
    #[error("Can't open")]
    CannotOpenFile,
    #[error("Can't write")]
    CannotWriteFile,
    #[error("Too many lines")]
    TooManyLines,
    #[error("Bad symbol")]
    BadMacroSymbol,
    #[error("Bad escape sequence")]
    BadEscapeSequence,
    #[error("?")]
    UnresolvedKeyChord,
    #[error("Not supported")]
    Unsupported,
}

impl From<std::collections::TryReserveError> for EditorError {
    fn from(_: std::collections::TryReserveError) -> Self {
        EditorError::OutOfMemory
    }
}

pub type EditorResult<T> = Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_status_line_text() {
        assert_eq!(EditorError::OutOfMemory.to_string(), "Not enough memory");
        assert_eq!(EditorError::CannotOpenFile.to_string(), "Can't open");
        assert_eq!(
            EditorError::BadEscapeSequence.to_string(),
            "Bad escape sequence"
        );
        assert_eq!(EditorError::UnresolvedKeyChord.to_string(), "?");
    }

    #[test]
    fn reserve_failure_maps_to_out_of_memory() {
        let mut v: Vec<u8> = Vec::new();
        let err = v.try_reserve(usize::MAX).unwrap_err();
        assert_eq!(EditorError::from(err), EditorError::OutOfMemory);
    }
}
