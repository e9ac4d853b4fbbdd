//! Macro playback: turns a script file into synthetic input units.
//!
//! Two modes:
//! * raw: every byte is forwarded as typed (`\n` becomes the newline
//!   command, tab becomes a space);
//! * symbolic: newlines are ignored and the script may contain escapes
//!   (`\x`), comments (`{# ...}`) and command symbols with an optional repeat
//!   count (`{up}`, `{delleft:3}`).
//!
//! Playback is pumped one script unit at a time by the input pipeline; each
//! unit expands into zero or more pushes onto the [`ForcedQueue`]. While a
//! macro runs, auto-indent and auto-list are forced off so the script text
//! is entered literally; the saved values are restored on stop.

use crate::ForcedQueue;
use core_events::{Command, EditorError, EditorResult, FORCED_MAX, KeyUnit, Options};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default file type appended to macro names given without one.
pub const MACRO_EXTENSION: &str = "m";

/// Longest accepted symbol name.
pub const MAC_SYM_MAX: usize = 10;

const MAC_START: u8 = b'{';
const MAC_END: u8 = b'}';
const MAC_SEP: u8 = b':';
const MAC_ESCAPE: u8 = b'\\';

/// Options a running macro suppresses.
const SUPPRESSED: Options = Options::AUTO_INDENT.union(Options::AUTO_LIST);

/// `name` with the `.m` extension appended when it has none.
pub fn with_default_extension(name: &str) -> PathBuf {
    let path = PathBuf::from(name);
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(MACRO_EXTENSION)
    }
}

enum ScriptByte {
    Newline,
    Byte(u8),
}

struct Session {
    reader: Box<dyn BufRead>,
    raw: bool,
    saved: Options,
    name: String,
}

impl Session {
    fn read_byte(&mut self) -> Option<u8> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return None,
                Ok(_) => return Some(buf[0]),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!(target: "input.macro", error = %e, "read_error");
                    return None;
                }
            }
        }
    }

    /// Next script byte after mode translation; `None` at end of script.
    fn next(&mut self) -> Option<ScriptByte> {
        let b = loop {
            let b = self.read_byte()?;
            match b {
                b'\r' => continue,
                b'\n' if !self.raw => continue,
                _ => break b,
            }
        };
        Some(match b {
            b'\n' => ScriptByte::Newline,
            b'\t' if self.raw => ScriptByte::Byte(b' '),
            b if b < 32 || b >= 127 => ScriptByte::Byte(b'?'),
            b => ScriptByte::Byte(b),
        })
    }

    /// Next byte in symbolic mode, where newlines never surface.
    fn next_byte(&mut self) -> Option<u8> {
        match self.next()? {
            ScriptByte::Byte(b) => Some(b),
            ScriptByte::Newline => Some(b'?'),
        }
    }
}

fn is_symbol_char(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'#' || b == b'+' || b == b'-'
}

#[derive(Default)]
pub struct MacroPlayer {
    session: Option<Session>,
}

impl std::fmt::Debug for MacroPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MacroPlayer")
            .field("running", &self.is_running())
            .field("macro", &self.session.as_ref().map(|s| s.name.as_str()))
            .finish()
    }
}

impl MacroPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// Open `path` and start playing it.
    pub fn start(
        &mut self,
        path: &Path,
        raw: bool,
        queue: &mut ForcedQueue,
        options: &mut Options,
    ) -> EditorResult<()> {
        let file = File::open(path).map_err(|e| {
            warn!(target: "input.macro", path = %path.display(), error = %e, "open_failed");
            EditorError::CannotOpenFile
        })?;
        self.start_reader(
            BufReader::new(file),
            &path.display().to_string(),
            raw,
            queue,
            options,
        );
        Ok(())
    }

    /// Start playing an already opened script.
    pub fn start_reader(
        &mut self,
        reader: impl BufRead + 'static,
        name: &str,
        raw: bool,
        queue: &mut ForcedQueue,
        options: &mut Options,
    ) {
        if self.is_running() {
            self.stop(queue, options);
        }
        let saved = *options & SUPPRESSED;
        options.remove(SUPPRESSED);
        info!(target: "input.macro", name, raw, "start");
        self.session = Some(Session {
            reader: Box::new(reader),
            raw,
            saved,
            name: name.to_string(),
        });
    }

    /// Stop playback, restore the suppressed options and push a `Null` end marker.
    pub fn stop(&mut self, queue: &mut ForcedQueue, options: &mut Options) {
        let Some(session) = self.session.take() else {
            return;
        };
        options.remove(SUPPRESSED);
        options.insert(session.saved);
        queue.push(KeyUnit::Null);
        info!(target: "input.macro", name = session.name.as_str(), "stop");
    }

    /// Process one script unit. A fatal script error stops the macro and is returned.
    pub fn pump(
        &mut self,
        queue: &mut ForcedQueue,
        options: &mut Options,
        file_name: &str,
    ) -> EditorResult<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let Some(first) = session.next() else {
            self.stop(queue, options);
            return Ok(());
        };
        let result = match first {
            ScriptByte::Newline => {
                queue.push(Command::Newline);
                Ok(())
            }
            ScriptByte::Byte(b) if session.raw => {
                queue.push(KeyUnit::Char(b));
                Ok(())
            }
            ScriptByte::Byte(b) => expand(session, b, queue, options, file_name),
        };
        if let Err(e) = result {
            warn!(target: "input.macro", error = %e, "macro_error");
            self.stop(queue, options);
            return Err(e);
        }
        Ok(())
    }
}

fn expand(
    session: &mut Session,
    first: u8,
    queue: &mut ForcedQueue,
    options: &mut Options,
    file_name: &str,
) -> EditorResult<()> {
    match first {
        MAC_ESCAPE => {
            let escaped = session
                .next_byte()
                .ok_or(EditorError::BadEscapeSequence)?;
            queue.push(KeyUnit::Char(escaped));
            Ok(())
        }
        MAC_START => expand_symbol(session, queue, options, file_name),
        b => {
            queue.push(KeyUnit::Char(b));
            Ok(())
        }
    }
}

fn expand_symbol(
    session: &mut Session,
    queue: &mut ForcedQueue,
    options: &mut Options,
    file_name: &str,
) -> EditorResult<()> {
    let bad = EditorError::BadMacroSymbol;
    let mut name = String::with_capacity(MAC_SYM_MAX);
    let mut ch = session.next_byte().ok_or(bad)?;
    while is_symbol_char(ch) && name.len() < MAC_SYM_MAX {
        name.push(ch.to_ascii_lowercase() as char);
        ch = session.next_byte().ok_or(bad)?;
    }
    if name.is_empty() {
        return Err(bad);
    }

    let count = if ch == MAC_SEP {
        let mut n = 0usize;
        ch = session.next_byte().ok_or(bad)?;
        while ch.is_ascii_digit() {
            n = (n * 10 + usize::from(ch - b'0')).min(FORCED_MAX + 1);
            ch = session.next_byte().ok_or(bad)?;
        }
        if n > FORCED_MAX {
            return Err(bad);
        }
        n
    } else {
        1
    };

    if ch == b' ' && name == "#" {
        while session.next_byte().ok_or(bad)? != MAC_END {}
        queue.push(KeyUnit::Null);
        return Ok(());
    }
    if ch != MAC_END {
        return Err(bad);
    }

    if let Some(cmd) = Command::from_macro_symbol(&name) {
        if count == 0 {
            return Err(bad);
        }
        let pushed = (0..count).take_while(|_| queue.push(cmd)).count();
        debug!(target: "input.macro", symbol = name.as_str(), count, pushed, "symbol");
        return Ok(());
    }
    match name.as_str() {
        "filename" => {
            if count == 0 {
                return Err(bad);
            }
            for _ in 0..count {
                queue.push_str(file_name);
            }
        }
        "autoindent" => {
            options.set(Options::AUTO_INDENT, count != 0);
            queue.push(KeyUnit::Null);
        }
        "autolist" => {
            options.set(Options::AUTO_LIST, count != 0);
            queue.push(KeyUnit::Null);
        }
        _ => return Err(bad),
    }
    debug!(target: "input.macro", symbol = name.as_str(), count, "symbol");
    Ok(())
}
