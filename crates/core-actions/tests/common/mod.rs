#![allow(dead_code)] // Shared across several integration tests; each test binary uses a subset of helpers.

use core_actions::{DispatchResult, Editor, StatusLine, Ui};
use core_events::Options;
use core_input::{InputPipeline, KeySource, ScriptedKeys};
use core_keymap::BindingTableBuilder;
use core_state::EditorState;
use core_text::{LineStore, StoreLimits};
use std::io;

/// Status line double recording everything shown.
#[derive(Debug, Default)]
pub struct RecordingStatus {
    pub shown: Vec<String>,
    pub current: Option<String>,
}

impl StatusLine for RecordingStatus {
    fn show(&mut self, msg: &str) -> anyhow::Result<()> {
        self.shown.push(msg.to_string());
        self.current = Some(msg.to_string());
        Ok(())
    }

    fn clear(&mut self) -> anyhow::Result<()> {
        self.current = None;
        Ok(())
    }
}

impl RecordingStatus {
    pub fn saw(&self, needle: &str) -> bool {
        self.shown.iter().any(|m| m.contains(needle))
    }
}

/// Keys that never report type-ahead, so a running macro is never
/// interrupted by keys meant for a later prompt.
#[derive(Debug, Default)]
pub struct PatientKeys(pub ScriptedKeys);

impl KeySource for PatientKeys {
    fn read_key(&mut self) -> io::Result<u8> {
        self.0.read_key()
    }

    fn key_available(&mut self) -> io::Result<bool> {
        Ok(false)
    }
}

pub fn editor_with(text: &str, limits: StoreLimits, options: Options) -> Editor {
    let mut b = BindingTableBuilder::new();
    core_terminal::default_bindings(&mut b);
    let mut state = EditorState::new(LineStore::new(limits, 10));
    state.load(text.as_bytes()).unwrap();
    state.options = options;
    Editor::new(state, InputPipeline::new(b.build()))
}

pub fn editor(text: &str) -> Editor {
    editor_with(text, StoreLimits::new(16, 40), Options::default())
}

/// Step until every scripted key is consumed and no synthetic input is
/// pending, or until a quit. Returns the dispatch results in order.
pub fn drive<K: KeySource>(
    editor: &mut Editor,
    keys: &mut K,
    status: &mut RecordingStatus,
    exhausted: impl Fn(&K) -> bool,
) -> anyhow::Result<Vec<DispatchResult>> {
    let mut results = Vec::new();
    loop {
        let idle = editor.input.forced().is_empty() && !editor.input.macro_running();
        if idle && exhausted(keys) {
            return Ok(results);
        }
        let mut ui = Ui::new(keys, status);
        let r = editor.step(&mut ui)?;
        results.push(r);
        if r.quit {
            return Ok(results);
        }
    }
}

pub fn run_keys(
    editor: &mut Editor,
    keys: impl IntoIterator<Item = u8>,
    status: &mut RecordingStatus,
) -> Vec<DispatchResult> {
    let mut source = ScriptedKeys::new(keys);
    drive(editor, &mut source, status, ScriptedKeys::is_empty).unwrap()
}

/// Like [`run_keys`] but a running macro never sees type-ahead.
pub fn run_patient(
    editor: &mut Editor,
    keys: impl IntoIterator<Item = u8>,
    status: &mut RecordingStatus,
) -> Vec<DispatchResult> {
    let mut source = PatientKeys(ScriptedKeys::new(keys));
    drive(editor, &mut source, status, |k| k.0.is_empty()).unwrap()
}

pub fn texts(editor: &Editor) -> Vec<String> {
    editor
        .state
        .lines
        .lines()
        .iter()
        .map(|l| l.to_string())
        .collect()
}

/// Shared buffer for capturing formatted log output.
#[derive(Clone, Default)]
pub struct LogBuffer(pub std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a debug-level subscriber writing into the returned buffer.
pub fn with_captured_logs(f: impl FnOnce()) -> String {
    let buf = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .with_writer(buf.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    buf.contents()
}
