//! Editor construction from configuration and command line.

use core_actions::io_ops::{OpenFileResult, open_file};
use core_actions::{Editor, KeyNames};
use core_config::{Config, ConfigContext, RESERVED_ROWS};
use core_events::{Command, EditorError};
use core_input::InputPipeline;
use core_keymap::BindingTableBuilder;
use core_state::EditorState;
use core_text::{LineStore, StoreLimits};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Facts about start-up worth one log line.
#[derive(Debug, Clone)]
pub struct StartupTelemetry {
    pub opened_path: Option<PathBuf>,
    pub open_failed: bool,
    pub configured_keys: usize,
    pub columns: u16,
    pub rows: u16,
}

pub struct EditorBootstrap {
    pub editor: Editor,
    /// Errors to show once the screen is up.
    pub pending: Vec<EditorError>,
    pub telemetry: StartupTelemetry,
}

/// Build an editor for a `(columns, rows)` screen. Configured key bindings
/// are registered before the defaults so they win.
pub fn build_editor(config: &mut Config, columns: u16, rows: u16) -> (Editor, usize) {
    let ed = &config.file.editor;
    let mut builder = BindingTableBuilder::new();
    let configured = config.bind_keys(&mut builder);
    core_terminal::default_bindings(&mut builder);

    let limits = StoreLimits::for_screen(ed.max_lines, usize::from(columns), ed.line_numbers);
    let box_rows = rows.saturating_sub(RESERVED_ROWS);
    let mut lines = LineStore::new(limits, usize::from(box_rows));
    let tab_size = ed.tab_size;
    let bullets = ed.list_bullets.clone().into_bytes();
    let key_names = KeyNames {
        newline: config.file.keyname.newline.clone(),
        escape: config.file.keyname.escape.clone(),
    };
    let options = config.options();

    let margin = config.apply_context(ConfigContext::new(rows, RESERVED_ROWS));
    lines.set_scroll_margin(usize::from(margin));

    let table = builder.build();
    debug!(
        target: "runtime.startup",
        menu = table.binding_of(Command::Escape).map(|b| b.to_string()).as_deref(),
        macro_key = table.binding_of(Command::Macro).map(|b| b.to_string()).as_deref(),
        "key_layout"
    );

    let mut state = EditorState::new(lines);
    state.options = options;
    state.tab_size = tab_size;
    state.list_bullets = bullets;
    debug!(target: "runtime.startup", ?limits, box_rows, margin, "editor_built");
    (
        Editor::new(state, InputPipeline::new(table)).with_key_names(key_names),
        configured,
    )
}

/// Load `path` into the editor. A path that does not exist yet names a new
/// document; any other failure leaves a new unnamed document and an error to report.
pub fn open_document(editor: &mut Editor, path: &Path) -> Option<EditorError> {
    if !path.exists() {
        editor.state.set_file_name(Some(path));
        info!(target: "io", path = %path.display(), "new_file");
        return None;
    }
    match open_file(&mut editor.state, path) {
        OpenFileResult::Success { .. } => None,
        OpenFileResult::Error(e) => Some(e),
    }
}

pub fn bootstrap(
    mut config: Config,
    terminal: (u16, u16),
    path: Option<&Path>,
    macro_file: Option<&Path>,
) -> EditorBootstrap {
    let (columns, rows) = config.screen_size(terminal);
    let (mut editor, configured_keys) = build_editor(&mut config, columns, rows);
    let mut pending = Vec::new();
    let mut open_failed = false;
    if let Some(p) = path
        && let Some(e) = open_document(&mut editor, p)
    {
        open_failed = true;
        pending.push(e);
    }
    if let Some(m) = macro_file
        && let Err(e) = editor.start_macro(&m.to_string_lossy())
    {
        pending.push(e);
    }
    EditorBootstrap {
        editor,
        pending,
        telemetry: StartupTelemetry {
            opened_path: path.map(Path::to_path_buf),
            open_failed,
            configured_keys,
            columns,
            rows,
        },
    }
}
