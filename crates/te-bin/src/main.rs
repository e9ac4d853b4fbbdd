//! te entrypoint.
use anyhow::Result;
use clap::Parser;
use core_actions::{Editor, Ui, prompt};
use core_events::EditorError;
use core_render::Renderer;
use core_terminal::{
    CrosstermBackend, CrosstermKeys, CrosstermScreen, TerminalBackend, TerminalCapabilities,
};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

mod bootstrap;

const LOG_FILE: &str = "te.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "te", version, about = "te text editor")]
struct Args {
    /// File to edit. A path that does not exist yet is created on first save.
    pub path: Option<PathBuf>,
    /// Configuration file (overrides discovery of `te.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Macro to play once the document is loaded (`.m` is appended when missing).
    #[arg(long = "macro")]
    pub macro_file: Option<PathBuf>,
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            log_guard: None,
        }
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        if tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .try_init()
            .is_ok()
        {
            self.log_guard = Some(guard);
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }

    fn run(&mut self) -> Result<()> {
        self.configure_logging()?;
        Self::install_panic_hook();
        info!(target: "runtime", "startup");

        let args = Args::parse();
        let config = core_config::load_from(args.config.clone())?;
        let terminal = TerminalCapabilities::detect().size();
        let boot = bootstrap::bootstrap(
            config,
            terminal,
            args.path.as_deref(),
            args.macro_file.as_deref(),
        );
        let t = &boot.telemetry;
        info!(
            target: "runtime.startup",
            path = t.opened_path.as_ref().map(|p| p.display().to_string()).as_deref(),
            open_failed = t.open_failed,
            config_override = args.config.is_some(),
            configured_keys = t.configured_keys,
            columns = t.columns,
            rows = t.rows,
            "bootstrap_complete"
        );

        self.backend.set_title("te")?;
        let _guard = self.backend.enter_guard()?;
        let mut screen = CrosstermScreen::new(t.columns, t.rows);
        event_loop(boot.editor, boot.pending, &mut screen)?;
        info!(target: "runtime", "shutdown");
        Ok(())
    }
}

/// Render, step, repeat until the menu asks to quit.
fn event_loop(
    mut editor: Editor,
    pending: Vec<EditorError>,
    screen: &mut CrosstermScreen,
) -> Result<()> {
    let mut keys = CrosstermKeys::new();
    let mut renderer = Renderer::new();

    for err in pending {
        renderer.render(screen, &editor.state)?;
        let mut bar = renderer.status_bar(screen);
        let mut ui = Ui::new(&mut keys, &mut bar);
        prompt::report(&mut editor, &mut ui, err)?;
    }

    loop {
        renderer.render(screen, &editor.state)?;
        let result = {
            let mut bar = renderer.status_bar(screen);
            let mut ui = Ui::new(&mut keys, &mut bar);
            editor.step(&mut ui)?
        };
        if result.quit {
            return Ok(());
        }
        if result.buffer_replaced {
            renderer.invalidate();
        }
    }
}

fn main() -> Result<()> {
    let mut app = AppStartup::new();
    app.run()
}
