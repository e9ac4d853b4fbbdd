//! Configuration loading for `te.toml`.
//!
//! Discovery prefers a `te.toml` in the working directory, then the platform
//! config dir (`<config>/te/te.toml`). A missing file yields defaults; a file
//! that fails to parse also yields defaults (with a warning) so a typo never
//! prevents the editor from starting.
//!
//! Values are range-checked in [`Config::normalize`] using the limits the
//! installer tool historically enforced. Anything out of range is clamped and
//! logged under the `config` target. The vertical scroll margin is clamped
//! later, once the text height is known ([`Config::apply_context`]).

use anyhow::Result;
use core_events::{Command, Options};
use core_keymap::{BindingTableBuilder, KeyBinding};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE: &str = "te.toml";

pub const ROWS_RANGE: RangeInclusive<u16> = 8..=255;
pub const COLUMNS_RANGE: RangeInclusive<u16> = 64..=255;
pub const MAX_LINES_RANGE: RangeInclusive<usize> = 64..=4096;
pub const TAB_SIZE_RANGE: RangeInclusive<usize> = 1..=16;
pub const BULLETS_MAX: usize = 7;
pub const KEY_NAME_MAX: usize = 7;

/// Rows used by the info line and the status line.
pub const RESERVED_ROWS: u16 = 2;

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ScreenConfig {
    /// 0 = use the terminal size.
    pub rows: u16,
    pub columns: u16,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EditorConfig {
    pub max_lines: usize,
    pub tab_size: usize,
    pub line_numbers: bool,
    pub auto_indent: bool,
    pub auto_list: bool,
    pub list_bullets: String,
    pub word_motions: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_lines: 512,
            tab_size: 8,
            line_numbers: true,
            auto_indent: false,
            auto_list: false,
            list_bullets: "-*>".to_string(),
            word_motions: true,
        }
    }
}

/// Names shown in prompts for the newline and escape keys.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct KeyNameConfig {
    pub newline: String,
    pub escape: String,
}

impl Default for KeyNameConfig {
    fn default() -> Self {
        Self {
            newline: "ENTER".to_string(),
            escape: "ESC".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct MarginConfig {
    #[serde(default)]
    pub vertical: u16,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScrollConfig {
    #[serde(default)]
    pub margin: MarginConfig,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub screen: ScreenConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub keyname: KeyNameConfig,
    /// Command name (`up`, `blockstart`, ...) to key notation (`^E`, `^BS`).
    #[serde(default)]
    pub keys: BTreeMap<String, String>,
    #[serde(default)]
    pub scroll: ScrollConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: ConfigFile,
    pub effective_vertical_margin: u16,
}

/// Text area dimensions the margin is clamped against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigContext {
    pub viewport_rows: u16,
    pub status_rows: u16,
}

impl ConfigContext {
    pub fn new(viewport_rows: u16, status_rows: u16) -> Self {
        Self {
            viewport_rows,
            status_rows,
        }
    }

    pub fn text_rows(&self) -> u16 {
        self.viewport_rows.saturating_sub(self.status_rows)
    }
}

/// Best-effort config path: working directory first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("te").join(CONFIG_FILE);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    let mut cfg = match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => Config {
            file,
            effective_vertical_margin: 0,
        },
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "parse_failed_using_defaults");
            Config::default()
        }
    };
    cfg.normalize();
    Ok(cfg)
}

fn clamp_logged<T>(field: &'static str, value: T, range: &RangeInclusive<T>) -> T
where
    T: Copy + PartialOrd + std::fmt::Display,
{
    let clamped = if value < *range.start() {
        *range.start()
    } else if value > *range.end() {
        *range.end()
    } else {
        value
    };
    if clamped != value {
        info!(target: "config", field, %value, %clamped, "value_clamped");
    }
    clamped
}

fn truncate_logged(field: &'static str, value: &mut String, max: usize) {
    if value.len() > max {
        let mut end = max;
        while !value.is_char_boundary(end) {
            end -= 1;
        }
        value.truncate(end);
        info!(target: "config", field, max, "value_truncated");
    }
}

impl Config {
    /// Clamp every ranged field into its accepted range.
    pub fn normalize(&mut self) {
        let screen = &mut self.file.screen;
        if screen.rows != 0 {
            screen.rows = clamp_logged("screen.rows", screen.rows, &ROWS_RANGE);
        }
        if screen.columns != 0 {
            screen.columns = clamp_logged("screen.columns", screen.columns, &COLUMNS_RANGE);
        }
        let ed = &mut self.file.editor;
        ed.max_lines = clamp_logged("editor.max_lines", ed.max_lines, &MAX_LINES_RANGE);
        ed.tab_size = clamp_logged("editor.tab_size", ed.tab_size, &TAB_SIZE_RANGE);
        truncate_logged("editor.list_bullets", &mut ed.list_bullets, BULLETS_MAX);
        truncate_logged("keyname.newline", &mut self.file.keyname.newline, KEY_NAME_MAX);
        truncate_logged("keyname.escape", &mut self.file.keyname.escape, KEY_NAME_MAX);
    }

    /// Screen size to use given the terminal's reported `(columns, rows)`.
    pub fn screen_size(&self, terminal: (u16, u16)) -> (u16, u16) {
        let pick = |configured: u16, actual: u16, range: &RangeInclusive<u16>| {
            let v = if configured == 0 { actual } else { configured };
            v.clamp(*range.start(), *range.end())
        };
        (
            pick(self.file.screen.columns, terminal.0, &COLUMNS_RANGE),
            pick(self.file.screen.rows, terminal.1, &ROWS_RANGE),
        )
    }

    /// Initial option flags.
    pub fn options(&self) -> Options {
        let ed = &self.file.editor;
        let mut opts = Options::empty();
        opts.set(Options::AUTO_INDENT, ed.auto_indent);
        opts.set(Options::AUTO_LIST, ed.auto_list);
        opts.set(Options::LINE_NUMBERS, ed.line_numbers);
        opts.set(Options::WORD_MOTIONS, ed.word_motions);
        opts
    }

    /// Register configured bindings. Runs before the platform defaults so a
    /// configured key claims its command first. Invalid entries are skipped.
    /// Returns how many bindings were applied.
    pub fn bind_keys(&self, builder: &mut BindingTableBuilder) -> usize {
        let mut applied = 0;
        for (name, notation) in &self.file.keys {
            let Some(cmd) = Command::from_name(name) else {
                warn!(target: "config", key = name.as_str(), "unknown_command");
                continue;
            };
            match KeyBinding::parse(notation) {
                Ok(binding) => {
                    if builder.bind(cmd, binding) {
                        applied += 1;
                    }
                }
                Err(e) => {
                    warn!(target: "config", key = name.as_str(), notation = notation.as_str(), error = %e, "bad_binding");
                }
            }
        }
        applied
    }

    /// Compute the effective vertical margin for the given text area.
    pub fn apply_context(&mut self, ctx: ConfigContext) -> u16 {
        let raw = self.file.scroll.margin.vertical;
        let text_rows = ctx.text_rows();
        let (clamped, max) = if text_rows <= 3 {
            (0, 0)
        } else {
            let max = text_rows.saturating_sub(2) / 2;
            (raw.min(max), max)
        };

        if clamped != raw {
            info!(
                target: "config",
                raw,
                clamped,
                max,
                text_rows,
                viewport_rows = ctx.viewport_rows,
                status_rows = ctx.status_rows,
                "scroll_margin_vertical_clamped"
            );
        }
        self.effective_vertical_margin = clamped;
        clamped
    }
}
