use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::Manufacturer;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Terminal dashboard for video game sales by hardware manufacturer
#[derive(Parser, Debug, Clone)]
#[command(
    name = "game-sales-dashboard",
    about = "Terminal dashboard for video game sales by hardware manufacturer",
    version
)]
pub struct Settings {
    /// Dataset file (.json array or .jsonl) or directory; the bundled dataset is used when omitted
    #[arg(long, env = "GAME_SALES_DATA")]
    pub data: Option<PathBuf>,

    /// Manufacturer selected at startup
    #[arg(long, default_value = "all", value_parser = parse_manufacturer)]
    pub manufacturer: Manufacturer,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Write all aggregated views as JSON to this path and exit
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

fn parse_manufacturer(value: &str) -> Result<Manufacturer, String> {
    value.parse().map_err(|e: crate::error::SalesError| e.to_string())
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.game-sales-dashboard/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
}

impl LastUsedParams {
    /// Default path of the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Config path rooted at `base_dir`.
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".game-sales-dashboard").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable last-used params");
            Self::default()
        })
    }

    /// Atomically write params to an explicit path, creating parent
    /// directories if needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] with an explicit argument
    /// list and config path.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!(error = %e, "failed to clear last-used params");
            }
            return settings.apply_debug_flag();
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI always wins over persisted values.
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "manufacturer") {
            if let Some(m) = last.manufacturer.and_then(|v| v.parse().ok()) {
                settings.manufacturer = m;
            }
        }

        settings = settings.apply_debug_flag();

        if let Err(e) = LastUsedParams::from(&settings).save_to(config_path) {
            tracing::warn!(error = %e, "failed to persist last-used params");
        }

        settings
    }

    /// `true` when the run should export JSON instead of opening the TUI.
    pub fn is_export(&self) -> bool {
        self.export.is_some()
    }

    fn apply_debug_flag(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            manufacturer: Some(s.manufacturer.as_str().to_string()),
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
