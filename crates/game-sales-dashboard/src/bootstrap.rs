use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure `~/.game-sales-dashboard/` exists and return it.
pub fn ensure_directories() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    ensure_directories_in(&home)
}

/// Same as [`ensure_directories`] rooted at `home`.
pub fn ensure_directories_in(home: &Path) -> anyhow::Result<PathBuf> {
    let app_dir = home.join(".game-sales-dashboard");
    std::fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a CLI log level (`DEBUG`, `INFO`, `WARNING`, `ERROR`) to an
/// [`EnvFilter`] directive.  Unrecognised strings pass through lowercased so
/// full directives such as `sales_data=trace` keep working.
pub fn log_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

/// Directive actually installed.  While the terminal UI owns the screen and
/// no log file was given, only errors are let through to stderr.
pub fn effective_directive(log_level: &str, log_file: Option<&Path>, tui_mode: bool) -> String {
    if tui_mode && log_file.is_none() {
        "error".to_string()
    } else {
        log_directive(log_level)
    }
}

/// Initialise the global `tracing` subscriber.
///
/// With `log_file` set, output is appended to that file without ANSI colours;
/// otherwise it goes to stderr.
pub fn setup_logging(
    log_level: &str,
    log_file: Option<&Path>,
    tui_mode: bool,
) -> anyhow::Result<()> {
    let directive = effective_directive(log_level, log_file, tui_mode);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()?;
        }
        None => {
            let layer = fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()?;
        }
    }

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_directories_in() {
        let tmp = TempDir::new().expect("tempdir");
        let dir = ensure_directories_in(tmp.path()).expect("create");
        assert_eq!(dir, tmp.path().join(".game-sales-dashboard"));
        assert!(dir.is_dir());

        // Idempotent.
        ensure_directories_in(tmp.path()).expect("second call");
    }

    #[test]
    fn test_log_directive_mapping() {
        assert_eq!(log_directive("DEBUG"), "debug");
        assert_eq!(log_directive("info"), "info");
        assert_eq!(log_directive("WARNING"), "warn");
        assert_eq!(log_directive("ERROR"), "error");
        assert_eq!(log_directive("sales_data=trace"), "sales_data=trace");
    }

    #[test]
    fn test_log_directive_unknown_level_is_not_debug() {
        assert_eq!(log_directive("CRITICAL"), "critical");
        assert_ne!(log_directive("critical"), "debug");
    }

    #[test]
    fn test_tui_without_log_file_only_logs_errors() {
        assert_eq!(effective_directive("DEBUG", None, true), "error");
        assert_eq!(effective_directive("DEBUG", None, false), "debug");
        let file = Path::new("/tmp/dashboard.log");
        assert_eq!(effective_directive("DEBUG", Some(file), true), "debug");
    }
}
