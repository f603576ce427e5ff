mod bootstrap;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use sales_core::models::Manufacturer;
use sales_core::settings::{LastUsedParams, Settings};
use sales_data::reader::DataSource;
use sales_runtime::data_manager::DataManager;
use sales_ui::app::App;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(
        &settings.log_level,
        settings.log_file.as_deref(),
        !settings.is_export(),
    )?;

    tracing::info!("Game Sales Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Manufacturer: {}, Theme: {}",
        settings.manufacturer,
        settings.theme
    );

    let source = DataSource::from_option(settings.data.clone());
    tracing::info!("Data source: {}", source.describe());
    let mut manager = DataManager::new(source);

    if let Some(path) = settings.export.as_deref() {
        export_views(&mut manager, path)?;
        return Ok(());
    }

    let mut app = App::new(&settings.theme, settings.manufacturer, manager);
    app.run()?;

    if !settings.clear {
        remember_manufacturer(&LastUsedParams::config_path(), app.manufacturer);
    }

    Ok(())
}

/// Write every view as pretty JSON to `path`, or to stdout when `path` is `-`.
fn export_views(manager: &mut DataManager, path: &Path) -> Result<()> {
    let views = manager
        .views()
        .with_context(|| format!("failed to load {}", manager.source().describe()))?;
    let json = serde_json::to_string_pretty(&*views)?;

    if path == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
    } else {
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(
            records = views.metadata.records,
            "exported dashboard views to {}",
            path.display()
        );
    }
    Ok(())
}

/// Persist the manufacturer the dashboard was left on.
fn remember_manufacturer(config_path: &Path, manufacturer: Manufacturer) {
    let mut last = LastUsedParams::load_from(config_path);
    last.manufacturer = Some(manufacturer.as_str().to_string());
    if let Err(e) = last.save_to(config_path) {
        tracing::warn!(error = %e, "failed to persist last-used manufacturer");
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
