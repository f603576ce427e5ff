//! Dataset discovery and loading.
//!
//! Records come either from the dataset compiled into this crate or from
//! `.json` (array of records) and `.jsonl` (one record per line) files on
//! disk.  A directory is scanned recursively and its files are loaded in
//! path order.

use std::path::{Path, PathBuf};

use sales_core::error::{Result, SalesError};
use sales_core::models::RawRecord;
use tracing::{debug, warn};

/// The dataset shipped with the binary.
pub const BUNDLED_DATASET: &str = include_str!("../data/games.json");

// ── DataSource ────────────────────────────────────────────────────────────────

/// Where the raw records are read from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DataSource {
    /// The dataset compiled into the binary.
    #[default]
    Bundled,
    /// A `.json` / `.jsonl` file, or a directory containing them.
    Path(PathBuf),
}

impl DataSource {
    /// Build a source from an optional CLI path.
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map(Self::Path).unwrap_or_default()
    }

    /// Human-readable description for headers and logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Bundled => "bundled dataset".to_string(),
            Self::Path(p) => p.display().to_string(),
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load every raw record from `source`.
pub fn load_records(source: &DataSource) -> Result<Vec<RawRecord>> {
    match source {
        DataSource::Bundled => load_bundled(),
        DataSource::Path(path) => load_from_path(path),
    }
}

/// Parse the bundled dataset.
pub fn load_bundled() -> Result<Vec<RawRecord>> {
    let records: Vec<RawRecord> = serde_json::from_str(BUNDLED_DATASET)?;
    debug!("Loaded {} records from bundled dataset", records.len());
    Ok(records)
}

/// Load records from a single file or from every dataset file under a
/// directory.
pub fn load_from_path(path: &Path) -> Result<Vec<RawRecord>> {
    if !path.exists() {
        return Err(SalesError::DataPathNotFound(path.to_path_buf()));
    }

    if path.is_file() {
        return load_file(path);
    }

    let files = find_dataset_files(path);
    if files.is_empty() {
        return Err(SalesError::NoDataFiles(path.to_path_buf()));
    }

    let mut all_records = Vec::new();
    for file in &files {
        all_records.extend(load_file(file)?);
    }

    debug!(
        "Loaded {} records from {} files",
        all_records.len(),
        files.len()
    );
    Ok(all_records)
}

/// Find all `.json` and `.jsonl` files recursively under `dir`, sorted by path.
pub fn find_dataset_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_dataset_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn is_dataset_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == "json" || ext == "jsonl")
        .unwrap_or(false)
}

fn is_jsonl(path: &Path) -> bool {
    path.extension().map(|ext| ext == "jsonl").unwrap_or(false)
}

fn load_file(path: &Path) -> Result<Vec<RawRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| SalesError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    if is_jsonl(path) {
        Ok(parse_jsonl(path, &content))
    } else {
        serde_json::from_str(&content).map_err(|source| SalesError::InvalidDataset {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Parse one record per line; blank and malformed lines are skipped.
fn parse_jsonl(path: &Path, content: &str) -> Vec<RawRecord> {
    let mut records = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<RawRecord>(trimmed) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(
                    "Skipping malformed record at {}:{}: {}",
                    path.display(),
                    line_no + 1,
                    e
                );
            }
        }
    }
    records
}

// ── Tests ─────────────────────────────────────────────────────────────────────
