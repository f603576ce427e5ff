use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while loading and presenting the sales dataset.
#[derive(Error, Debug)]
pub enum SalesError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A JSON array file did not contain a valid record list.
    #[error("Invalid dataset {path}: {source}")]
    InvalidDataset {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The dataset path given on the command line does not exist.
    #[error("Data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// A dataset directory contained no `.json` or `.jsonl` files.
    #[error("No dataset files found in {0}")]
    NoDataFiles(PathBuf),

    /// A manufacturer name is not one of the recognised values.
    #[error("Invalid manufacturer: {0}")]
    InvalidManufacturer(String),

}

/// Convenience alias used throughout the sales crates.
pub type Result<T> = std::result::Result<T, SalesError>;
