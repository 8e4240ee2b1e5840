//! Error types for the pickymap library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for PickyMap operations.
#[derive(Debug, Error)]
pub enum PickyError {
    /// A non-canonical key harmonized onto a key that already holds a value.
    #[error(
        "Key '{key}' will be interpreted as '{canonical}'. But this entry already exists. \
         Please use '{canonical}' if you want to replace the entry."
    )]
    KeyConflict { key: String, canonical: String },

    /// No entry exists for the harmonized key.
    #[error("Key '{key}' (interpreted as '{canonical}') not found")]
    KeyNotFound { key: String, canonical: String },

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to save or load a persisted map or rule set.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type alias for PickyMap operations.
pub type Result<T> = std::result::Result<T, PickyError>;
