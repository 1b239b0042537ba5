//! Record construction errors.

use thiserror::Error;

/// Errors that skip a single file during record construction.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("invalid path: {path}")]
    InvalidPath { path: String },

    #[error("Failed to parse YAML in '{path}': {message}")]
    ParseYaml { path: String, message: String },

    #[error("Top-level value in '{path}' must be a mapping, found {found}")]
    NotAMapping { path: String, found: &'static str },

    #[error("Unsupported mapping key in '{path}': {key}")]
    UnsupportedKey { path: String, key: String },

    #[error("Reserved key '{key}' already present in '{path}'")]
    ReservedKeyConflict { path: String, key: String },
}

/// Result type for record operations.
pub type Result<T> = std::result::Result<T, RecordError>;
