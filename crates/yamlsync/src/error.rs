use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::git::GitError;
use crate::record::RecordError;
use crate::upload::UploadError;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    #[error("Failed to read file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    /// Returns true if the error aborts the whole run instead of a single
    /// file or resource.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SyncError::Config(_) | SyncError::Git(_))
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
