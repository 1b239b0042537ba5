//! Upload error types.

use thiserror::Error;

/// Errors that fail a single resource's bulk upload.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Failed to serialize batch for '{resource}': {source}")]
    Serialize {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to create {resource} (status {status}): {body}")]
    Rejected {
        resource: String,
        status: u16,
        body: String,
    },

    #[error("Request for '{resource}' failed: {source}")]
    Transport {
        resource: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

impl UploadError {
    /// Returns true if the failure is likely transient and the request can
    /// be sent again: network failures, timeouts, 429 and 5xx responses.
    pub fn is_retryable(&self) -> bool {
        match self {
            UploadError::Transport { source, .. } => !source.is_builder(),
            UploadError::Rejected { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// The resource the failure belongs to, if any.
    pub fn resource(&self) -> Option<&str> {
        match self {
            UploadError::Serialize { resource, .. }
            | UploadError::Rejected { resource, .. }
            | UploadError::Transport { resource, .. } => Some(resource),
            _ => None,
        }
    }
}

/// Result type for upload operations.
pub type Result<T> = std::result::Result<T, UploadError>;
