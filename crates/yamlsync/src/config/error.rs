use thiserror::Error;

use crate::secrets::SecretError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} not set")]
    Missing { name: String },

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },

    #[error("Failed to resolve API token: {0}")]
    Secret(#[from] SecretError),
}
