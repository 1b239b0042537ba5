//! Git-specific error types.

use thiserror::Error;

/// Errors that can occur while asking git for changed files.
#[derive(Error, Debug)]
pub enum GitError {
    /// `git diff` exited non-zero; carries its combined output.
    #[error("git diff failed: {0}")]
    Diff(String),

    #[error("Failed to run git: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Result type for git operations.
pub type Result<T> = std::result::Result<T, GitError>;
