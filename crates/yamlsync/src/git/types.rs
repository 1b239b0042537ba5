//! Pure data types for git operations.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Repository-relative path reported by `git diff --name-only`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangedFile(String);

impl ChangedFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Whether the path carries a `.yaml` or `.yml` suffix.
    pub fn is_yaml(&self) -> bool {
        self.0.ends_with(".yaml") || self.0.ends_with(".yml")
    }
}

impl fmt::Display for ChangedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChangedFile {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Revision range handed to `git diff`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffRange {
    /// Older revision, `HEAD~1` by default.
    pub base: String,
    /// Newer revision, `HEAD` by default.
    pub head: String,
}

impl Default for DiffRange {
    fn default() -> Self {
        Self {
            base: "HEAD~1".to_string(),
            head: "HEAD".to_string(),
        }
    }
}

impl fmt::Display for DiffRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.base, self.head)
    }
}
