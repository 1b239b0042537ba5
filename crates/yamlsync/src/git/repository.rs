//! Git repository operations.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use log::{debug, info};

use super::error::{GitError, Result};
use super::parse::{format_git_error, parse_changed_yaml_files};
use super::types::{ChangedFile, DiffRange};

/// Handle on the checkout whose latest commit is being synced.
pub struct GitRepository {
    /// Path to the git working tree.
    repo_path: PathBuf,
}

impl GitRepository {
    /// Creates a new git repository handle.
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    /// Returns the repository path.
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Resolves a repository-relative path against the working tree.
    pub fn resolve(&self, file: &ChangedFile) -> PathBuf {
        self.repo_path.join(file.as_path())
    }

    /// Lists YAML files that differ between `range.base` and `range.head`.
    ///
    /// Deleted files are reported like any other change. Paths are read
    /// NUL-separated so non-ASCII names come back unquoted.
    pub fn changed_yaml_files(&self, range: &DiffRange) -> Result<Vec<ChangedFile>> {
        debug!(
            "Running git diff {} in {}",
            range,
            self.repo_path.display()
        );

        let output = self.run_git(&["diff", "--name-only", "-z", &range.base, &range.head])?;

        if !output.status.success() {
            return Err(GitError::Diff(format_git_error(&output)));
        }

        let files = parse_changed_yaml_files(&String::from_utf8_lossy(&output.stdout));
        info!("Found {} changed YAML files in {}", files.len(), range);
        Ok(files)
    }

    /// Runs a git command in the repository directory.
    fn run_git(&self, args: &[&str]) -> Result<Output> {
        Command::new("git")
            .current_dir(&self.repo_path)
            .args(args)
            .output()
            .map_err(GitError::Spawn)
    }
}
