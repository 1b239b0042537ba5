//! Git output parsing helpers.

use std::process::Output;

use super::types::ChangedFile;

/// Formats a git error with both stdout and stderr for better debugging.
pub fn format_git_error(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();

    match (stderr.is_empty(), stdout.is_empty()) {
        (true, true) => format!(
            "Command failed with exit code {}",
            output.status.code().unwrap_or(-1)
        ),
        (true, false) => stdout,
        (false, true) => stderr,
        (false, false) => format!("{}\n{}", stderr, stdout),
    }
}

/// Parses `git diff --name-only -z` output, keeping YAML paths in output order.
pub fn parse_changed_yaml_files(output: &str) -> Vec<ChangedFile> {
    output
        .split('\0')
        .filter(|path| !path.is_empty())
        .map(ChangedFile::from)
        .filter(ChangedFile::is_yaml)
        .collect()
}
