//! Bearer token resolution.
//!
//! The API token can be supplied in two ways, checked in priority order:
//!
//! 1. **Direct value** - `API_TOKEN` / `--api-token`
//! 2. **File reference** - `API_TOKEN_FILE` / `--api-token-file`, for the
//!    Docker and CI secrets-file pattern

use secrecy::SecretString;
use std::fs;

/// Error type for secret resolution failures.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("No secret source provided (need a direct value or a file path)")]
    NoSourceProvided,

    #[error("Failed to read secret from file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Secret file '{path}' is empty")]
    EmptyFile { path: String },
}

/// Result type for secret resolution.
pub type Result<T> = std::result::Result<T, SecretError>;

/// Resolves a secret from a direct value or a file, in that order.
///
/// Empty values count as absent. File contents are trimmed so a trailing
/// newline in a mounted secret does not end up in the `Authorization` header.
pub fn resolve_secret(direct: Option<&str>, file_path: Option<&str>) -> Result<SecretString> {
    if let Some(value) = direct {
        if !value.is_empty() {
            return Ok(SecretString::from(value.to_string()));
        }
    }

    if let Some(path) = file_path {
        if !path.is_empty() {
            let expanded = expand_home(path);
            let content = fs::read_to_string(&expanded).map_err(|e| SecretError::FileReadError {
                path: expanded.clone(),
                source: e,
            })?;
            let trimmed = content.trim();
            if trimmed.is_empty() {
                return Err(SecretError::EmptyFile { path: expanded });
            }
            return Ok(SecretString::from(trimmed.to_string()));
        }
    }

    Err(SecretError::NoSourceProvided)
}

/// Expands `~` to the user's home directory.
///
/// Only `~` and `~/path` are supported, not `~user/path`.
fn expand_home(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")) {
            if path == "~" {
                return home.to_string_lossy().into_owned();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_direct_value_wins() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("token");
        fs::write(&file, "from-file").unwrap();

        let secret = resolve_secret(Some("direct"), file.to_str()).unwrap();
        assert_eq!(secret.expose_secret(), "direct");
    }

    #[test]
    fn test_empty_direct_falls_back_to_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("token");
        fs::write(&file, "  from-file\n").unwrap();

        let secret = resolve_secret(Some(""), file.to_str()).unwrap();
        assert_eq!(secret.expose_secret(), "from-file");
    }

    #[test]
    fn test_no_source() {
        assert!(matches!(
            resolve_secret(None, None),
            Err(SecretError::NoSourceProvided)
        ));
        assert!(matches!(
            resolve_secret(Some(""), Some("")),
            Err(SecretError::NoSourceProvided)
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            resolve_secret(None, missing.to_str()),
            Err(SecretError::FileReadError { .. })
        ));
    }

    #[test]
    fn test_blank_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("token");
        fs::write(&file, "\n\n").unwrap();
        assert!(matches!(
            resolve_secret(None, file.to_str()),
            Err(SecretError::EmptyFile { .. })
        ));
    }

    #[test]
    #[serial]
    fn test_expand_home() {
        let original = std::env::var_os("HOME");
        std::env::set_var("HOME", "/home/ci");

        assert_eq!(expand_home("~"), "/home/ci");
        assert_eq!(expand_home("~/secrets/token"), "/home/ci/secrets/token");
        assert_eq!(expand_home("/run/secrets/token"), "/run/secrets/token");
        assert_eq!(expand_home("~other/token"), "~other/token");

        match original {
            Some(home) => std::env::set_var("HOME", home),
            None => std::env::remove_var("HOME"),
        }
    }
}
