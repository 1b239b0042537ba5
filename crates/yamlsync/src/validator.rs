//! Syntax check behind the `yaml-validator` binary.

use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

/// Result of checking one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    /// The file was read but one of its documents failed to parse.
    InvalidYaml(String),
    /// The file could not be read.
    ReadError(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileValidation {
    pub path: PathBuf,
    pub outcome: ValidationOutcome,
}

impl FileValidation {
    pub fn is_valid(&self) -> bool {
        self.outcome == ValidationOutcome::Valid
    }
}

/// Renders the per-file marker line printed on stdout.
impl fmt::Display for FileValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match &self.outcome {
            ValidationOutcome::Valid => write!(f, "✅ {} valid YAML", path),
            ValidationOutcome::InvalidYaml(err) => {
                write!(f, "❌ {}: invalid YAML ({})", path, err)
            }
            ValidationOutcome::ReadError(err) => write!(f, "❌ {}: {}", path, err),
        }
    }
}

/// Parses every document of a YAML stream, stopping at the first error.
/// Input that is not valid UTF-8 is a YAML error.
pub fn check_yaml(content: impl AsRef<[u8]>) -> Result<(), serde_yaml::Error> {
    for document in serde_yaml::Deserializer::from_slice(content.as_ref()) {
        serde_yaml::Value::deserialize(document)?;
    }
    Ok(())
}

pub fn validate_file(path: impl AsRef<Path>) -> FileValidation {
    let path = path.as_ref();
    debug!("Validating {}", path.display());

    let outcome = match std::fs::read(path) {
        Ok(content) => match check_yaml(&content) {
            Ok(()) => ValidationOutcome::Valid,
            Err(e) => ValidationOutcome::InvalidYaml(e.to_string()),
        },
        Err(e) => ValidationOutcome::ReadError(e.to_string()),
    };

    FileValidation {
        path: path.to_path_buf(),
        outcome,
    }
}

/// Checks each path in order; every file is visited even after a failure.
pub fn validate_files<I, P>(paths: I) -> Vec<FileValidation>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths.into_iter().map(validate_file).collect()
}
