//! Record construction from YAML content and path identifiers.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::{RecordError, Result};
use super::path::PathIdentifiers;
use super::value::{Document, Value};

/// Keys the builder writes into every document, in write order.
pub const RESERVED_KEYS: [&str; 5] = ["districtID", "talukaID", "villageID", "langID", "id"];

/// What to do when a document already defines a reserved key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReservedKeyPolicy {
    /// Replace the existing value with the path-derived one.
    #[default]
    Overwrite,
    /// Fail the file.
    Reject,
}

/// Unit sent to the bulk API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub id: String,
    pub data: Document,
}

/// Builds the `district-taluka-lang-village` identifier.
pub fn composite_id(ids: &PathIdentifiers) -> String {
    format!(
        "{}-{}-{}-{}",
        ids.district, ids.taluka, ids.language, ids.village
    )
}

/// Parses YAML files into envelopes.
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    policy: ReservedKeyPolicy,
}

impl RecordBuilder {
    pub fn new(policy: ReservedKeyPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ReservedKeyPolicy {
        self.policy
    }

    /// Parses the first document of `content`, with merge keys (`<<`)
    /// applied. An empty file is an empty mapping; later documents are
    /// ignored.
    pub fn parse_document(&self, path: &str, content: &str) -> Result<Document> {
        let parse_error = |e: serde_yaml::Error| RecordError::ParseYaml {
            path: path.to_string(),
            message: e.to_string(),
        };

        let mut yaml = match serde_yaml::Deserializer::from_str(content).next() {
            Some(document) => serde_yaml::Value::deserialize(document).map_err(parse_error)?,
            None => serde_yaml::Value::Null,
        };
        yaml.apply_merge().map_err(parse_error)?;

        let value = Value::try_from(yaml).map_err(|e| RecordError::UnsupportedKey {
            path: path.to_string(),
            key: e.0,
        })?;

        match value {
            Value::Mapping(document) => Ok(document),
            Value::Null => Ok(Document::new()),
            other => Err(RecordError::NotAMapping {
                path: path.to_string(),
                found: other.kind(),
            }),
        }
    }

    /// Parses `content` and stamps the path identifiers onto it.
    pub fn build(&self, path: &str, content: &str, ids: &PathIdentifiers) -> Result<Envelope> {
        let mut data = self.parse_document(path, content)?;
        let id = composite_id(ids);

        let reserved = [
            ids.district.as_str(),
            ids.taluka.as_str(),
            ids.village.as_str(),
            ids.language.code(),
            id.as_str(),
        ];

        for (key, value) in RESERVED_KEYS.iter().zip(reserved) {
            let value = Value::from(value);
            match data.get(*key) {
                Some(_) if self.policy == ReservedKeyPolicy::Reject => {
                    return Err(RecordError::ReservedKeyConflict {
                        path: path.to_string(),
                        key: key.to_string(),
                    });
                }
                Some(existing) if *existing != value => {
                    warn!(path, key, "Overwriting reserved key with path-derived value");
                }
                _ => {}
            }
            data.insert(key.to_string(), value);
        }

        debug!(path, resource = %ids.resource, id = %id, "Prepared record");
        Ok(Envelope { id, data })
    }
}
