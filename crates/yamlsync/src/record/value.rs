//! Typed document model for record payloads.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// String-keyed mapping sent as a record's `data`.
///
/// Keys are kept sorted so serialized payloads are byte-stable across runs.
pub type Document = BTreeMap<String, Value>;

/// A YAML value restricted to what the JSON payload can carry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Document),
}

/// A mapping key that cannot become a JSON object key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct UnsupportedKey(pub String);

impl Value {
    /// Name of the YAML node kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) | Value::Unsigned(_) | Value::Float(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Document> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl TryFrom<serde_yaml::Value> for Value {
    type Error = UnsupportedKey;

    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        use serde_yaml::Value as Yaml;

        Ok(match value {
            Yaml::Null => Value::Null,
            Yaml::Bool(b) => Value::Bool(b),
            Yaml::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Unsigned(u)
                } else {
                    n.as_f64().map(Value::Float).unwrap_or(Value::Null)
                }
            }
            Yaml::String(s) => Value::String(s),
            Yaml::Sequence(items) => Value::Sequence(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Yaml::Mapping(mapping) => Value::Mapping(mapping_to_document(mapping)?),
            // Tags carry no meaning for the API; use the inner value.
            Yaml::Tagged(tagged) => Value::try_from(tagged.value)?,
        })
    }
}

/// Converts a YAML mapping, rendering scalar keys as their YAML text.
pub fn mapping_to_document(mapping: serde_yaml::Mapping) -> Result<Document, UnsupportedKey> {
    let mut document = Document::new();
    for (key, value) in mapping {
        document.insert(key_to_string(key)?, Value::try_from(value)?);
    }
    Ok(document)
}

fn key_to_string(key: serde_yaml::Value) -> Result<String, UnsupportedKey> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => key_to_string(tagged.value),
        other => Err(UnsupportedKey(
            serde_yaml::to_string(&other)
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|_| "<unprintable>".to_string()),
        )),
    }
}
