//! Repository path decoding.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::{RecordError, Result};

static RE_DATA_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data/([^/]+)/([^/]+)/([^/]+)/(en|mr)/([^/]+)\.ya?ml$").unwrap()
});

/// Content language encoded in the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Mr,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Mr => "mr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "mr" => Ok(Language::Mr),
            other => Err(format!("unsupported language code '{}'", other)),
        }
    }
}

/// Identifiers carried by a data file's location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathIdentifiers {
    pub district: String,
    pub taluka: String,
    pub village: String,
    pub language: Language,
    /// File base name without extension; names the API collection.
    pub resource: String,
}

/// Decodes `data/<district>/<taluka>/<village>/<en|mr>/<resource>.yml|yaml`.
///
/// Matching is exact: no separator normalization, and the language token is
/// case-sensitive.
pub fn decode_path(path: &str) -> Result<PathIdentifiers> {
    let invalid = || RecordError::InvalidPath {
        path: path.to_string(),
    };

    let caps = RE_DATA_PATH.captures(path).ok_or_else(invalid)?;
    let language = caps[4].parse().map_err(|_| invalid())?;

    Ok(PathIdentifiers {
        district: caps[1].to_string(),
        taluka: caps[2].to_string(),
        village: caps[3].to_string(),
        language,
        resource: caps[5].to_string(),
    })
}
