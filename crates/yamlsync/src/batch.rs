//! Per-resource grouping of envelopes.

use std::collections::BTreeMap;

use crate::record::Envelope;

/// Envelopes grouped by resource name.
///
/// Each resource keeps envelopes in insertion order; resources themselves
/// iterate in name order so uploads happen in a stable sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    resources: BTreeMap<String, Vec<Envelope>>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an envelope to the resource's sequence. Duplicate ids are kept.
    pub fn push(&mut self, resource: impl Into<String>, envelope: Envelope) {
        self.resources
            .entry(resource.into())
            .or_default()
            .push(envelope);
    }

    /// Number of distinct resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Total number of envelopes across all resources.
    pub fn record_count(&self) -> usize {
        self.resources.values().map(Vec::len).sum()
    }

    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    pub fn get(&self, resource: &str) -> Option<&[Envelope]> {
        self.resources.get(resource).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Envelope])> {
        self.resources
            .iter()
            .map(|(name, envelopes)| (name.as_str(), envelopes.as_slice()))
    }
}

impl<S: Into<String>> FromIterator<(S, Envelope)> for Batch {
    fn from_iter<I: IntoIterator<Item = (S, Envelope)>>(iter: I) -> Self {
        let mut batch = Batch::new();
        for (resource, envelope) in iter {
            batch.push(resource, envelope);
        }
        batch
    }
}

impl IntoIterator for Batch {
    type Item = (String, Vec<Envelope>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Vec<Envelope>>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.into_iter()
    }
}
