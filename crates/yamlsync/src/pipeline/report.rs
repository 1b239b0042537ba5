use tracing::{error, info};

use super::error::{FileFailure, ResourceFailure};
use crate::git::ChangedFile;
use crate::upload::UploadReceipt;

/// Outcome of one processor run.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// YAML files reported by the diff.
    pub changed: Vec<ChangedFile>,
    /// Files turned into envelopes, in discovery order.
    pub prepared: Vec<ChangedFile>,
    pub file_failures: Vec<FileFailure>,
    pub uploaded: Vec<UploadReceipt>,
    pub upload_failures: Vec<ResourceFailure>,
}

impl SyncReport {
    pub fn has_failures(&self) -> bool {
        !self.file_failures.is_empty() || !self.upload_failures.is_empty()
    }

    pub fn is_success(&self) -> bool {
        !self.has_failures()
    }

    /// Records accepted by the API (or logged, in a dry run).
    pub fn records_uploaded(&self) -> usize {
        self.uploaded.iter().map(|r| r.records).sum()
    }

    pub fn log_summary(&self) {
        info!(
            changed = self.changed.len(),
            prepared = self.prepared.len(),
            skipped = self.file_failures.len(),
            resources = self.uploaded.len(),
            records = self.records_uploaded(),
            failed_resources = self.upload_failures.len(),
            "Sync finished"
        );

        for failure in &self.file_failures {
            error!("Skipped {}: {}", failure.file, failure.error);
        }
        for failure in &self.upload_failures {
            error!(
                "Failed to upload {} ({} records): {}",
                failure.resource, failure.records, failure.error
            );
        }
    }
}
