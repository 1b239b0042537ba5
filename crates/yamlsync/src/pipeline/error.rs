use crate::error::SyncError;
use crate::git::ChangedFile;
use crate::upload::UploadError;

/// A changed file that was skipped.
#[derive(Debug)]
pub struct FileFailure {
    pub file: ChangedFile,
    pub error: SyncError,
}

/// A resource whose batch was not accepted.
#[derive(Debug)]
pub struct ResourceFailure {
    pub resource: String,
    pub records: usize,
    pub error: UploadError,
}
