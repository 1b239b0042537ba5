//! Bulk upsert client for the records API.

pub mod client;
pub mod error;
pub mod retry;

pub use client::{BulkUploader, UploadReceipt, UploaderConfig};
pub use error::{Result, UploadError};
pub use retry::RetryPolicy;
