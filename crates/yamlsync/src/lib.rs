pub mod batch;
pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod pipeline;
pub mod record;
pub mod sanitize;
pub mod secrets;
pub mod upload;
pub mod validator;

pub use batch::Batch;
pub use config::{ConfigError, ProcessorArgs, Settings};
pub use error::{Result, SyncError};
pub use git::{ChangedFile, GitError, GitRepository};
pub use logging::{init_logging, LogFormat};
pub use pipeline::{SyncPipeline, SyncReport};
pub use record::{
    composite_id, decode_path, Document, Envelope, Language, PathIdentifiers, RecordBuilder,
    RecordError, ReservedKeyPolicy, Value,
};
pub use secrets::{resolve_secret, SecretError};
pub use upload::{BulkUploader, RetryPolicy, UploadError, UploadReceipt};
pub use validator::{validate_file, FileValidation, ValidationOutcome};
