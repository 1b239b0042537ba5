pub mod config;
pub mod error;
pub mod report;
pub mod runner;

pub use config::PipelineConfig;
pub use error::{FileFailure, ResourceFailure};
pub use report::SyncReport;
pub use runner::SyncPipeline;
