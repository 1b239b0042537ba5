use tracing::{debug, error, info, info_span, warn};

use crate::batch::Batch;
use crate::config::Settings;
use crate::error::{Result, SyncError};
use crate::git::{ChangedFile, GitRepository};
use crate::record::{decode_path, Envelope, RecordBuilder};
use crate::upload::BulkUploader;

use super::config::PipelineConfig;
use super::error::{FileFailure, ResourceFailure};
use super::report::SyncReport;

pub struct SyncPipeline {
    config: PipelineConfig,
    repository: GitRepository,
    builder: RecordBuilder,
    uploader: BulkUploader,
}

impl SyncPipeline {
    pub fn new(config: PipelineConfig, uploader: BulkUploader) -> Self {
        let repository = GitRepository::new(&config.repo_dir);
        let builder = RecordBuilder::new(config.reserved_key_policy);

        Self {
            config,
            repository,
            builder,
            uploader,
        }
    }

    /// Production constructor.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let uploader = BulkUploader::new(settings.uploader_config())?;
        Ok(Self::new(PipelineConfig::from_settings(settings), uploader))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Diffs, prepares and uploads.
    ///
    /// Only a failed diff returns `Err`. File and upload failures are
    /// collected in the report after every file and resource was attempted.
    pub async fn run(&self) -> Result<SyncReport> {
        let files = self
            .repository
            .changed_yaml_files(&self.config.diff_range)?;

        if files.is_empty() {
            info!("No YAML changes detected.");
            return Ok(SyncReport::default());
        }

        let (batch, mut report) = self.prepare(&files);
        self.upload(batch, &mut report).await;
        Ok(report)
    }

    /// Turns changed files into a batch. Failing files are recorded and skipped.
    pub fn prepare(&self, files: &[ChangedFile]) -> (Batch, SyncReport) {
        let mut batch = Batch::new();
        let mut report = SyncReport {
            changed: files.to_vec(),
            ..SyncReport::default()
        };

        for file in files {
            let _span = info_span!("sync.file", path = %file).entered();
            match self.prepare_file(file) {
                Ok((resource, envelope)) => {
                    batch.push(resource, envelope);
                    report.prepared.push(file.clone());
                }
                Err(e) => {
                    warn!("Skipping {}: {}", file, e);
                    report.file_failures.push(FileFailure {
                        file: file.clone(),
                        error: e,
                    });
                }
            }
        }

        debug!(
            resources = batch.len(),
            records = batch.record_count(),
            "Batch prepared"
        );
        (batch, report)
    }

    fn prepare_file(&self, file: &ChangedFile) -> Result<(String, Envelope)> {
        let ids = decode_path(file.as_str())?;
        info!("Processing: {}", file);

        let full_path = self.repository.resolve(file);
        let content = std::fs::read_to_string(&full_path).map_err(|e| SyncError::ReadFile {
            path: full_path.clone(),
            source: e,
        })?;

        let envelope = self.builder.build(file.as_str(), &content, &ids)?;
        Ok((ids.resource, envelope))
    }

    /// Uploads each resource in name order. A failed resource does not stop
    /// the others.
    pub async fn upload(&self, batch: Batch, report: &mut SyncReport) {
        for (resource, envelopes) in batch {
            match self.uploader.upload(&resource, &envelopes).await {
                Ok(receipt) => report.uploaded.push(receipt),
                Err(e) => {
                    error!("{}", e);
                    report.upload_failures.push(ResourceFailure {
                        resource,
                        records: envelopes.len(),
                        error: e,
                    });
                }
            }
        }
    }
}
