//! Temporary git repository for end-to-end runs.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use secrecy::SecretString;
use tempfile::TempDir;

use yamlsync::git::DiffRange;
use yamlsync::pipeline::{PipelineConfig, SyncPipeline};
use yamlsync::upload::{BulkUploader, RetryPolicy, UploaderConfig};
use yamlsync::ReservedKeyPolicy;

pub const TEST_TOKEN: &str = "integration-token";

pub struct TestRepo {
    temp_dir: TempDir,
}

impl TestRepo {
    /// Creates an empty repository.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let repo = Self { temp_dir };
        repo.git(&["init", "-q"]);
        repo
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes a file relative to the repository root, creating parents.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path().join(relative);
        std::fs::create_dir_all(path.parent().expect("path has a parent"))
            .expect("Failed to create parent directories");
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn remove(&self, relative: &str) {
        std::fs::remove_file(self.path().join(relative)).expect("Failed to remove file");
    }

    /// Stages everything and commits.
    pub fn commit(&self, message: &str) {
        self.git(&["add", "-A"]);
        self.git(&["commit", "-q", "--allow-empty", "-m", message]);
    }

    pub fn git(&self, args: &[&str]) {
        let output = Command::new("git")
            .current_dir(self.path())
            .args([
                "-c",
                "user.email=ci@example.com",
                "-c",
                "user.name=CI",
                "-c",
                "commit.gpgsign=false",
            ])
            .args(args)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    /// Builds a pipeline against this repository and `api_host`.
    pub fn pipeline(&self, api_host: &str, policy: ReservedKeyPolicy) -> SyncPipeline {
        let mut uploader = UploaderConfig::new(api_host, SecretString::from(TEST_TOKEN.to_string()));
        uploader.retry = RetryPolicy::default()
            .with_max_retries(1)
            .with_base_delay(std::time::Duration::from_millis(10));

        let config = PipelineConfig {
            repo_dir: self.path().to_path_buf(),
            diff_range: DiffRange::default(),
            reserved_key_policy: policy,
        };
        SyncPipeline::new(config, BulkUploader::new(uploader).expect("valid uploader"))
    }
}
