use std::path::PathBuf;

use crate::config::Settings;
use crate::git::DiffRange;
use crate::record::ReservedKeyPolicy;

pub struct PipelineConfig {
    pub repo_dir: PathBuf,
    pub diff_range: DiffRange,
    pub reserved_key_policy: ReservedKeyPolicy,
}

impl PipelineConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            repo_dir: settings.repo_dir.clone(),
            diff_range: settings.diff_range.clone(),
            reserved_key_policy: settings.reserved_key_policy,
        }
    }
}
