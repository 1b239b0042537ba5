use std::path::PathBuf;

use clap::Parser;

use crate::logging::LogFormat;

/// Upserts YAML records changed in the latest commit to the bulk API.
#[derive(Debug, Clone, Parser)]
#[command(name = "yaml-processor", version)]
pub struct ProcessorArgs {
    /// Base URL of the API, e.g. https://api.example.org
    #[arg(long, env = "API_HOST")]
    pub api_host: Option<String>,

    /// Bearer token for the API
    #[arg(long, env = "API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// File containing the bearer token, used when no direct token is given
    #[arg(long, env = "API_TOKEN_FILE")]
    pub api_token_file: Option<String>,

    /// Git working tree to diff and read files from
    #[arg(long, env = "YAML_SYNC_REPO", default_value = ".")]
    pub repo: PathBuf,

    /// Older revision of the diff
    #[arg(long, env = "YAML_SYNC_BASE", default_value = "HEAD~1")]
    pub base: String,

    /// Newer revision of the diff
    #[arg(long, env = "YAML_SYNC_HEAD", default_value = "HEAD")]
    pub head: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "YAML_SYNC_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// TCP connect timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub connect_timeout_secs: u64,

    /// Retries for transient upload failures (network errors, 429, 5xx)
    #[arg(long, env = "YAML_SYNC_MAX_RETRIES", default_value_t = 3)]
    pub max_retries: u32,

    /// Fail a file that already defines districtID, talukaID, villageID, langID or id
    #[arg(long)]
    pub reject_reserved_keys: bool,

    /// Log payloads instead of sending them
    #[arg(long, env = "YAML_SYNC_DRY_RUN")]
    pub dry_run: bool,

    /// Log output format
    #[arg(long, env = "YAML_SYNC_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}
