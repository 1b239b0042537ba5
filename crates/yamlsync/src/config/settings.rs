use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use super::args::ProcessorArgs;
use super::error::ConfigError;
use crate::git::DiffRange;
use crate::logging::LogFormat;
use crate::record::ReservedKeyPolicy;
use crate::secrets::{resolve_secret, SecretError};
use crate::upload::{client::parse_api_host, RetryPolicy, UploaderConfig};

/// Validated runtime configuration of the processor.
#[derive(Debug)]
pub struct Settings {
    pub api_host: String,
    pub api_token: SecretString,
    pub repo_dir: PathBuf,
    pub diff_range: DiffRange,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub retry: RetryPolicy,
    pub reserved_key_policy: ReservedKeyPolicy,
    pub dry_run: bool,
    pub log_format: LogFormat,
}

impl Settings {
    /// Validates parsed arguments. The host is checked before the token.
    pub fn from_args(args: ProcessorArgs) -> Result<Self, ConfigError> {
        let api_host = args
            .api_host
            .filter(|host| !host.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing {
                name: "API_HOST".to_string(),
            })?;
        let api_host = api_host.trim().to_string();
        parse_api_host(&api_host).map_err(|e| ConfigError::InvalidValue {
            name: "API_HOST".to_string(),
            reason: e.to_string(),
        })?;

        let api_token = match resolve_secret(
            args.api_token.as_deref(),
            args.api_token_file.as_deref(),
        ) {
            Ok(token) => token,
            Err(SecretError::NoSourceProvided) => {
                return Err(ConfigError::Missing {
                    name: "API_TOKEN".to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        if args.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "timeout-secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if args.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "connect-timeout-secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        let reserved_key_policy = if args.reject_reserved_keys {
            ReservedKeyPolicy::Reject
        } else {
            ReservedKeyPolicy::Overwrite
        };

        Ok(Self {
            api_host,
            api_token,
            repo_dir: args.repo,
            diff_range: DiffRange {
                base: args.base,
                head: args.head,
            },
            request_timeout: Duration::from_secs(args.timeout_secs),
            connect_timeout: Duration::from_secs(args.connect_timeout_secs),
            retry: RetryPolicy::default().with_max_retries(args.max_retries),
            reserved_key_policy,
            dry_run: args.dry_run,
            log_format: args.log_format,
        })
    }

    /// HTTP settings for the bulk uploader.
    pub fn uploader_config(&self) -> UploaderConfig {
        UploaderConfig {
            api_host: self.api_host.clone(),
            api_token: SecretString::from(self.api_token.expose_secret().to_string()),
            request_timeout: self.request_timeout,
            connect_timeout: self.connect_timeout,
            retry: self.retry,
            dry_run: self.dry_run,
        }
    }
}
