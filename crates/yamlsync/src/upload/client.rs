//! HTTP client for `PUT /api/v1/bulk/{resource}?upsert=true`.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, info, info_span, warn, Instrument};

use super::error::{Result, UploadError};
use super::retry::RetryPolicy;
use crate::record::Envelope;
use crate::sanitize::{redact_url, truncate_body};

/// Default connect timeout for HTTP requests (10 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default request timeout for HTTP requests (30 seconds).
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`BulkUploader`].
#[derive(Debug)]
pub struct UploaderConfig {
    pub api_host: String,
    pub api_token: SecretString,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub retry: RetryPolicy,
    pub dry_run: bool,
}

impl UploaderConfig {
    pub fn new(api_host: impl Into<String>, api_token: SecretString) -> Self {
        Self {
            api_host: api_host.into(),
            api_token,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            retry: RetryPolicy::default(),
            dry_run: false,
        }
    }
}

/// Outcome of a successful (or dry-run) upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub resource: String,
    pub records: usize,
    /// Requests sent; zero for a dry run.
    pub attempts: u32,
    pub dry_run: bool,
}

/// Sends resource batches to the bulk upsert endpoint.
pub struct BulkUploader {
    client: Client,
    base_url: Url,
    config: UploaderConfig,
}

/// Creates an HTTP client with appropriate timeouts.
fn create_http_client(config: &UploaderConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .build()
        .map_err(|e| UploadError::Client(e.to_string()))
}

/// Parses the API host, which must be an absolute http(s) URL.
pub fn parse_api_host(host: &str) -> Result<Url> {
    let invalid = |reason: String| UploadError::InvalidUrl {
        url: host.to_string(),
        reason,
    };

    let url = Url::parse(host).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{}'", other))),
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be a base".to_string()));
    }
    Ok(url)
}

impl BulkUploader {
    pub fn new(config: UploaderConfig) -> Result<Self> {
        let base_url = parse_api_host(&config.api_host)?;
        Ok(Self {
            client: create_http_client(&config)?,
            base_url,
            config,
        })
    }

    pub fn config(&self) -> &UploaderConfig {
        &self.config
    }

    /// Builds `{host}/api/v1/bulk/{resource}?upsert=true`.
    ///
    /// A trailing slash on the host is dropped and the resource name is
    /// percent-encoded as a single path segment.
    pub fn bulk_url(&self, resource: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UploadError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(["api", "v1", "bulk", resource]);
        url.set_query(Some("upsert=true"));
        Ok(url)
    }

    /// Serializes a batch as the JSON array body.
    pub fn encode(resource: &str, envelopes: &[Envelope]) -> Result<Vec<u8>> {
        serde_json::to_vec(envelopes).map_err(|e| UploadError::Serialize {
            resource: resource.to_string(),
            source: e,
        })
    }

    /// Upserts one resource's batch, retrying transient failures.
    pub async fn upload(&self, resource: &str, envelopes: &[Envelope]) -> Result<UploadReceipt> {
        let span = info_span!("sync.upload", resource, records = envelopes.len());
        self.upload_inner(resource, envelopes).instrument(span).await
    }

    async fn upload_inner(&self, resource: &str, envelopes: &[Envelope]) -> Result<UploadReceipt> {
        let body = Self::encode(resource, envelopes)?;
        let url = self.bulk_url(resource)?;
        let display_url = redact_url(url.as_str());

        if self.config.dry_run {
            info!(
                url = %display_url,
                payload = %String::from_utf8_lossy(&body),
                "Dry run, skipping upload"
            );
            return Ok(UploadReceipt {
                resource: resource.to_string(),
                records: envelopes.len(),
                attempts: 0,
                dry_run: true,
            });
        }

        let retry = self.config.retry;
        let mut attempt = 0;

        loop {
            attempt += 1;
            if attempt > 1 {
                let delay = retry.delay_for(attempt - 1);
                info!(
                    "Retrying upload (attempt {}/{}) after {:?}",
                    attempt,
                    retry.max_attempts(),
                    delay
                );
                tokio::time::sleep(delay).await;
            }

            debug!(url = %display_url, bytes = body.len(), attempt, "Sending bulk upsert");

            match self.send_once(resource, &url, body.clone()).await {
                Ok(()) => {
                    info!("Uploaded: {} ({} records)", resource, envelopes.len());
                    return Ok(UploadReceipt {
                        resource: resource.to_string(),
                        records: envelopes.len(),
                        attempts: attempt,
                        dry_run: false,
                    });
                }
                Err(e) if e.is_retryable() && attempt < retry.max_attempts() => {
                    warn!("Upload failed with retryable error: {}", e);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send_once(&self, resource: &str, url: &Url, body: Vec<u8>) -> Result<()> {
        let response = self
            .client
            .put(url.clone())
            .bearer_auth(self.config.api_token.expose_secret())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| UploadError::Transport {
                resource: resource.to_string(),
                source: e,
            })?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        Err(UploadError::Rejected {
            resource: resource.to_string(),
            status: status.as_u16(),
            body: truncate_body(&text),
        })
    }
}
