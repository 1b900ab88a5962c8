//! Adafruit IO Feed Client

use crate::coerce::coerce_records;
use crate::{SampleSource, SourceError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Public Adafruit IO REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://io.adafruit.com/api/v2";

/// Samples requested per feed unless configured otherwise
pub const DEFAULT_LIMIT: usize = 1000;

/// Account credentials for the telemetry store
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub key: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            key: key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Connection settings
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// REST API root, without trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Reads feed history from Adafruit IO
pub struct AdafruitSource {
    config: SourceConfig,
    credentials: Credentials,
    client: reqwest::Client,
}

impl AdafruitSource {
    /// Create a client; credentials must be non-empty
    pub fn new(config: SourceConfig, credentials: Credentials) -> Result<Self, SourceError> {
        if credentials.username.trim().is_empty() {
            return Err(SourceError::Config("username is empty".to_string()));
        }
        if credentials.key.trim().is_empty() {
            return Err(SourceError::Config("key is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::Config(format!("HTTP client: {}", e)))?;

        info!(
            "Created Adafruit IO source for {} at {}",
            credentials.username, config.base_url
        );
        Ok(Self {
            config,
            credentials,
            client,
        })
    }

    /// Data endpoint of `feed`
    pub fn feed_url(&self, feed: &str) -> String {
        format!(
            "{}/{}/feeds/{}/data",
            self.config.base_url.trim_end_matches('/'),
            self.credentials.username,
            feed
        )
    }
}

#[async_trait]
impl SampleSource for AdafruitSource {
    async fn fetch(&self, feed: &str, limit: usize) -> Result<Vec<f64>, SourceError> {
        let url = self.feed_url(feed);
        debug!("GET {} (limit {})", url, limit);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .header("X-AIO-Key", &self.credentials.key)
            .send()
            .await
            .map_err(|e| SourceError::Request {
                feed: feed.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                feed: feed.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| SourceError::Request {
            feed: feed.to_string(),
            message: e.to_string(),
        })?;

        parse_feed_page(feed, &body)
    }
}

/// Decode a newest-first page of feed records into a chronological series
pub(crate) fn parse_feed_page(feed: &str, body: &str) -> Result<Vec<f64>, SourceError> {
    let records: Vec<Value> = serde_json::from_str(body).map_err(|e| SourceError::Decode {
        feed: feed.to_string(),
        message: e.to_string(),
    })?;

    let mut samples = coerce_records(&records);
    samples.reverse();

    debug!(
        feed,
        received = records.len(),
        dropped = records.len() - samples.len(),
        "Decoded feed page"
    );
    Ok(samples)
}
