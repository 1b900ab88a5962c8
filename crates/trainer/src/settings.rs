//! Trainer Configuration
//!
//! Layered, lowest priority first: built-in defaults, an optional config
//! file, `RULE_TRAINER__<SECTION>__<KEY>` environment variables, then the
//! legacy `AIO_USERNAME` / `AIO_KEY` variables for credentials that are still
//! unset.

use anyhow::{bail, Context, Result};
use rule_engine::DerivationConfig;
use sample_source::{Credentials, SourceConfig, DEFAULT_BASE_URL, DEFAULT_LIMIT};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_PREFIX: &str = "RULE_TRAINER";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub source: SourceSettings,
    pub feeds: FeedSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
    pub derivation: DerivationConfig,
}

/// Telemetry store connection
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub base_url: String,
    pub username: String,
    pub key: String,
    /// Samples fetched per feed
    pub limit: usize,
    pub timeout_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: String::new(),
            key: String::new(),
            limit: DEFAULT_LIMIT,
            timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for SourceSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceSettings")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("key", &"<redacted>")
            .field("limit", &self.limit)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl SourceSettings {
    pub fn connection(&self) -> SourceConfig {
        SourceConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.key.clone())
    }
}

/// Feed names of each sensor in the telemetry store
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    pub temperature: String,
    pub humidity: String,
    pub light: String,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            temperature: "temp".to_string(),
            humidity: "humidity".to_string(),
            light: "ldr".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Where the rule document is written
    pub path: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("arb.json"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Emit JSON log lines instead of human-readable text
    pub json: bool,
}

impl TrainerConfig {
    /// Load from an optional file and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::from_sources(path, std::env::vars().collect())
    }

    /// Load from an optional file and an explicit set of environment variables
    pub fn from_sources(path: Option<&Path>, env: HashMap<String, String>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(env.clone())),
            )
            .build()
            .context("Failed to read trainer configuration")?;

        let mut config: TrainerConfig = settings
            .try_deserialize()
            .context("Invalid trainer configuration")?;

        if config.source.username.is_empty() {
            if let Some(username) = env.get("AIO_USERNAME") {
                config.source.username = username.clone();
            }
        }
        if config.source.key.is_empty() {
            if let Some(key) = env.get("AIO_KEY") {
                config.source.key = key.clone();
            }
        }

        Ok(config)
    }

    /// Reject configurations that cannot produce a run
    pub fn validate(&self) -> Result<()> {
        if self.source.username.trim().is_empty() || self.source.key.trim().is_empty() {
            bail!("Telemetry credentials missing: set source.username and source.key");
        }
        if self.source.limit == 0 {
            bail!("source.limit must be greater than zero");
        }

        for (name, feed) in [
            ("temperature", &self.feeds.temperature),
            ("humidity", &self.feeds.humidity),
            ("light", &self.feeds.light),
        ] {
            if feed.trim().is_empty() {
                bail!("feeds.{} must not be empty", name);
            }
        }

        let d = &self.derivation;
        for (name, q) in [
            ("temperature_high_percentile", d.temperature_high_percentile),
            ("humidity_low_percentile", d.humidity_low_percentile),
            ("light_low_percentile", d.light_low_percentile),
            ("hot_band_low_percentile", d.hot_band_low_percentile),
            ("hot_band_high_percentile", d.hot_band_high_percentile),
            ("dry_band_percentile", d.dry_band_percentile),
        ] {
            if !(0.0..=100.0).contains(&q) {
                bail!("derivation.{} = {} is outside [0, 100]", name, q);
            }
        }
        if !d.temperature_margin.is_finite() || !d.light_default.is_finite() {
            bail!("derivation margins must be finite");
        }

        Ok(())
    }
}
