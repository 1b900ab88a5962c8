//! Sensor Feed Retrieval
//!
//! Fetches recent sample history for a named feed and coerces raw record
//! values into numbers. Records whose value is not a finite number are
//! dropped here so downstream code only ever sees clean series.

mod adafruit;
mod coerce;
mod error;
mod memory;

pub use adafruit::{AdafruitSource, Credentials, SourceConfig, DEFAULT_BASE_URL, DEFAULT_LIMIT};
pub use coerce::{coerce_records, coerce_sample};
pub use error::SourceError;
pub use memory::InMemorySource;

use async_trait::async_trait;
use tracing::warn;

/// A store of chronologically ordered sensor samples
#[async_trait]
pub trait SampleSource: Send + Sync {
    /// Fetch up to `limit` of the most recent samples of `feed`, oldest first
    async fn fetch(&self, feed: &str, limit: usize) -> Result<Vec<f64>, SourceError>;
}

/// Fetch a feed whose absence is tolerable.
///
/// Any retrieval error is logged and turned into an empty series.
pub async fn fetch_optional(source: &dyn SampleSource, feed: &str, limit: usize) -> Vec<f64> {
    match source.fetch(feed, limit).await {
        Ok(samples) => samples,
        Err(e) => {
            warn!(feed, error = %e, "Optional feed unavailable, continuing without it");
            Vec::new()
        }
    }
}
