//! In-Memory Sample Source

use crate::{SampleSource, SourceError};
use async_trait::async_trait;
use std::collections::HashMap;

/// Serves fixed series, for tests and offline runs
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    feeds: HashMap<String, Vec<f64>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a feed with samples in chronological order
    pub fn with_feed(mut self, feed: impl Into<String>, samples: Vec<f64>) -> Self {
        self.feeds.insert(feed.into(), samples);
        self
    }
}

#[async_trait]
impl SampleSource for InMemorySource {
    async fn fetch(&self, feed: &str, limit: usize) -> Result<Vec<f64>, SourceError> {
        let samples = self
            .feeds
            .get(feed)
            .ok_or_else(|| SourceError::UnknownFeed(feed.to_string()))?;

        // Most recent `limit` samples, still oldest first
        let start = samples.len().saturating_sub(limit);
        Ok(samples[start..].to_vec())
    }
}
