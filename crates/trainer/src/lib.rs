//! Rule Trainer
//!
//! Sequences one training run: fetch the three sensor feeds, derive the rule
//! document, and hand it to the sink.

mod cli;
mod settings;

pub use cli::Cli;
pub use settings::{FeedSettings, LoggingSettings, OutputSettings, SourceSettings, TrainerConfig};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rule_engine::{RuleBuilder, RuleDocument, Sensor, SensorHistory};
use sample_source::{fetch_optional, SampleSource, SourceError};
use telemetry_stats::SampleSummary;
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging; `RUST_LOG` overrides the default INFO level
pub fn init_logging(json: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true);

    let result = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.expect("Failed to set tracing subscriber");
}

/// Fetch all three feeds concurrently.
///
/// Temperature and humidity failures are errors; light degrades to empty.
pub async fn collect_history(
    source: &dyn SampleSource,
    feeds: &FeedSettings,
    limit: usize,
) -> Result<SensorHistory, SourceError> {
    let (temperature, humidity, light) = tokio::join!(
        source.fetch(&feeds.temperature, limit),
        source.fetch(&feeds.humidity, limit),
        fetch_optional(source, &feeds.light, limit),
    );

    Ok(SensorHistory::new(temperature?, humidity?, light))
}

/// Run one fetch and derivation, versioning the result with `built_at`
pub async fn train(
    source: &dyn SampleSource,
    config: &TrainerConfig,
    built_at: DateTime<Utc>,
) -> Result<RuleDocument> {
    let history = collect_history(source, &config.feeds, config.source.limit)
        .await
        .context("Failed to fetch sensor history")?;

    for sensor in Sensor::ALL {
        let summary = SampleSummary::compute(history.series(sensor));
        if summary.is_empty() {
            warn!("No {} samples", sensor);
        } else {
            info!(
                "{}: {} samples, min {:.2}, max {:.2}, mean {:.2}",
                sensor, summary.count, summary.min, summary.max, summary.mean
            );
        }
    }

    // The builder warns when it falls back to the seed rules
    let document = RuleBuilder::new(config.derivation.clone()).build(&history, built_at);
    for rule in document.individual() {
        info!("Rule: {}", rule);
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rule_sink::FileSink;
    use sample_source::InMemorySource;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn greenhouse() -> InMemorySource {
        let temperature: Vec<f64> = (20..=40).map(f64::from).collect();
        let mut humidity = vec![30.0; 15];
        humidity.push(10.0);
        InMemorySource::new()
            .with_feed("temp", temperature)
            .with_feed("humidity", humidity)
    }

    #[tokio::test]
    async fn test_train_derives_without_light_feed() {
        let config = TrainerConfig::default();
        let doc = train(&greenhouse(), &config, at(1_714_557_600)).await.unwrap();

        assert!(!doc.is_seed());
        assert_eq!(doc.version(), 1_714_557_600);
        assert_eq!(doc.rule_for(Sensor::Temperature).unwrap().threshold(), 40.0);
        assert_eq!(doc.rule_for(Sensor::Humidity).unwrap().threshold(), 25.0);
        assert_eq!(doc.rule_for(Sensor::Light).unwrap().threshold(), 120.0);
    }

    #[tokio::test]
    async fn test_train_uses_light_feed() {
        let source = greenhouse().with_feed("ldr", vec![300.0; 40]);
        let doc = train(&source, &TrainerConfig::default(), at(0)).await.unwrap();
        assert_eq!(doc.rule_for(Sensor::Light).unwrap().threshold(), 300.0);
    }

    #[tokio::test]
    async fn test_train_seeds_on_empty_feed() {
        let source = InMemorySource::new()
            .with_feed("temp", vec![])
            .with_feed("humidity", vec![40.0, 41.0]);
        let doc = train(&source, &TrainerConfig::default(), at(5)).await.unwrap();
        assert!(doc.is_seed());
        assert_eq!(doc.version(), 5);
    }

    #[tokio::test]
    async fn test_train_derives_seed_valued_history() {
        // Derived thresholds that equal the seed numbers are still derived
        let source = InMemorySource::new()
            .with_feed("temp", vec![38.0, 42.0])
            .with_feed("humidity", vec![20.0, 35.0]);
        let mut config = TrainerConfig::default();
        config.derivation.temperature_high_percentile = 100.0;
        config.derivation.temperature_margin = 3.0;
        config.derivation.humidity_low_percentile = 0.0;
        config.derivation.hot_band_low_percentile = 0.0;
        config.derivation.hot_band_high_percentile = 100.0;
        config.derivation.dry_band_percentile = 100.0;

        let doc = train(&source, &config, at(5)).await.unwrap();
        assert_eq!(doc.rule_for(Sensor::Temperature).unwrap().threshold(), 45.0);
        assert_eq!(doc.rule_for(Sensor::Humidity).unwrap().threshold(), 20.0);
        assert!(!doc.is_seed());
    }

    #[tokio::test]
    async fn test_missing_required_feed_fails() {
        let source = InMemorySource::new().with_feed("temp", vec![25.0]);
        let result = train(&source, &TrainerConfig::default(), at(0)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_limit_and_feed_names_respected() {
        let source = InMemorySource::new()
            .with_feed("greenhouse-temp", vec![90.0, 90.0, 20.0, 21.0])
            .with_feed("greenhouse-rh", vec![50.0, 55.0]);

        let mut config = TrainerConfig::default();
        config.feeds.temperature = "greenhouse-temp".to_string();
        config.feeds.humidity = "greenhouse-rh".to_string();
        config.source.limit = 2;

        let history = collect_history(&source, &config.feeds, config.source.limit)
            .await
            .unwrap();
        assert_eq!(history.temperature, vec![20.0, 21.0]);
        assert_eq!(history.humidity, vec![50.0, 55.0]);
        assert!(history.light.is_empty());
    }

    #[tokio::test]
    async fn test_train_then_write() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("arb.json"));

        let doc = train(&greenhouse(), &TrainerConfig::default(), at(1_714_557_600))
            .await
            .unwrap();
        sink.write(&doc).unwrap();

        assert_eq!(sink.read().unwrap(), doc);
    }
}
