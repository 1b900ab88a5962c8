//! Rule Derivation
//!
//! Thresholds come from order statistics of recent history so that a single
//! noise spike cannot move them. Temperature and humidity are required; light
//! is optional and falls back to a fixed threshold.

use crate::rules::{AssociatedRule, Condition, IndividualRule, Operator, RuleDocument, Sensor};
use crate::seed::{seed_rules, HOT_AND_DRY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use telemetry_stats::{quantile, quantiles, round_to};
use tracing::{debug, warn};

/// Recent history of the three environmental sensors, oldest sample first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorHistory {
    pub temperature: Vec<f64>,
    pub humidity: Vec<f64>,
    pub light: Vec<f64>,
}

impl SensorHistory {
    pub fn new(temperature: Vec<f64>, humidity: Vec<f64>, light: Vec<f64>) -> Self {
        Self {
            temperature,
            humidity,
            light,
        }
    }

    /// Samples recorded for `sensor`
    pub fn series(&self, sensor: Sensor) -> &[f64] {
        match sensor {
            Sensor::Temperature => &self.temperature,
            Sensor::Humidity => &self.humidity,
            Sensor::Light => &self.light,
        }
    }

    /// Whether rules can be derived rather than seeded
    pub fn is_sufficient(&self) -> bool {
        !self.temperature.is_empty() && !self.humidity.is_empty()
    }
}

/// Percentile points and margins used on the derived path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivationConfig {
    /// Percentile of temperature for the "too hot" rule (default: 95)
    pub temperature_high_percentile: f64,
    /// Added to the hot threshold before rounding (default: 1.0)
    pub temperature_margin: f64,
    /// Percentile of humidity for the "too dry" rule (default: 5)
    pub humidity_low_percentile: f64,
    /// Percentile of light for the "too dark" rule (default: 5)
    pub light_low_percentile: f64,
    /// Light threshold when there is no light history (default: 120)
    pub light_default: f64,
    /// Lower edge of the hot band in the compound rule (default: 90)
    pub hot_band_low_percentile: f64,
    /// Upper edge of the hot band in the compound rule (default: 98)
    pub hot_band_high_percentile: f64,
    /// Upper humidity bound of the compound rule (default: 15)
    pub dry_band_percentile: f64,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            temperature_high_percentile: 95.0,
            temperature_margin: 1.0,
            humidity_low_percentile: 5.0,
            light_low_percentile: 5.0,
            light_default: 120.0,
            hot_band_low_percentile: 90.0,
            hot_band_high_percentile: 98.0,
            dry_band_percentile: 15.0,
        }
    }
}

/// Derives a [`RuleDocument`] from sensor history
#[derive(Debug, Clone, Default)]
pub struct RuleBuilder {
    config: DerivationConfig,
}

impl RuleBuilder {
    pub fn new(config: DerivationConfig) -> Self {
        Self { config }
    }

    /// Build rules from `history`, versioned with `built_at`
    pub fn build(&self, history: &SensorHistory, built_at: DateTime<Utc>) -> RuleDocument {
        self.build_from(
            &history.temperature,
            &history.humidity,
            &history.light,
            built_at,
        )
    }

    /// Build rules from individual series.
    ///
    /// Falls back to the seed rules when temperature or humidity is empty.
    /// Never fails.
    pub fn build_from(
        &self,
        temperature: &[f64],
        humidity: &[f64],
        light: &[f64],
        built_at: DateTime<Utc>,
    ) -> RuleDocument {
        let cfg = &self.config;

        let temp_points = quantiles(
            temperature,
            &[
                cfg.temperature_high_percentile,
                cfg.hot_band_low_percentile,
                cfg.hot_band_high_percentile,
            ],
        );
        let humidity_points = quantiles(
            humidity,
            &[cfg.humidity_low_percentile, cfg.dry_band_percentile],
        );

        let (Some(temp_points), Some(humidity_points)) = (temp_points, humidity_points) else {
            warn!(
                temperature = temperature.len(),
                humidity = humidity.len(),
                "Insufficient history, using seed rules"
            );
            return seed_rules(built_at);
        };

        let (t_high, t_band_low, t_band_high) = (temp_points[0], temp_points[1], temp_points[2]);
        let (h_low, h_band) = (humidity_points[0], humidity_points[1]);

        let temperature_high = round_to(t_high + cfg.temperature_margin, 2);
        let humidity_low = round_to(h_low.max(0.0), 2);
        let light_low = round_to(
            quantile(light, cfg.light_low_percentile)
                .unwrap_or(cfg.light_default)
                .max(0.0),
            0,
        );

        // The upper percentile can land below the lower one on tiny or
        // pathological inputs; the band must never be empty.
        let hot_min = round_to(t_band_low, 2);
        let hot_max = round_to(hot_min.max(t_band_high), 2);
        let dry_max = round_to(h_band.max(0.0), 2);

        debug!(
            temperature_high,
            humidity_low,
            light_low,
            hot_min,
            hot_max,
            dry_max,
            light_samples = light.len(),
            "Derived thresholds"
        );

        RuleDocument::new(
            built_at,
            vec![
                IndividualRule::new(
                    Sensor::Temperature,
                    Operator::GreaterOrEqual,
                    temperature_high,
                ),
                IndividualRule::new(Sensor::Humidity, Operator::LessOrEqual, humidity_low),
                IndividualRule::new(Sensor::Light, Operator::Less, light_low),
            ],
            vec![AssociatedRule::new(
                HOT_AND_DRY,
                vec![
                    Condition::new(Sensor::Temperature, hot_min, hot_max),
                    Condition::new(Sensor::Humidity, 0_i64, dry_max),
                ],
            )],
        )
    }
}

/// Derive rules with the default percentile points and margins
pub fn build_rules(
    temperature: &[f64],
    humidity: &[f64],
    light: &[f64],
    built_at: DateTime<Utc>,
) -> RuleDocument {
    RuleBuilder::default().build_from(temperature, humidity, light, built_at)
}
