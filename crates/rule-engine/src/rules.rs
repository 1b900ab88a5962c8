//! Rule Document Model
//!
//! The serde layout of these types is the arbiter's wire format: field and
//! variant names must not change.

use crate::error::RuleError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Environmental sensor covered by the rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sensor {
    /// Air temperature (°C)
    #[serde(rename = "temp")]
    Temperature,
    /// Relative humidity (%)
    #[serde(rename = "humidity")]
    Humidity,
    /// Ambient light (raw LDR units)
    #[serde(rename = "ldr")]
    Light,
}

impl Sensor {
    /// All sensors in document order
    pub const ALL: [Sensor; 3] = [Sensor::Temperature, Sensor::Humidity, Sensor::Light];

    /// Key used for this sensor in the rule document
    pub fn as_str(&self) -> &'static str {
        match self {
            Sensor::Temperature => "temp",
            Sensor::Humidity => "humidity",
            Sensor::Light => "ldr",
        }
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison applied between a reading and a threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = ">")]
    Greater,
}

impl Operator {
    /// Whether `reading <op> threshold` holds
    pub fn holds(&self, reading: f64, threshold: f64) -> bool {
        match self {
            Operator::GreaterOrEqual => reading >= threshold,
            Operator::LessOrEqual => reading <= threshold,
            Operator::Less => reading < threshold,
            Operator::Greater => reading > threshold,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::GreaterOrEqual => ">=",
            Operator::LessOrEqual => "<=",
            Operator::Less => "<",
            Operator::Greater => ">",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Rule threshold or bound as written to the document.
///
/// Fixed literals stay integers on the wire (`45`), derived values stay
/// floats (`40.0`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Integer(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Number::Integer(_) => true,
            Number::Float(f) => f.is_finite(),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(v) => write!(f, "{:?}", v),
        }
    }
}

/// Single-sensor anomaly test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndividualRule {
    sensor: Sensor,
    #[serde(rename = "op")]
    operator: Operator,
    #[serde(rename = "value")]
    threshold: Number,
}

impl IndividualRule {
    pub(crate) fn new(sensor: Sensor, operator: Operator, threshold: impl Into<Number>) -> Self {
        Self {
            sensor,
            operator,
            threshold: threshold.into(),
        }
    }

    pub fn sensor(&self) -> Sensor {
        self.sensor
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn threshold(&self) -> f64 {
        self.threshold.as_f64()
    }

    /// Whether a reading of this rule's sensor is anomalous
    pub fn is_violated_by(&self, reading: f64) -> bool {
        self.operator.holds(reading, self.threshold())
    }
}

impl fmt::Display for IndividualRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.sensor, self.operator, self.threshold)
    }
}

/// Inclusive range a sensor must fall in for a compound rule to fire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Condition {
    sensor: Sensor,
    min: Number,
    max: Number,
}

impl Condition {
    pub(crate) fn new(sensor: Sensor, min: impl Into<Number>, max: impl Into<Number>) -> Self {
        Self {
            sensor,
            min: min.into(),
            max: max.into(),
        }
    }

    pub fn sensor(&self) -> Sensor {
        self.sensor
    }

    pub fn min(&self) -> f64 {
        self.min.as_f64()
    }

    pub fn max(&self) -> f64 {
        self.max.as_f64()
    }

    pub fn contains(&self, reading: f64) -> bool {
        self.min() <= reading && reading <= self.max()
    }
}

/// Compound anomaly: fires only when every condition holds at once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssociatedRule {
    label: String,
    #[serde(rename = "allOf")]
    conditions: Vec<Condition>,
}

impl AssociatedRule {
    pub(crate) fn new(label: impl Into<String>, conditions: Vec<Condition>) -> Self {
        Self {
            label: label.into(),
            conditions,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Evaluate against the latest readings.
    ///
    /// A sensor without a reading fails its condition, and a rule without
    /// conditions never fires.
    pub fn is_triggered_by<F>(&self, reading: F) -> bool
    where
        F: Fn(Sensor) -> Option<f64>,
    {
        !self.conditions.is_empty()
            && self
                .conditions
                .iter()
                .all(|c| reading(c.sensor).is_some_and(|r| c.contains(r)))
    }
}

/// Versioned rule set handed to the arbiter.
///
/// Built fresh on every derivation; there are no mutating methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDocument {
    version: i64,
    individual: Vec<IndividualRule>,
    associated: Vec<AssociatedRule>,
}

impl RuleDocument {
    pub(crate) fn new(
        built_at: DateTime<Utc>,
        individual: Vec<IndividualRule>,
        associated: Vec<AssociatedRule>,
    ) -> Self {
        Self {
            version: built_at.timestamp(),
            individual,
            associated,
        }
    }

    /// Build time in seconds since the Unix epoch
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Build time as a timestamp, if representable
    pub fn built_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.version, 0)
    }

    pub fn individual(&self) -> &[IndividualRule] {
        &self.individual
    }

    pub fn associated(&self) -> &[AssociatedRule] {
        &self.associated
    }

    /// First individual rule for `sensor`
    pub fn rule_for(&self, sensor: Sensor) -> Option<&IndividualRule> {
        self.individual.iter().find(|r| r.sensor == sensor)
    }

    /// Associated rule with the given label
    pub fn associated_rule(&self, label: &str) -> Option<&AssociatedRule> {
        self.associated.iter().find(|r| r.label == label)
    }

    /// Whether the rule content (ignoring `version`) equals `other`'s
    pub fn same_rules_as(&self, other: &RuleDocument) -> bool {
        self.individual == other.individual && self.associated == other.associated
    }

    /// Check that every number is finite and every range is non-empty
    pub fn validate(&self) -> Result<(), RuleError> {
        for rule in &self.individual {
            if !rule.threshold.is_finite() {
                return Err(RuleError::NonFiniteThreshold {
                    sensor: rule.sensor,
                    value: rule.threshold(),
                });
            }
        }

        for rule in &self.associated {
            for c in &rule.conditions {
                if !c.min.is_finite() || !c.max.is_finite() {
                    return Err(RuleError::NonFiniteBound {
                        label: rule.label.clone(),
                        sensor: c.sensor,
                        min: c.min(),
                        max: c.max(),
                    });
                }
                if c.min() > c.max() {
                    return Err(RuleError::InvertedRange {
                        label: rule.label.clone(),
                        sensor: c.sensor,
                        min: c.min(),
                        max: c.max(),
                    });
                }
            }
        }

        Ok(())
    }
}
