//! Rule Document Errors

use crate::rules::Sensor;
use thiserror::Error;

/// Reasons a rule document is not fit to hand to the arbiter
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    /// Threshold is NaN or infinite
    #[error("{sensor} threshold {value} is not finite")]
    NonFiniteThreshold { sensor: Sensor, value: f64 },

    /// Compound condition bound is NaN or infinite
    #[error("{label}: {sensor} bound is not finite (min {min}, max {max})")]
    NonFiniteBound {
        label: String,
        sensor: Sensor,
        min: f64,
        max: f64,
    },

    /// Compound condition with an empty range
    #[error("{label}: {sensor} range is inverted (min {min} > max {max})")]
    InvertedRange {
        label: String,
        sensor: Sensor,
        min: f64,
        max: f64,
    },
}
