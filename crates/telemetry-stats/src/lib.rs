//! Telemetry Statistics
//!
//! Percentile estimation and summary statistics over sensor sample series.

mod quantile;
mod rounding;
mod summary;

pub use quantile::{quantile, quantiles};
pub use rounding::round_to;
pub use summary::SampleSummary;
