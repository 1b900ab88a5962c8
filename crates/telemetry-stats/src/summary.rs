//! Sample Series Summary

use serde::Serialize;

/// Basic shape of a sample series, reported before rules are derived
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SampleSummary {
    /// Number of samples
    pub count: usize,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Mean value
    pub mean: f64,
}

impl SampleSummary {
    /// Summarize a series; an empty series yields all zeros
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        Self {
            count: values.len(),
            min,
            max,
            mean,
        }
    }

    /// Whether the series had no samples
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let summary = SampleSummary::compute(&[21.0, 19.5, 24.5]);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.min, 19.5);
        assert_eq!(summary.max, 24.5);
        assert!((summary.mean - 65.0 / 3.0).abs() < 0.001);
    }

    #[test]
    fn test_empty_values() {
        let summary = SampleSummary::compute(&[]);
        assert!(summary.is_empty());
        assert_eq!(summary.mean, 0.0);
    }
}
