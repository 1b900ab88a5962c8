//! Percentile Estimation
//!
//! Linear interpolation between order statistics: for `n` samples the rank of
//! percentile `q` is `q / 100 * (n - 1)`, and the result is interpolated
//! between the two sorted samples bracketing that rank.

/// Compute the `q`-th percentile (`0..=100`) of `samples`.
///
/// Returns `None` for an empty series. Input order is irrelevant; a sorted
/// copy is taken. `q` outside `[0, 100]` is clamped into range.
pub fn quantile(samples: &[f64], q: f64) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }

    let sorted = sorted_copy(samples);
    Some(percentile_of_sorted(&sorted, q))
}

/// Compute several percentiles with a single sort.
///
/// The result has one entry per requested percentile, in request order.
/// Returns `None` for an empty series.
pub fn quantiles(samples: &[f64], qs: &[f64]) -> Option<Vec<f64>> {
    if samples.is_empty() {
        return None;
    }

    let sorted = sorted_copy(samples);
    Some(qs.iter().map(|&q| percentile_of_sorted(&sorted, q)).collect())
}

fn sorted_copy(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// `sorted` must be non-empty and ascending.
fn percentile_of_sorted(sorted: &[f64], q: f64) -> f64 {
    let last = sorted.len() - 1;
    if last == 0 {
        return sorted[0];
    }

    let q = if q.is_nan() { 0.0 } else { q.clamp(0.0, 100.0) };
    let rank = q / 100.0 * last as f64;
    let lo = (rank.floor() as usize).min(last);
    let hi = (rank.ceil() as usize).min(last);

    if lo == hi {
        sorted[lo]
    } else {
        lerp(sorted[lo], sorted[hi], rank - lo as f64)
    }
}

/// Interpolate from whichever end is closer, which keeps the result exact at
/// both endpoints and inside `[a, b]`.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}
