//! Decimal Rounding

/// Round `value` to `decimals` places, ties to even on the exact binary value.
///
/// `2.675` is stored just below the half and rounds down to `2.67`; `0.125`
/// is an exact half and rounds to the even `0.12`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if decimals == 0 || !value.is_finite() {
        return value.round_ties_even();
    }
    // Fixed-precision formatting is exact and breaks ties to even
    format!("{:.*}", decimals as usize, value)
        .parse()
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_decimals() {
        assert_eq!(round_to(39.599999999999994, 2), 39.6);
        assert_eq!(round_to(12.345678, 2), 12.35);
        assert_eq!(round_to(-3.14159, 2), -3.14);
    }

    #[test]
    fn test_zero_decimals() {
        assert_eq!(round_to(118.4, 0), 118.0);
        assert_eq!(round_to(118.6, 0), 119.0);
    }

    #[test]
    fn test_ties_go_to_even() {
        assert_eq!(round_to(100.5, 0), 100.0);
        assert_eq!(round_to(101.5, 0), 102.0);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(1.125, 2), 1.12);
    }

    #[test]
    fn test_below_half_in_binary() {
        // 2.675 is 2.67499999999999982236431605997495353221893310546875
        assert_eq!(round_to(2.675, 2), 2.67);
    }

    #[test]
    fn test_huge_value_passes_through() {
        assert_eq!(round_to(f64::MAX, 2), f64::MAX);
    }
}
