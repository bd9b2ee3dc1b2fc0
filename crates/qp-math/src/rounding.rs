//! Decimal rounding for reported totals.

use qp_core::Real;

/// Round `value` to `decimals` places, ties away from zero.
///
/// Non-finite values are returned unchanged.
pub fn round_to(value: Real, decimals: i32) -> Real {
    if !value.is_finite() {
        return value;
    }
    let mult = 10_f64.powi(decimals);
    (value * mult).round() / mult
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_decimals() {
        assert!((round_to(1.23456, 3) - 1.235).abs() < 1e-12);
        assert!((round_to(0.1 + 0.2, 3) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn two_decimals() {
        assert!((round_to(12.344, 2) - 12.34).abs() < 1e-12);
        assert!((round_to(-2.5, 0) + 3.0).abs() < 1e-12);
    }

    #[test]
    fn non_finite_passthrough() {
        assert!(round_to(f64::NAN, 3).is_nan());
        assert_eq!(round_to(f64::INFINITY, 3), f64::INFINITY);
    }
}
