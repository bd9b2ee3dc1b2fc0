//! Historical ratio between two aligned series.
//!
//! Used to carry the observed relationship between, say, estimate and demand
//! into projected quarters: a future estimate is the projected demand times
//! the mean historical `estimate / demand` ratio.

use qp_core::Real;

/// Mean of `numerators[i] / denominators[i]` over the valid pairs.
///
/// Pairs are taken positionally up to the shorter length.  A pair is valid
/// when both values are finite and the denominator is non-zero.  Returns
/// `None` when no pair is valid.
pub fn average_ratio(numerators: &[Real], denominators: &[Real]) -> Option<Real> {
    let (sum, count) = numerators
        .iter()
        .zip(denominators)
        .filter(|(n, d)| n.is_finite() && d.is_finite() && **d != 0.0)
        .fold((0.0, 0usize), |(sum, count), (n, d)| (sum + n / d, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as Real)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn skips_zero_denominator() {
        assert_eq!(average_ratio(&[10.0, 20.0], &[5.0, 0.0]), Some(2.0));
    }

    #[test]
    fn mean_of_ratios() {
        let r = average_ratio(&[10.0, 30.0, 8.0], &[10.0, 20.0, 4.0]).unwrap();
        assert_abs_diff_eq!(r, (1.0 + 1.5 + 2.0) / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn skips_non_finite() {
        let r = average_ratio(
            &[f64::NAN, 6.0, f64::INFINITY, 4.0],
            &[1.0, 3.0, 2.0, f64::NEG_INFINITY],
        );
        assert_eq!(r, Some(2.0));
    }

    #[test]
    fn truncates_to_shorter() {
        assert_eq!(average_ratio(&[9.0, 100.0, 100.0], &[3.0]), Some(3.0));
    }

    #[test]
    fn none_without_valid_pairs() {
        assert_eq!(average_ratio(&[], &[]), None);
        assert_eq!(average_ratio(&[1.0, 2.0], &[0.0, 0.0]), None);
        assert_eq!(average_ratio(&[f64::NAN], &[1.0]), None);
    }
}
