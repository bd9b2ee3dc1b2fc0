//! Trend projection: the next value of a series from the average first
//! difference of its most recent points.

use qp_core::Real;

/// Number of trailing finite points used to estimate the slope.
pub const TREND_WINDOW: usize = 4;

/// Project the value following `series`.
///
/// Non-finite values are dropped first.  With no finite value the result is
/// `0`; with a single one it is that value.  Otherwise the slope is the mean
/// first difference over the last [`TREND_WINDOW`] finite values, and the
/// projection is `max(0, last + slope)`: planned counts never go negative.
pub fn project_next_value(series: &[Real]) -> Real {
    let finite: Vec<Real> = series.iter().copied().filter(|v| v.is_finite()).collect();
    let window = &finite[finite.len().saturating_sub(TREND_WINDOW)..];
    let last = match window.last() {
        Some(&v) => v,
        None => return 0.0,
    };
    if window.len() < 2 {
        return last;
    }
    let slope = window.windows(2).map(|w| w[1] - w[0]).sum::<Real>() / (window.len() - 1) as Real;
    (last + slope).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn average_slope_of_window() {
        // diffs 2, -1, 2 → slope 1
        assert_abs_diff_eq!(project_next_value(&[10.0, 12.0, 11.0, 13.0]), 14.0, epsilon = 1e-12);
    }

    #[test]
    fn single_value_is_repeated() {
        assert_eq!(project_next_value(&[5.0]), 5.0);
    }

    #[test]
    fn empty_or_all_non_finite_is_zero() {
        assert_eq!(project_next_value(&[]), 0.0);
        assert_eq!(project_next_value(&[f64::NAN, f64::INFINITY]), 0.0);
    }

    #[test]
    fn only_trailing_window_counts() {
        // The leading 1000 is outside the last four points.
        assert_abs_diff_eq!(
            project_next_value(&[1000.0, 1.0, 2.0, 3.0, 4.0]),
            5.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn non_finite_values_are_skipped_before_windowing() {
        assert_abs_diff_eq!(
            project_next_value(&[2.0, f64::NAN, 4.0, 6.0]),
            8.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn clamped_at_zero() {
        assert_eq!(project_next_value(&[9.0, 6.0, 3.0, 1.0]), 0.0);
    }

    #[test]
    fn single_finite_negative_is_not_clamped() {
        assert_eq!(project_next_value(&[f64::NAN, -3.0]), -3.0);
    }

    proptest::proptest! {
        #[test]
        fn never_negative_with_two_points(
            xs in proptest::collection::vec(-1e6..1e6f64, 2..20)
        ) {
            proptest::prop_assert!(project_next_value(&xs) >= 0.0);
        }

        #[test]
        fn constant_series_is_flat(v in 0.0..1e6f64, n in 1usize..10) {
            proptest::prop_assert_eq!(project_next_value(&vec![v; n]), v);
        }
    }
}
