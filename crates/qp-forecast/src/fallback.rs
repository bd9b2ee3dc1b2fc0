//! Moving-average fallback forecast.
//!
//! When the external model cannot be trained (too little history, missing
//! dependency, failed fit) the dashboard still shows a forward band built
//! from the recent average.

use qp_core::Real;
use qp_time::{parse_quarter, quarters_until_year_end};

use crate::series::{ConfidenceBand, ForecastSource};

/// Number of trailing points averaged.
const AVERAGE_WINDOW: usize = 4;

/// Relative half-width of the fallback band.
const BAND_RATIO: Real = 0.10;

/// Forecast `steps` quarters after `anchor_label` as the mean of the last
/// (up to four) finite values of `history`, with a ±10 % band.
///
/// Returns `None` when the anchor is not a quarter label or the trailing
/// window holds no finite value.
pub fn moving_average_forecast(
    history: &[Real],
    anchor_label: &str,
    steps: usize,
) -> Option<ForecastSource> {
    let anchor = parse_quarter(anchor_label)?;
    let window = &history[history.len().saturating_sub(AVERAGE_WINDOW)..];
    let finite: Vec<Real> = window.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    let avg = finite.iter().sum::<Real>() / finite.len() as Real;

    let labels = std::iter::successors(Some(anchor.next()), |q| Some(q.next()))
        .take(steps)
        .map(|q| q.label())
        .collect();
    Some(
        ForecastSource::new(labels, vec![avg; steps]).with_ci(ConfidenceBand::new(
            vec![avg * (1.0 - BAND_RATIO); steps],
            vec![avg * (1.0 + BAND_RATIO); steps],
        )),
    )
}

/// Number of quarters a forecast should cover from `anchor_label`: enough
/// to reach the end of `target_year`, and never fewer than `min_steps`.
///
/// An unparsable anchor yields `min_steps`.
pub fn forecast_horizon(anchor_label: &str, target_year: i32, min_steps: usize) -> usize {
    parse_quarter(anchor_label)
        .map_or(0, |q| quarters_until_year_end(q, target_year))
        .max(min_steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn averages_trailing_window() {
        let f = moving_average_forecast(&[100.0, 2.0, 4.0, 6.0, 8.0], "Q4 2024", 3).unwrap();
        assert_eq!(f.labels, vec!["Q1 2025", "Q2 2025", "Q3 2025"]);
        assert_eq!(f.values, vec![5.0; 3]);
        let ci = f.ci.unwrap();
        assert_abs_diff_eq!(ci.lower[0], 4.5, epsilon = 1e-12);
        assert_abs_diff_eq!(ci.upper[2], 5.5, epsilon = 1e-12);
    }

    #[test]
    fn non_finite_points_in_window_are_ignored() {
        let f = moving_average_forecast(&[3.0, f64::NAN, 5.0], "2024 Q2", 1).unwrap();
        assert_eq!(f.values, vec![4.0]);
        assert_eq!(f.labels, vec!["Q3 2024"]);
    }

    #[test]
    fn nothing_to_average() {
        assert!(moving_average_forecast(&[], "Q1 2024", 4).is_none());
        assert!(moving_average_forecast(&[f64::NAN], "Q1 2024", 4).is_none());
        assert!(moving_average_forecast(&[1.0], "latest", 4).is_none());
    }

    #[test]
    fn horizon() {
        assert_eq!(forecast_horizon("Q4 2024", 2031, 8), 28);
        assert_eq!(forecast_horizon("Q2 2031", 2031, 8), 8);
        assert_eq!(forecast_horizon("n/a", 2031, 8), 8);
    }
}
