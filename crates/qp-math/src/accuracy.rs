//! Forecast accuracy measures.
//!
//! All measures compare `actual` against `predicted` position by position up
//! to the shorter length, and ignore pairs where either side is non-finite.
//! A measure is `None` when no pair survives.

use qp_core::Real;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Denominator magnitude under which MAPE substitutes `1`.
const MAPE_FLOOR: Real = 1e-8;

fn finite_pairs(actual: &[Real], predicted: &[Real]) -> Vec<(Real, Real)> {
    actual
        .iter()
        .zip(predicted)
        .map(|(&y, &p)| (y, p))
        .filter(|(y, p)| y.is_finite() && p.is_finite())
        .collect()
}

fn mean_of(values: &[Real]) -> Option<Real> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().mean())
    }
}

/// Mean absolute error.
pub fn mae(actual: &[Real], predicted: &[Real]) -> Option<Real> {
    let errors: Vec<Real> = finite_pairs(actual, predicted)
        .into_iter()
        .map(|(y, p)| (y - p).abs())
        .collect();
    mean_of(&errors)
}

/// Root mean squared error.
pub fn rmse(actual: &[Real], predicted: &[Real]) -> Option<Real> {
    let squared: Vec<Real> = finite_pairs(actual, predicted)
        .into_iter()
        .map(|(y, p)| (y - p).powi(2))
        .collect();
    mean_of(&squared).map(Real::sqrt)
}

/// Mean absolute percentage error, in percent.
///
/// Actual values with magnitude below `1e-8` are divided by `1` instead.
pub fn mape(actual: &[Real], predicted: &[Real]) -> Option<Real> {
    let pct: Vec<Real> = finite_pairs(actual, predicted)
        .into_iter()
        .map(|(y, p)| {
            let denom = if y.abs() < MAPE_FLOOR { 1.0 } else { y.abs() };
            ((y - p) / denom).abs()
        })
        .collect();
    mean_of(&pct).map(|m| m * 100.0)
}

/// Coefficient of determination.
///
/// `None` when the actual values have no spread.
pub fn r2(actual: &[Real], predicted: &[Real]) -> Option<Real> {
    let pairs = finite_pairs(actual, predicted);
    let ys: Vec<Real> = pairs.iter().map(|&(y, _)| y).collect();
    let y_mean = mean_of(&ys)?;
    let ss_res: Real = pairs.iter().map(|(y, p)| (y - p).powi(2)).sum();
    let ss_tot: Real = ys.iter().map(|y| (y - y_mean).powi(2)).sum();
    if ss_tot > 0.0 {
        Some(1.0 - ss_res / ss_tot)
    } else {
        None
    }
}

/// All accuracy measures for one prediction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AccuracyReport {
    /// Mean absolute error.
    pub mae: Option<Real>,
    /// Root mean squared error.
    pub rmse: Option<Real>,
    /// Mean absolute percentage error (percent).
    pub mape: Option<Real>,
    /// Coefficient of determination.
    pub r2: Option<Real>,
}

impl AccuracyReport {
    /// Evaluate `predicted` against `actual`.
    pub fn compute(actual: &[Real], predicted: &[Real]) -> Self {
        Self {
            mae: mae(actual, predicted),
            rmse: rmse(actual, predicted),
            mape: mape(actual, predicted),
            r2: r2(actual, predicted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn perfect_prediction() {
        let y = [1.0, 2.0, 3.0, 4.0];
        let r = AccuracyReport::compute(&y, &y);
        assert_eq!(r.mae, Some(0.0));
        assert_eq!(r.rmse, Some(0.0));
        assert_eq!(r.mape, Some(0.0));
        assert_eq!(r.r2, Some(1.0));
    }

    #[test]
    fn known_errors() {
        let y = [10.0, 20.0, 30.0, 40.0];
        let p = [12.0, 18.0, 33.0, 40.0];
        assert_abs_diff_eq!(mae(&y, &p).unwrap(), 7.0 / 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rmse(&y, &p).unwrap(), (17.0_f64 / 4.0).sqrt(), epsilon = 1e-12);
        // 20 % + 10 % + 10 % + 0 %
        assert_abs_diff_eq!(mape(&y, &p).unwrap(), 10.0, epsilon = 1e-9);
        // ss_res = 17, ss_tot = 500
        assert_abs_diff_eq!(r2(&y, &p).unwrap(), 1.0 - 17.0 / 500.0, epsilon = 1e-12);
    }

    #[test]
    fn mape_floors_zero_actuals() {
        assert_abs_diff_eq!(mape(&[0.0], &[0.5]).unwrap(), 50.0, epsilon = 1e-12);
    }

    #[test]
    fn r2_undefined_without_spread() {
        assert_eq!(r2(&[5.0, 5.0, 5.0], &[4.0, 5.0, 6.0]), None);
    }

    #[test]
    fn non_finite_pairs_ignored() {
        let y = [1.0, f64::NAN, 3.0];
        let p = [2.0, 100.0, f64::INFINITY];
        assert_eq!(mae(&y, &p), Some(1.0));
        assert_eq!(AccuracyReport::compute(&[], &[]), AccuracyReport::default());
    }
}
