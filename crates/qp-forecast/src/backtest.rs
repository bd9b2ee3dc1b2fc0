//! Holdout split and last-value persistence baseline.
//!
//! The external trainer is judged against the same split and baseline, so
//! both live here where the dashboard can compute them without a model.

use qp_core::errors::{Error, Result};
use qp_core::{fail, Real, Size};
use qp_math::AccuracyReport;
use serde::{Deserialize, Serialize};

/// Shortest series that can be split into train and test windows.
pub const MIN_BACKTEST_POINTS: Size = 8;

/// Test window length for a series of `len` points.
///
/// Four quarters (one year) once there are at least twelve points,
/// otherwise a fifth of the series but never fewer than two.
pub fn holdout_split(len: Size) -> Result<Size> {
    if len < MIN_BACKTEST_POINTS {
        return Err(Error::InsufficientData {
            required: MIN_BACKTEST_POINTS,
            actual: len,
        });
    }
    Ok(if len >= 12 { 4 } else { (len / 5).max(2) })
}

/// Result of evaluating a forecast over the holdout window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backtest {
    /// Points used for fitting.
    pub train_size: Size,
    /// Points held out.
    pub test_size: Size,
    /// Held-out actual values.
    pub actual: Vec<Real>,
    /// Predicted values for the held-out window.
    pub predicted: Vec<Real>,
    /// Accuracy of `predicted` against `actual`.
    pub report: AccuracyReport,
}

/// Evaluate the last-value persistence baseline on `base`.
///
/// The test window is predicted by repeating the final training value.
pub fn persistence_backtest(base: &[Real]) -> Result<Backtest> {
    let test_size = holdout_split(base.len())?;
    let train_size = base.len() - test_size;
    let (train, test) = base.split_at(train_size);
    let Some(&last) = train.last() else {
        fail!("empty training window for {} points", base.len());
    };
    let predicted = vec![last; test_size];
    Ok(Backtest {
        train_size,
        test_size,
        report: AccuracyReport::compute(test, &predicted),
        actual: test.to_vec(),
        predicted,
    })
}
