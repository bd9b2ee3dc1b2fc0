//! # qp-math
//!
//! Numeric building blocks for series projection: historical ratios, trend
//! extrapolation, rounding, and forecast accuracy measures.
//!
//! Every function here treats non-finite inputs as missing and never panics.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Forecast accuracy measures (MAE, RMSE, MAPE, R²).
pub mod accuracy;

/// Mean ratio between two aligned series.
pub mod ratio;

/// Decimal rounding.
pub mod rounding;

/// Next-value projection from recent first differences.
pub mod trend;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use accuracy::{mae, mape, r2, rmse, AccuracyReport};
pub use ratio::average_ratio;
pub use rounding::round_to;
pub use trend::project_next_value;
