//! Engine configuration.
//!
//! [`EngineConfig`] is an explicit value handed to the engine by the hosting
//! layer.  There is no process-wide settings singleton and no environment
//! lookup: each call receives the configuration it should use.

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::Real;

/// Default last calendar year the series is extended to.
pub const DEFAULT_TARGET_YEAR: i32 = 2035;

/// Default half-width of a derived confidence band, as a fraction of the
/// projected demand.
///
/// Heuristic carried over from the dashboard; it has no statistical basis
/// and is a candidate for revision.
pub const DEFAULT_FALLBACK_SPREAD_RATIO: Real = 0.08;

/// Default number of decimals kept by yearly aggregation.
pub const DEFAULT_AGGREGATE_PRECISION: i32 = 3;

/// Tunables for series extension and aggregation.
///
/// Missing fields take their defaults when deserialized, so a hosting layer
/// can supply a partial document such as `{"target_year": 2031}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Last calendar year that may be appended.
    pub target_year: i32,
    /// Upper bound on the number of appended quarters (`None` = unbounded).
    pub max_future_quarters: Option<usize>,
    /// Fraction of |demand| used as band half-width when no spread is known.
    pub fallback_spread_ratio: Real,
    /// Decimals kept when summing quarters into years.
    pub aggregate_precision: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_year: DEFAULT_TARGET_YEAR,
            max_future_quarters: None,
            fallback_spread_ratio: DEFAULT_FALLBACK_SPREAD_RATIO,
            aggregate_precision: DEFAULT_AGGREGATE_PRECISION,
        }
    }
}

impl EngineConfig {
    /// Check that every field is usable.
    pub fn validate(&self) -> Result<()> {
        if !(1000..=9999).contains(&self.target_year) {
            return Err(Error::InvalidArgument(format!(
                "target year {} is not a 4-digit year",
                self.target_year
            )));
        }
        if !self.fallback_spread_ratio.is_finite() || self.fallback_spread_ratio < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "fallback spread ratio must be finite and non-negative, got {}",
                self.fallback_spread_ratio
            )));
        }
        crate::ensure!(
            (0..=12).contains(&self.aggregate_precision),
            "aggregate precision {} out of range [0, 12]",
            self.aggregate_precision
        );
        Ok(())
    }
}
