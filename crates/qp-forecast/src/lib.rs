//! # qp-forecast
//!
//! Quarterly demand/estimate/supply series and the operations the dashboard
//! runs over them:
//!
//! * [`extend_series_to_year`] grows a historical series forward, merging an
//!   explicit forecast, a secondary model forecast, and local projections;
//! * [`aggregate_to_year`] re-buckets quarters into calendar-year totals;
//! * [`build_quarter_series`] assembles a series from wide quarter columns;
//! * [`SeriesMetrics`], [`persistence_backtest`] and
//!   [`moving_average_forecast`] summarise and backstop it.
//!
//! Every operation is a pure function of its inputs: nothing is cached,
//! nothing is mutated in place, and none of the projection paths can fail.
//!
//! ```
//! use qp_forecast::{extend_series_to_year, ExtensionOptions, QuarterSeries};
//!
//! let base = QuarterSeries::new(
//!     vec!["Q1 2024".into(), "Q2 2024".into(), "Q3 2024".into(), "Q4 2024".into()],
//!     vec![9.0, 11.0, 10.0, 12.0],
//!     vec![10.0, 12.0, 11.0, 13.0],
//!     vec![8.0, 10.0, 9.0, 11.0],
//! );
//! let opts = ExtensionOptions::default()
//!     .with_target_year(2025)
//!     .with_max_future_quarters(4);
//! let extended = extend_series_to_year(&base, &opts);
//! assert_eq!(extended.labels.len(), 8);
//! assert_eq!(extended.labels[7], "Q4 2025");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Calendar-year aggregation.
pub mod aggregate;

/// Holdout split and persistence baseline.
pub mod backtest;

/// Series assembly from wide quarter columns.
pub mod builder;

/// Forward extension of a quarterly series.
pub mod extend;

/// Moving-average fallback forecast and horizon helper.
pub mod fallback;

/// Headline totals and utilization.
pub mod metrics;

/// Series, forecast, and confidence-band types.
pub mod series;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use aggregate::{aggregate_to_year, aggregate_to_year_with_precision, YearlySeries};
pub use backtest::{holdout_split, persistence_backtest, Backtest};
pub use builder::{build_quarter_series, build_quarter_series_from_headers};
pub use extend::{extend_series_to_year, ExtensionOptions};
pub use fallback::{forecast_horizon, moving_average_forecast};
pub use metrics::{bottleneck_count, find_bottlenecks, Bottleneck, SeriesMetrics, TOP_BOTTLENECKS};
pub use series::{ConfidenceBand, ExtendedSeries, ForecastSource, QuarterSeries};
