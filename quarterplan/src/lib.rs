//! # quarterplan
//!
//! Quarterly demand/estimate/supply reconciliation and forward extension for
//! resource-planning dashboards.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `qp-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use quarterplan::prelude::*;
//!
//! let config = EngineConfig {
//!     target_year: 2025,
//!     ..EngineConfig::default()
//! };
//! config.validate().unwrap();
//!
//! let base = QuarterSeries::new(
//!     vec!["Q3 2024".into(), "Q4 2024".into()],
//!     vec![4.0, 5.0],
//!     vec![8.0, 10.0],
//!     vec![6.0, 7.5],
//! );
//! let extended = extend_series_to_year(&base, &ExtensionOptions::from(&config));
//! let yearly = aggregate_to_year(&extended);
//! assert_eq!(yearly.labels, vec!["2024", "2025"]);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, configuration, and error definitions.
pub use qp_core as core;

/// Quarter labels and quarter arithmetic.
pub use qp_time as time;

/// Ratio/trend projection, rounding, and accuracy measures.
pub use qp_math as math;

/// Series extension, aggregation, and fallback forecasts.
pub use qp_forecast as forecast;

/// The items most applications need.
pub mod prelude {
    pub use qp_core::{EngineConfig, Error, Real, Result};
    pub use qp_forecast::{
        aggregate_to_year, extend_series_to_year, ConfidenceBand, ExtendedSeries,
        ExtensionOptions, ForecastSource, QuarterSeries, SeriesMetrics, YearlySeries,
    };
    pub use qp_time::{format_quarter, next_quarter, parse_quarter, Quarter};
}
