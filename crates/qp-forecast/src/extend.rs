//! Forward extension of a quarterly series.
//!
//! Starting from the last (anchor) quarter of a base series, quarters are
//! appended one at a time until either the target year is exhausted or the
//! quarter cap is reached.  For every appended quarter each value is
//! resolved independently with a fixed precedence:
//!
//! 1. the base series' own embedded forecast,
//! 2. the secondary (ML) forecast,
//! 3. a local projection from the history accumulated so far.
//!
//! The same precedence applies to the confidence band, whose last resort is
//! a symmetric band around the projected demand.

use std::collections::HashMap;

use qp_core::config::{EngineConfig, DEFAULT_FALLBACK_SPREAD_RATIO, DEFAULT_TARGET_YEAR};
use qp_core::Real;
use qp_math::{average_ratio, project_next_value};
use qp_time::{parse_quarter, Quarter};
use tracing::{debug, trace};

use crate::series::{ConfidenceBand, ExtendedSeries, ForecastSource, QuarterSeries};

/// Options controlling [`extend_series_to_year`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionOptions<'a> {
    /// Secondary model forecast, consulted after the base forecast.
    pub ml_forecast: Option<&'a ForecastSource>,
    /// Last calendar year that may be appended.
    pub target_year: i32,
    /// Maximum number of quarters to append (`None` = unbounded).
    pub max_future_quarters: Option<usize>,
    /// Band half-width as a fraction of |demand| when no spread is known.
    pub fallback_spread_ratio: Real,
}

impl Default for ExtensionOptions<'_> {
    fn default() -> Self {
        Self {
            ml_forecast: None,
            target_year: DEFAULT_TARGET_YEAR,
            max_future_quarters: None,
            fallback_spread_ratio: DEFAULT_FALLBACK_SPREAD_RATIO,
        }
    }
}

impl<'a> ExtensionOptions<'a> {
    /// Set the secondary model forecast.
    pub fn with_ml_forecast(mut self, forecast: &'a ForecastSource) -> Self {
        self.ml_forecast = Some(forecast);
        self
    }

    /// Set the last calendar year that may be appended.
    pub fn with_target_year(mut self, year: i32) -> Self {
        self.target_year = year;
        self
    }

    /// Cap the number of appended quarters.
    pub fn with_max_future_quarters(mut self, n: usize) -> Self {
        self.max_future_quarters = Some(n);
        self
    }

    /// Set the fallback band half-width ratio.
    pub fn with_fallback_spread_ratio(mut self, ratio: Real) -> Self {
        self.fallback_spread_ratio = ratio;
        self
    }

    /// The year extension actually stops at, given the anchor quarter.
    ///
    /// A quarter cap of `n` never needs more than `ceil(n / 4)` further
    /// years, so the target is tightened accordingly.
    pub fn effective_target_year(&self, anchor: Quarter) -> i32 {
        match self.max_future_quarters {
            Some(n) => {
                let years = i32::try_from(n.div_ceil(4)).unwrap_or(i32::MAX);
                self.target_year.min(anchor.year().saturating_add(years))
            }
            None => self.target_year,
        }
    }
}

impl From<&EngineConfig> for ExtensionOptions<'_> {
    fn from(config: &EngineConfig) -> Self {
        Self {
            ml_forecast: None,
            target_year: config.target_year,
            max_future_quarters: config.max_future_quarters,
            fallback_spread_ratio: config.fallback_spread_ratio,
        }
    }
}

/// Where a projected value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Forecast,
    Model,
    Local,
}

fn finite_or_zero(v: Real) -> Real {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Resolve a dependent measure from projected demand via a historical ratio,
/// or by trend when no ratio (or no finite demand) is available.
fn ratio_or_trend(ratio: Option<Real>, demand: Real, history: &[Real]) -> Real {
    match ratio {
        Some(r) if demand.is_finite() => (demand * r).max(0.0),
        _ => project_next_value(history),
    }
}

/// Last known `upper - demand`, clamped at zero.
fn last_spread(demand: &[Real], ci: &ConfidenceBand) -> Real {
    let Some(i) = demand.len().checked_sub(1) else {
        return 0.0;
    };
    match (ci.upper.get(i), demand.get(i)) {
        (Some(&hi), Some(&d)) if hi.is_finite() && d.is_finite() => (hi - d).max(0.0),
        _ => 0.0,
    }
}

fn empty_bands() -> HashMap<String, (Real, Real)> {
    HashMap::new()
}

/// Extend `base` forward to `opts.target_year`, appending at most
/// `opts.max_future_quarters` quarters.
///
/// The base is never modified; the result always starts with a copy of it.
/// When the base is empty or its last label is not a recognisable quarter,
/// the copy is returned unextended.
pub fn extend_series_to_year(base: &QuarterSeries, opts: &ExtensionOptions<'_>) -> ExtendedSeries {
    let mut out = ExtendedSeries::from(base);

    let Some(anchor) = out.labels.last().and_then(|l| parse_quarter(l)) else {
        debug!(
            quarters = out.labels.len(),
            "no parsable anchor quarter; series left unextended"
        );
        return out;
    };

    let forecast_values = base
        .forecast
        .as_ref()
        .map(ForecastSource::value_map)
        .unwrap_or_default();
    let forecast_bands = base
        .forecast
        .as_ref()
        .map_or_else(empty_bands, ForecastSource::band_map);
    let model_values = opts
        .ml_forecast
        .map(ForecastSource::value_map)
        .unwrap_or_default();
    let model_bands = opts
        .ml_forecast
        .map_or_else(empty_bands, ForecastSource::band_map);

    let ratio_estimate = average_ratio(&base.estimate, &base.demand);
    let ratio_supply = average_ratio(&base.supply, &base.demand);
    let spread = base
        .ci
        .as_ref()
        .map_or(0.0, |ci| last_spread(&base.demand, ci));

    let target_year = opts.effective_target_year(anchor);
    let cap = opts.max_future_quarters.unwrap_or(usize::MAX);

    let mut current = anchor;
    let mut added = 0usize;
    while added < cap {
        let next = current.next();
        if next.year() > target_year {
            break;
        }
        let label = next.label();

        let (next_demand, source) = if let Some(&v) = forecast_values.get(&label) {
            (v, Source::Forecast)
        } else if let Some(&v) = model_values.get(&label) {
            (v, Source::Model)
        } else {
            (project_next_value(&out.demand), Source::Local)
        };

        let next_estimate = ratio_or_trend(ratio_estimate, next_demand, &out.estimate);
        let next_supply = ratio_or_trend(ratio_supply, next_demand, &out.supply);

        if let Some(ci) = out.ci.as_mut() {
            let (lo, hi) = if let Some(&band) = forecast_bands.get(&label) {
                band
            } else if let Some(&band) = model_bands.get(&label) {
                band
            } else if next_demand.is_finite() {
                let half = if spread != 0.0 {
                    spread
                } else {
                    next_demand.abs() * opts.fallback_spread_ratio
                };
                (next_demand - half, next_demand + half)
            } else {
                (0.0, 0.0)
            };
            ci.lower.push(finite_or_zero(lo));
            ci.upper.push(finite_or_zero(hi));
        }

        trace!(quarter = %label, ?source, demand = next_demand, "projected quarter");

        out.demand.push(finite_or_zero(next_demand));
        out.estimate.push(finite_or_zero(next_estimate));
        out.supply.push(finite_or_zero(next_supply));
        out.labels.push(label);

        current = next;
        added += 1;
    }

    debug!(
        anchor = %anchor,
        target_year,
        appended = added,
        banded = out.ci.is_some(),
        "extended quarterly series"
    );
    out
}
