//! Calendar-year aggregation of a quarterly series.

use std::collections::BTreeMap;

use qp_core::config::DEFAULT_AGGREGATE_PRECISION;
use qp_core::Real;
use qp_math::round_to;
use qp_time::extract_year;
use serde::{Deserialize, Serialize};

use crate::series::{ConfidenceBand, ExtendedSeries};

/// Yearly totals; `labels` are 4-digit years in ascending order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct YearlySeries {
    /// Year labels, e.g. `"2025"`.
    pub labels: Vec<String>,
    /// Summed estimate per year.
    pub estimate: Vec<Real>,
    /// Summed demand per year.
    pub demand: Vec<Real>,
    /// Summed supply per year.
    pub supply: Vec<Real>,
    /// Summed band bounds per year, present iff the input carried a band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ci: Option<ConfidenceBand>,
}

#[derive(Default)]
struct YearTotals {
    estimate: Real,
    demand: Real,
    supply: Real,
    lower: Real,
    upper: Real,
}

fn value_at(values: &[Real], i: usize) -> Real {
    values.get(i).copied().filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Sum quarters into calendar years, rounding each total to 3 decimals.
pub fn aggregate_to_year(series: &ExtendedSeries) -> YearlySeries {
    aggregate_to_year_with_precision(series, DEFAULT_AGGREGATE_PRECISION)
}

/// Sum quarters into calendar years, rounding each total to `decimals`.
///
/// Quarters are grouped by the 4-digit year found in their label; labels
/// without one are left out.  Missing or non-finite values count as zero.
pub fn aggregate_to_year_with_precision(series: &ExtendedSeries, decimals: i32) -> YearlySeries {
    let mut years: BTreeMap<String, YearTotals> = BTreeMap::new();
    for (i, label) in series.labels.iter().enumerate() {
        let Some(year) = extract_year(label) else {
            continue;
        };
        let t = years.entry(format!("{year:04}")).or_default();
        t.estimate += value_at(&series.estimate, i);
        t.demand += value_at(&series.demand, i);
        t.supply += value_at(&series.supply, i);
        if let Some(ci) = &series.ci {
            t.lower += value_at(&ci.lower, i);
            t.upper += value_at(&ci.upper, i);
        }
    }

    let mut out = YearlySeries {
        ci: series.ci.as_ref().map(|_| ConfidenceBand::default()),
        ..YearlySeries::default()
    };
    for (year, t) in years {
        out.labels.push(year);
        out.estimate.push(round_to(t.estimate, decimals));
        out.demand.push(round_to(t.demand, decimals));
        out.supply.push(round_to(t.supply, decimals));
        if let Some(ci) = out.ci.as_mut() {
            ci.lower.push(round_to(t.lower, decimals));
            ci.upper.push(round_to(t.upper, decimals));
        }
    }
    out
}
