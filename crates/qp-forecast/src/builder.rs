//! Assemble a [`QuarterSeries`] from wide quarter columns.
//!
//! The upload collaborator hands over one numeric column per
//! `(quarter, measure)` header, e.g. `"Q1 24 Demand"`.  Each column is
//! summed, columns are bucketed by quarter and measure, and the buckets are
//! laid out in quarter order.

use std::collections::BTreeMap;

use qp_core::Real;
use qp_math::round_to;
use qp_time::{parse_quarter_column, Quarter, QuarterColumn, SeriesKind};
use tracing::debug;

use crate::series::{ConfidenceBand, QuarterSeries};

/// Decimals kept for per-quarter totals.
const QUARTER_PRECISION: i32 = 2;

/// Relative half-width of the default demand band.
const DEFAULT_BAND_RATIO: Real = 0.10;

#[derive(Default)]
struct QuarterTotals {
    estimate: Real,
    demand: Real,
    supply: Real,
}

fn any_nonzero(values: &[Real]) -> bool {
    values.iter().any(|&v| v != 0.0)
}

/// Build a series from recognised quarter columns and their cell values.
///
/// * non-finite cells count as zero;
/// * totals are rounded to 2 decimals;
/// * when supply is entirely zero but the estimate is not, supply mirrors
///   the estimate;
/// * the band is ±10 % of demand, or of the estimate when demand is
///   entirely zero.
///
/// Without any column the result is empty and carries no band.
pub fn build_quarter_series<I, V>(columns: I) -> QuarterSeries
where
    I: IntoIterator<Item = (QuarterColumn, V)>,
    V: AsRef<[Real]>,
{
    let mut buckets: BTreeMap<Quarter, QuarterTotals> = BTreeMap::new();
    for (column, values) in columns {
        let total: Real = values.as_ref().iter().filter(|v| v.is_finite()).sum();
        let t = buckets.entry(column.quarter).or_default();
        match column.kind {
            SeriesKind::Estimate => t.estimate += total,
            SeriesKind::Demand => t.demand += total,
            SeriesKind::Supply => t.supply += total,
        }
    }
    if buckets.is_empty() {
        return QuarterSeries::default();
    }

    let mut series = QuarterSeries::default();
    for (quarter, t) in &buckets {
        series.labels.push(quarter.label());
        series.estimate.push(round_to(t.estimate, QUARTER_PRECISION));
        series.demand.push(round_to(t.demand, QUARTER_PRECISION));
        series.supply.push(round_to(t.supply, QUARTER_PRECISION));
    }

    if !any_nonzero(&series.supply) && any_nonzero(&series.estimate) {
        series.supply = series.estimate.clone();
    }

    let band_base = series.modelling_base();
    let lower = band_base
        .iter()
        .map(|v| round_to(v * (1.0 - DEFAULT_BAND_RATIO), QUARTER_PRECISION))
        .collect();
    let upper = band_base
        .iter()
        .map(|v| round_to(v * (1.0 + DEFAULT_BAND_RATIO), QUARTER_PRECISION))
        .collect();
    series.ci = Some(ConfidenceBand::new(lower, upper));

    debug!(quarters = series.len(), "built quarterly series from columns");
    series
}

/// Like [`build_quarter_series`], but starting from raw header text.
///
/// Headers that are not quarter columns (project, area, phase, …) are
/// ignored.
pub fn build_quarter_series_from_headers<'h, 'v, I>(columns: I) -> QuarterSeries
where
    I: IntoIterator<Item = (&'h str, &'v [Real])>,
{
    build_quarter_series(
        columns
            .into_iter()
            .filter_map(|(header, values)| parse_quarter_column(header).map(|c| (c, values))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn col(year: i32, quarter: u8, kind: SeriesKind) -> QuarterColumn {
        QuarterColumn {
            quarter: Quarter::new(year, quarter).unwrap(),
            kind,
        }
    }

    #[test]
    fn empty_input() {
        let s = build_quarter_series(Vec::<(QuarterColumn, Vec<Real>)>::new());
        assert!(s.is_empty());
        assert!(s.ci.is_none());
    }

    #[test]
    fn columns_are_ordered_by_quarter() {
        let s = build_quarter_series(vec![
            (col(2025, 1, SeriesKind::Demand), vec![4.0, 6.0]),
            (col(2024, 4, SeriesKind::Demand), vec![1.0, 2.0, f64::NAN]),
            (col(2024, 4, SeriesKind::Estimate), vec![5.0]),
            (col(2025, 1, SeriesKind::Supply), vec![3.0]),
        ]);
        assert_eq!(s.labels, vec!["Q4 2024", "Q1 2025"]);
        assert_eq!(s.demand, vec![3.0, 10.0]);
        assert_eq!(s.estimate, vec![5.0, 0.0]);
        assert_eq!(s.supply, vec![0.0, 3.0]);
        let ci = s.ci.unwrap();
        assert_abs_diff_eq!(ci.lower[1], 9.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ci.upper[1], 11.0, epsilon = 1e-12);
    }

    #[test]
    fn supply_mirrors_estimate_when_absent() {
        let s = build_quarter_series(vec![
            (col(2024, 1, SeriesKind::Estimate), vec![2.5]),
            (col(2024, 1, SeriesKind::Demand), vec![3.0]),
        ]);
        assert_eq!(s.supply, vec![2.5]);
    }

    #[test]
    fn band_uses_estimate_without_demand() {
        let s = build_quarter_series(vec![(col(2024, 1, SeriesKind::Estimate), vec![10.0])]);
        let ci = s.ci.unwrap();
        assert_abs_diff_eq!(ci.lower[0], 9.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ci.upper[0], 11.0, epsilon = 1e-12);
    }

    #[test]
    fn totals_rounded_to_cents() {
        let s = build_quarter_series(vec![(col(2024, 2, SeriesKind::Demand), vec![0.111, 0.222])]);
        assert_eq!(s.demand, vec![0.33]);
    }

    #[test]
    fn from_headers_skips_other_columns() {
        let q1: &[Real] = &[1.0, 2.0];
        let q2: &[Real] = &[4.0];
        let ids: &[Real] = &[f64::NAN, f64::NAN];
        let s = build_quarter_series_from_headers(vec![
            ("Project ID", ids),
            ("Q1 24 Demand", q1),
            ("q2 '24 dem", q2),
        ]);
        assert_eq!(s.labels, vec!["Q1 2024", "Q2 2024"]);
        assert_eq!(s.demand, vec![3.0, 4.0]);
    }
}
