//! Headline totals for a quarterly series, and per-row bottlenecks from
//! the wide columns it was built from.

use qp_core::{Real, Size};
use qp_time::{parse_quarter, QuarterColumn, SeriesKind};
use serde::{Deserialize, Serialize};

use crate::series::QuarterSeries;

/// Total demand, total supply, and the resulting utilization.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesMetrics {
    /// Sum of finite demand values.
    pub total_demand: Real,
    /// Sum of finite supply values.
    pub total_supply: Real,
    /// `supply / demand * 100`, when both totals are non-zero.
    pub utilization_rate: Option<Real>,
}

fn finite_sum(values: &[Real]) -> Real {
    values.iter().filter(|v| v.is_finite()).sum()
}

fn finite_at(values: &[Real], i: usize) -> Real {
    values.get(i).copied().filter(|v| v.is_finite()).unwrap_or(0.0)
}

impl SeriesMetrics {
    /// Summarise `series`, or only the quarter labelled `quarter` when it
    /// is present in the series.
    ///
    /// A quarter that matches no label is ignored and the whole series is
    /// summarised.  Labels are matched verbatim first, then as quarters, so
    /// `"2025-Q1"` selects `"Q1 2025"`.
    pub fn compute(series: &QuarterSeries, quarter: Option<&str>) -> Self {
        let slice = quarter.and_then(|wanted| {
            series.labels.iter().position(|l| l == wanted).or_else(|| {
                let q = parse_quarter(wanted)?;
                series
                    .labels
                    .iter()
                    .position(|l| parse_quarter(l) == Some(q))
            })
        });
        let (total_demand, total_supply) = match slice {
            Some(i) => (finite_at(&series.demand, i), finite_at(&series.supply, i)),
            None => (finite_sum(&series.demand), finite_sum(&series.supply)),
        };
        let utilization_rate = if total_demand != 0.0 && total_supply != 0.0 {
            Some(total_supply / total_demand * 100.0)
        } else {
            None
        };
        Self {
            total_demand,
            total_supply,
            utilization_rate,
        }
    }
}

// ── Bottlenecks ─────────────────────────────────────────────────────────────

/// Rows reported by [`find_bottlenecks`] on the upload summary.
pub const TOP_BOTTLENECKS: Size = 10;

/// A row whose summed demand exceeds its summed estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bottleneck {
    /// Zero-based row index into the column cells.
    pub row: Size,
    /// Row total over all demand columns.
    pub demand_total: Real,
    /// Row total over all estimate columns.
    pub estimate_total: Real,
    /// `demand_total - estimate_total`, always positive.
    pub gap: Real,
}

fn add_cells(totals: &mut Vec<Real>, cells: &[Real]) {
    if totals.len() < cells.len() {
        totals.resize(cells.len(), 0.0);
    }
    for (t, &c) in totals.iter_mut().zip(cells) {
        if c.is_finite() {
            *t += c;
        }
    }
}

/// Per-row `(demand_total, estimate_total)`, or `None` when there is no
/// demand column or no estimate column.  Short columns and non-finite cells
/// contribute zero.
fn row_totals<I, V>(columns: I) -> Option<Vec<(Real, Real)>>
where
    I: IntoIterator<Item = (QuarterColumn, V)>,
    V: AsRef<[Real]>,
{
    let mut demand: Option<Vec<Real>> = None;
    let mut estimate: Option<Vec<Real>> = None;
    for (column, cells) in columns {
        let totals = match column.kind {
            SeriesKind::Demand => demand.get_or_insert_with(Vec::new),
            SeriesKind::Estimate => estimate.get_or_insert_with(Vec::new),
            SeriesKind::Supply => continue,
        };
        add_cells(totals, cells.as_ref());
    }
    let (demand, estimate) = (demand?, estimate?);
    let rows = demand.len().max(estimate.len());
    Some(
        (0..rows)
            .map(|i| {
                (
                    demand.get(i).copied().unwrap_or(0.0),
                    estimate.get(i).copied().unwrap_or(0.0),
                )
            })
            .collect(),
    )
}

/// Number of rows whose demand exceeds their estimate.
///
/// `None` when the columns carry no demand or no estimate measure.
pub fn bottleneck_count<I, V>(columns: I) -> Option<Size>
where
    I: IntoIterator<Item = (QuarterColumn, V)>,
    V: AsRef<[Real]>,
{
    row_totals(columns).map(|rows| rows.iter().filter(|(d, e)| d > e).count())
}

/// The `limit` rows with the largest positive demand-over-estimate gap,
/// largest first.
///
/// `None` under the same conditions as [`bottleneck_count`].
pub fn find_bottlenecks<I, V>(columns: I, limit: Size) -> Option<Vec<Bottleneck>>
where
    I: IntoIterator<Item = (QuarterColumn, V)>,
    V: AsRef<[Real]>,
{
    let mut found: Vec<Bottleneck> = row_totals(columns)?
        .into_iter()
        .enumerate()
        .filter(|(_, (d, e))| d > e)
        .map(|(row, (demand_total, estimate_total))| Bottleneck {
            row,
            demand_total,
            estimate_total,
            gap: demand_total - estimate_total,
        })
        .collect();
    found.sort_by(|a, b| b.gap.total_cmp(&a.gap));
    found.truncate(limit);
    Some(found)
}
