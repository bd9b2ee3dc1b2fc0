//! Series, forecast, and confidence-band types.
//!
//! These mirror the JSON documents exchanged with the upload/training
//! collaborators and the rendering layer.  Numeric arrays accept `null`
//! entries, read as `NaN`, and `serde_json` writes non-finite values back as
//! `null`, so a payload survives a round trip unchanged.

use std::collections::HashMap;

use qp_core::Real;
use qp_time::parse_quarter;
use serde::{Deserialize, Deserializer, Serialize};

fn nullable_reals<'de, D>(deserializer: D) -> Result<Vec<Real>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<Real>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|v| v.unwrap_or(Real::NAN))
        .collect())
}

fn nullable_labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// Lower/upper uncertainty bounds, index-aligned with the owning series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfidenceBand {
    /// Lower bounds.
    #[serde(default, deserialize_with = "nullable_reals")]
    pub lower: Vec<Real>,
    /// Upper bounds.
    #[serde(default, deserialize_with = "nullable_reals")]
    pub upper: Vec<Real>,
}

impl ConfidenceBand {
    /// Create a band from its bounds.
    pub fn new(lower: Vec<Real>, upper: Vec<Real>) -> Self {
        Self { lower, upper }
    }
}

/// An externally computed forecast, keyed by quarter label.
///
/// It need not cover every quarter the extender will emit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastSource {
    /// Quarter labels the forecast covers.
    #[serde(default, deserialize_with = "nullable_labels")]
    pub labels: Vec<String>,
    /// Forecast values (the upload endpoint names this field `forecast`).
    #[serde(default, alias = "forecast", deserialize_with = "nullable_reals")]
    pub values: Vec<Real>,
    /// Optional uncertainty band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ci: Option<ConfidenceBand>,
}

/// Lookup key for a label: the canonical form when it is a quarter, the
/// trimmed text otherwise.  Blank labels have no key.
fn lookup_key(label: &str) -> Option<String> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(parse_quarter(trimmed).map_or_else(|| trimmed.to_string(), |q| q.label()))
}

impl ForecastSource {
    /// Create a forecast without a band.
    pub fn new(labels: Vec<String>, values: Vec<Real>) -> Self {
        Self {
            labels,
            values,
            ci: None,
        }
    }

    /// Attach an uncertainty band.
    pub fn with_ci(mut self, ci: ConfidenceBand) -> Self {
        self.ci = Some(ci);
        self
    }

    /// Label → value, skipping blank labels and non-finite values.
    ///
    /// Later entries win when a quarter appears twice.
    pub fn value_map(&self) -> HashMap<String, Real> {
        self.labels
            .iter()
            .zip(&self.values)
            .filter(|(_, v)| v.is_finite())
            .filter_map(|(label, &v)| lookup_key(label).map(|k| (k, v)))
            .collect()
    }

    /// Label → `(lower, upper)`, skipping blank labels and any entry whose
    /// bounds are not both finite.
    pub fn band_map(&self) -> HashMap<String, (Real, Real)> {
        let Some(ci) = &self.ci else {
            return HashMap::new();
        };
        self.labels
            .iter()
            .zip(ci.lower.iter().zip(&ci.upper))
            .filter(|(_, (lo, hi))| lo.is_finite() && hi.is_finite())
            .filter_map(|(label, (&lo, &hi))| lookup_key(label).map(|k| (k, (lo, hi))))
            .collect()
    }
}

/// A historical quarterly series as delivered by the upload collaborator.
///
/// All arrays are index-aligned with `labels`, and labels are expected in
/// non-decreasing quarter order; nothing here re-sorts them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuarterSeries {
    /// Quarter labels, oldest first.
    #[serde(default, deserialize_with = "nullable_labels")]
    pub labels: Vec<String>,
    /// Estimate per quarter.
    #[serde(default, deserialize_with = "nullable_reals")]
    pub estimate: Vec<Real>,
    /// Demand per quarter.
    #[serde(default, deserialize_with = "nullable_reals")]
    pub demand: Vec<Real>,
    /// Supply per quarter.
    #[serde(default, deserialize_with = "nullable_reals")]
    pub supply: Vec<Real>,
    /// Optional uncertainty band around demand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ci: Option<ConfidenceBand>,
    /// Optional explicit forecast embedded by the producer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast: Option<ForecastSource>,
}

impl QuarterSeries {
    /// Create a series without band or forecast.
    pub fn new(
        labels: Vec<String>,
        estimate: Vec<Real>,
        demand: Vec<Real>,
        supply: Vec<Real>,
    ) -> Self {
        Self {
            labels,
            estimate,
            demand,
            supply,
            ci: None,
            forecast: None,
        }
    }

    /// Attach an uncertainty band.
    pub fn with_ci(mut self, ci: ConfidenceBand) -> Self {
        self.ci = Some(ci);
        self
    }

    /// Attach an explicit forecast.
    pub fn with_forecast(mut self, forecast: ForecastSource) -> Self {
        self.forecast = Some(forecast);
        self
    }

    /// Number of quarters.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the series has no quarters.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The series a statistical model should be fitted on: demand, unless
    /// demand is entirely zero, in which case the estimate.
    pub fn modelling_base(&self) -> &[Real] {
        if self.demand.iter().any(|&v| v != 0.0) {
            &self.demand
        } else {
            &self.estimate
        }
    }
}

/// The extender's output: the base series followed by projected quarters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtendedSeries {
    /// Quarter labels, oldest first.
    #[serde(default, deserialize_with = "nullable_labels")]
    pub labels: Vec<String>,
    /// Estimate per quarter.
    #[serde(default, deserialize_with = "nullable_reals")]
    pub estimate: Vec<Real>,
    /// Demand per quarter.
    #[serde(default, deserialize_with = "nullable_reals")]
    pub demand: Vec<Real>,
    /// Supply per quarter.
    #[serde(default, deserialize_with = "nullable_reals")]
    pub supply: Vec<Real>,
    /// Uncertainty band, present iff the base carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ci: Option<ConfidenceBand>,
}

impl ExtendedSeries {
    /// Number of quarters.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the series has no quarters.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl From<ExtendedSeries> for QuarterSeries {
    fn from(s: ExtendedSeries) -> Self {
        Self {
            labels: s.labels,
            estimate: s.estimate,
            demand: s.demand,
            supply: s.supply,
            ci: s.ci,
            forecast: None,
        }
    }
}

impl From<&QuarterSeries> for ExtendedSeries {
    fn from(s: &QuarterSeries) -> Self {
        Self {
            labels: s.labels.clone(),
            estimate: s.estimate.clone(),
            demand: s.demand.clone(),
            supply: s.supply.clone(),
            ci: s.ci.clone(),
        }
    }
}
