//! Quarter column headers of wide planning spreadsheets.
//!
//! Uploaded workbooks carry one column per quarter and measure, e.g.
//! `"Q1 20 Estimate"`, `"Q1 20 Demand"`, `"q3 '24 supply"`.  Headers are
//! matched after trimming, lower-casing and collapsing whitespace; two-digit
//! years are read as 20xx.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::quarter::Quarter;

/// Which measure a quarterly value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    /// Planned capacity estimate.
    Estimate,
    /// Requested demand.
    Demand,
    /// Available supply.
    Supply,
}

impl SeriesKind {
    fn from_token(token: &str) -> Option<Self> {
        if token.starts_with("esti") {
            Some(SeriesKind::Estimate)
        } else if token.starts_with("dem") {
            Some(SeriesKind::Demand)
        } else if token == "supply" {
            Some(SeriesKind::Supply)
        } else {
            None
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SeriesKind::Estimate => "estimate",
            SeriesKind::Demand => "demand",
            SeriesKind::Supply => "supply",
        };
        write!(f, "{s}")
    }
}

/// A recognised quarter column: which quarter, and which measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuarterColumn {
    /// The quarter the column holds values for.
    pub quarter: Quarter,
    /// The measure held in the column.
    pub kind: SeriesKind,
}

fn header_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^q\s*([1-4])\s*('?\s*[0-9]{2,4})\s*(estimate|esti|demand|supply|dem)$")
            .expect("valid header regex")
    })
}

fn whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

/// Recognise a quarter column header.
///
/// Returns `None` for any header that is not of the form
/// `Q<1-4> ['] <yy|yyyy> <estimate|esti|demand|dem|supply>`.
pub fn parse_quarter_column(header: &str) -> Option<QuarterColumn> {
    let lowered = header.trim().to_lowercase();
    let normalized = whitespace().replace_all(&lowered, " ");
    let caps = header_pattern().captures(&normalized)?;

    let quarter: u8 = caps.get(1)?.as_str().parse().ok()?;
    let digits: String = caps
        .get(2)?
        .as_str()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    let mut year: i32 = digits.parse().ok()?;
    if year < 100 {
        year += 2000;
    }
    let kind = SeriesKind::from_token(caps.get(3)?.as_str())?;

    Some(QuarterColumn {
        quarter: Quarter::new(year, quarter).ok()?,
        kind,
    })
}
