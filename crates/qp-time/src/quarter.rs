//! `Quarter` type and the quarter-label codec.
//!
//! A quarter is identified by its year and its number within the year
//! (1–4).  Both are folded into a single integer *key*,
//! `year * 4 + (quarter - 1)`, which gives a total order and makes
//! successor arithmetic a simple increment.
//!
//! Labels arrive in several spellings:
//!
//! | input        | parsed as |
//! |--------------|-----------|
//! | `"Q3 2024"`  | Q3 2024   |
//! | `"2024 Q3"`  | Q3 2024   |
//! | `"2024-q3"`  | Q3 2024   |
//! | `"Q3/2024"`  | Q3 2024   |
//!
//! and are always written back in the canonical `"Q<quarter> <year>"` form.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use qp_core::errors::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A calendar quarter.
///
/// The key is never stored or supplied independently: it is always derived
/// from `year` and `quarter`, so it cannot drift out of sync.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Quarter {
    year: i32,
    quarter: u8,
}

impl Quarter {
    /// Create a quarter, rejecting quarter numbers outside 1–4.
    pub fn new(year: i32, quarter: u8) -> Result<Self> {
        if !(1..=4).contains(&quarter) {
            return Err(Error::InvalidArgument(format!(
                "quarter {quarter} out of range [1, 4]"
            )));
        }
        Ok(Self { year, quarter })
    }

    /// Rebuild a quarter from its ordering key.
    pub fn from_key(key: i32) -> Self {
        Self {
            year: key.div_euclid(4),
            // rem_euclid(4) is always in 0..=3
            quarter: key.rem_euclid(4) as u8 + 1,
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The quarter number (1–4).
    pub fn quarter(&self) -> u8 {
        self.quarter
    }

    /// Ordering key, `year * 4 + (quarter - 1)`.
    pub fn key(&self) -> i32 {
        self.year * 4 + (self.quarter as i32 - 1)
    }

    /// The following quarter.
    pub fn next(&self) -> Self {
        Self::from_key(self.key() + 1)
    }

    /// Canonical label, `"Q<quarter> <year>"`.
    pub fn label(&self) -> String {
        format_quarter(self.year, self.quarter)
    }
}

impl PartialOrd for Quarter {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quarter {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Debug for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quarter")
            .field("year", &self.year)
            .field("quarter", &self.quarter)
            .field("key", &self.key())
            .finish()
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{} {}", self.quarter, self.year)
    }
}

impl FromStr for Quarter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_quarter(s).ok_or_else(|| Error::Parse {
            what: "quarter",
            input: s.to_string(),
        })
    }
}

impl From<Quarter> for String {
    fn from(q: Quarter) -> Self {
        q.label()
    }
}

impl TryFrom<String> for Quarter {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

// ── Codec ─────────────────────────────────────────────────────────────────────

fn quarter_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)q\s*([1-4])(?:\D|$)").expect("valid quarter regex"))
}

fn year_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:^|\D)(\d{4})(?:\D|$)").expect("valid year regex"))
}

/// Extract the first standalone 4-digit year from a label.
pub fn extract_year(label: &str) -> Option<i32> {
    year_token()
        .captures(label)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Parse a quarter label.
///
/// Accepts `Q<d> <yyyy>` and `<yyyy> Q<d>` in any case, with `-`, `/` or
/// whitespace between the two tokens.  Returns `None` when no quarter digit
/// in 1–4 or no 4-digit year can be extracted.
pub fn parse_quarter(label: &str) -> Option<Quarter> {
    let quarter: u8 = quarter_token()
        .captures(label)?
        .get(1)?
        .as_str()
        .parse()
        .ok()?;
    let year = extract_year(label)?;
    Some(Quarter { year, quarter })
}

/// Canonical label for a year/quarter pair: `"Q<quarter> <year>"`.
pub fn format_quarter(year: i32, quarter: u8) -> String {
    format!("Q{quarter} {year}")
}

/// The quarter after `q`; Q4 rolls over to Q1 of the next year.
pub fn next_quarter(q: Quarter) -> Quarter {
    q.next()
}

/// Number of quarters after `last` up to and including Q4 of `target_year`.
///
/// Zero when `last` is already at or beyond the end of `target_year`.
pub fn quarters_until_year_end(last: Quarter, target_year: i32) -> usize {
    let remaining = (target_year - last.year) * 4 + (4 - last.quarter as i32);
    remaining.max(0) as usize
}
