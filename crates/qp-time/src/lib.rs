//! # qp-time
//!
//! Quarter labels and quarter arithmetic.
//!
//! Every label the dashboard exchanges ("Q3 2024", "2024 Q3", "2024-Q3", …)
//! is recognised here and only here; anything [`parse_quarter`] rejects is an
//! opaque label to the rest of the workspace.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Wide-spreadsheet quarter column headers ("Q1 20 Estimate").
pub mod column;

/// `Quarter` type, label codec, and successor arithmetic.
pub mod quarter;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use column::{parse_quarter_column, QuarterColumn, SeriesKind};
pub use quarter::{
    extract_year, format_quarter, next_quarter, parse_quarter, quarters_until_year_end, Quarter,
};
