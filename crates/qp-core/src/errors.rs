//! Error types for quarterplan.
//!
//! The projection engine itself never fails: unparsable anchors, missing
//! forecasts and non-finite values degrade gracefully.  The strict entry
//! points around it (quarter constructors, `FromStr`, configuration
//! validation, backtest splits) report problems through this single
//! `thiserror`-derived enum.

use thiserror::Error;

/// The top-level error type used throughout quarterplan.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error.
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A label or header could not be parsed.
    #[error("cannot parse {what} from {input:?}")]
    Parse {
        /// What was expected (e.g. `"quarter"`).
        what: &'static str,
        /// The offending input.
        input: String,
    },

    /// A series is too short for the requested computation.
    #[error("insufficient data: need at least {required} points, got {actual}")]
    InsufficientData {
        /// Minimum number of points required.
        required: usize,
        /// Number of points supplied.
        actual: usize,
    },
}

/// Shorthand `Result` type used throughout quarterplan.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use qp_core::{ensure, errors::Error};
/// fn positive(x: f64) -> qp_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use qp_core::{fail, errors::Error};
/// fn always_err() -> qp_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
