//! # qp-core
//!
//! Core types, configuration, and error definitions for quarterplan.
//!
//! This crate provides the foundational building blocks shared across all
//! other crates in the workspace – the numeric alias, the error hierarchy,
//! and the explicit [`EngineConfig`] handed in by the hosting layer.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Engine configuration passed in by the hosting layer.
pub mod config;

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used for every series value.
pub type Real = f64;

/// Alias used for array sizes / indices.
pub type Size = usize;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use config::EngineConfig;
pub use errors::{Error, Result};
