//! Configuration and environment errors.
//!
//! Numerical underflow is not an error here: vanished differences and vanished
//! step sizes are observations and travel as [`crate::SweepEvent`] values.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DiffQuotError {
    #[error("scale factor must be finite and positive, got {gamma}")]
    InvalidScale { gamma: f64 },
    #[error("geometric base must be at least 2, got {base}")]
    InvalidBase { base: usize },
    #[error("first problem size must be at least 1")]
    InvalidFirstN,
    #[error("first problem size {first_n} leaves no sizes below capacity {capacity}")]
    EmptySweep { first_n: usize, capacity: usize },
    #[error("prefix length {n} exceeds buffer capacity {capacity}")]
    PrefixOutOfBounds { n: usize, capacity: usize },
    #[error("uniform half-width must be finite and positive, got {half_width}")]
    InvalidHalfWidth { half_width: f64 },
    #[error("system clock is before the Unix epoch")]
    Clock,
}
