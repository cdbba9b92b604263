//! # diffquot-core
//!
//! Forward-difference error evaluation for f(x) = Σ xᵢ².
//!
//! This crate measures how far the quotient [f(x + h·e₁) − f(x)]/h drifts from
//! the analytic gradient component ∂f/∂x₁ = 2x₁ as the step h = 10^-k shrinks,
//! and reports where floating-point cancellation wipes out the difference.
//! Everything is generic over [`Precision`] so the same algorithm runs at `f32`
//! and `f64` without promotion.

#![deny(unsafe_code)]

pub mod buffer;
pub mod error;
pub mod fill;
pub mod mixed;
pub mod objective;
pub mod perturbation;
pub mod precision;
pub mod summary;
pub mod sweep;

pub use buffer::SampleBuffer;
pub use error::DiffQuotError;
pub use fill::{FillStrategy, ScaledSequence, UniformFill, clock_seed};
pub use mixed::{MixedPrecisionReport, compare_precisions};
pub use objective::{SummationOrder, sum_of_squares, sum_of_squares_ordered};
pub use perturbation::{Quotient, forward_difference_error};
pub use precision::Precision;
pub use summary::{BestStep, BestSteps};
pub use sweep::{Sweep, SweepConfig, SweepEvent, SweepState, step_size};
