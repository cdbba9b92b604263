//! Benchmarks for diffquot live under `benches/`.
//!
//! This crate exposes the shared fixtures they use.

use diffquot_core::{Precision, SampleBuffer, ScaledSequence};

/// Problem sizes measured by the objective benchmarks.
pub const SIZES: &[usize] = &[10, 100, 1_000, 10_000];

/// Buffer holding the scaled point (1, 2, …, capacity)/γ.
#[must_use]
pub fn scaled_buffer<T: Precision>(capacity: usize, gamma: f64) -> SampleBuffer<T> {
    SampleBuffer::filled_with(capacity, &mut ScaledSequence::new(gamma))
}
