//! Sample generation strategies.
//!
//! Two strategies populate a [`crate::SampleBuffer`]:
//! - [`UniformFill`]: independent draws from U[-a, a) using an owned RNG.
//! - [`ScaledSequence`]: the deterministic point xᵢ = i/γ (1-indexed).

use std::time::{SystemTime, UNIX_EPOCH};

use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{DiffQuotError, Precision};

/// Populates a sample slice.
pub trait FillStrategy<T> {
    fn fill(&mut self, out: &mut [T]);
}

/// Seed taken from the microsecond component of the wall clock.
pub fn clock_seed() -> Result<u64, DiffQuotError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| DiffQuotError::Clock)?;
    Ok(u64::from(now.subsec_micros()))
}

/// Independent uniform draws over [-a, a).
///
/// Draws are made in `f64` and rounded to the target precision, so filling an
/// `f32` and an `f64` buffer from the same generator consumes it identically.
#[derive(Debug)]
pub struct UniformFill<R> {
    rng: R,
    dist: Uniform<f64>,
    half_width: f64,
    seed: Option<u64>,
}

impl<R: Rng> UniformFill<R> {
    /// Take ownership of `rng` for the lifetime of the fill.
    pub fn new(rng: R, half_width: f64) -> Result<Self, DiffQuotError> {
        if !(half_width.is_finite() && half_width > 0.0) {
            return Err(DiffQuotError::InvalidHalfWidth { half_width });
        }
        let dist = Uniform::new(-half_width, half_width)
            .map_err(|_| DiffQuotError::InvalidHalfWidth { half_width })?;
        Ok(Self {
            rng,
            dist,
            half_width,
            seed: None,
        })
    }

    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    /// Seed the generator was built from, when known.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl UniformFill<StdRng> {
    /// Deterministically seeded generator.
    pub fn seeded(half_width: f64, seed: u64) -> Result<Self, DiffQuotError> {
        let mut fill = Self::new(StdRng::seed_from_u64(seed), half_width)?;
        fill.seed = Some(seed);
        Ok(fill)
    }

    /// Generator seeded from [`clock_seed`].
    pub fn from_clock(half_width: f64) -> Result<Self, DiffQuotError> {
        Self::seeded(half_width, clock_seed()?)
    }
}

impl<T: Precision, R: Rng> FillStrategy<T> for UniformFill<R> {
    fn fill(&mut self, out: &mut [T]) {
        for slot in out.iter_mut() {
            *slot = T::narrow_from_f64(self.dist.sample(&mut self.rng));
        }
    }
}

/// Deterministic fill xᵢ = i/γ for i = 1, 2, ….
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledSequence {
    gamma: f64,
}

impl ScaledSequence {
    #[must_use]
    pub const fn new(gamma: f64) -> Self {
        Self { gamma }
    }

    #[must_use]
    pub const fn gamma(&self) -> f64 {
        self.gamma
    }
}

impl<T: Precision> FillStrategy<T> for ScaledSequence {
    fn fill(&mut self, out: &mut [T]) {
        let gamma = T::narrow_from_f64(self.gamma);
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = T::from_index(i + 1) / gamma;
        }
    }
}
