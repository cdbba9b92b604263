//! Single- versus double-precision evaluation of the objective.
//!
//! Two buffers are filled from one uniform generator (single first, then
//! double) and f is evaluated over the same prefix length in each precision.
//! No perturbation sweep is involved.

use std::fmt;

use rand::Rng;

use crate::{DiffQuotError, SampleBuffer, UniformFill};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixedPrecisionReport {
    pub n: usize,
    pub single: f32,
    pub double: f64,
}

impl MixedPrecisionReport {
    /// |single − double| after widening the single-precision value.
    #[must_use]
    pub fn discrepancy(&self) -> f64 {
        (f64::from(self.single) - self.double).abs()
    }
}

impl fmt::Display for MixedPrecisionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:.5}", self.single)?;
        writeln!(f, "{:.5}", self.double)
    }
}

/// Fill `capacity` samples per precision from `fill` and evaluate f over the first `n`.
pub fn compare_precisions<R: Rng>(
    fill: &mut UniformFill<R>,
    capacity: usize,
    n: usize,
) -> Result<MixedPrecisionReport, DiffQuotError> {
    let single = SampleBuffer::<f32>::filled_with(capacity, fill);
    let double = SampleBuffer::<f64>::filled_with(capacity, fill);
    Ok(MixedPrecisionReport {
        n,
        single: single.objective(n)?,
        double: double.objective(n)?,
    })
}
