//! Floating-point precision abstraction.
//!
//! The evaluator is written once against [`Precision`] and instantiated for
//! `f32` and `f64`. Arithmetic stays in the chosen type: nothing is widened to
//! `f64` behind the caller's back, so single-precision runs round exactly like
//! single precision.

use std::fmt::{Debug, Display};

use num_traits::Float;

/// A floating-point type the experiment can run at.
pub trait Precision: Float + Display + Debug + Send + Sync + 'static {
    /// Short name used in reports and logs.
    const LABEL: &'static str;
    const ZERO: Self;
    const ONE: Self;
    /// Analytic ∂f/∂x₁ at x₁ = 1.
    const TWO: Self;
    const TEN: Self;
    /// Largest k for which 10^k is exactly representable.
    const EXACT_POW10_MAX: u32;

    /// Round an `f64` to this precision.
    fn narrow_from_f64(value: f64) -> Self;

    /// Convert an element index (or problem size) to this precision.
    fn from_index(index: usize) -> Self;

    /// Widen to `f64` for reporting.
    fn widen(self) -> f64;
}

impl Precision for f32 {
    const LABEL: &'static str = "f32";
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;
    const TEN: Self = 10.0;
    const EXACT_POW10_MAX: u32 = 10;

    #[inline]
    fn narrow_from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn from_index(index: usize) -> Self {
        index as f32
    }

    #[inline]
    fn widen(self) -> f64 {
        f64::from(self)
    }
}

impl Precision for f64 {
    const LABEL: &'static str = "f64";
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;
    const TEN: Self = 10.0;
    const EXACT_POW10_MAX: u32 = 22;

    #[inline]
    fn narrow_from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn from_index(index: usize) -> Self {
        index as f64
    }

    #[inline]
    fn widen(self) -> f64 {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_distinct() {
        assert_eq!(<f32 as Precision>::LABEL, "f32");
        assert_eq!(<f64 as Precision>::LABEL, "f64");
    }

    #[test]
    fn narrowing_rounds_to_single() {
        let third = <f32 as Precision>::narrow_from_f64(1.0 / 3.0);
        assert_eq!(third, 1.0_f32 / 3.0_f32);
        assert_ne!(third.widen(), 1.0 / 3.0);
    }

    #[test]
    fn index_conversion_is_exact_for_small_values() {
        assert_eq!(<f32 as Precision>::from_index(1000), 1000.0);
        assert_eq!(<f64 as Precision>::from_index(1_000_000), 1.0e6);
    }

    #[test]
    fn exact_pow10_limits_hold() {
        assert_eq!(<f64 as Precision>::TEN.powi(22), 1e22);
        assert_eq!(<f32 as Precision>::TEN.powi(10), 1e10_f32);
        assert_eq!(f64::from(1e10_f32), 1e10);
        assert_ne!(f64::from(1e11_f32), 1e11);
    }
}
