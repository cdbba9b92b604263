//! Forward-difference error at a single (h, n) point.

use crate::objective::{SummationOrder, sum_of_squares_ordered};
use crate::Precision;

/// Outcome of one forward-difference evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quotient<T> {
    /// Signed error diff/h − 2.
    Error(T),
    /// f_plus − f_minus rounded to exactly zero; no division was attempted.
    DifferenceVanished,
}

impl<T> Quotient<T> {
    #[must_use]
    pub fn error(self) -> Option<T> {
        match self {
            Self::Error(e) => Some(e),
            Self::DifferenceVanished => None,
        }
    }
}

/// Evaluate [f(x + h·e₁) − f(x)]/h − 2 on `prefix`, with components prescaled by `gamma`.
///
/// Position 0 is overwritten with (1+h)/γ and then with 1/γ, and f is
/// recomputed from the buffer both times. The raw difference is rescaled by γ²
/// before the zero test. On return position 0 holds 1/γ.
///
/// An empty prefix has no first coordinate: both evaluations are 0 and the
/// difference vanishes.
pub fn forward_difference_error<T: Precision>(
    prefix: &mut [T],
    h: T,
    gamma: T,
    order: SummationOrder,
) -> Quotient<T> {
    let f_plus = match prefix.first_mut() {
        Some(first) => {
            *first = (T::ONE + h) / gamma;
            sum_of_squares_ordered(prefix, order)
        }
        None => T::ZERO,
    };
    let f_minus = match prefix.first_mut() {
        Some(first) => {
            *first = T::ONE / gamma;
            sum_of_squares_ordered(prefix, order)
        }
        None => T::ZERO,
    };

    let diff = (f_plus - f_minus) * (gamma * gamma);
    if diff == T::ZERO {
        return Quotient::DifferenceVanished;
    }
    Quotient::Error(diff / h - T::TWO)
}
