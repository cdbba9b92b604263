//! The objective f(x) = Σ xᵢ².
//!
//! Summation order is an experimental variable, so the fold is strictly
//! sequential: no pairwise reduction, no chunking, no `Iterator::sum`
//! specialisations.

use crate::Precision;

/// Order in which the squares are accumulated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummationOrder {
    /// Index order 0, 1, …, n-1.
    #[default]
    Forward,
    /// Index order n-1, …, 1, 0.
    Reverse,
}

impl SummationOrder {
    /// Parse from string (case-insensitive).
    #[must_use]
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "forward" | "fwd" | "ascending" => Some(Self::Forward),
            "reverse" | "rev" | "descending" => Some(Self::Reverse),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Reverse => "reverse",
        }
    }
}

/// Σ xᵢ² over `x`, accumulated in index order.
#[inline]
pub fn sum_of_squares<T: Precision>(x: &[T]) -> T {
    let mut acc = T::ZERO;
    for &xi in x {
        acc = acc + xi * xi;
    }
    acc
}

/// Σ xᵢ² over `x`, accumulated in the given order.
pub fn sum_of_squares_ordered<T: Precision>(x: &[T], order: SummationOrder) -> T {
    match order {
        SummationOrder::Forward => sum_of_squares(x),
        SummationOrder::Reverse => {
            let mut acc = T::ZERO;
            for &xi in x.iter().rev() {
                acc = acc + xi * xi;
            }
            acc
        }
    }
}
