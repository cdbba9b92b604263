//! Fixed-capacity sample storage.

use crate::objective::{SummationOrder, sum_of_squares_ordered};
use crate::{DiffQuotError, FillStrategy, Precision};

/// Owned, contiguous, fixed-capacity sample buffer.
///
/// The capacity is set at construction and never changes. After filling, the
/// only writes are the transient updates of position 0 made by the
/// perturbation driver.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer<T> {
    samples: Box<[T]>,
}

impl<T: Precision> SampleBuffer<T> {
    /// Allocate `capacity` zeroed samples.
    #[must_use]
    pub fn zeroed(capacity: usize) -> Self {
        Self {
            samples: vec![T::ZERO; capacity].into_boxed_slice(),
        }
    }

    /// Allocate `capacity` samples and populate them with `strategy`.
    pub fn filled_with<S>(capacity: usize, strategy: &mut S) -> Self
    where
        S: FillStrategy<T> + ?Sized,
    {
        let mut buffer = Self::zeroed(capacity);
        strategy.fill(&mut buffer.samples);
        buffer
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.samples
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [T] {
        &mut self.samples
    }

    /// Checked read-only prefix of length `n`.
    pub fn prefix(&self, n: usize) -> Result<&[T], DiffQuotError> {
        self.samples
            .get(..n)
            .ok_or(DiffQuotError::PrefixOutOfBounds {
                n,
                capacity: self.capacity(),
            })
    }

    /// Objective over the first `n` samples, in index order.
    pub fn objective(&self, n: usize) -> Result<T, DiffQuotError> {
        self.objective_ordered(n, SummationOrder::Forward)
    }

    /// Objective over the first `n` samples, in the given order.
    pub fn objective_ordered(&self, n: usize, order: SummationOrder) -> Result<T, DiffQuotError> {
        Ok(sum_of_squares_ordered(self.prefix(n)?, order))
    }
}
