//! Best step exponent per problem size.

use std::collections::BTreeMap;
use std::fmt;

use crate::{Precision, SweepEvent};

/// The measurement with the smallest |error| seen for one problem size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestStep<T> {
    pub n: usize,
    pub k: u32,
    pub error: T,
}

impl<T: Precision> fmt::Display for BestStep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "best for n: {} k: {} err {:.6}", self.n, self.k, self.error)
    }
}

/// Running minimum of |error| keyed by n.
///
/// Only one entry per problem size is kept, so feeding every event of a sweep
/// does not retain the event stream. Ties keep the earlier (larger) step.
#[derive(Debug, Clone, Default)]
pub struct BestSteps<T> {
    best: BTreeMap<usize, BestStep<T>>,
}

impl<T: Precision> BestSteps<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            best: BTreeMap::new(),
        }
    }

    /// Fold one event in. Underflow events carry no error and are ignored.
    pub fn record(&mut self, event: &SweepEvent<T>) {
        let SweepEvent::Measured { k, n, error } = *event else {
            return;
        };
        if error.is_nan() {
            return;
        }
        let candidate = BestStep { n, k, error };
        self.best
            .entry(n)
            .and_modify(|current| {
                if error.abs() < current.error.abs() {
                    *current = candidate;
                }
            })
            .or_insert(candidate);
    }

    #[must_use]
    pub fn get(&self, n: usize) -> Option<&BestStep<T>> {
        self.best.get(&n)
    }

    /// Entries in increasing n.
    pub fn iter(&self) -> impl Iterator<Item = &BestStep<T>> {
        self.best.values()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }
}
