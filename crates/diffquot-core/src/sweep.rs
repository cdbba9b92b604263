//! Sweep controller over (k, n).
//!
//! For k = start_k, start_k+1, … the step h = 10^-k shrinks geometrically, and
//! for every k the problem size n walks the geometric sequence
//! first_n, first_n·base, … while n < capacity.
//!
//! State transitions:
//!
//! | state | condition | event | next state |
//! |---|---|---|---|
//! | `Running(k)` entering k | h == 0 | `StepUnderflow` | `Finished` |
//! | `Running(k)` at n | difference vanished, n == 1 | `DifferenceVanished` | `Finished` |
//! | `Running(k)` at n | difference vanished, n > 1 | `DifferenceVanished` | `Running(k+1)` |
//! | `Running(k)` at n | otherwise | `Measured` | `Running(k)` at next n |
//! | `Running(k)` | sizes exhausted | none | `Running(k+1)` |
//!
//! A vanished difference for n > 1 abandons the larger sizes of that k and
//! moves on; smaller sizes at the next k may still resolve the difference.

use std::fmt;

use crate::objective::SummationOrder;
use crate::perturbation::{Quotient, forward_difference_error};
use crate::{DiffQuotError, Precision, SampleBuffer};

/// h = 10^-k in precision `T`.
///
/// While 10^k is exact the step is one correctly rounded division. Past that
/// it keeps dividing by ten, so the value walks down through the subnormal
/// range and reaches exactly zero instead of saturating.
#[must_use]
pub fn step_size<T: Precision>(k: u32) -> T {
    let exact = k.min(T::EXACT_POW10_MAX);
    let mut h = T::ONE / T::TEN.powi(exact as i32);
    for _ in exact..k {
        h = h / T::TEN;
        if h == T::ZERO {
            break;
        }
    }
    h
}

/// Sweep parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepConfig {
    /// Prescaling factor γ; 1.0 disables prescaling.
    pub gamma: f64,
    /// Ratio of the geometric size sequence.
    pub base: usize,
    /// First problem size.
    pub first_n: usize,
    /// First step exponent.
    pub start_k: u32,
    pub order: SummationOrder,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            gamma: 1.0,
            base: 10,
            first_n: 1,
            start_k: 0,
            order: SummationOrder::Forward,
        }
    }
}

impl SweepConfig {
    #[must_use]
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    #[must_use]
    pub fn with_base(mut self, base: usize) -> Self {
        self.base = base;
        self
    }

    #[must_use]
    pub fn with_first_n(mut self, first_n: usize) -> Self {
        self.first_n = first_n;
        self
    }

    #[must_use]
    pub fn with_start_k(mut self, start_k: u32) -> Self {
        self.start_k = start_k;
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: SummationOrder) -> Self {
        self.order = order;
        self
    }

    /// Problem sizes visited for each k, strictly below `capacity`.
    pub fn problem_sizes(&self, capacity: usize) -> impl Iterator<Item = usize> + use<> {
        let base = self.base;
        std::iter::successors(Some(self.first_n), move |&n| n.checked_mul(base))
            .take_while(move |&n| n < capacity)
    }

    /// Reject configurations that cannot produce a terminating, non-empty sweep.
    pub fn validate(&self, capacity: usize) -> Result<(), DiffQuotError> {
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(DiffQuotError::InvalidScale { gamma: self.gamma });
        }
        if self.base < 2 {
            return Err(DiffQuotError::InvalidBase { base: self.base });
        }
        if self.first_n == 0 {
            return Err(DiffQuotError::InvalidFirstN);
        }
        if self.first_n >= capacity {
            return Err(DiffQuotError::EmptySweep {
                first_n: self.first_n,
                capacity,
            });
        }
        Ok(())
    }
}

/// One reported observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepEvent<T> {
    Measured { k: u32, n: usize, error: T },
    DifferenceVanished { k: u32, n: usize },
    StepUnderflow { k: u32 },
}

impl<T> SweepEvent<T> {
    #[must_use]
    pub const fn k(&self) -> u32 {
        match *self {
            Self::Measured { k, .. } | Self::DifferenceVanished { k, .. } | Self::StepUnderflow { k } => k,
        }
    }

    #[must_use]
    pub const fn n(&self) -> Option<usize> {
        match *self {
            Self::Measured { n, .. } | Self::DifferenceVanished { n, .. } => Some(n),
            Self::StepUnderflow { .. } => None,
        }
    }

    /// Stable machine-readable kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Measured { .. } => "measured",
            Self::DifferenceVanished { .. } => "difference_vanished",
            Self::StepUnderflow { .. } => "step_underflow",
        }
    }

    /// True for the events that end a sweep.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::StepUnderflow { .. } | Self::DifferenceVanished { n: 1, .. }
        )
    }
}

impl<T: Precision> fmt::Display for SweepEvent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Measured { k, n, error } => write!(f, "k: {k} n: {n} err {error:.6}"),
            Self::DifferenceVanished { k, n } => {
                write!(f, "difference underflown for k: {k} n: {n}")
            }
            Self::StepUnderflow { k } => write!(f, "underflow for 10^-{k}"),
        }
    }
}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepState {
    /// Working on step exponent `k`, next size at `index` in the size sequence.
    Running { k: u32, index: usize },
    Finished,
}

/// Lazy (k, n) sweep over a sample buffer.
///
/// Each call to `next` performs at most one perturbation and yields its event,
/// so consumers can report observations as they happen.
#[derive(Debug)]
pub struct Sweep<'a, T> {
    samples: &'a mut [T],
    sizes: Vec<usize>,
    gamma: T,
    order: SummationOrder,
    h: T,
    state: SweepState,
}

impl<'a, T: Precision> Sweep<'a, T> {
    /// Validate `config` against the buffer and start at `Running(start_k)`.
    pub fn new(buffer: &'a mut SampleBuffer<T>, config: SweepConfig) -> Result<Self, DiffQuotError> {
        let capacity = buffer.capacity();
        config.validate(capacity)?;
        let gamma = T::narrow_from_f64(config.gamma);
        // The driver evaluates at 1/γ and rescales by γ².
        let usable = |v: T| v.is_finite() && v > T::ZERO;
        if !(usable(gamma) && usable(gamma * gamma) && usable(T::ONE / gamma)) {
            return Err(DiffQuotError::InvalidScale {
                gamma: config.gamma,
            });
        }
        Ok(Self {
            samples: buffer.samples_mut(),
            sizes: config.problem_sizes(capacity).collect(),
            gamma,
            order: config.order,
            h: T::ONE,
            state: SweepState::Running {
                k: config.start_k,
                index: 0,
            },
        })
    }

    #[must_use]
    pub fn state(&self) -> SweepState {
        self.state
    }

    #[must_use]
    pub fn problem_sizes(&self) -> &[usize] {
        &self.sizes
    }
}

impl<T: Precision> Iterator for Sweep<'_, T> {
    type Item = SweepEvent<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let SweepState::Running { k, index } = self.state else {
                return None;
            };

            if index == 0 {
                self.h = step_size(k);
                if self.h == T::ZERO {
                    self.state = SweepState::Finished;
                    return Some(SweepEvent::StepUnderflow { k });
                }
            }

            let Some(&n) = self.sizes.get(index) else {
                self.state = SweepState::Running {
                    k: k.saturating_add(1),
                    index: 0,
                };
                continue;
            };

            // Sizes are strictly below capacity.
            let prefix = &mut self.samples[..n];
            return Some(
                match forward_difference_error(prefix, self.h, self.gamma, self.order) {
                    Quotient::DifferenceVanished => {
                        self.state = if n == 1 {
                            SweepState::Finished
                        } else {
                            SweepState::Running {
                                k: k.saturating_add(1),
                                index: 0,
                            }
                        };
                        SweepEvent::DifferenceVanished { k, n }
                    }
                    Quotient::Error(error) => {
                        self.state = SweepState::Running {
                            k,
                            index: index + 1,
                        };
                        SweepEvent::Measured { k, n, error }
                    }
                },
            );
        }
    }
}
