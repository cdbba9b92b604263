//! Run configuration.
//!
//! Defaults are compile-time constants. The CLI overrides them per flag, and the
//! `DIFFQUOT_PRECISION` environment variable selects the precision of the
//! default run (no subcommand):
//! - `f64` (default): double-precision sweep.
//! - `f32`: single-precision sweep.
//! - `both`: single then double, one after the other.

use diffquot_core::{SummationOrder, SweepConfig};

use crate::HarnessError;

/// Buffer capacity of the sweep experiment.
pub const DEFAULT_CAPACITY: usize = 1024;
/// Prescaling factor γ of the sweep experiment.
pub const DEFAULT_GAMMA: f64 = 100.0;
/// Ratio of the problem-size sequence 1, 10, 100, ….
pub const DEFAULT_BASE: usize = 10;
/// Buffer capacity of the mixed-precision comparison.
pub const MIXED_CAPACITY: usize = 2048;
/// Prefix length evaluated by the mixed-precision comparison.
pub const MIXED_PROBLEM_SIZE: usize = 12;
/// Uniform samples are drawn from [-a, a) with this a.
pub const MIXED_HALF_WIDTH: f64 = 1.0;

pub const PRECISION_ENV: &str = "DIFFQUOT_PRECISION";

/// Which precision(s) a sweep runs at.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrecisionChoice {
    Single,
    #[default]
    Double,
    Both,
}

impl PrecisionChoice {
    /// Parse from string (case-insensitive).
    #[must_use]
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "f32" | "single" | "float" => Some(Self::Single),
            "f64" | "double" => Some(Self::Double),
            "both" | "all" | "mixed" => Some(Self::Both),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Result<Self, HarnessError> {
        Self::from_str_loose(s).ok_or_else(|| HarnessError::UnknownPrecision(s.to_string()))
    }

    #[must_use]
    pub const fn runs_single(self) -> bool {
        matches!(self, Self::Single | Self::Both)
    }

    #[must_use]
    pub const fn runs_double(self) -> bool {
        matches!(self, Self::Double | Self::Both)
    }
}

fn parse_precision_env(raw: &str) -> PrecisionChoice {
    // Unknown values fall back to the default rather than aborting the run.
    PrecisionChoice::from_str_loose(raw.trim()).unwrap_or_default()
}

/// Precision selected by `DIFFQUOT_PRECISION`, or the default when unset.
#[must_use]
pub fn precision_from_env() -> PrecisionChoice {
    std::env::var(PRECISION_ENV)
        .map(|v| parse_precision_env(&v))
        .unwrap_or_default()
}

/// Output encoding of sweep events.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, HarnessError> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" | "jsonl" => Ok(Self::Json),
            _ => Err(HarnessError::UnknownFormat(s.to_string())),
        }
    }
}

pub fn parse_order(s: &str) -> Result<SummationOrder, HarnessError> {
    SummationOrder::from_str_loose(s).ok_or_else(|| HarnessError::UnknownOrder(s.to_string()))
}

/// Everything a sweep run needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    pub capacity: usize,
    pub precision: PrecisionChoice,
    pub sweep: SweepConfig,
    pub format: OutputFormat,
    /// Print the best step per problem size after each sweep.
    pub summary: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            precision: PrecisionChoice::default(),
            sweep: SweepConfig::default()
                .with_gamma(DEFAULT_GAMMA)
                .with_base(DEFAULT_BASE),
            format: OutputFormat::default(),
            summary: false,
        }
    }
}

impl RunConfig {
    /// Defaults with the precision taken from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            precision: precision_from_env(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), HarnessError> {
        self.sweep.validate(self.capacity)?;
        Ok(())
    }
}

/// Parameters of the mixed-precision comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixedConfig {
    pub capacity: usize,
    pub n: usize,
    pub half_width: f64,
    /// Fixed seed; `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for MixedConfig {
    fn default() -> Self {
        Self {
            capacity: MIXED_CAPACITY,
            n: MIXED_PROBLEM_SIZE,
            half_width: MIXED_HALF_WIDTH,
            seed: None,
        }
    }
}
