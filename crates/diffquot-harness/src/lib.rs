//! Experiment harness for diffquot.
//!
//! This crate provides:
//! - Run configuration: compile-time defaults plus CLI/env overrides
//! - Reporting: the line-oriented text templates and a JSON event stream
//! - Structured logging: JSONL records for each sweep observation
//! - Runner: drives core sweeps and the mixed-precision comparison

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod report;
pub mod runner;
pub mod structured_log;

pub use config::{OutputFormat, PrecisionChoice, RunConfig};
pub use error::HarnessError;
pub use report::Reporter;
pub use runner::{ExperimentRunner, SweepOutcome};
