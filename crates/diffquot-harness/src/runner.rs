//! Experiment execution engine.

use std::io::Write;
use std::time::Instant;

use diffquot_core::{
    BestSteps, MixedPrecisionReport, Precision, SampleBuffer, ScaledSequence, Sweep, UniformFill,
    compare_precisions,
};

use crate::config::MixedConfig;
use crate::structured_log::{LogEmitter, LogEntry, LogLevel};
use crate::{HarnessError, Reporter, RunConfig};

/// Summary of one completed sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepOutcome {
    pub precision: &'static str,
    /// Number of events reported, terminal event included.
    pub observations: usize,
    /// Kind of the final event.
    pub terminal_kind: &'static str,
    pub terminal_k: u32,
    pub terminal_n: Option<usize>,
}

/// Runs sweeps and comparisons, streaming results to a reporter and an optional log.
pub struct ExperimentRunner<W: Write> {
    reporter: Reporter<W>,
    log: Option<LogEmitter>,
}

impl<W: Write> ExperimentRunner<W> {
    #[must_use]
    pub fn new(reporter: Reporter<W>) -> Self {
        Self {
            reporter,
            log: None,
        }
    }

    #[must_use]
    pub fn with_log(mut self, log: LogEmitter) -> Self {
        self.log = Some(log);
        self
    }

    fn log(&mut self, entry: LogEntry) -> Result<(), HarnessError> {
        if let Some(log) = self.log.as_mut() {
            log.emit_entry(entry)?;
        }
        Ok(())
    }

    /// Run the sweep at every precision `config` selects, single first.
    pub fn run(&mut self, config: &RunConfig) -> Result<Vec<SweepOutcome>, HarnessError> {
        config.validate()?;
        let mut outcomes = Vec::new();
        if config.precision.runs_single() {
            outcomes.push(self.run_sweep::<f32>(config)?);
        }
        if config.precision.runs_double() {
            outcomes.push(self.run_sweep::<f64>(config)?);
        }
        Ok(outcomes)
    }

    /// Run one sweep over the scaled point (1, 2, …, capacity)/γ at precision `T`.
    pub fn run_sweep<T: Precision>(
        &mut self,
        config: &RunConfig,
    ) -> Result<SweepOutcome, HarnessError> {
        let started = Instant::now();
        let sweep_cfg = config.sweep;
        let mut buffer =
            SampleBuffer::<T>::filled_with(config.capacity, &mut ScaledSequence::new(sweep_cfg.gamma));
        let sweep = Sweep::new(&mut buffer, sweep_cfg)?;

        self.log(
            LogEntry::new("", LogLevel::Info, "sweep_start")
                .with_precision(T::LABEL)
                .with_gamma(sweep_cfg.gamma)
                .with_details(serde_json::json!({
                    "capacity": config.capacity,
                    "base": sweep_cfg.base,
                    "first_n": sweep_cfg.first_n,
                    "start_k": sweep_cfg.start_k,
                    "order": sweep_cfg.order.as_str(),
                    "problem_sizes": sweep.problem_sizes(),
                })),
        )?;

        let mut best = BestSteps::<T>::new();
        let mut observations = 0usize;
        let mut last = None;
        for event in sweep {
            self.reporter.event(&event)?;
            self.log(LogEntry::observation(&event))?;
            best.record(&event);
            observations += 1;
            last = Some(event);
        }

        if config.summary {
            for step in best.iter() {
                self.reporter.best(step)?;
            }
        }
        self.reporter.flush()?;

        let outcome = SweepOutcome {
            precision: T::LABEL,
            observations,
            terminal_kind: last.map_or("none", |e| e.kind()),
            terminal_k: last.map_or(sweep_cfg.start_k, |e| e.k()),
            terminal_n: last.and_then(|e| e.n()),
        };

        let mut finished = LogEntry::new("", LogLevel::Info, "sweep_finished")
            .with_precision(T::LABEL)
            .with_duration_ms(elapsed_ms(started))
            .with_details(serde_json::json!({
                "observations": observations,
                "terminal": outcome.terminal_kind,
            }));
        if let Some(event) = last {
            finished = finished.with_step(event.k(), event.n());
        }
        self.log(finished)?;
        self.flush_log()?;
        Ok(outcome)
    }

    /// Fill single and double buffers from one uniform generator and print f for both.
    pub fn run_mixed(&mut self, config: &MixedConfig) -> Result<MixedPrecisionReport, HarnessError> {
        let mut fill = match config.seed {
            Some(seed) => UniformFill::seeded(config.half_width, seed)?,
            None => UniformFill::from_clock(config.half_width)?,
        };

        self.log(
            LogEntry::new("", LogLevel::Info, "mixed_start").with_details(serde_json::json!({
                "capacity": config.capacity,
                "n": config.n,
                "half_width": fill.half_width(),
                "seed": fill.seed(),
            })),
        )?;

        let report = compare_precisions(&mut fill, config.capacity, config.n)?;
        self.reporter.mixed(&report)?;
        self.reporter.flush()?;

        self.log(
            LogEntry::new("", LogLevel::Info, "mixed_result").with_details(serde_json::json!({
                "single": report.single,
                "double": report.double,
                "discrepancy": report.discrepancy(),
            })),
        )?;
        self.flush_log()?;
        Ok(report)
    }

    fn flush_log(&mut self) -> Result<(), HarnessError> {
        if let Some(log) = self.log.as_mut() {
            log.flush()?;
        }
        Ok(())
    }

    /// Recover the reporter.
    pub fn into_reporter(self) -> Reporter<W> {
        self.reporter
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OutputFormat, PrecisionChoice};

    fn runner() -> ExperimentRunner<Vec<u8>> {
        ExperimentRunner::new(Reporter::new(Vec::new(), OutputFormat::Text))
    }

    fn output(runner: ExperimentRunner<Vec<u8>>) -> String {
        String::from_utf8(runner.into_reporter().into_inner()).unwrap()
    }

    #[test]
    fn default_run_prints_one_line_per_event() {
        let mut runner = runner();
        let outcomes = runner.run(&RunConfig::default()).unwrap();
        assert_eq!(outcomes.len(), 1);
        let outcome = &outcomes[0];
        assert_eq!(outcome.precision, "f64");
        assert_eq!(outcome.terminal_kind, "difference_vanished");
        assert_eq!(outcome.terminal_n, Some(1));

        let text = output(runner);
        assert_eq!(text.lines().count(), outcome.observations);
        assert_eq!(text.lines().next(), Some("k: 0 n: 1 err 1.000000"));
        assert_eq!(
            text.lines().last().unwrap(),
            format!("difference underflown for k: {} n: 1", outcome.terminal_k)
        );
    }

    #[test]
    fn both_precisions_run_single_first() {
        let mut runner = runner();
        let config = RunConfig {
            precision: PrecisionChoice::Both,
            ..RunConfig::default()
        };
        let outcomes = runner.run(&config).unwrap();
        let labels: Vec<&str> = outcomes.iter().map(|o| o.precision).collect();
        assert_eq!(labels, vec!["f32", "f64"]);
        assert!(outcomes[0].terminal_k < outcomes[1].terminal_k);
    }

    #[test]
    fn summary_appends_best_lines() {
        let mut runner = runner();
        let config = RunConfig {
            summary: true,
            ..RunConfig::default()
        };
        let outcome = runner.run(&config).unwrap().remove(0);
        let text = output(runner);
        let best: Vec<&str> = text.lines().filter(|l| l.starts_with("best for n: ")).collect();
        assert_eq!(best.len(), 4);
        assert!(best[0].starts_with("best for n: 1 k: "));
        assert_eq!(text.lines().count(), outcome.observations + 4);
    }

    #[test]
    fn invalid_config_is_rejected_before_output() {
        let mut runner = runner();
        let mut config = RunConfig::default();
        config.sweep.first_n = config.capacity;
        assert!(matches!(runner.run(&config), Err(HarnessError::Core(_))));
        assert!(output(runner).is_empty());
    }

    #[test]
    fn scale_overflowing_single_precision_is_rejected() {
        let mut runner = ExperimentRunner::new(Reporter::new(Vec::new(), OutputFormat::Json));
        let mut config = RunConfig {
            capacity: 16,
            precision: PrecisionChoice::Single,
            ..RunConfig::default()
        };
        config.sweep.gamma = 1e20;
        assert!(matches!(
            runner.run(&config),
            Err(HarnessError::Core(diffquot_core::DiffQuotError::InvalidScale { .. }))
        ));
        assert!(output(runner).is_empty());
    }

    #[test]
    fn clock_seeded_mixed_run_prints_two_lines() {
        let mut runner = runner();
        let report = runner.run_mixed(&MixedConfig::default()).unwrap();
        assert!(report.single > 0.0 && report.double > 0.0);
        assert_eq!(output(runner).lines().count(), 2);
    }

    #[test]
    fn seeded_mixed_run_prints_two_lines() {
        let mut runner = runner();
        let config = MixedConfig {
            seed: Some(17),
            ..MixedConfig::default()
        };
        let report = runner.run_mixed(&config).unwrap();
        let text = output(runner);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![format!("{:.5}", report.single), format!("{:.5}", report.double)]);
    }
}
