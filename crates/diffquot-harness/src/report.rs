//! Reporting sink.
//!
//! Text output uses the fixed line templates rendered by the core `Display`
//! impls. JSON output writes one object per line with the same information.

use std::io::Write;

use diffquot_core::{BestStep, MixedPrecisionReport, Precision, SweepEvent};
use serde::Serialize;

use crate::{HarnessError, OutputFormat};

/// Machine-readable form of one sweep event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub precision: &'static str,
    pub kind: &'static str,
    pub k: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<f64>,
}

impl EventRecord {
    pub fn from_event<T: Precision>(event: &SweepEvent<T>) -> Self {
        let error = match *event {
            SweepEvent::Measured { error, .. } => Some(error.widen()),
            _ => None,
        };
        Self {
            precision: T::LABEL,
            kind: event.kind(),
            k: event.k(),
            n: event.n(),
            error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct BestRecord {
    precision: &'static str,
    kind: &'static str,
    n: usize,
    k: u32,
    error: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct MixedRecord {
    kind: &'static str,
    n: usize,
    single: f32,
    double: f64,
}

/// Writes every observation as soon as it is produced.
pub struct Reporter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn event<T: Precision>(&mut self, event: &SweepEvent<T>) -> Result<(), HarnessError> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{event}")?,
            OutputFormat::Json => {
                let line = serde_json::to_string(&EventRecord::from_event(event))?;
                writeln!(self.out, "{line}")?;
            }
        }
        Ok(())
    }

    pub fn best<T: Precision>(&mut self, best: &BestStep<T>) -> Result<(), HarnessError> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{best}")?,
            OutputFormat::Json => {
                let record = BestRecord {
                    precision: T::LABEL,
                    kind: "best",
                    n: best.n,
                    k: best.k,
                    error: best.error.widen(),
                };
                writeln!(self.out, "{}", serde_json::to_string(&record)?)?;
            }
        }
        Ok(())
    }

    pub fn mixed(&mut self, report: &MixedPrecisionReport) -> Result<(), HarnessError> {
        match self.format {
            OutputFormat::Text => write!(self.out, "{report}")?,
            OutputFormat::Json => {
                let record = MixedRecord {
                    kind: "mixed",
                    n: report.n,
                    single: report.single,
                    double: report.double,
                };
                writeln!(self.out, "{}", serde_json::to_string(&record)?)?;
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), HarnessError> {
        self.out.flush()?;
        Ok(())
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F>(format: OutputFormat, f: F) -> String
    where
        F: FnOnce(&mut Reporter<Vec<u8>>) -> Result<(), HarnessError>,
    {
        let mut reporter = Reporter::new(Vec::new(), format);
        f(&mut reporter).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn text_lines_use_templates() {
        let out = render(OutputFormat::Text, |r| {
            r.event(&SweepEvent::Measured { k: 2, n: 100, error: 0.0100_f64 })?;
            r.event(&SweepEvent::<f64>::DifferenceVanished { k: 9, n: 1000 })?;
            r.event(&SweepEvent::<f32>::StepUnderflow { k: 46 })
        });
        assert_eq!(
            out,
            "k: 2 n: 100 err 0.010000\n\
             difference underflown for k: 9 n: 1000\n\
             underflow for 10^-46\n"
        );
    }

    #[test]
    fn json_lines_carry_kind_and_precision() {
        let out = render(OutputFormat::Json, |r| {
            r.event(&SweepEvent::Measured { k: 1, n: 1, error: 0.5_f32 })?;
            r.event(&SweepEvent::<f64>::StepUnderflow { k: 324 })
        });
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["precision"], "f32");
        assert_eq!(lines[0]["kind"], "measured");
        assert_eq!(lines[0]["error"], 0.5);
        assert_eq!(lines[1]["kind"], "step_underflow");
        assert!(lines[1].get("n").is_none());
        assert!(lines[1].get("error").is_none());
    }

    #[test]
    fn mixed_text_is_two_lines() {
        let report = MixedPrecisionReport {
            n: 12,
            single: 3.5,
            double: 3.25,
        };
        let out = render(OutputFormat::Text, |r| r.mixed(&report));
        assert_eq!(out, "3.50000\n3.25000\n");
    }

    #[test]
    fn best_json_record() {
        let best = BestStep { n: 10, k: 8, error: -1.5e-8_f64 };
        let out = render(OutputFormat::Json, |r| r.best(&best));
        let v: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(v["kind"], "best");
        assert_eq!(v["k"], 8);
        assert_eq!(v["n"], 10);
    }
}
