//! CLI entrypoint for the diffquot harness.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use diffquot_harness::config::{self, MixedConfig};
use diffquot_harness::structured_log::LogEmitter;
use diffquot_harness::{
    ExperimentRunner, HarnessError, OutputFormat, PrecisionChoice, Reporter, RunConfig,
};

/// Forward-difference error sweeps for f(x) = Σ xᵢ².
#[derive(Debug, Parser)]
#[command(name = "diffquot")]
#[command(about = "Forward-difference error sweeps for the sum-of-squares objective")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sweep step exponents k and problem sizes n over the scaled point (1, 2, …)/γ.
    Sweep {
        /// Precision to run at (`f32`, `f64`, or `both`).
        #[arg(long, default_value = "f64")]
        precision: String,
        /// Prescaling factor γ.
        #[arg(long, default_value_t = config::DEFAULT_GAMMA)]
        gamma: f64,
        /// Sample buffer capacity; problem sizes stay strictly below it.
        #[arg(long, default_value_t = config::DEFAULT_CAPACITY)]
        capacity: usize,
        /// Ratio of the geometric problem-size sequence.
        #[arg(long, default_value_t = config::DEFAULT_BASE)]
        base: usize,
        /// First problem size.
        #[arg(long, default_value_t = 1)]
        first_n: usize,
        /// First step exponent.
        #[arg(long, default_value_t = 0)]
        start_k: u32,
        /// Summation order of the objective (`forward` or `reverse`).
        #[arg(long, default_value = "forward")]
        order: String,
        /// Output format: `text` (default) or `json`.
        #[arg(long, default_value = "text")]
        format: String,
        /// Print the best step exponent per problem size after each sweep.
        #[arg(long)]
        summary: bool,
        /// Structured JSONL log output path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Run identifier recorded in the log (defaults to a clock-derived id).
        #[arg(long)]
        run_id: Option<String>,
    },
    /// Evaluate f over uniform samples in single and double precision.
    Mixed {
        /// Sample buffer capacity per precision.
        #[arg(long, default_value_t = config::MIXED_CAPACITY)]
        capacity: usize,
        /// Prefix length to evaluate.
        #[arg(long, default_value_t = config::MIXED_PROBLEM_SIZE)]
        n: usize,
        /// Samples are drawn from [-a, a).
        #[arg(long, default_value_t = config::MIXED_HALF_WIDTH)]
        half_width: f64,
        /// Fixed RNG seed (decimal or 0x...); defaults to the clock's microseconds.
        #[arg(long)]
        seed: Option<String>,
        /// Output format: `text` (default) or `json`.
        #[arg(long, default_value = "text")]
        format: String,
        /// Structured JSONL log output path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Run identifier recorded in the log.
        #[arg(long)]
        run_id: Option<String>,
    },
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("diffquot: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout().lock();

    match cli.command {
        None => {
            let config = RunConfig::from_env();
            let mut runner = ExperimentRunner::new(Reporter::new(stdout, OutputFormat::Text));
            runner.run(&config)?;
        }
        Some(Command::Sweep {
            precision,
            gamma,
            capacity,
            base,
            first_n,
            start_k,
            order,
            format,
            summary,
            log,
            run_id,
        }) => {
            let sweep = diffquot_core::SweepConfig::default()
                .with_gamma(gamma)
                .with_base(base)
                .with_first_n(first_n)
                .with_start_k(start_k)
                .with_order(config::parse_order(&order)?);
            let config = RunConfig {
                capacity,
                precision: PrecisionChoice::parse(&precision)?,
                sweep,
                format: OutputFormat::parse(&format)?,
                summary,
            };
            config.validate()?;

            let mut runner = ExperimentRunner::new(Reporter::new(stdout, config.format));
            if let Some(path) = log {
                runner = runner.with_log(open_log(&path, run_id)?);
            }
            let outcomes = runner.run(&config)?;
            for outcome in outcomes {
                eprintln!(
                    "{}: {} observations, finished on {} at k={}",
                    outcome.precision, outcome.observations, outcome.terminal_kind, outcome.terminal_k
                );
            }
        }
        Some(Command::Mixed {
            capacity,
            n,
            half_width,
            seed,
            format,
            log,
            run_id,
        }) => {
            let config = MixedConfig {
                capacity,
                n,
                half_width,
                seed: seed.as_deref().map(parse_seed).transpose()?,
            };
            let mut runner =
                ExperimentRunner::new(Reporter::new(stdout, OutputFormat::parse(&format)?));
            if let Some(path) = log {
                runner = runner.with_log(open_log(&path, run_id)?);
            }
            runner.run_mixed(&config)?;
        }
    }

    io::stdout().flush()?;
    Ok(())
}

fn open_log(path: &std::path::Path, run_id: Option<String>) -> Result<LogEmitter, HarnessError> {
    let run_id = run_id.unwrap_or_else(default_run_id);
    let emitter = LogEmitter::to_file(path, &run_id)?;
    eprintln!("Writing structured log to {}", path.display());
    Ok(emitter)
}

fn default_run_id() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("run-{secs}")
}

fn parse_seed(raw: &str) -> Result<u64, Box<dyn std::error::Error>> {
    let s = raw.trim();
    let seed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        let hex = hex.replace('_', "");
        u64::from_str_radix(&hex, 16)?
    } else {
        let dec = s.replace('_', "");
        dec.parse::<u64>()?
    };
    Ok(seed)
}
