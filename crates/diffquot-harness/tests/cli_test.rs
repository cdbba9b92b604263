//! Integration test: `diffquot` command line
//!
//! Validates that:
//! 1. The default run prints the double-precision reference sweep.
//! 2. `DIFFQUOT_PRECISION` selects the default-run precision.
//! 3. `mixed` prints exactly two fixed-point lines.
//! 4. Invalid arguments fail with a non-zero exit and a message on stderr.
//!
//! Run: cargo test -p diffquot-harness --test cli_test

use std::process::{Command, Output};

fn diffquot(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_diffquot"));
    cmd.args(args).env_remove("DIFFQUOT_PRECISION");
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.output().expect("failed to spawn diffquot")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn default_run_prints_reference_sweep() {
    let output = diffquot(&[], &[]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines[0], "k: 0 n: 1 err 1.000000");
    assert!(lines[1].starts_with("k: 0 n: 10 err "));
    let last = lines.last().unwrap();
    assert!(last.starts_with("difference underflown for k: 1"), "{last}");
    assert!(last.ends_with(" n: 1"));
}

#[test]
fn env_selects_single_precision() {
    let single = stdout_lines(&diffquot(&[], &[("DIFFQUOT_PRECISION", "f32")]));
    let double = stdout_lines(&diffquot(&[], &[]));
    assert!(single.len() < double.len());
    assert!(single.last().unwrap().starts_with("difference underflown for k: "));
}

#[test]
fn sweep_subcommand_emits_json() {
    let output = diffquot(
        &["sweep", "--precision", "f32", "--format", "json", "--first-n", "10"],
        &[],
    );
    assert!(output.status.success());
    let records: Vec<serde_json::Value> = stdout_lines(&output)
        .iter()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert!(records.iter().all(|r| r["precision"] == "f32"));
    assert_eq!(records.last().unwrap()["kind"], "step_underflow");
    assert!(String::from_utf8_lossy(&output.stderr).contains("f32:"));
}

#[test]
fn mixed_prints_two_lines() {
    let output = diffquot(&["mixed", "--seed", "0x2A"], &[]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 2);
    for line in &lines {
        let (_, frac) = line.split_once('.').expect("fixed-point value");
        assert_eq!(frac.len(), 5, "{line}");
        line.parse::<f64>().unwrap();
    }
    // Same seed, same numbers.
    assert_eq!(lines, stdout_lines(&diffquot(&["mixed", "--seed", "42"], &[])));
}

#[test]
fn invalid_arguments_fail() {
    for args in [
        vec!["sweep", "--gamma", "0"],
        vec!["sweep", "--precision", "f16"],
        vec!["sweep", "--order", "sideways"],
        vec!["sweep", "--capacity", "1"],
        vec!["mixed", "--n", "5000"],
    ] {
        let output = diffquot(&args, &[]);
        assert!(!output.status.success(), "{args:?} should fail");
        assert!(
            String::from_utf8_lossy(&output.stderr).starts_with("diffquot: "),
            "{args:?}"
        );
        assert!(output.stdout.is_empty(), "{args:?}");
    }
}
