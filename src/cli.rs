// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::types::CostModelKind;

/// Command-line arguments for `stepdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stepdag",
    version,
    about = "Order and time steps linked by \"must be finished before\" requirements.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a config file (TOML).
    ///
    /// Default: `Stepdag.toml` in the current working directory, if present.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Read input from this file instead of stdin.
    #[arg(long, global = true, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STEPDAG_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the order a single worker completes the steps in.
    Order,

    /// Simulate a pool of workers and print the total time taken.
    Duration(DurationArgs),

    /// Parse and validate the requirements without scheduling them.
    Check,
}

/// Options for the `duration` command.
///
/// Values missing here fall back to `[scheduler]` in the config file, then to
/// a line read from the input (base duration first, then worker count).
#[derive(Debug, Clone, Default, Args)]
pub struct DurationArgs {
    /// Minimum duration added to every step.
    #[arg(long, value_name = "N")]
    pub base_duration: Option<u64>,

    /// Number of workers (>= 1).
    #[arg(long, value_name = "N", value_parser = parse_workers_arg)]
    pub workers: Option<usize>,

    /// Override the cost model from the config (alphabetical, table, uniform).
    #[arg(long, value_name = "MODEL")]
    pub cost_model: Option<CostModelKind>,

    /// Also print when and on which worker every step ran.
    #[arg(long)]
    pub timeline: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn parse_workers_arg(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{s} is not a valid worker count (expected an integer >= 1)")),
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_duration_flags() {
        let args = CliArgs::try_parse_from([
            "stepdag",
            "--input",
            "steps.txt",
            "duration",
            "--base-duration",
            "60",
            "--workers",
            "5",
            "--cost-model",
            "uniform",
        ])
        .unwrap();

        assert_eq!(args.input, Some(PathBuf::from("steps.txt")));
        match args.command {
            Command::Duration(d) => {
                assert_eq!(d.base_duration, Some(60));
                assert_eq!(d.workers, Some(5));
                assert_eq!(d.cost_model, Some(CostModelKind::Uniform));
                assert!(!d.timeline);
            }
            other => panic!("expected duration command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_workers() {
        assert!(CliArgs::try_parse_from(["stepdag", "duration", "--workers", "0"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = CliArgs::try_parse_from(["stepdag", "order", "--log-level", "debug"]).unwrap();
        assert!(matches!(args.command, Command::Order));
        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    }
}
