// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod input;
pub mod logging;
pub mod sim;
pub mod types;

use std::io::IsTerminal;
use std::path::Path;

use anyhow::Result;
use tokio::io::AsyncBufRead;
use tracing::{debug, info, Level};

use crate::cli::{CliArgs, Command, DurationArgs};
use crate::config::{resolve_config, ConfigFile};
use crate::dag::{topological_order, validate_order, Requirement, RequirementGraph};
use crate::input::{parse_base_duration, parse_worker_count, DynReader, LineInput};
use crate::sim::{critical_path_ticks, Schedule, Scheduler, SchedulerOptions};
use crate::types::TaskId;

const DURATION_PROMPT: &str = "Input minimum step duration in seconds:";
const WORKERS_PROMPT: &str = "Input number of workers:";
const REQUIREMENTS_PROMPT: &str = "Input step requirements then press <ctrl-D>:";

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the shared line input (stdin or `--input`)
/// - the selected command
/// - printing the single result line
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = resolve_config(args.config.as_deref())?;
    let (mut input, interactive) = open_input(args.input.as_deref()).await?;

    match args.command {
        Command::Order => {
            let order = solve_order(&mut input, interactive).await?;
            println!("{}", format_order(&order));
        }
        Command::Duration(duration_args) => {
            let schedule = solve_duration(&mut input, &cfg, &duration_args, interactive).await?;
            if duration_args.timeline {
                for span in schedule.spans.iter() {
                    println!("  {span}");
                }
            }
            println!("{}", format_duration(schedule.total_ticks));
        }
        Command::Check => {
            prompt(interactive, REQUIREMENTS_PROMPT);
            let graph = read_graph(&mut input).await?;
            print_check(&graph)?;
        }
    }

    Ok(())
}

/// Read requirements and compute the single-worker step order.
pub async fn solve_order<R>(
    input: &mut LineInput<R>,
    interactive: bool,
) -> errors::Result<Vec<TaskId>>
where
    R: AsyncBufRead + Unpin,
{
    prompt(interactive, REQUIREMENTS_PROMPT);
    let graph = read_graph(input).await?;
    let order = topological_order(&graph)?;
    Ok(order)
}

/// Resolve base duration / worker count, read requirements and run the
/// worker simulation.
///
/// Precedence for each setting: CLI flag, then `[scheduler]` in the config,
/// then one line read from `input` (base duration before worker count).
pub async fn solve_duration<R>(
    input: &mut LineInput<R>,
    cfg: &ConfigFile,
    args: &DurationArgs,
    interactive: bool,
) -> errors::Result<Schedule>
where
    R: AsyncBufRead + Unpin,
{
    let base_duration = match args.base_duration.or(cfg.scheduler.base_duration) {
        Some(v) => v,
        None => {
            prompt(interactive, DURATION_PROMPT);
            input
                .read_value("the minimum step duration", parse_base_duration)
                .await?
        }
    };

    let workers = match args.workers.or(cfg.scheduler.workers) {
        Some(v) => v,
        None => {
            prompt(interactive, WORKERS_PROMPT);
            input
                .read_value("the worker count", parse_worker_count)
                .await?
        }
    };

    prompt(interactive, REQUIREMENTS_PROMPT);
    let graph = read_graph(input).await?;

    let cost = cfg.cost_model(args.cost_model)?;
    debug!(?cost, base_duration, workers, "resolved duration settings");

    if tracing::enabled!(Level::DEBUG) && graph.find_cycle().is_none() {
        if let Ok(lower_bound) = critical_path_ticks(&graph, &cost, base_duration) {
            debug!(lower_bound, "critical path length");
        }
    }

    let options = SchedulerOptions {
        workers,
        base_duration,
    };
    let schedule = Scheduler::new(graph, options, &cost)?.run()?;
    Ok(schedule)
}

/// Parse every remaining input line as a requirement and build the graph.
pub async fn read_graph<R>(input: &mut LineInput<R>) -> errors::Result<RequirementGraph>
where
    R: AsyncBufRead + Unpin,
{
    let requirements: Vec<Requirement> = input.parse_remaining().await?;
    let graph = RequirementGraph::from_requirements(&requirements);
    info!(
        requirements = requirements.len(),
        tasks = graph.len(),
        "requirement graph built"
    );
    Ok(graph)
}

pub fn format_order(order: &[TaskId]) -> String {
    format!("Step order: {}", order.concat())
}

pub fn format_duration(total_ticks: u64) -> String {
    format!("Steps completed in {total_ticks} seconds")
}

/// Open `--input` if given, stdin otherwise.
///
/// The flag is `true` when reading an interactive terminal, in which case
/// prompts are shown on stderr.
async fn open_input(path: Option<&Path>) -> Result<(LineInput<DynReader>, bool)> {
    match path {
        Some(p) => Ok((LineInput::open(p).await?, false)),
        None => Ok((LineInput::stdin(), std::io::stdin().is_terminal())),
    }
}

fn prompt(enabled: bool, message: &str) {
    if enabled {
        eprintln!("{message}");
    }
}

/// `check` output: graph size, roots and whether an order exists.
fn print_check(graph: &RequirementGraph) -> Result<()> {
    println!("stepdag check");
    println!("  tasks = {}", graph.len());
    println!("  requirements = {}", graph.edge_count());
    println!("  roots = {}", graph.roots().collect::<Vec<_>>().join(", "));

    let order = topological_order(graph)?;
    validate_order(graph, &order)?;
    println!("  order = {}", order.concat());

    debug!("check complete (no scheduling)");
    Ok(())
}
