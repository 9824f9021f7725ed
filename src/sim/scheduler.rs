// src/sim/scheduler.rs

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, trace, warn};

use crate::dag::RequirementGraph;
use crate::errors::{Result, StepdagError};
use crate::sim::cost::CostModel;
use crate::sim::task_state::{Schedule, TaskSpan, TaskState};
use crate::sim::tick_step::TickStep;
use crate::sim::workers::WorkerPool;
use crate::types::TaskId;

/// Knobs for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerOptions {
    /// Number of worker slots (must be >= 1).
    pub workers: usize,
    /// Added to every task's cost.
    pub base_duration: u64,
}

/// Discrete-time simulation of a worker pool draining a requirement graph.
///
/// Each tick:
/// 1. every eligible task (prerequisites completed, not yet assigned) is
///    handed to an idle slot, smallest task ID first;
/// 2. every busy slot spends one tick; tasks that reach zero complete and
///    free their slot. Those completions only unlock dependents on the
///    *next* tick.
///
/// If a tick starts with tasks outstanding but nothing can be assigned and
/// nothing is running, the graph is inconsistent (usually cyclic) and the
/// step fails with [`StepdagError::NoValidOrdering`].
#[derive(Debug)]
pub struct Scheduler {
    graph: RequirementGraph,
    durations: HashMap<TaskId, u64>,
    pool: WorkerPool,
    completed: HashSet<TaskId>,
    /// `(task, slot, start tick)` for tasks that have not completed yet.
    running: HashMap<TaskId, (usize, u64)>,
    start_order: Vec<TaskId>,
    completion_order: Vec<TaskId>,
    spans: Vec<TaskSpan>,
    tick: u64,
}

impl Scheduler {
    /// Prepare a simulation. Every task's duration is resolved up front, so
    /// an unknown cost fails here rather than mid-run.
    pub fn new(
        graph: RequirementGraph,
        options: SchedulerOptions,
        cost: &CostModel,
    ) -> Result<Self> {
        if options.workers == 0 {
            return Err(StepdagError::InvalidWorkerCount("0".to_string()));
        }

        let durations = cost.durations_for(&graph, options.base_duration)?;

        debug!(
            tasks = graph.len(),
            workers = options.workers,
            base_duration = options.base_duration,
            "scheduler: prepared simulation"
        );

        Ok(Self {
            pool: WorkerPool::new(options.workers),
            completed: HashSet::with_capacity(graph.len()),
            running: HashMap::new(),
            start_order: Vec::with_capacity(graph.len()),
            completion_order: Vec::with_capacity(graph.len()),
            spans: Vec::with_capacity(graph.len()),
            tick: 0,
            durations,
            graph,
        })
    }

    /// `true` once every task has completed.
    pub fn is_finished(&self) -> bool {
        self.completed.len() == self.graph.len()
    }

    /// Number of ticks simulated so far.
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn workers(&self) -> &WorkerPool {
        &self.pool
    }

    /// Full duration (base + cost) of a task.
    pub fn duration_of(&self, task: &str) -> Option<u64> {
        self.durations.get(task).copied()
    }

    /// Read-only state of the given task, or `None` if it is unknown.
    pub fn state_of(&self, task: &str) -> Option<TaskState> {
        if !self.graph.contains(task) {
            return None;
        }
        let state = if self.completed.contains(task) {
            TaskState::Completed
        } else if self.running.contains_key(task) {
            TaskState::InProgress
        } else if self.prerequisites_done(task) {
            TaskState::Eligible
        } else {
            TaskState::Blocked
        };
        Some(state)
    }

    /// Tasks that could be assigned right now, in ascending ID order.
    pub fn eligible_tasks(&self) -> Vec<TaskId> {
        self.graph
            .tasks()
            .filter(|t| {
                !self.completed.contains(*t)
                    && !self.pool.is_assigned(t)
                    && self.prerequisites_done(t)
            })
            .map(|t| t.to_string())
            .collect()
    }

    /// Simulate exactly one tick.
    ///
    /// Calling this after the run has finished is a no-op that reports
    /// `finished: true`.
    pub fn step(&mut self) -> Result<TickStep> {
        if self.is_finished() {
            return Ok(TickStep {
                tick: self.tick,
                newly_started: Vec::new(),
                newly_completed: Vec::new(),
                finished: true,
            });
        }

        let tick = self.tick;
        let mut newly_started = Vec::new();

        for task in self.eligible_tasks() {
            if !self.pool.has_idle() {
                break;
            }
            let duration = self.durations[&task];
            if let Some(slot) = self.pool.assign(task.clone(), duration) {
                debug!(task = %task, slot, tick, duration, "task started");
                self.running.insert(task.clone(), (slot, tick));
                self.start_order.push(task.clone());
                newly_started.push((slot, task));
            }
        }

        if self.pool.busy_count() == 0 {
            return Err(self.deadlock());
        }

        let mut newly_completed = Vec::new();
        for (slot, task) in self.pool.tick() {
            let (_, start) = self.running.remove(&task).unwrap_or((slot, tick));
            debug!(task = %task, slot, tick, "task completed");
            self.spans.push(TaskSpan {
                task: task.clone(),
                worker: slot,
                start,
                end: tick + 1,
            });
            self.completed.insert(task.clone());
            self.completion_order.push(task.clone());
            newly_completed.push(task);
        }

        self.tick += 1;
        let finished = self.is_finished();

        trace!(
            tick,
            busy = self.pool.busy_count(),
            completed = self.completed.len(),
            "tick simulated"
        );

        Ok(TickStep {
            tick,
            newly_started,
            newly_completed,
            finished,
        })
    }

    /// Step until every task has completed.
    pub fn run(mut self) -> Result<Schedule> {
        while !self.is_finished() {
            self.step()?;
        }

        info!(
            total_ticks = self.tick,
            tasks = self.graph.len(),
            workers = self.pool.len(),
            "scheduler: all tasks completed"
        );

        let start_index: HashMap<&str, usize> = self
            .start_order
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i))
            .collect();
        let mut spans = std::mem::take(&mut self.spans);
        spans.sort_by_key(|s| start_index.get(s.task.as_str()).copied());

        Ok(Schedule {
            total_ticks: self.tick,
            start_order: self.start_order,
            completion_order: self.completion_order,
            spans,
        })
    }

    fn prerequisites_done(&self, task: &str) -> bool {
        self.graph
            .prerequisites_of(task)
            .all(|p| self.completed.contains(p))
    }

    fn deadlock(&self) -> StepdagError {
        let remaining: Vec<TaskId> = self
            .graph
            .tasks()
            .filter(|t| !self.completed.contains(*t))
            .map(|t| t.to_string())
            .collect();
        let cycle_hint = self.graph.find_cycle();

        warn!(
            tick = self.tick,
            ?remaining,
            ?cycle_hint,
            "scheduler: no task eligible and no task running"
        );

        StepdagError::NoValidOrdering {
            remaining,
            cycle_hint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_graph() -> RequirementGraph {
        let mut g = RequirementGraph::new();
        for (a, b) in [
            ("C", "A"),
            ("C", "F"),
            ("A", "B"),
            ("A", "D"),
            ("B", "E"),
            ("D", "E"),
            ("F", "E"),
        ] {
            g.add_requirement(a, b);
        }
        g
    }

    fn opts(workers: usize, base_duration: u64) -> SchedulerOptions {
        SchedulerOptions {
            workers,
            base_duration,
        }
    }

    #[test]
    fn two_workers_reference_example_takes_fifteen_ticks() {
        let s = Scheduler::new(reference_graph(), opts(2, 0), &CostModel::Alphabetical).unwrap();
        let schedule = s.run().unwrap();
        assert_eq!(schedule.total_ticks, 15);
        assert_eq!(schedule.completion_order.concat(), "CABFDE");
    }

    #[test]
    fn single_worker_matches_step_order() {
        let s = Scheduler::new(reference_graph(), opts(1, 0), &CostModel::Alphabetical).unwrap();
        let schedule = s.run().unwrap();
        assert_eq!(schedule.completion_order.concat(), "CABDFE");
        assert_eq!(schedule.start_order.concat(), "CABDFE");
        // 3 + 1 + 2 + 4 + 6 + 5
        assert_eq!(schedule.total_ticks, 21);
    }

    #[test]
    fn first_tick_starts_c_and_state_progresses() {
        let mut s =
            Scheduler::new(reference_graph(), opts(2, 0), &CostModel::Alphabetical).unwrap();
        assert_eq!(s.state_of("C"), Some(TaskState::Eligible));
        assert_eq!(s.state_of("A"), Some(TaskState::Blocked));
        assert_eq!(s.state_of("Q"), None);

        let step = s.step().unwrap();
        assert_eq!(step.tick, 0);
        assert_eq!(step.newly_started, vec![(0, "C".to_string())]);
        assert!(step.newly_completed.is_empty());
        assert_eq!(s.state_of("C"), Some(TaskState::InProgress));

        s.step().unwrap();
        let step = s.step().unwrap();
        assert_eq!(step.newly_completed, vec!["C".to_string()]);
        assert_eq!(s.state_of("C"), Some(TaskState::Completed));
        assert_eq!(s.state_of("A"), Some(TaskState::Eligible));
        assert_eq!(s.current_tick(), 3);
    }

    #[test]
    fn completion_unlocks_dependents_only_on_next_tick() {
        let mut g = RequirementGraph::new();
        g.add_requirement("A", "B");
        let mut s = Scheduler::new(g, opts(2, 0), &CostModel::Alphabetical).unwrap();

        let step = s.step().unwrap();
        assert_eq!(step.newly_started, vec![(0, "A".to_string())]);
        assert_eq!(step.newly_completed, vec!["A".to_string()]);

        let step = s.step().unwrap();
        assert_eq!(step.newly_started, vec![(0, "B".to_string())]);
    }

    #[test]
    fn base_duration_is_added_to_every_task() {
        let mut g = RequirementGraph::new();
        g.add_task("A");
        let s = Scheduler::new(g, opts(1, 60), &CostModel::Alphabetical).unwrap();
        assert_eq!(s.duration_of("A"), Some(61));
        assert_eq!(s.run().unwrap().total_ticks, 61);
    }

    #[test]
    fn idle_workers_beyond_eligible_tasks_stay_idle() {
        let mut g = RequirementGraph::new();
        g.add_task("B");
        g.add_task("A");
        let schedule = Scheduler::new(g, opts(5, 0), &CostModel::Alphabetical)
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(schedule.total_ticks, 2);
        assert_eq!(schedule.spans[0].task, "A");
        assert_eq!(schedule.spans[0].worker, 0);
        assert_eq!(schedule.spans[1].worker, 1);
    }

    #[test]
    fn empty_graph_finishes_immediately() {
        let s = Scheduler::new(RequirementGraph::new(), opts(3, 10), &CostModel::Alphabetical)
            .unwrap();
        assert!(s.is_finished());
        assert_eq!(s.run().unwrap().total_ticks, 0);
    }

    #[test]
    fn cycle_fails_instead_of_hanging() {
        let mut g = RequirementGraph::new();
        g.add_requirement("A", "B");
        g.add_requirement("B", "A");
        let err = Scheduler::new(g, opts(2, 0), &CostModel::Alphabetical)
            .unwrap()
            .run()
            .unwrap_err();
        assert!(matches!(err, StepdagError::NoValidOrdering { .. }), "{err}");
    }

    #[test]
    fn cycle_behind_valid_prefix_fails_after_prefix_runs() {
        let mut g = RequirementGraph::new();
        g.add_requirement("A", "B");
        g.add_requirement("B", "C");
        g.add_requirement("C", "B");
        let mut s = Scheduler::new(g, opts(1, 0), &CostModel::Alphabetical).unwrap();

        let step = s.step().unwrap();
        assert_eq!(step.newly_completed, vec!["A".to_string()]);
        match s.step() {
            Err(StepdagError::NoValidOrdering { remaining, .. }) => {
                assert_eq!(remaining, ["B", "C"]);
            }
            other => panic!("expected deadlock, got {other:?}"),
        }
    }

    #[test]
    fn zero_workers_rejected() {
        let err = Scheduler::new(reference_graph(), opts(0, 0), &CostModel::Alphabetical)
            .unwrap_err();
        assert!(matches!(err, StepdagError::InvalidWorkerCount(_)));
    }

    #[test]
    fn unknown_cost_fails_before_simulating() {
        let mut g = RequirementGraph::new();
        g.add_requirement("build", "test");
        let err = Scheduler::new(g, opts(1, 0), &CostModel::Alphabetical).unwrap_err();
        assert!(matches!(err, StepdagError::UnknownCost(t) if t == "build"));
    }

    #[test]
    fn overflowing_base_duration_fails_before_simulating() {
        let mut g = RequirementGraph::new();
        g.add_task("A");
        let base = crate::input::parse_base_duration("18446744073709551615").unwrap();

        let err = Scheduler::new(g, opts(1, base), &CostModel::Alphabetical).unwrap_err();
        assert!(matches!(err, StepdagError::InvalidBaseDuration(_)));
    }
}
