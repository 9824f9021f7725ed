// src/sim/task_state.rs

//! Task states and the final schedule.

use std::fmt;

use crate::types::TaskId;

/// Public, read-only view of a task's progress.
///
/// Transitions are strictly monotonic:
/// `Blocked → Eligible → InProgress → Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TaskState {
    /// At least one prerequisite is not completed yet.
    Blocked,
    /// All prerequisites completed; waiting for an idle worker.
    Eligible,
    /// Occupying a worker slot.
    InProgress,
    Completed,
}

/// When and where one task ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpan {
    pub task: TaskId,
    /// Worker slot index.
    pub worker: usize,
    /// First tick of work (inclusive).
    pub start: u64,
    /// Tick after the last tick of work (exclusive).
    pub end: u64,
}

impl TaskSpan {
    pub fn duration(&self) -> u64 {
        self.end - self.start
    }
}

impl fmt::Display for TaskSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} worker={} start={} end={}",
            self.task, self.worker, self.start, self.end
        )
    }
}

/// Outcome of a complete simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    /// Ticks elapsed until the last task completed.
    pub total_ticks: u64,
    /// Tasks in the order they were assigned to workers.
    pub start_order: Vec<TaskId>,
    /// Tasks in the order they completed.
    pub completion_order: Vec<TaskId>,
    /// One span per task, in start order.
    pub spans: Vec<TaskSpan>,
}
