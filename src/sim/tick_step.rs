// src/sim/tick_step.rs

//! Step-by-step result types for the scheduler.

use crate::types::TaskId;

/// Structured result of a single simulated tick.
///
/// Useful for tests that want to step the simulation manually and make
/// assertions about what changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickStep {
    /// The tick that was simulated (0-based).
    pub tick: u64,
    /// Tasks assigned to a worker during this tick, with their slot index.
    pub newly_started: Vec<(usize, TaskId)>,
    /// Tasks whose last tick of work was this one, in slot order.
    pub newly_completed: Vec<TaskId>,
    /// Whether every task is now completed.
    pub finished: bool,
}
