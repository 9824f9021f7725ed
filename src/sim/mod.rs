// src/sim/mod.rs

//! Multi-worker task scheduling simulation.
//!
//! - [`scheduler`] owns the tick loop and the per-run state.
//! - [`workers`] is the fixed pool of worker slots.
//! - [`cost`] maps task IDs to durations.
//! - [`critical_path`] computes the lower bound any schedule must respect.
//! - [`tick_step`] and [`task_state`] hold the result and view types.

pub mod cost;
pub mod critical_path;
pub mod scheduler;
pub mod task_state;
pub mod tick_step;
pub mod workers;

pub use cost::CostModel;
pub use critical_path::critical_path_ticks;
pub use scheduler::{Scheduler, SchedulerOptions};
pub use task_state::{Schedule, TaskSpan, TaskState};
pub use tick_step::TickStep;
pub use workers::{WorkSlot, WorkerPool};
