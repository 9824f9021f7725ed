// src/sim/workers.rs

//! Fixed-size pool of simulated worker slots.

use crate::types::TaskId;

/// A task currently occupying a worker slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkSlot {
    pub task: TaskId,
    /// Ticks still needed, including the current one.
    pub remaining: u64,
}

/// `N` slots, each idle (`None`) or busy with one task.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    slots: Vec<Option<WorkSlot>>,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Self {
        Self {
            slots: vec![None; workers],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn busy_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn has_idle(&self) -> bool {
        self.slots.iter().any(|s| s.is_none())
    }

    pub fn is_assigned(&self, task: &str) -> bool {
        self.slots
            .iter()
            .flatten()
            .any(|slot| slot.task == task)
    }

    /// Put `task` into the lowest-indexed idle slot.
    ///
    /// Returns the slot index, or `None` if every slot is busy.
    pub fn assign(&mut self, task: TaskId, duration: u64) -> Option<usize> {
        let idx = self.slots.iter().position(|s| s.is_none())?;
        self.slots[idx] = Some(WorkSlot {
            task,
            remaining: duration,
        });
        Some(idx)
    }

    /// Spend one tick on every busy slot.
    ///
    /// Slots that reach zero are freed; their `(slot index, task)` pairs are
    /// returned in slot order.
    pub fn tick(&mut self) -> Vec<(usize, TaskId)> {
        let mut finished = Vec::new();

        for (idx, slot) in self.slots.iter_mut().enumerate() {
            let done = match slot {
                Some(work) => {
                    work.remaining = work.remaining.saturating_sub(1);
                    work.remaining == 0
                }
                None => false,
            };
            if done {
                if let Some(work) = slot.take() {
                    finished.push((idx, work.task));
                }
            }
        }

        finished
    }

    /// Read-only view of the slots.
    pub fn slots(&self) -> &[Option<WorkSlot>] {
        &self.slots
    }
}
