// src/sim/cost.rs

//! Per-task cost models.

use std::collections::{BTreeMap, HashMap};

use crate::dag::RequirementGraph;
use crate::errors::{Result, StepdagError};
use crate::types::TaskId;

/// Maps a task ID to its intrinsic cost in ticks.
///
/// The full duration of a task is `base_duration + cost(task)`; every cost
/// is at least 1 so a task always occupies its worker for at least one tick.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CostModel {
    /// Single uppercase letter: `A` → 1, `B` → 2, ... `Z` → 26.
    #[default]
    Alphabetical,
    /// Explicit costs, with an optional fallback for unlisted tasks.
    Table {
        costs: BTreeMap<TaskId, u64>,
        default: Option<u64>,
    },
    /// Every task costs the same.
    Uniform(u64),
}

impl CostModel {
    pub fn cost_of(&self, task: &str) -> Result<u64> {
        let cost = match self {
            CostModel::Alphabetical => alphabetical_cost(task),
            CostModel::Table { costs, default } => costs.get(task).copied().or(*default),
            CostModel::Uniform(n) => Some(*n),
        };

        match cost {
            Some(c) if c > 0 => Ok(c),
            _ => Err(StepdagError::UnknownCost(task.to_string())),
        }
    }

    /// Full duration (`base + cost`) of every task in `graph`.
    ///
    /// Fails on the first task whose cost cannot be determined, or whose
    /// duration does not fit in a `u64`.
    pub fn durations_for(
        &self,
        graph: &RequirementGraph,
        base_duration: u64,
    ) -> Result<HashMap<TaskId, u64>> {
        graph
            .tasks()
            .map(|t| {
                let total = base_duration
                    .checked_add(self.cost_of(t)?)
                    .ok_or_else(|| StepdagError::InvalidBaseDuration(base_duration.to_string()))?;
                Ok((t.to_string(), total))
            })
            .collect()
    }
}

fn alphabetical_cost(task: &str) -> Option<u64> {
    match task.as_bytes() {
        [b] if b.is_ascii_uppercase() => Some(u64::from(b - b'A') + 1),
        _ => None,
    }
}
