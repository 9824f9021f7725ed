// src/dag/order.rs

//! Single-worker ordering: a topological sort that always picks the
//! lexicographically smallest ready task.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use tracing::{debug, warn};

use crate::dag::graph::RequirementGraph;
use crate::errors::{Result, StepdagError};
use crate::types::TaskId;

/// Compute the step order for `graph`.
///
/// Repeatedly takes the smallest task whose prerequisites have all been
/// placed. Fails with [`StepdagError::NoValidOrdering`] if tasks remain but
/// none of them is ready.
pub fn topological_order(graph: &RequirementGraph) -> Result<Vec<TaskId>> {
    let mut unmet: BTreeMap<&str, usize> = graph
        .tasks()
        .map(|t| (t, graph.prerequisites_of(t).count()))
        .collect();

    let mut ready: BinaryHeap<Reverse<&str>> = unmet
        .iter()
        .filter(|(_, n)| **n == 0)
        .map(|(t, _)| Reverse(*t))
        .collect();

    let mut order: Vec<TaskId> = Vec::with_capacity(graph.len());

    while let Some(Reverse(task)) = ready.pop() {
        order.push(task.to_string());
        unmet.remove(task);

        for dependent in graph.dependents_of(task) {
            if let Some(count) = unmet.get_mut(dependent) {
                *count -= 1;
                if *count == 0 {
                    ready.push(Reverse(dependent));
                }
            }
        }
    }

    if !unmet.is_empty() {
        let remaining: Vec<TaskId> = unmet.keys().map(|t| t.to_string()).collect();
        let cycle_hint = graph.find_cycle();
        warn!(?remaining, ?cycle_hint, "ordering stuck; no task is ready");
        return Err(StepdagError::NoValidOrdering {
            remaining,
            cycle_hint,
        });
    }

    debug!(tasks = order.len(), "computed step order");
    Ok(order)
}
