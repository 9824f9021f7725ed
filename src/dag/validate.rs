// src/dag/validate.rs

use std::collections::HashMap;

use crate::dag::graph::RequirementGraph;
use crate::errors::{Result, StepdagError};

/// Check that `order` is a valid execution order for `graph`.
///
/// Valid means every task of the graph appears exactly once, no unknown task
/// appears, and each prerequisite comes before the tasks that depend on it.
/// The first violation found is returned as [`StepdagError::InvalidOrder`].
pub fn validate_order<S: AsRef<str>>(graph: &RequirementGraph, order: &[S]) -> Result<()> {
    let mut position: HashMap<&str, usize> = HashMap::with_capacity(order.len());

    for (idx, task) in order.iter().enumerate() {
        let task = task.as_ref();
        if !graph.contains(task) {
            return Err(StepdagError::InvalidOrder(format!(
                "task '{task}' is not part of the requirement graph"
            )));
        }
        if position.insert(task, idx).is_some() {
            return Err(StepdagError::InvalidOrder(format!(
                "task '{task}' appears more than once"
            )));
        }
    }

    if let Some(missing) = graph.tasks().find(|t| !position.contains_key(t)) {
        return Err(StepdagError::InvalidOrder(format!(
            "task '{missing}' is missing from the order"
        )));
    }

    for (idx, task) in order.iter().enumerate() {
        let task = task.as_ref();
        for prereq in graph.prerequisites_of(task) {
            if position[prereq] > idx {
                return Err(StepdagError::InvalidOrder(format!(
                    "task '{task}' is ordered before its prerequisite '{prereq}'"
                )));
            }
        }
    }

    Ok(())
}
