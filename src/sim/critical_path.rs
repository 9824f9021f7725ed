// src/sim/critical_path.rs

use std::collections::HashMap;

use crate::dag::{topological_order, RequirementGraph};
use crate::errors::Result;
use crate::sim::cost::CostModel;

/// Total duration of the longest prerequisite chain in `graph`.
///
/// No schedule can finish sooner than this, whatever the worker count.
/// Fails like [`topological_order`] on cyclic graphs and like
/// [`CostModel::cost_of`] on unknown costs.
pub fn critical_path_ticks(
    graph: &RequirementGraph,
    cost: &CostModel,
    base_duration: u64,
) -> Result<u64> {
    let durations = cost.durations_for(graph, base_duration)?;
    let order = topological_order(graph)?;

    let mut finish: HashMap<&str, u64> = HashMap::with_capacity(order.len());
    for task in order.iter() {
        let ready_at = graph
            .prerequisites_of(task)
            .map(|p| finish[p])
            .max()
            .unwrap_or(0);
        finish.insert(task.as_str(), ready_at.saturating_add(durations[task]));
    }

    Ok(finish.values().copied().max().unwrap_or(0))
}
