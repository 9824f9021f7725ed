#![allow(dead_code)]

use std::collections::BTreeMap;

use stepdag::config::{ConfigFile, CostSection, RawConfigFile, SchedulerSection};
use stepdag::dag::RequirementGraph;
use stepdag::types::CostModelKind;

/// The seven-requirement graph from the puzzle description:
/// `C→A, C→F, A→B, A→D, B→E, D→E, F→E`.
pub const REFERENCE_EDGES: [(&str, &str); 7] = [
    ("C", "A"),
    ("C", "F"),
    ("A", "B"),
    ("A", "D"),
    ("B", "E"),
    ("D", "E"),
    ("F", "E"),
];

/// Builder for `RequirementGraph` to simplify test setup.
#[derive(Default)]
pub struct GraphBuilder {
    graph: RequirementGraph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `step` must be finished before `before` can begin.
    pub fn before(mut self, step: &str, before: &str) -> Self {
        self.graph.add_requirement(step, before);
        self
    }

    pub fn edges(mut self, edges: &[(&str, &str)]) -> Self {
        for (step, before) in edges {
            self.graph.add_requirement(step, before);
        }
        self
    }

    /// A task with no constraints.
    pub fn task(mut self, name: &str) -> Self {
        self.graph.add_task(name);
        self
    }

    pub fn build(self) -> RequirementGraph {
        self.graph
    }
}

pub fn reference_graph() -> RequirementGraph {
    GraphBuilder::new().edges(&REFERENCE_EDGES).build()
}

/// Render edges as input lines, one `Step X must be finished ...` per line.
pub fn requirement_lines(edges: &[(&str, &str)]) -> String {
    edges
        .iter()
        .map(|(step, before)| {
            format!("Step {step} must be finished before step {before} can begin.\n")
        })
        .collect()
}

/// Builder for `ConfigFile`.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                scheduler: SchedulerSection::default(),
                cost: CostSection::default(),
            },
        }
    }

    pub fn workers(mut self, n: usize) -> Self {
        self.config.scheduler.workers = Some(n);
        self
    }

    pub fn base_duration(mut self, n: u64) -> Self {
        self.config.scheduler.base_duration = Some(n);
        self
    }

    pub fn uniform_cost(mut self, n: u64) -> Self {
        self.config.cost.model = CostModelKind::Uniform;
        self.config.cost.uniform = Some(n);
        self
    }

    pub fn table_cost(mut self, task: &str, n: u64) -> Self {
        self.config.cost.model = CostModelKind::Table;
        self.config.cost.table.insert(task.to_string(), n);
        self
    }

    pub fn default_cost(mut self, n: u64) -> Self {
        self.config.cost.default = Some(n);
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Costs table helper for `CostModel::Table`.
pub fn cost_table(entries: &[(&str, u64)]) -> BTreeMap<String, u64> {
    entries.iter().map(|(t, c)| (t.to_string(), *c)).collect()
}
