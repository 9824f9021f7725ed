// src/dag/graph.rs

use std::collections::{BTreeMap, BTreeSet};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::dag::requirement::Requirement;
use crate::types::TaskId;

/// Internal node structure: stores immediate prerequisites and dependents.
#[derive(Debug, Clone, Default)]
struct DagNode {
    /// Tasks that must complete before this one may start.
    prerequisites: BTreeSet<TaskId>,
    /// Tasks that list this one as a prerequisite.
    dependents: BTreeSet<TaskId>,
}

/// Requirement graph keyed by task ID.
///
/// Every task mentioned on either side of a requirement has a node, so a
/// task without prerequisites still has an (empty) entry. Nodes are kept in
/// a `BTreeMap`, so [`RequirementGraph::tasks`] yields IDs in ascending order.
///
/// Acyclicity is *not* checked on construction; the ordering and scheduling
/// operations report cycles when they get stuck.
#[derive(Debug, Clone, Default)]
pub struct RequirementGraph {
    nodes: BTreeMap<TaskId, DagNode>,
}

impl RequirementGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate pairwise requirements into a graph.
    pub fn from_requirements<'a, I>(requirements: I) -> Self
    where
        I: IntoIterator<Item = &'a Requirement>,
    {
        let mut graph = Self::new();
        for req in requirements {
            graph.add_requirement(&req.step, &req.before);
        }
        graph
    }

    /// Add a task with no constraints (no-op if it already exists).
    pub fn add_task(&mut self, task: &str) {
        self.nodes.entry(task.to_string()).or_default();
    }

    /// Record that `step` must finish before `before` can begin.
    ///
    /// Repeated requirements are idempotent.
    pub fn add_requirement(&mut self, step: &str, before: &str) {
        self.nodes
            .entry(step.to_string())
            .or_default()
            .dependents
            .insert(before.to_string());
        self.nodes
            .entry(before.to_string())
            .or_default()
            .prerequisites
            .insert(step.to_string());
    }

    /// All task IDs in ascending order.
    pub fn tasks(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(|s| s.as_str())
    }

    pub fn contains(&self, task: &str) -> bool {
        self.nodes.contains_key(task)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct requirement edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.prerequisites.len()).sum()
    }

    /// Immediate prerequisites of a task (empty for unknown tasks).
    pub fn prerequisites_of(&self, task: &str) -> impl Iterator<Item = &str> {
        self.nodes
            .get(task)
            .into_iter()
            .flat_map(|n| n.prerequisites.iter().map(|s| s.as_str()))
    }

    /// Immediate dependents of a task (empty for unknown tasks).
    pub fn dependents_of(&self, task: &str) -> impl Iterator<Item = &str> {
        self.nodes
            .get(task)
            .into_iter()
            .flat_map(|n| n.dependents.iter().map(|s| s.as_str()))
    }

    /// Tasks with no prerequisites, in ascending order.
    pub fn roots(&self) -> impl Iterator<Item = &str> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.prerequisites.is_empty())
            .map(|(name, _)| name.as_str())
    }

    /// Return one task that sits on a cycle, or `None` if the graph is acyclic.
    pub fn find_cycle(&self) -> Option<TaskId> {
        // Edge direction: prerequisite -> dependent.
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

        for name in self.nodes.keys() {
            graph.add_node(name.as_str());
        }
        for (name, node) in self.nodes.iter() {
            for dep in node.dependents.iter() {
                graph.add_edge(name.as_str(), dep.as_str(), ());
            }
        }

        match toposort(&graph, None) {
            Ok(_order) => None,
            Err(cycle) => Some(cycle.node_id().to_string()),
        }
    }
}
