// src/dag/mod.rs

//! Requirement graph and ordering.
//!
//! - [`requirement`] parses individual "must be finished before" lines.
//! - [`graph`] aggregates them into a graph of prerequisites/dependents.
//! - [`order`] computes the lexicographic topological order.
//! - [`validate`] checks that an order respects every prerequisite.

pub mod graph;
pub mod order;
pub mod requirement;
pub mod validate;

pub use graph::RequirementGraph;
pub use order::topological_order;
pub use requirement::Requirement;
pub use validate::validate_order;
