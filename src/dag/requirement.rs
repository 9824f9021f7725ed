// src/dag/requirement.rs

//! Parsing of `Step X must be finished before step Y can begin.` lines.

use std::sync::LazyLock;

use regex::Regex;

use crate::input::ParseLine;
use crate::types::TaskId;

static REQUIREMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Step ([A-Za-z0-9]+) must be finished before step ([A-Za-z0-9]+) can begin\.$")
        .expect("requirement regex is valid")
});

/// A single "must finish before" constraint: `step` is a prerequisite of
/// `before`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Requirement {
    pub step: TaskId,
    pub before: TaskId,
}

impl Requirement {
    pub fn new(step: impl Into<TaskId>, before: impl Into<TaskId>) -> Self {
        Self {
            step: step.into(),
            before: before.into(),
        }
    }
}

impl ParseLine for Requirement {
    const WHAT: &'static str = "requirement";

    fn parse_line(line: &str) -> Option<Self> {
        let caps = REQUIREMENT_RE.captures(line.trim())?;
        Some(Requirement::new(&caps[1], &caps[2]))
    }
}
