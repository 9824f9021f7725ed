// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::types::TaskId;

#[derive(Error, Debug)]
pub enum StepdagError {
    #[error("line {line_no}: \"{line}\" is not a valid {reason}")]
    Parse {
        line_no: usize,
        line: String,
        reason: &'static str,
    },

    #[error("\"{0}\" is not a valid minimum duration")]
    InvalidBaseDuration(String),

    #[error("\"{0}\" is not a valid worker count")]
    InvalidWorkerCount(String),

    #[error("input ended before {0} was read")]
    MissingInput(&'static str),

    #[error("no valid ordering: {}", describe_deadlock(.remaining, .cycle_hint))]
    NoValidOrdering {
        remaining: Vec<TaskId>,
        cycle_hint: Option<TaskId>,
    },

    #[error("no cost known for task '{0}'")]
    UnknownCost(TaskId),

    #[error("invalid order: {0}")]
    InvalidOrder(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn describe_deadlock(remaining: &[TaskId], cycle_hint: &Option<TaskId>) -> String {
    let mut msg = format!(
        "{} task(s) can never start ({})",
        remaining.len(),
        remaining.join(", ")
    );
    if let Some(task) = cycle_hint {
        msg.push_str(&format!("; cycle detected involving task '{task}'"));
    }
    msg
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, StepdagError>;
