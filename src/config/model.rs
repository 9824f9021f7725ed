// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::errors::{Result, StepdagError};
use crate::sim::CostModel;
use crate::types::{CostModelKind, TaskId};

/// Configuration exactly as deserialized from TOML, before validation.
///
/// ```toml
/// [scheduler]
/// base_duration = 60
/// workers = 5
///
/// [cost]
/// model = "table"
/// default = 1
///
/// [cost.table]
/// A = 3
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub scheduler: SchedulerSection,

    #[serde(default)]
    pub cost: CostSection,
}

/// A validated configuration. Only obtainable through
/// `ConfigFile::try_from(RawConfigFile)` (see `config::validate`).
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub scheduler: SchedulerSection,
    pub cost: CostSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(scheduler: SchedulerSection, cost: CostSection) -> Self {
        Self { scheduler, cost }
    }

    /// Build the cost model described by `[cost]`, optionally overriding the
    /// configured model kind.
    ///
    /// An override gets the same checks as `[cost].model`: `uniform` needs
    /// `[cost].uniform`, `table` needs `[cost.table]` entries or a default.
    pub fn cost_model(&self, kind_override: Option<CostModelKind>) -> Result<CostModel> {
        match kind_override.unwrap_or(self.cost.model) {
            CostModelKind::Alphabetical => Ok(CostModel::Alphabetical),
            CostModelKind::Uniform => match self.cost.uniform {
                Some(0) => Err(StepdagError::ConfigError(
                    "[cost].uniform must be >= 1 (got 0)".to_string(),
                )),
                Some(n) => Ok(CostModel::Uniform(n)),
                None => Err(StepdagError::ConfigError(
                    "the uniform cost model requires [cost].uniform".to_string(),
                )),
            },
            CostModelKind::Table if self.cost.table.is_empty() && self.cost.default.is_none() => {
                Err(StepdagError::ConfigError(
                    "the table cost model requires [cost.table] entries or [cost].default"
                        .to_string(),
                ))
            }
            CostModelKind::Table => Ok(CostModel::Table {
                costs: self.cost.table.clone(),
                default: self.cost.default,
            }),
        }
    }
}

/// `[scheduler]` section.
///
/// Both values are optional here; whatever is missing is taken from the
/// command line or read interactively from the input stream.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SchedulerSection {
    #[serde(default)]
    pub base_duration: Option<u64>,

    #[serde(default)]
    pub workers: Option<usize>,
}

/// `[cost]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CostSection {
    /// `"alphabetical"` (default), `"table"` or `"uniform"`.
    #[serde(default)]
    pub model: CostModelKind,

    /// Cost of every task when `model = "uniform"`.
    #[serde(default)]
    pub uniform: Option<u64>,

    /// Fallback cost for tasks missing from `[cost.table]`.
    #[serde(default)]
    pub default: Option<u64>,

    /// Explicit per-task costs, keyed by task ID.
    #[serde(default)]
    pub table: BTreeMap<TaskId, u64>,
}
