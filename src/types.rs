use std::str::FromStr;
use serde::Deserialize;

/// Canonical task identifier used throughout the crate.
///
/// Reference inputs use single uppercase letters (`"A"` .. `"Z"`), but any
/// ASCII alphanumeric identifier is accepted. Ordering is plain string order.
pub type TaskId = String;

/// Which cost model the `[cost]` section selects.
///
/// - `Alphabetical`: `A` costs 1, `B` costs 2, ... `Z` costs 26.
/// - `Table`: explicit per-task costs from `[cost.table]`.
/// - `Uniform`: every task costs the same amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostModelKind {
    Alphabetical,
    Table,
    Uniform,
}

impl Default for CostModelKind {
    fn default() -> Self {
        CostModelKind::Alphabetical
    }
}

impl FromStr for CostModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alphabetical" => Ok(CostModelKind::Alphabetical),
            "table" => Ok(CostModelKind::Table),
            "uniform" => Ok(CostModelKind::Uniform),
            other => Err(format!(
                "invalid cost model: {other} (expected \"alphabetical\", \"table\" or \"uniform\")"
            )),
        }
    }
}
