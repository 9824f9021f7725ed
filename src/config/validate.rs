// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, StepdagError};
use crate::types::CostModelKind;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::StepdagError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.scheduler, raw.cost))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_scheduler(cfg)?;
    validate_costs(cfg)?;
    Ok(())
}

fn validate_scheduler(cfg: &RawConfigFile) -> Result<()> {
    if cfg.scheduler.workers == Some(0) {
        return Err(StepdagError::ConfigError(
            "[scheduler].workers must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_costs(cfg: &RawConfigFile) -> Result<()> {
    let cost = &cfg.cost;

    for (task, value) in cost.table.iter() {
        if *value == 0 {
            return Err(StepdagError::ConfigError(format!(
                "[cost.table] cost for task '{task}' must be >= 1 (got 0)"
            )));
        }
    }

    if cost.default == Some(0) {
        return Err(StepdagError::ConfigError(
            "[cost].default must be >= 1 (got 0)".to_string(),
        ));
    }

    match cost.model {
        CostModelKind::Uniform => match cost.uniform {
            None => Err(StepdagError::ConfigError(
                "[cost].model = \"uniform\" requires [cost].uniform".to_string(),
            )),
            Some(0) => Err(StepdagError::ConfigError(
                "[cost].uniform must be >= 1 (got 0)".to_string(),
            )),
            Some(_) => Ok(()),
        },
        CostModelKind::Table if cost.table.is_empty() && cost.default.is_none() => {
            Err(StepdagError::ConfigError(
                "[cost].model = \"table\" requires [cost.table] entries or [cost].default"
                    .to_string(),
            ))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_src: &str) -> Result<ConfigFile> {
        let raw: RawConfigFile = toml::from_str(toml_src)?;
        ConfigFile::try_from(raw)
    }

    #[test]
    fn empty_config_is_valid_and_alphabetical() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.cost.model, CostModelKind::Alphabetical);
        assert!(cfg.scheduler.workers.is_none());
    }

    #[test]
    fn zero_workers_rejected() {
        let err = parse("[scheduler]\nworkers = 0\n").unwrap_err();
        assert!(matches!(err, StepdagError::ConfigError(msg) if msg.contains("workers")));
    }

    #[test]
    fn uniform_without_value_rejected() {
        let err = parse("[cost]\nmodel = \"uniform\"\n").unwrap_err();
        assert!(matches!(err, StepdagError::ConfigError(msg) if msg.contains("uniform")));
    }

    #[test]
    fn zero_table_cost_rejected() {
        let err = parse("[cost]\nmodel = \"table\"\n\n[cost.table]\nA = 0\n").unwrap_err();
        assert!(matches!(err, StepdagError::ConfigError(msg) if msg.contains("'A'")));
    }

    #[test]
    fn empty_table_without_default_rejected() {
        assert!(parse("[cost]\nmodel = \"table\"\n").is_err());
        assert!(parse("[cost]\nmodel = \"table\"\ndefault = 2\n").is_ok());
    }

    #[test]
    fn unknown_model_fails_deserialization() {
        let err = parse("[cost]\nmodel = \"random\"\n").unwrap_err();
        assert!(matches!(err, StepdagError::TomlError(_)));
    }
}
