// tests/config_loading.rs

use std::io::Write;

use tempfile::NamedTempFile;
use stepdag::config::{load_and_validate, resolve_config};
use stepdag::errors::StepdagError;
use stepdag::sim::CostModel;
use stepdag::types::CostModelKind;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn full_config_round_trips_into_cost_model() {
    let file = write_config(
        r#"
[scheduler]
base_duration = 60
workers = 5

[cost]
model = "table"
default = 2

[cost.table]
A = 3
B = 7
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.scheduler.base_duration, Some(60));
    assert_eq!(cfg.scheduler.workers, Some(5));

    let model = cfg.cost_model(None).unwrap();
    assert_eq!(model.cost_of("B").unwrap(), 7);
    assert_eq!(model.cost_of("Q").unwrap(), 2);

    assert_eq!(
        cfg.cost_model(Some(CostModelKind::Alphabetical)).unwrap(),
        CostModel::Alphabetical
    );
}

#[test]
fn cost_model_override_needs_its_section() {
    let file = write_config("[cost]\nmodel = \"alphabetical\"\n");
    let cfg = load_and_validate(file.path()).unwrap();

    match cfg.cost_model(Some(CostModelKind::Uniform)) {
        Err(StepdagError::ConfigError(msg)) => assert!(msg.contains("[cost].uniform")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
    match cfg.cost_model(Some(CostModelKind::Table)) {
        Err(StepdagError::ConfigError(msg)) => assert!(msg.contains("[cost.table]")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }

    let file = write_config("[cost]\nuniform = 4\n");
    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(
        cfg.cost_model(Some(CostModelKind::Uniform)).unwrap(),
        CostModel::Uniform(4)
    );
}

#[test]
fn zero_workers_returns_config_error() {
    let file = write_config("[scheduler]\nworkers = 0\n");

    match load_and_validate(file.path()) {
        Err(StepdagError::ConfigError(msg)) => assert!(msg.contains("workers")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn malformed_toml_returns_toml_error() {
    let file = write_config("[scheduler\nworkers = 2\n");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(StepdagError::TomlError(_))
    ));
}

#[test]
fn explicit_missing_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(matches!(
        resolve_config(Some(missing.as_path())),
        Err(StepdagError::IoError(_))
    ));
}
