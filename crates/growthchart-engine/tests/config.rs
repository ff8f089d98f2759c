use std::fs;

use serde_json::json;

use growthchart_core::models::measurement::MeasurementType;
use growthchart_core::models::sex::Sex;
use growthchart_core::models::standard::Standard;
use growthchart_engine::config::{load_config, save_config, EngineConfig};
use growthchart_engine::error::{ConfigError, EngineError};
use growthchart_engine::GrowthEngine;
use growthchart_reference::error::ReferenceError;
use growthchart_reference::manifest::DatasetManifest;

#[test]
fn unversioned_config_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, json!({"dataset_dir": "/data/growth"}).to_string()).unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.dataset_version, "unversioned");
    assert_eq!(config.tables, DatasetManifest::builtin().entries);
}

#[test]
fn newer_config_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        json!({"config_version": 99, "dataset_dir": "/x", "dataset_version": "x", "tables": []}).to_string(),
    )
    .unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::NewerVersion { found: 99, supported: 1 }));
}

#[test]
fn non_object_config_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "[1, 2, 3]").unwrap();
    assert!(matches!(load_config(&path).unwrap_err(), ConfigError::NotAnObject));
}

#[test]
fn save_then_load_preserves_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");
    let mut config = EngineConfig::new(dir.path().join("data"));
    config.dataset_version = "2024.1".to_string();
    config.config_version = 0;

    save_config(&path, &config).unwrap();
    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.dataset_version, "2024.1");
    assert_eq!(loaded.dataset_dir, dir.path().join("data"));
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn engine_loads_from_config() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("cdc_infant_weight.json"),
        json!([
            {"Sex": 1, "Agemos": 0.0, "L": 1.8, "M": 3.53, "S": 0.152},
            {"Sex": 1, "Agemos": 0.5, "L": 1.5, "M": 4.0, "S": 0.146}
        ])
        .to_string(),
    )
    .unwrap();

    let engine = GrowthEngine::from_config(&EngineConfig::new(dir.path())).unwrap();
    assert_eq!(engine.store().len(), 1);
    assert!(engine
        .store()
        .lms_table(Standard::CdcInfant, Sex::Male, MeasurementType::Weight)
        .is_some());
}

#[test]
fn engine_refuses_corrupt_reference_data() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("who_weight.json"),
        json!([{"Sex": 1, "Agemos": 0.0, "L": 0.35, "M": -3.3, "S": 0.14}]).to_string(),
    )
    .unwrap();

    let err = GrowthEngine::from_config(&EngineConfig::new(dir.path())).unwrap_err();
    assert!(matches!(err, EngineError::Reference(_)));
}

#[test]
fn engine_refuses_missing_dataset_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::new(dir.path().join("growth-data"));

    let err = GrowthEngine::from_config(&config).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Reference(ReferenceError::MissingDatasetDir(_))
    ));
}
