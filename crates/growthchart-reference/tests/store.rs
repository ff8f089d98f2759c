use std::fs;

use serde_json::json;

use growthchart_core::models::measurement::MeasurementType;
use growthchart_core::models::sex::Sex;
use growthchart_core::models::standard::Standard;
use growthchart_reference::error::ReferenceError;
use growthchart_reference::manifest::{DatasetManifest, ManifestEntry};
use growthchart_reference::schema::{IntergrowthRecord, LmsRecord};
use growthchart_reference::store::{ReferenceStore, ReferenceTable};
use growthchart_reference::table::TableKey;

fn lms_records() -> serde_json::Value {
    json!([
        {"Sex": 1, "Agemos": 0.0, "L": 0.35, "M": 3.35, "S": 0.146},
        {"Sex": 1, "Agemos": 1.0, "L": 0.23, "M": 4.47, "S": 0.134},
        {"Sex": 2, "Agemos": 0.0, "L": 0.38, "M": 3.23, "S": 0.142},
        {"Sex": 2, "Agemos": 1.0, "L": 0.17, "M": 4.19, "S": 0.138}
    ])
}

fn intergrowth_records() -> serde_json::Value {
    json!([
        {"sex": 1, "age": "32+3", "3rd": 1.22, "5th": 1.31, "10th": 1.45, "50th": 1.87, "90th": 2.33, "95th": 2.47, "97th": 2.56},
        {"sex": 2, "age": "32+3", "3rd": 1.15, "5th": 1.24, "10th": 1.37, "50th": 1.78, "90th": 2.24, "95th": 2.38, "97th": 2.47}
    ])
}

#[test]
fn lms_records_accept_numeric_strings_and_optional_percentiles() {
    let records: Vec<LmsRecord> = serde_json::from_value(json!([
        {"Sex": "1", "Agemos": "24", "L": "-0.216", "M": "12.74", "S": "0.108", "P50": "12.74", "P3": ""}
    ]))
    .unwrap();
    assert_eq!(records[0].sex, 1);
    assert_eq!(records[0].age_months, 24.0);
    assert_eq!(records[0].p50, Some(12.74));
    assert_eq!(records[0].p3, None);
    assert_eq!(records[0].p97, None);
}

#[test]
fn bad_sex_code_fails_to_parse() {
    let parsed: Result<Vec<LmsRecord>, _> = serde_json::from_value(json!([
        {"Sex": 3, "Agemos": 0.0, "L": 1.0, "M": 3.0, "S": 0.1}
    ]));
    assert!(parsed.is_err());
}

#[test]
fn builder_splits_tables_by_sex() {
    let store = ReferenceStore::builder()
        .version("test")
        .lms(
            Standard::Who,
            MeasurementType::Weight,
            serde_json::from_value(lms_records()).unwrap(),
        )
        .intergrowth(
            MeasurementType::Weight,
            serde_json::from_value(intergrowth_records()).unwrap(),
        )
        .build()
        .unwrap();

    assert_eq!(store.version(), "test");
    assert_eq!(store.len(), 4);
    let male = store
        .lms_table(Standard::Who, Sex::Male, MeasurementType::Weight)
        .unwrap();
    assert_eq!(male.len(), 2);
    assert!(male.rows().iter().all(|r| r.sex == Sex::Male));
    assert!(store.intergrowth_table(Sex::Female, MeasurementType::Weight).is_some());
    assert!(store
        .lms_table(Standard::CdcChild, Sex::Male, MeasurementType::Weight)
        .is_none());

    let key = TableKey::new(Standard::Intergrowth, Sex::Male, MeasurementType::Weight);
    assert!(matches!(store.get_table(key), Some(ReferenceTable::Intergrowth(_))));
}

fn build_lms(records: serde_json::Value) -> Result<ReferenceStore, ReferenceError> {
    let records: Vec<LmsRecord> = serde_json::from_value(records).unwrap();
    ReferenceStore::builder()
        .lms(Standard::CdcChild, MeasurementType::Weight, records)
        .build()
}

#[test]
fn rejects_non_monotonic_ages() {
    let err = build_lms(json!([
        {"Sex": 1, "Agemos": 25.5, "L": -0.2, "M": 12.9, "S": 0.108},
        {"Sex": 1, "Agemos": 24.5, "L": -0.2, "M": 12.8, "S": 0.108}
    ]))
    .unwrap_err();
    assert!(matches!(err, ReferenceError::NonMonotonicAge { index: 1, .. }));
}

#[test]
fn rejects_duplicate_ages() {
    let err = build_lms(json!([
        {"Sex": 1, "Agemos": 24.5, "L": -0.2, "M": 12.8, "S": 0.108},
        {"Sex": 1, "Agemos": 24.5, "L": -0.2, "M": 12.9, "S": 0.108}
    ]))
    .unwrap_err();
    assert!(matches!(err, ReferenceError::NonMonotonicAge { .. }));
}

#[test]
fn rejects_non_positive_median_or_spread() {
    let err = build_lms(json!([
        {"Sex": 1, "Agemos": 24.0, "L": -0.2, "M": 0.0, "S": 0.108}
    ]))
    .unwrap_err();
    assert!(matches!(err, ReferenceError::NonPositiveParameter { field: "M", .. }));

    let err = build_lms(json!([
        {"Sex": 2, "Agemos": 24.0, "L": -0.2, "M": 12.0, "S": -0.1}
    ]))
    .unwrap_err();
    assert!(matches!(err, ReferenceError::NonPositiveParameter { field: "S", .. }));
}

#[test]
fn negative_l_is_allowed() {
    assert!(build_lms(json!([
        {"Sex": 1, "Agemos": 24.0, "L": -1.98, "M": 16.5, "S": 0.08}
    ]))
    .is_ok());
}

#[test]
fn rejects_non_finite_lms_parameters() {
    let err = build_lms(json!([
        {"Sex": 1, "Agemos": 24.0, "L": "NaN", "M": 12.7, "S": 0.108}
    ]))
    .unwrap_err();
    assert!(matches!(err, ReferenceError::NonFiniteParameter { field: "L", .. }));

    let err = build_lms(json!([
        {"Sex": 2, "Agemos": 24.0, "L": -0.2, "M": "inf", "S": 0.108}
    ]))
    .unwrap_err();
    assert!(matches!(err, ReferenceError::NonFiniteParameter { field: "M", .. }));
}

#[test]
fn rejects_non_monotonic_percentile_columns() {
    let err = build_lms(json!([
        {"Sex": 1, "Agemos": 24.0, "L": -0.2, "M": 12.7, "S": 0.108, "P3": 10.5, "P5": 10.4, "P50": 12.7}
    ]))
    .unwrap_err();
    assert!(matches!(err, ReferenceError::NonMonotonicPercentiles { .. }));
}

#[test]
fn rejects_non_monotonic_intergrowth_row() {
    let records: Vec<IntergrowthRecord> = serde_json::from_value(json!([
        {"sex": 1, "age": "32+3", "3rd": 1.22, "5th": 1.31, "10th": 1.45, "50th": 1.40, "90th": 2.33, "95th": 2.47, "97th": 2.56}
    ]))
    .unwrap();
    let err = ReferenceStore::builder()
        .intergrowth(MeasurementType::Weight, records)
        .build()
        .unwrap_err();
    assert!(matches!(err, ReferenceError::NonMonotonicPercentiles { .. }));
}

#[test]
fn rejects_duplicate_gestational_age() {
    let records: Vec<IntergrowthRecord> = serde_json::from_value(json!([
        {"sex": 1, "age": "32+3", "3rd": 1.2, "5th": 1.3, "10th": 1.4, "50th": 1.8, "90th": 2.3, "95th": 2.4, "97th": 2.5},
        {"sex": 1, "age": "32+3", "3rd": 1.3, "5th": 1.4, "10th": 1.5, "50th": 1.9, "90th": 2.4, "95th": 2.5, "97th": 2.6}
    ]))
    .unwrap();
    let err = ReferenceStore::builder()
        .intergrowth(MeasurementType::Weight, records)
        .build()
        .unwrap_err();
    match err {
        ReferenceError::DuplicateGestationalAge { age, .. } => assert_eq!(age, "32+3"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn intergrowth_rows_are_sorted_by_gestational_age() {
    let records: Vec<IntergrowthRecord> = serde_json::from_value(json!([
        {"sex": 1, "age": "33+0", "3rd": 1.3, "5th": 1.4, "10th": 1.5, "50th": 1.9, "90th": 2.4, "95th": 2.5, "97th": 2.6},
        {"sex": 1, "age": "32+2", "3rd": 1.2, "5th": 1.3, "10th": 1.4, "50th": 1.8, "90th": 2.3, "95th": 2.4, "97th": 2.5}
    ]))
    .unwrap();
    let store = ReferenceStore::builder()
        .intergrowth(MeasurementType::Weight, records)
        .build()
        .unwrap();
    let table = store.intergrowth_table(Sex::Male, MeasurementType::Weight).unwrap();
    let keys: Vec<&str> = table.rows().iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, ["32+2", "33+0"]);
}

#[test]
fn rejects_bad_gestational_key() {
    let records: Vec<IntergrowthRecord> = serde_json::from_value(json!([
        {"sex": 1, "age": "32w", "3rd": 1.0, "5th": 1.1, "10th": 1.2, "50th": 1.3, "90th": 1.4, "95th": 1.5, "97th": 1.6}
    ]))
    .unwrap();
    let err = ReferenceStore::builder()
        .intergrowth(MeasurementType::Weight, records)
        .build()
        .unwrap_err();
    assert!(matches!(err, ReferenceError::Core(_)));
}

#[test]
fn rejects_lms_records_under_intergrowth() {
    let records: Vec<LmsRecord> = serde_json::from_value(lms_records()).unwrap();
    let err = ReferenceStore::builder()
        .lms(Standard::Intergrowth, MeasurementType::Weight, records)
        .build()
        .unwrap_err();
    assert!(matches!(err, ReferenceError::UnsupportedSchema { .. }));
}

#[test]
fn rejects_the_same_table_twice() {
    let records: Vec<LmsRecord> = serde_json::from_value(lms_records()).unwrap();
    let err = ReferenceStore::builder()
        .lms(Standard::Who, MeasurementType::Weight, records.clone())
        .lms(Standard::Who, MeasurementType::Weight, records)
        .build()
        .unwrap_err();
    assert!(matches!(err, ReferenceError::DuplicateTable { .. }));
}

#[test]
fn loads_from_manifest_directory_and_skips_optional_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("who_weight.json"), lms_records().to_string()).unwrap();
    fs::write(
        dir.path().join("intergrowth_weight.json"),
        intergrowth_records().to_string(),
    )
    .unwrap();

    let store =
        ReferenceStore::from_manifest(dir.path(), &DatasetManifest::builtin(), "2024.1").unwrap();
    assert_eq!(store.version(), "2024.1");
    assert_eq!(store.len(), 4);
    assert!(store
        .lms_table(Standard::Who, Sex::Female, MeasurementType::Weight)
        .is_some());
}

#[test]
fn missing_required_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = DatasetManifest::new(vec![
        ManifestEntry::new(Standard::Who, MeasurementType::Weight, "who_weight.json").required(),
    ]);
    let err = ReferenceStore::from_manifest(dir.path(), &manifest, "x").unwrap_err();
    assert!(matches!(err, ReferenceError::MissingFile(_)));
}

#[test]
fn corrupt_file_fails_the_whole_load() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("who_weight.json"), lms_records().to_string()).unwrap();
    fs::write(dir.path().join("who_length.json"), "{ not json").unwrap();
    let err =
        ReferenceStore::from_manifest(dir.path(), &DatasetManifest::builtin(), "x").unwrap_err();
    assert!(matches!(err, ReferenceError::Parse { .. }));
}

#[test]
fn missing_dataset_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("not-unpacked");
    let err =
        ReferenceStore::from_manifest(&missing, &DatasetManifest::builtin(), "x").unwrap_err();
    match err {
        ReferenceError::MissingDatasetDir(path) => assert_eq!(path, missing),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn directory_without_any_reference_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("README.txt"), "growth data goes here").unwrap();
    let err =
        ReferenceStore::from_manifest(dir.path(), &DatasetManifest::builtin(), "x").unwrap_err();
    assert!(matches!(err, ReferenceError::EmptyStore(_)));
}
