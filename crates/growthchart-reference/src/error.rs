use std::path::PathBuf;

use thiserror::Error;

use growthchart_core::error::CoreError;

use crate::table::TableKey;

/// Reference data that fails validation is fatal: the store refuses to
/// load rather than serve a corrupt table.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("dataset directory not found: {0}")]
    MissingDatasetDir(PathBuf),

    #[error("no reference tables found in {0}")]
    EmptyStore(PathBuf),

    #[error("required reference file missing: {0}")]
    MissingFile(PathBuf),

    #[error("{table}: row {index} age {age} does not follow previous age {previous}")]
    NonMonotonicAge {
        table: TableKey,
        index: usize,
        previous: f64,
        age: f64,
    },

    #[error("{table}: {field} must be positive at age {age}, got {value}")]
    NonPositiveParameter {
        table: TableKey,
        age: f64,
        field: &'static str,
        value: f64,
    },

    #[error("{table}: {field} is not finite at age {age}")]
    NonFiniteParameter {
        table: TableKey,
        age: f64,
        field: &'static str,
    },

    #[error("{table}: percentiles are not strictly increasing at age {age}")]
    NonMonotonicPercentiles { table: TableKey, age: String },

    #[error("{table}: gestational age {age} appears more than once")]
    DuplicateGestationalAge { table: TableKey, age: String },

    #[error("{table}: table registered twice")]
    DuplicateTable { table: TableKey },

    #[error("{table}: wrong schema family for this standard")]
    UnsupportedSchema { table: TableKey },

    #[error(transparent)]
    Core(#[from] CoreError),
}
