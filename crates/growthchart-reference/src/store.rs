use std::collections::HashMap;
use std::path::Path;

use growthchart_core::models::measurement::MeasurementType;
use growthchart_core::models::sex::Sex;
use growthchart_core::models::standard::Standard;

use crate::error::ReferenceError;
use crate::manifest::DatasetManifest;
use crate::schema::{IntergrowthRecord, LmsRecord};
use crate::table::{IntergrowthTable, LmsTable, TableKey};

/// Borrowed view of either table family.
#[derive(Debug, Clone, Copy)]
pub enum ReferenceTable<'a> {
    Lms(&'a LmsTable),
    Intergrowth(&'a IntergrowthTable),
}

impl ReferenceTable<'_> {
    pub fn key(&self) -> TableKey {
        match self {
            ReferenceTable::Lms(t) => t.key(),
            ReferenceTable::Intergrowth(t) => t.key(),
        }
    }
}

/// All reference tables, loaded once and read-only afterwards.
///
/// Safe to share across threads behind an `Arc`; nothing mutates it after
/// construction.
#[derive(Debug, Clone, Default)]
pub struct ReferenceStore {
    version: String,
    lms: HashMap<TableKey, LmsTable>,
    intergrowth: HashMap<TableKey, IntergrowthTable>,
}

impl ReferenceStore {
    pub fn builder() -> ReferenceStoreBuilder {
        ReferenceStoreBuilder::default()
    }

    /// Load every file named by `manifest` from `dir`.
    ///
    /// Fails when `dir` does not exist or when no table could be loaded
    /// from it.
    pub fn from_manifest(
        dir: &Path,
        manifest: &DatasetManifest,
        version: &str,
    ) -> Result<Self, ReferenceError> {
        if !dir.is_dir() {
            return Err(ReferenceError::MissingDatasetDir(dir.to_path_buf()));
        }

        let mut builder = Self::builder().version(version);

        for entry in &manifest.entries {
            let path = dir.join(&entry.file);
            if !path.exists() {
                if entry.required {
                    return Err(ReferenceError::MissingFile(path));
                }
                tracing::warn!(
                    path = %path.display(),
                    standard = %entry.standard,
                    measurement = %entry.measurement,
                    "reference file not found, skipping"
                );
                continue;
            }

            let contents = std::fs::read_to_string(&path).map_err(|source| ReferenceError::Io {
                path: path.clone(),
                source,
            })?;

            builder = if entry.standard.is_lms() {
                let records: Vec<LmsRecord> = serde_json::from_str(&contents)
                    .map_err(|source| ReferenceError::Parse {
                        path: path.clone(),
                        source,
                    })?;
                builder.lms(entry.standard, entry.measurement, records)
            } else {
                let records: Vec<IntergrowthRecord> = serde_json::from_str(&contents)
                    .map_err(|source| ReferenceError::Parse {
                        path: path.clone(),
                        source,
                    })?;
                builder.intergrowth(entry.measurement, records)
            };
        }

        let store = builder.build()?;
        if store.is_empty() {
            return Err(ReferenceError::EmptyStore(dir.to_path_buf()));
        }
        Ok(store)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn get_table(&self, key: TableKey) -> Option<ReferenceTable<'_>> {
        if key.standard.is_lms() {
            self.lms.get(&key).map(ReferenceTable::Lms)
        } else {
            self.intergrowth.get(&key).map(ReferenceTable::Intergrowth)
        }
    }

    pub fn lms_table(
        &self,
        standard: Standard,
        sex: Sex,
        measurement: MeasurementType,
    ) -> Option<&LmsTable> {
        self.lms.get(&TableKey::new(standard, sex, measurement))
    }

    pub fn intergrowth_table(
        &self,
        sex: Sex,
        measurement: MeasurementType,
    ) -> Option<&IntergrowthTable> {
        self.intergrowth
            .get(&TableKey::new(Standard::Intergrowth, sex, measurement))
    }

    pub fn len(&self) -> usize {
        self.lms.len() + self.intergrowth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Collects parsed records and validates them all in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct ReferenceStoreBuilder {
    version: Option<String>,
    lms: Vec<(Standard, MeasurementType, Vec<LmsRecord>)>,
    intergrowth: Vec<(MeasurementType, Vec<IntergrowthRecord>)>,
}

impl ReferenceStoreBuilder {
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn lms(
        mut self,
        standard: Standard,
        measurement: MeasurementType,
        records: Vec<LmsRecord>,
    ) -> Self {
        self.lms.push((standard, measurement, records));
        self
    }

    pub fn intergrowth(
        mut self,
        measurement: MeasurementType,
        records: Vec<IntergrowthRecord>,
    ) -> Self {
        self.intergrowth.push((measurement, records));
        self
    }

    /// Validate everything. One bad row rejects the whole store.
    pub fn build(self) -> Result<ReferenceStore, ReferenceError> {
        let mut store = ReferenceStore {
            version: self.version.unwrap_or_else(|| "unversioned".to_string()),
            ..ReferenceStore::default()
        };

        for (standard, measurement, records) in &self.lms {
            for table in LmsTable::from_records(*standard, *measurement, records)? {
                let key = table.key();
                tracing::info!(table = %key, rows = table.len(), "loaded LMS reference table");
                if store.lms.insert(key, table).is_some() {
                    return Err(ReferenceError::DuplicateTable { table: key });
                }
            }
        }

        for (measurement, records) in &self.intergrowth {
            for table in IntergrowthTable::from_records(*measurement, records)? {
                let key = table.key();
                tracing::info!(
                    table = %key,
                    rows = table.len(),
                    "loaded INTERGROWTH reference table"
                );
                if store.intergrowth.insert(key, table).is_some() {
                    return Err(ReferenceError::DuplicateTable { table: key });
                }
            }
        }

        tracing::info!(
            version = %store.version,
            tables = store.len(),
            "reference store ready"
        );
        Ok(store)
    }
}
