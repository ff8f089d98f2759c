use std::fmt;

use serde::{Deserialize, Serialize};

use growthchart_core::models::age::GestationalAge;
use growthchart_core::models::measurement::MeasurementType;
use growthchart_core::models::percentile::ChartPercentile;
use growthchart_core::models::sex::Sex;
use growthchart_core::models::standard::Standard;
use growthchart_stats::Lms;

use crate::error::ReferenceError;
use crate::schema::{IntergrowthRecord, LmsRecord};

/// Identifies one reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableKey {
    pub standard: Standard,
    pub sex: Sex,
    pub measurement: MeasurementType,
}

impl TableKey {
    pub fn new(standard: Standard, sex: Sex, measurement: MeasurementType) -> Self {
        Self {
            standard,
            sex,
            measurement,
        }
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.standard, self.sex, self.measurement)
    }
}

/// Stored chart percentiles for an LMS row, indexed like [`ChartPercentile::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PercentileColumns(pub [Option<f64>; 9]);

impl PercentileColumns {
    pub fn get(&self, percentile: ChartPercentile) -> Option<f64> {
        let index = ChartPercentile::ALL
            .iter()
            .position(|p| *p == percentile)?;
        self.0[index]
    }

    /// Present columns in rank order.
    pub fn present(&self) -> impl Iterator<Item = (ChartPercentile, f64)> + '_ {
        (0..self.0.len()).filter_map(move |i| self.0[i].map(|v| (ChartPercentile::ALL[i], v)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LmsRow {
    pub sex: Sex,
    pub age_months: f64,
    pub lms: Lms,
    pub percentiles: PercentileColumns,
}

/// An age-ordered LMS table for one standard, sex and measurement.
#[derive(Debug, Clone)]
pub struct LmsTable {
    key: TableKey,
    rows: Vec<LmsRow>,
}

impl LmsTable {
    /// Validates and wraps `rows`. Ages must be strictly increasing, `M` and
    /// `S` positive, `L` finite, and any stored percentiles strictly
    /// increasing by rank.
    pub fn new(key: TableKey, rows: Vec<LmsRow>) -> Result<Self, ReferenceError> {
        if !key.standard.is_lms() {
            return Err(ReferenceError::UnsupportedSchema { table: key });
        }

        let mut previous: Option<f64> = None;
        for (index, row) in rows.iter().enumerate() {
            let age = row.age_months;
            if !age.is_finite() {
                return Err(ReferenceError::NonFiniteParameter {
                    table: key,
                    age,
                    field: "Agemos",
                });
            }
            if let Some(prev) = previous
                && age <= prev
            {
                return Err(ReferenceError::NonMonotonicAge {
                    table: key,
                    index,
                    previous: prev,
                    age,
                });
            }
            previous = Some(age);

            if !row.lms.l.is_finite() {
                return Err(ReferenceError::NonFiniteParameter {
                    table: key,
                    age,
                    field: "L",
                });
            }
            for (field, value) in [("M", row.lms.m), ("S", row.lms.s)] {
                if !value.is_finite() {
                    return Err(ReferenceError::NonFiniteParameter {
                        table: key,
                        age,
                        field,
                    });
                }
                if value <= 0.0 {
                    return Err(ReferenceError::NonPositiveParameter {
                        table: key,
                        age,
                        field,
                        value,
                    });
                }
            }

            let values: Vec<f64> = row.percentiles.present().map(|(_, v)| v).collect();
            if values.iter().any(|v| !v.is_finite()) {
                return Err(ReferenceError::NonFiniteParameter {
                    table: key,
                    age,
                    field: "percentile",
                });
            }
            if !strictly_increasing(&values) {
                return Err(ReferenceError::NonMonotonicPercentiles {
                    table: key,
                    age: age.to_string(),
                });
            }
        }

        Ok(Self { key, rows })
    }

    /// Split a file's records by sex into validated tables, preserving
    /// file order within each sex.
    pub fn from_records(
        standard: Standard,
        measurement: MeasurementType,
        records: &[LmsRecord],
    ) -> Result<Vec<Self>, ReferenceError> {
        let mut tables = Vec::new();
        for sex in [Sex::Male, Sex::Female] {
            let mut rows = Vec::new();
            for record in records {
                if Sex::from_code(record.sex)? != sex {
                    continue;
                }
                rows.push(LmsRow {
                    sex,
                    age_months: record.age_months,
                    lms: Lms::new(record.l, record.m, record.s),
                    percentiles: PercentileColumns(record.percentile_columns()),
                });
            }
            if !rows.is_empty() {
                tables.push(Self::new(TableKey::new(standard, sex, measurement), rows)?);
            }
        }
        Ok(tables)
    }

    pub fn key(&self) -> TableKey {
        self.key
    }

    pub fn rows(&self) -> &[LmsRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntergrowthRow {
    /// The key as written in the source file.
    pub key: String,
    pub age: GestationalAge,
    /// 3rd, 5th, 10th, 50th, 90th, 95th, 97th.
    pub cutoffs: [f64; 7],
}

/// Raw-percentile table for one sex and measurement, keyed by gestational age.
#[derive(Debug, Clone)]
pub struct IntergrowthTable {
    key: TableKey,
    rows: Vec<IntergrowthRow>,
}

impl IntergrowthTable {
    /// Rows are sorted by gestational age; keys must be unique.
    pub fn new(key: TableKey, mut rows: Vec<IntergrowthRow>) -> Result<Self, ReferenceError> {
        if key.standard != Standard::Intergrowth {
            return Err(ReferenceError::UnsupportedSchema { table: key });
        }

        let mut seen = std::collections::HashSet::new();
        for row in &rows {
            if !seen.insert(row.age) {
                return Err(ReferenceError::DuplicateGestationalAge {
                    table: key,
                    age: row.key.clone(),
                });
            }
            if row.cutoffs.iter().any(|v| !v.is_finite()) || !strictly_increasing(&row.cutoffs) {
                return Err(ReferenceError::NonMonotonicPercentiles {
                    table: key,
                    age: row.key.clone(),
                });
            }
        }

        rows.sort_by_key(|r| r.age);
        Ok(Self { key, rows })
    }

    pub fn from_records(
        measurement: MeasurementType,
        records: &[IntergrowthRecord],
    ) -> Result<Vec<Self>, ReferenceError> {
        let mut tables = Vec::new();
        for sex in [Sex::Male, Sex::Female] {
            let mut rows = Vec::new();
            for record in records {
                if Sex::from_code(record.sex)? != sex {
                    continue;
                }
                rows.push(IntergrowthRow {
                    key: record.age.clone(),
                    age: record.age.parse()?,
                    cutoffs: record.cutoffs(),
                });
            }
            if !rows.is_empty() {
                let key = TableKey::new(Standard::Intergrowth, sex, measurement);
                tables.push(Self::new(key, rows)?);
            }
        }
        Ok(tables)
    }

    pub fn key(&self) -> TableKey {
        self.key
    }

    pub fn rows(&self) -> &[IntergrowthRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn strictly_increasing(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}
