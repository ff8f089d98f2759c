use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// A population growth reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Standard {
    /// WHO Child Growth Standards, birth to 24 months.
    Who,
    /// CDC infant charts, birth to 36 months.
    CdcInfant,
    /// CDC 2–20 year charts.
    CdcChild,
    /// INTERGROWTH-21st newborn size standards, indexed by gestational age.
    Intergrowth,
}

/// The age window in which a standard is clinically applicable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidityRange {
    Days { min: f64, max: f64 },
    Months { min: f64, max: f64 },
}

impl ValidityRange {
    /// Inclusive at both ends.
    pub fn contains(&self, days: f64, months: f64) -> bool {
        match *self {
            ValidityRange::Days { min, max } => days >= min && days <= max,
            ValidityRange::Months { min, max } => months >= min && months <= max,
        }
    }
}

impl Standard {
    pub fn id(&self) -> &'static str {
        match self {
            Standard::Who => "who",
            Standard::CdcInfant => "cdc_infant",
            Standard::CdcChild => "cdc_child",
            Standard::Intergrowth => "intergrowth",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Standard::Who => "WHO",
            Standard::CdcInfant => "CDC (0-36 months)",
            Standard::CdcChild => "CDC (2-20 years)",
            Standard::Intergrowth => "INTERGROWTH-21st",
        }
    }

    /// LMS-parameterised standards (WHO, CDC). INTERGROWTH ships raw
    /// percentile cutoffs instead.
    pub fn is_lms(&self) -> bool {
        !matches!(self, Standard::Intergrowth)
    }

    pub fn validity(&self) -> ValidityRange {
        match self {
            Standard::Intergrowth => ValidityRange::Days { min: 0.0, max: 7.0 },
            Standard::Who => ValidityRange::Months { min: 0.0, max: 24.0 },
            Standard::CdcInfant => ValidityRange::Months { min: 0.0, max: 36.0 },
            Standard::CdcChild => ValidityRange::Months { min: 24.0, max: 240.0 },
        }
    }

    /// Age domain in months used when interpolating LMS rows.
    /// `None` for INTERGROWTH, whose tables are keyed by gestational age.
    pub fn month_domain(&self) -> Option<(f64, f64)> {
        match self.validity() {
            ValidityRange::Months { min, max } => Some((min, max)),
            ValidityRange::Days { .. } => None,
        }
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Standard {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "who" => Ok(Standard::Who),
            "cdc_infant" => Ok(Standard::CdcInfant),
            "cdc_child" => Ok(Standard::CdcChild),
            "intergrowth" | "intergrowth21" | "intergrowth_21st" => Ok(Standard::Intergrowth),
            _ => Err(CoreError::UnknownStandard(s.to_string())),
        }
    }
}
