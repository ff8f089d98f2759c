use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use jiff::Unit;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Average month length in days, as used by the CDC reference tables.
pub const DAYS_PER_MONTH: f64 = 30.4375;

/// Postnatal age. Stored in days; months are derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientAge {
    pub days: f64,
}

impl PatientAge {
    pub fn from_days(days: f64) -> Self {
        Self { days }
    }

    pub fn from_months(months: f64) -> Self {
        Self {
            days: months * DAYS_PER_MONTH,
        }
    }

    /// Age on `measured` for a child born on `birth`.
    pub fn between(birth: Date, measured: Date) -> Result<Self, CoreError> {
        let span = birth.until((Unit::Day, measured))?;
        let days = span.get_days();
        if days < 0 {
            return Err(CoreError::InvalidAge(format!(
                "measurement date {measured} precedes birth date {birth}"
            )));
        }
        Ok(Self::from_days(f64::from(days)))
    }

    pub fn in_days(&self) -> f64 {
        self.days
    }

    pub fn in_months(&self) -> f64 {
        self.days / DAYS_PER_MONTH
    }
}

/// Gestational age written as `"<weeks>+<days>"`, e.g. `32+3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GestationalAge {
    pub weeks: u8,
    pub days: u8,
}

impl GestationalAge {
    pub fn new(weeks: u8, days: u8) -> Result<Self, CoreError> {
        if days > 6 {
            return Err(CoreError::InvalidGestationalAge(format!(
                "{weeks}+{days}: days must be 0-6"
            )));
        }
        Ok(Self { weeks, days })
    }

    pub fn total_days(&self) -> u32 {
        u32::from(self.weeks) * 7 + u32::from(self.days)
    }

    /// Lookup key in the INTERGROWTH tables.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GestationalAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.weeks, self.days)
    }
}

impl FromStr for GestationalAge {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidGestationalAge(s.to_string());
        let (weeks, days) = s.trim().split_once('+').ok_or_else(invalid)?;
        let weeks: u8 = weeks.trim().parse().map_err(|_| invalid())?;
        let days: u8 = days.trim().parse().map_err(|_| invalid())?;
        Self::new(weeks, days)
    }
}

impl TryFrom<String> for GestationalAge {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GestationalAge> for String {
    fn from(value: GestationalAge) -> Self {
        value.to_string()
    }
}
