use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Decode the numeric sex column used by the reference datasets (1 = male, 2 = female).
    pub fn from_code(code: u8) -> Result<Self, CoreError> {
        match code {
            1 => Ok(Sex::Male),
            2 => Ok(Sex::Female),
            other => Err(CoreError::InvalidSexCode(other)),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Sex::Male => 1,
            Sex::Female => 2,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => f.write_str("male"),
            Sex::Female => f.write_str("female"),
        }
    }
}

impl FromStr for Sex {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "1" => Ok(Sex::Male),
            "female" | "f" | "2" => Ok(Sex::Female),
            _ => Err(CoreError::UnknownSex(s.to_string())),
        }
    }
}
