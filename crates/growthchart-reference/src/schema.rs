//! On-disk row shapes of the reference JSON files.
//!
//! Field names are a fixed contract with the bundled datasets: LMS files
//! use `Sex`/`Agemos`/`L`/`M`/`S`/`P3`…`P97`, INTERGROWTH files use
//! `sex`/`age`/`"3rd"`…`"97th"`. Numeric fields also accept numeric
//! strings, which is how spreadsheet-converted files arrive.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmsRecord {
    #[serde(rename = "Sex", deserialize_with = "sex_code")]
    pub sex: u8,
    #[serde(rename = "Agemos", deserialize_with = "flex_f64")]
    pub age_months: f64,
    #[serde(rename = "L", deserialize_with = "flex_f64")]
    pub l: f64,
    #[serde(rename = "M", deserialize_with = "flex_f64")]
    pub m: f64,
    #[serde(rename = "S", deserialize_with = "flex_f64")]
    pub s: f64,
    #[serde(
        rename = "P3",
        default,
        deserialize_with = "flex_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub p3: Option<f64>,
    #[serde(
        rename = "P5",
        default,
        deserialize_with = "flex_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub p5: Option<f64>,
    #[serde(
        rename = "P10",
        default,
        deserialize_with = "flex_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub p10: Option<f64>,
    #[serde(
        rename = "P25",
        default,
        deserialize_with = "flex_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub p25: Option<f64>,
    #[serde(
        rename = "P50",
        default,
        deserialize_with = "flex_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub p50: Option<f64>,
    #[serde(
        rename = "P75",
        default,
        deserialize_with = "flex_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub p75: Option<f64>,
    #[serde(
        rename = "P90",
        default,
        deserialize_with = "flex_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub p90: Option<f64>,
    #[serde(
        rename = "P95",
        default,
        deserialize_with = "flex_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub p95: Option<f64>,
    #[serde(
        rename = "P97",
        default,
        deserialize_with = "flex_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub p97: Option<f64>,
}

impl LmsRecord {
    /// Percentile columns in `ChartPercentile::ALL` order.
    pub fn percentile_columns(&self) -> [Option<f64>; 9] {
        [
            self.p3, self.p5, self.p10, self.p25, self.p50, self.p75, self.p90, self.p95,
            self.p97,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntergrowthRecord {
    #[serde(deserialize_with = "sex_code")]
    pub sex: u8,
    /// Gestational age key, `"<weeks>+<days>"`.
    pub age: String,
    #[serde(rename = "3rd", deserialize_with = "flex_f64")]
    pub p3: f64,
    #[serde(rename = "5th", deserialize_with = "flex_f64")]
    pub p5: f64,
    #[serde(rename = "10th", deserialize_with = "flex_f64")]
    pub p10: f64,
    #[serde(rename = "50th", deserialize_with = "flex_f64")]
    pub p50: f64,
    #[serde(rename = "90th", deserialize_with = "flex_f64")]
    pub p90: f64,
    #[serde(rename = "95th", deserialize_with = "flex_f64")]
    pub p95: f64,
    #[serde(rename = "97th", deserialize_with = "flex_f64")]
    pub p97: f64,
}

impl IntergrowthRecord {
    pub fn cutoffs(&self) -> [f64; 7] {
        [self.p3, self.p5, self.p10, self.p50, self.p90, self.p95, self.p97]
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flex {
    Number(f64),
    Text(String),
}

fn flex_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Flex::deserialize(deserializer)? {
        Flex::Number(n) => Ok(n),
        Flex::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected a number, got {s:?}"))),
    }
}

fn flex_opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    match Option::<Flex>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Flex::Number(n)) => Ok(Some(n)),
        Some(Flex::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Flex::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("expected a number, got {s:?}"))),
    }
}

fn sex_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let code = flex_f64(deserializer)?;
    if code == 1.0 || code == 2.0 {
        Ok(code as u8)
    } else {
        Err(de::Error::custom(format!("sex code must be 1 or 2, got {code}")))
    }
}
