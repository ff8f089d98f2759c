use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::models::age::{GestationalAge, PatientAge};
use crate::models::sex::Sex;

/// The anthropometric quantity a reference table describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MeasurementType {
    /// Kilograms.
    Weight,
    /// Recumbent length or standing height, centimetres.
    HeightLength,
    /// Occipitofrontal circumference, centimetres.
    HeadCircumference,
    /// Body mass index, kg/m².
    Bmi,
}

impl MeasurementType {
    pub fn id(&self) -> &'static str {
        match self {
            MeasurementType::Weight => "weight",
            MeasurementType::HeightLength => "height_length",
            MeasurementType::HeadCircumference => "head_circumference",
            MeasurementType::Bmi => "bmi",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            MeasurementType::Weight => "kg",
            MeasurementType::HeightLength | MeasurementType::HeadCircumference => "cm",
            MeasurementType::Bmi => "kg/m²",
        }
    }
}

impl fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for MeasurementType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weight" => Ok(MeasurementType::Weight),
            "height_length" | "height" | "length" => Ok(MeasurementType::HeightLength),
            "head_circumference" | "head" | "hc" => Ok(MeasurementType::HeadCircumference),
            "bmi" => Ok(MeasurementType::Bmi),
            _ => Err(CoreError::UnknownMeasurementType(s.to_string())),
        }
    }
}

/// A single raw measurement supplied by the caller.
///
/// `value` is expected to be a positive, finite number. Nothing here
/// re-validates it: a NaN goes in, a NaN comes out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Measurement {
    pub measurement: MeasurementType,
    pub value: f64,
    pub sex: Sex,
    pub age: PatientAge,
    #[ts(type = "string | null")]
    pub gestational_age: Option<GestationalAge>,
}

impl Measurement {
    pub fn new(measurement: MeasurementType, value: f64, sex: Sex, age: PatientAge) -> Self {
        Self {
            measurement,
            value,
            sex,
            age,
            gestational_age: None,
        }
    }

    pub fn with_gestational_age(mut self, gestational_age: GestationalAge) -> Self {
        self.gestational_age = Some(gestational_age);
        self
    }
}
