use serde::{Deserialize, Serialize};
use ts_rs::TS;

use growthchart_core::models::age::{GestationalAge, PatientAge};
use growthchart_core::models::measurement::MeasurementType;
use growthchart_core::models::result::{PercentileBand, PercentileResult, StandardRecommendation};
use growthchart_core::models::sex::Sex;
use growthchart_core::models::standard::Standard;

/// One visit's raw anthropometry for a patient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentRequest {
    pub standard: Standard,
    pub sex: Sex,
    pub age: PatientAge,
    /// Needed for INTERGROWTH only.
    #[ts(type = "string | null")]
    pub gestational_age: Option<GestationalAge>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub head_circumference_cm: Option<f64>,
}

impl AssessmentRequest {
    pub fn new(standard: Standard, sex: Sex, age: PatientAge) -> Self {
        Self {
            standard,
            sex,
            age,
            gestational_age: None,
            weight_kg: None,
            height_cm: None,
            head_circumference_cm: None,
        }
    }
}

/// Result for a single measurement. `result` is `None` when no reference
/// is available ("percentile unavailable").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MeasurementOutcome {
    pub measurement: MeasurementType,
    pub value: f64,
    pub result: Option<PercentileResult>,
    pub band: Option<PercentileBand>,
}

impl MeasurementOutcome {
    pub fn percentile(&self) -> Option<f64> {
        self.result.map(|r| r.percentile)
    }

    pub fn z_score(&self) -> Option<f64> {
        self.result.map(|r| r.z_score)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Assessment {
    pub standard: Standard,
    pub recommendation: StandardRecommendation,
    pub outcomes: Vec<MeasurementOutcome>,
}

impl Assessment {
    pub fn outcome(&self, measurement: MeasurementType) -> Option<&MeasurementOutcome> {
        self.outcomes.iter().find(|o| o.measurement == measurement)
    }
}
