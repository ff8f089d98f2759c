use std::sync::Arc;

use growthchart_core::models::measurement::{Measurement, MeasurementType};
use growthchart_core::models::result::PercentileResult;
use growthchart_core::models::standard::Standard;
use growthchart_core::selector;
use growthchart_reference::resolve::{resolve_intergrowth, resolve_lms, Resolution};
use growthchart_reference::store::ReferenceStore;
use growthchart_stats::{calculate_bmi, z_from_cutoffs, z_to_percentile};

use crate::assessment::{Assessment, AssessmentRequest, MeasurementOutcome};
use crate::config::EngineConfig;
use crate::error::EngineError;

/// Stateless facade over a shared [`ReferenceStore`]. Cheap to clone.
#[derive(Debug, Clone)]
pub struct GrowthEngine {
    store: Arc<ReferenceStore>,
}

impl GrowthEngine {
    pub fn new(store: Arc<ReferenceStore>) -> Self {
        Self { store }
    }

    /// Load the reference bundle described by `config`.
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        let store = ReferenceStore::from_manifest(
            &config.dataset_dir,
            &config.manifest(),
            &config.dataset_version,
        )?;
        Ok(Self::new(Arc::new(store)))
    }

    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }

    /// Z-score and percentile of one measurement against `standard`.
    ///
    /// `None` means no reference applies: no table for this
    /// standard/sex/measurement, no rows in the standard's age domain, or an
    /// INTERGROWTH query without a gestational age.
    pub fn percentile(
        &self,
        measurement: &Measurement,
        standard: Standard,
    ) -> Option<PercentileResult> {
        let z_and_flag = if standard.is_lms() {
            let table = self
                .store
                .lms_table(standard, measurement.sex, measurement.measurement)?;
            let resolved = resolve_lms(table, measurement.age.in_months())?;
            (resolved.row.lms.z_score(measurement.value), resolved.interpolated())
        } else {
            let gestational_age = measurement.gestational_age?;
            let table = self
                .store
                .intergrowth_table(measurement.sex, measurement.measurement)?;
            let resolved = resolve_intergrowth(table, gestational_age)?;
            (
                z_from_cutoffs(measurement.value, &resolved.row.cutoffs),
                resolved.resolution != Resolution::Exact,
            )
        };

        let (z_score, interpolated) = z_and_flag;
        Some(PercentileResult {
            z_score,
            percentile: z_to_percentile(z_score),
            interpolated,
        })
    }

    /// Evaluate every supplied measurement plus derived BMI.
    ///
    /// Measurements that are absent, non-finite or non-positive are skipped.
    /// An age outside the standard's window still produces numbers (clamped
    /// to the domain); the recommendation flags it.
    pub fn assess(&self, request: &AssessmentRequest) -> Assessment {
        let recommendation = selector::evaluate(request.standard, &request.age);
        if !recommendation.current_standard_valid {
            tracing::info!(
                standard = %request.standard,
                age_months = request.age.in_months(),
                recommended = ?recommendation.recommended_standard,
                "standard not valid for patient age"
            );
        }

        let mut outcomes = Vec::new();
        let supplied = [
            (MeasurementType::Weight, request.weight_kg),
            (MeasurementType::HeightLength, request.height_cm),
            (MeasurementType::HeadCircumference, request.head_circumference_cm),
        ];
        for (kind, value) in supplied {
            if let Some(value) = value.filter(|v| is_present(*v)) {
                outcomes.push(self.outcome(request, kind, value));
            }
        }

        if let (Some(weight), Some(height)) = (request.weight_kg, request.height_cm)
            && is_present(weight)
            && is_present(height)
        {
            let bmi = calculate_bmi(weight, height);
            outcomes.push(self.outcome(request, MeasurementType::Bmi, bmi));
        }

        Assessment {
            standard: request.standard,
            recommendation,
            outcomes,
        }
    }

    fn outcome(
        &self,
        request: &AssessmentRequest,
        kind: MeasurementType,
        value: f64,
    ) -> MeasurementOutcome {
        let mut measurement = Measurement::new(kind, value, request.sex, request.age);
        measurement.gestational_age = request.gestational_age;

        let result = self.percentile(&measurement, request.standard);
        MeasurementOutcome {
            measurement: kind,
            value,
            result,
            band: result.and_then(|r| r.band()),
        }
    }
}

fn is_present(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
