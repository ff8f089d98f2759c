//! Standard selection rules.
//!
//! Each standard is valid over a fixed age window (see
//! [`Standard::validity`]). When the chosen standard does not cover the
//! patient's age, [`recommend`] walks a fixed priority list and returns the
//! first candidate that matches.

use crate::models::age::PatientAge;
use crate::models::result::StandardRecommendation;
use crate::models::standard::Standard;

pub fn is_standard_valid(standard: Standard, age: &PatientAge) -> bool {
    standard
        .validity()
        .contains(age.in_days(), age.in_months())
}

/// CDC child charts are only offered strictly between 24 and 240 months,
/// even though they remain valid at both ends.
fn candidate_matches(candidate: Standard, age: &PatientAge) -> bool {
    let days = age.in_days();
    let months = age.in_months();
    if days < 0.0 {
        return false;
    }
    match candidate {
        Standard::Intergrowth => days < 7.0,
        Standard::Who => months < 24.0,
        Standard::CdcInfant => months < 36.0,
        Standard::CdcChild => months > 24.0 && months < 240.0,
    }
}

const PRIORITY: [Standard; 4] = [
    Standard::Intergrowth,
    Standard::Who,
    Standard::CdcInfant,
    Standard::CdcChild,
];

/// Suggest a replacement for `current`. Returns `None` when `current` is
/// already valid or when no standard covers the age.
pub fn recommend(current: Standard, age: &PatientAge) -> Option<Standard> {
    if is_standard_valid(current, age) {
        return None;
    }
    PRIORITY
        .into_iter()
        .filter(|candidate| *candidate != current)
        .find(|candidate| candidate_matches(*candidate, age))
}

pub fn evaluate(current: Standard, age: &PatientAge) -> StandardRecommendation {
    let current_standard_valid = is_standard_valid(current, age);
    StandardRecommendation {
        current_standard_valid,
        recommended_standard: if current_standard_valid {
            None
        } else {
            recommend(current, age)
        },
    }
}
