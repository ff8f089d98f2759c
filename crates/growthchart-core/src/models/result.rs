use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::standard::Standard;

/// Z-score and percentile for one measurement. Computed per request,
/// never cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PercentileResult {
    pub z_score: f64,
    /// 0–100.
    pub percentile: f64,
    /// True when the reference parameters did not come from an exact row.
    pub interpolated: bool,
}

/// Coarse classification used by badges and summary text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PercentileBand {
    BelowFifth,
    FifthToTenth,
    TenthToTwentyFifth,
    TwentyFifthToFiftieth,
    FiftiethToSeventyFifth,
    SeventyFifthToNinetieth,
    NinetiethToNinetyFifth,
    AboveNinetyFifth,
}

impl PercentileBand {
    /// Lower bounds are inclusive; exactly 95.0 still counts as 90th–95th.
    pub fn from_percentile(percentile: f64) -> Option<Self> {
        if !percentile.is_finite() {
            return None;
        }
        let band = match percentile {
            p if p < 5.0 => PercentileBand::BelowFifth,
            p if p < 10.0 => PercentileBand::FifthToTenth,
            p if p < 25.0 => PercentileBand::TenthToTwentyFifth,
            p if p < 50.0 => PercentileBand::TwentyFifthToFiftieth,
            p if p < 75.0 => PercentileBand::FiftiethToSeventyFifth,
            p if p < 90.0 => PercentileBand::SeventyFifthToNinetieth,
            p if p <= 95.0 => PercentileBand::NinetiethToNinetyFifth,
            _ => PercentileBand::AboveNinetyFifth,
        };
        Some(band)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PercentileBand::BelowFifth => "<5th",
            PercentileBand::FifthToTenth => "5th-10th",
            PercentileBand::TenthToTwentyFifth => "10th-25th",
            PercentileBand::TwentyFifthToFiftieth => "25th-50th",
            PercentileBand::FiftiethToSeventyFifth => "50th-75th",
            PercentileBand::SeventyFifthToNinetieth => "75th-90th",
            PercentileBand::NinetiethToNinetyFifth => "90th-95th",
            PercentileBand::AboveNinetyFifth => ">95th",
        }
    }
}

impl PercentileResult {
    pub fn band(&self) -> Option<PercentileBand> {
        PercentileBand::from_percentile(self.percentile)
    }
}

/// Whether the chosen standard fits the patient's age, and what to switch
/// to when it does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StandardRecommendation {
    pub current_standard_valid: bool,
    pub recommended_standard: Option<Standard>,
}
