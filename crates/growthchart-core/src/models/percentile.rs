use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The percentile lines drawn on growth charts and stored as `P3`…`P97`
/// columns in the LMS reference files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ChartPercentile {
    P3,
    P5,
    P10,
    P25,
    P50,
    P75,
    P90,
    P95,
    P97,
}

impl ChartPercentile {
    pub const ALL: [ChartPercentile; 9] = [
        ChartPercentile::P3,
        ChartPercentile::P5,
        ChartPercentile::P10,
        ChartPercentile::P25,
        ChartPercentile::P50,
        ChartPercentile::P75,
        ChartPercentile::P90,
        ChartPercentile::P95,
        ChartPercentile::P97,
    ];

    /// The seven cutoffs published by INTERGROWTH-21st, in column order.
    pub const INTERGROWTH: [ChartPercentile; 7] = [
        ChartPercentile::P3,
        ChartPercentile::P5,
        ChartPercentile::P10,
        ChartPercentile::P50,
        ChartPercentile::P90,
        ChartPercentile::P95,
        ChartPercentile::P97,
    ];

    pub fn rank(&self) -> f64 {
        match self {
            ChartPercentile::P3 => 3.0,
            ChartPercentile::P5 => 5.0,
            ChartPercentile::P10 => 10.0,
            ChartPercentile::P25 => 25.0,
            ChartPercentile::P50 => 50.0,
            ChartPercentile::P75 => 75.0,
            ChartPercentile::P90 => 90.0,
            ChartPercentile::P95 => 95.0,
            ChartPercentile::P97 => 97.0,
        }
    }

    /// Standard-normal quantile for this rank.
    pub fn z(&self) -> f64 {
        match self {
            ChartPercentile::P3 => -1.880_794,
            ChartPercentile::P5 => -1.644_854,
            ChartPercentile::P10 => -1.281_552,
            ChartPercentile::P25 => -0.674_490,
            ChartPercentile::P50 => 0.0,
            ChartPercentile::P75 => 0.674_490,
            ChartPercentile::P90 => 1.281_552,
            ChartPercentile::P95 => 1.644_854,
            ChartPercentile::P97 => 1.880_794,
        }
    }

    /// Column name in the LMS JSON files, e.g. `"P3"`.
    pub fn column(&self) -> &'static str {
        match self {
            ChartPercentile::P3 => "P3",
            ChartPercentile::P5 => "P5",
            ChartPercentile::P10 => "P10",
            ChartPercentile::P25 => "P25",
            ChartPercentile::P50 => "P50",
            ChartPercentile::P75 => "P75",
            ChartPercentile::P90 => "P90",
            ChartPercentile::P95 => "P95",
            ChartPercentile::P97 => "P97",
        }
    }
}
