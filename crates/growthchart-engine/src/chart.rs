//! Percentile curves for plotting.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use growthchart_core::models::measurement::MeasurementType;
use growthchart_core::models::percentile::ChartPercentile;
use growthchart_core::models::sex::Sex;
use growthchart_core::models::standard::Standard;

use crate::engine::GrowthEngine;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChartPoint {
    /// Age in months for LMS standards, gestational age in days for INTERGROWTH.
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChartCurve {
    pub percentile: ChartPercentile,
    pub points: Vec<ChartPoint>,
}

impl GrowthEngine {
    /// One curve per chart percentile across the standard's domain.
    ///
    /// LMS rows without a stored column get the value derived from L, M
    /// and S. INTERGROWTH yields its seven published cutoffs. Empty when no
    /// table is loaded.
    pub fn chart_curves(
        &self,
        standard: Standard,
        sex: Sex,
        measurement: MeasurementType,
    ) -> Vec<ChartCurve> {
        if let Some((min, max)) = standard.month_domain() {
            let Some(table) = self.store().lms_table(standard, sex, measurement) else {
                return Vec::new();
            };
            let rows: Vec<_> = table
                .rows()
                .iter()
                .filter(|r| r.age_months >= min && r.age_months <= max)
                .collect();

            ChartPercentile::ALL
                .iter()
                .map(|percentile| ChartCurve {
                    percentile: *percentile,
                    points: rows
                        .iter()
                        .map(|row| ChartPoint {
                            x: row.age_months,
                            y: row
                                .percentiles
                                .get(*percentile)
                                .unwrap_or_else(|| row.lms.value_at_z(percentile.z())),
                        })
                        .collect(),
                })
                .collect()
        } else {
            let Some(table) = self.store().intergrowth_table(sex, measurement) else {
                return Vec::new();
            };
            let rows = table.rows();

            ChartPercentile::INTERGROWTH
                .iter()
                .enumerate()
                .map(|(i, percentile)| ChartCurve {
                    percentile: *percentile,
                    points: rows
                        .iter()
                        .map(|row| ChartPoint {
                            x: f64::from(row.age.total_days()),
                            y: row.cutoffs[i],
                        })
                        .collect(),
                })
                .collect()
        }
    }
}
