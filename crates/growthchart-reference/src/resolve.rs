//! Turn a query age into reference parameters.
//!
//! LMS tables are interpolated linearly between the two rows bracketing
//! the query age, after clamping the age into the standard's domain.
//! INTERGROWTH tables carry a row for every gestational day, so they are
//! matched exactly and fall back to the nearest row.

use serde::{Deserialize, Serialize};

use growthchart_core::models::age::GestationalAge;
use growthchart_stats::Lms;

use crate::table::{IntergrowthRow, IntergrowthTable, LmsRow, LmsTable, PercentileColumns};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// A row exists at exactly the (clamped) query age.
    Exact,
    /// Linear interpolation between two bracketing rows.
    Interpolated,
    /// Only one side of the bracket exists; that row is used as is.
    Boundary,
    /// The nearest row was used because interpolation was not possible.
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedLms {
    /// `row.age_months` is the clamped query age for interpolated results.
    pub row: LmsRow,
    pub resolution: Resolution,
    /// The query age lay outside the standard's domain.
    pub clamped: bool,
}

impl ResolvedLms {
    pub fn interpolated(&self) -> bool {
        self.resolution != Resolution::Exact
    }
}

/// Resolve LMS parameters for `age_months`.
///
/// Returns `None` when the table has no rows inside the standard's domain,
/// or when the age is not a number.
pub fn resolve_lms(table: &LmsTable, age_months: f64) -> Option<ResolvedLms> {
    let (min, max) = table.key().standard.month_domain()?;
    let candidates: Vec<&LmsRow> = table
        .rows()
        .iter()
        .filter(|r| r.age_months >= min && r.age_months <= max)
        .collect();
    if candidates.is_empty() {
        return None;
    }

    if let Some(row) = candidates.iter().find(|r| r.age_months == age_months) {
        return Some(ResolvedLms {
            row: **row,
            resolution: Resolution::Exact,
            clamped: false,
        });
    }

    let age = age_months.clamp(min, max);
    let clamped = age != age_months && !age_months.is_nan();
    if clamped {
        tracing::warn!(
            table = %table.key(),
            age_months,
            clamped_to = age,
            "age outside reference domain, clamping"
        );
    }

    let mut lower: Option<&LmsRow> = None;
    let mut upper: Option<&LmsRow> = None;
    for row in candidates.iter().copied() {
        if row.age_months <= age {
            lower = Some(row);
        }
        if upper.is_none() && row.age_months >= age {
            upper = Some(row);
        }
    }

    match (lower, upper) {
        (None, None) => None,
        (Some(only), None) | (None, Some(only)) => Some(ResolvedLms {
            row: *only,
            resolution: if only.age_months == age {
                Resolution::Exact
            } else {
                Resolution::Boundary
            },
            clamped,
        }),
        (Some(lo), Some(hi)) if lo.age_months == hi.age_months => Some(ResolvedLms {
            row: *lo,
            resolution: Resolution::Exact,
            clamped,
        }),
        (Some(lo), Some(hi)) => {
            let (row, resolution) = interpolate_rows(lo, hi, age);
            Some(ResolvedLms {
                row,
                resolution,
                clamped,
            })
        }
    }
}

/// Interpolate every numeric field of two rows at `age`.
///
/// If the interpolation factor is not finite or falls outside `[0, 1]`,
/// the row nearer to `age` is returned instead (the lower one on a tie)
/// with [`Resolution::Nearest`]. The result inherits `lower`'s sex.
pub fn interpolate_rows(lower: &LmsRow, upper: &LmsRow, age: f64) -> (LmsRow, Resolution) {
    let factor = (age - lower.age_months) / (upper.age_months - lower.age_months);

    if !factor.is_finite() || !(0.0..=1.0).contains(&factor) {
        tracing::debug!(
            lower = lower.age_months,
            upper = upper.age_months,
            age,
            factor,
            "interpolation factor out of range, using nearest row"
        );
        let nearest = if (age - lower.age_months).abs() <= (upper.age_months - age).abs() {
            lower
        } else {
            upper
        };
        return (*nearest, Resolution::Nearest);
    }

    let lerp = |a: f64, b: f64| a + factor * (b - a);

    let mut percentiles = PercentileColumns::default();
    for (slot, (a, b)) in percentiles
        .0
        .iter_mut()
        .zip(lower.percentiles.0.iter().zip(upper.percentiles.0.iter()))
    {
        *slot = match (a, b) {
            (Some(a), Some(b)) => Some(lerp(*a, *b)),
            _ => None,
        };
    }

    let row = LmsRow {
        sex: lower.sex,
        age_months: age,
        lms: Lms::new(
            lerp(lower.lms.l, upper.lms.l),
            lerp(lower.lms.m, upper.lms.m),
            lerp(lower.lms.s, upper.lms.s),
        ),
        percentiles,
    };
    (row, Resolution::Interpolated)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedIntergrowth<'a> {
    pub row: &'a IntergrowthRow,
    pub resolution: Resolution,
}

/// Find the row for `gestational_age`: exact key first, then the row with
/// the smallest difference in total days (the earlier gestational age on a
/// tie, since table rows are sorted by age).
pub fn resolve_intergrowth(
    table: &IntergrowthTable,
    gestational_age: GestationalAge,
) -> Option<ResolvedIntergrowth<'_>> {
    let key = gestational_age.key();
    if let Some(row) = table.rows().iter().find(|r| r.key.trim() == key) {
        return Some(ResolvedIntergrowth {
            row,
            resolution: Resolution::Exact,
        });
    }

    let target = i64::from(gestational_age.total_days());
    let row = table
        .rows()
        .iter()
        .min_by_key(|r| (i64::from(r.age.total_days()) - target).abs())?;

    tracing::warn!(
        table = %table.key(),
        requested = %key,
        using = %row.key,
        "no exact gestational age row, using nearest"
    );
    Some(ResolvedIntergrowth {
        row,
        resolution: Resolution::Nearest,
    })
}
