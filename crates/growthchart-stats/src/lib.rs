//! growthchart-stats
//!
//! Numeric transforms between raw measurements, Z-scores and percentiles.
//! Pure functions over `f64`; no reference data lives here.
//!
//! The normal CDF uses the Abramowitz–Stegun erf approximation so that
//! percentiles agree bit-for-bit with previously saved calculations.

pub mod bmi;
pub mod lms;
pub mod normal;
pub mod raw_percentile;

pub use bmi::calculate_bmi;
pub use lms::{value_at_z, z_score, Lms};
pub use normal::{erf, z_to_percentile};
pub use raw_percentile::z_from_cutoffs;

/// Round for display, e.g. `round_to(12.345, 1) == 12.3`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
