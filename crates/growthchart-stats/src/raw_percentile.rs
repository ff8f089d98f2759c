//! Z-scores for references that publish percentile cutoffs instead of LMS
//! parameters (INTERGROWTH-21st).
//!
//! The value is placed between the two neighbouring cutoffs and its Z-score
//! is linearly interpolated between their canonical Z values. Values below
//! the 3rd or above the 97th cutoff extrapolate along the outermost segment.
//! The factor is never clamped.

/// Percentile ranks of the seven published cutoffs, in column order.
pub const CUTOFF_RANKS: [f64; 7] = [3.0, 5.0, 10.0, 50.0, 90.0, 95.0, 97.0];

/// Z-score assigned to each cutoff.
pub const CUTOFF_Z: [f64; 7] = [-1.88, -1.645, -1.28, 0.0, 1.28, 1.645, 1.88];

/// Index of the lower cutoff of the segment used for `value`.
///
/// This is the highest cutoff not exceeding `value`, kept one short of the
/// last cutoff so the segment always has an upper end. Values below the
/// first cutoff (and NaN) use the first segment.
pub fn bracket(value: f64, cutoffs: &[f64; 7]) -> usize {
    let mut lower = None;
    for (i, cutoff) in cutoffs.iter().enumerate() {
        if value >= *cutoff {
            lower = Some(i);
        }
    }
    match lower {
        None => 0,
        Some(i) => i.min(cutoffs.len() - 2),
    }
}

/// Z-score for `value` against one row of cutoffs (3rd, 5th, 10th, 50th,
/// 90th, 95th, 97th). Cutoffs must be strictly increasing.
pub fn z_from_cutoffs(value: f64, cutoffs: &[f64; 7]) -> f64 {
    let lo = bracket(value, cutoffs);
    let hi = lo + 1;
    let factor = (value - cutoffs[lo]) / (cutoffs[hi] - cutoffs[lo]);
    CUTOFF_Z[lo] + factor * (CUTOFF_Z[hi] - CUTOFF_Z[lo])
}
