use serde::{Deserialize, Serialize};

/// Box-Cox power (L), median (M) and coefficient of variation (S) at one
/// age for one sex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lms {
    pub l: f64,
    pub m: f64,
    pub s: f64,
}

impl Lms {
    pub fn new(l: f64, m: f64, s: f64) -> Self {
        Self { l, m, s }
    }

    pub fn z_score(&self, value: f64) -> f64 {
        z_score(value, self.l, self.m, self.s)
    }

    pub fn value_at_z(&self, z: f64) -> f64 {
        value_at_z(z, self.l, self.m, self.s)
    }
}

/// LMS Z-score.
///
/// `L == 0` is the log-normal limit: `ln(value / M) / S`. Otherwise
/// `((value / M)^L - 1) / (L * S)`.
pub fn z_score(value: f64, l: f64, m: f64, s: f64) -> f64 {
    if l == 0.0 {
        (value / m).ln() / s
    } else {
        ((value / m).powf(l) - 1.0) / (l * s)
    }
}

/// Inverse of [`z_score`]: the measurement sitting at `z` standard
/// deviations for the given parameters.
pub fn value_at_z(z: f64, l: f64, m: f64, s: f64) -> f64 {
    if l == 0.0 {
        m * (s * z).exp()
    } else {
        m * (1.0 + l * s * z).powf(1.0 / l)
    }
}
