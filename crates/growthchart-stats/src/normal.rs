use std::f64::consts::SQRT_2;

const A1: f64 = 0.254829592;
const A2: f64 = -0.284496736;
const A3: f64 = 1.421413741;
const A4: f64 = -1.453152027;
const A5: f64 = 1.061405429;
const P: f64 = 0.3275911;

/// Error function, Abramowitz–Stegun 7.1.26 (max abs error ~1.5e-7).
///
/// Saved percentiles were produced with exactly this polynomial; keep it.
pub fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();

    sign * y
}

/// Standard normal CDF scaled to 0–100.
pub fn z_to_percentile(z: f64) -> f64 {
    50.0 * (1.0 + erf(z / SQRT_2))
}
