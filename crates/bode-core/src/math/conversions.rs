//! Unit conversion functions
//!
//! Conversions from complex response values to magnitude (dB) and phase (degrees).

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::constants::MAGNITUDE_FLOOR_DB;

/// Convert complex number to dB (20*log10(|z|))
pub fn complex_2_db(z: Complex64) -> f64 {
    magnitude_2_db(z.norm())
}

/// Convert complex number to phase in degrees, in (-180, 180]
pub fn complex_2_degree(z: Complex64) -> f64 {
    radian_2_degree(z.arg())
}

/// Convert magnitude to dB (20*log10(mag))
///
/// A zero magnitude maps to `MAGNITUDE_FLOOR_DB` instead of -inf.
pub fn magnitude_2_db(mag: f64) -> f64 {
    if mag == 0.0 {
        return MAGNITUDE_FLOOR_DB;
    }
    20.0 * mag.log10()
}

/// Convert dB to magnitude (10^(dB/20))
pub fn db_2_magnitude(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Convert radians to degrees
pub fn radian_2_degree(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Convert degrees to radians
pub fn degree_2_radian(deg: f64) -> f64 {
    deg * PI / 180.0
}
