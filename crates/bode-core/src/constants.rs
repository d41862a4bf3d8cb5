//! Numerical constants for frequency response analysis
//!
//! Default sweep bounds, crossover levels and the magnitude limits used when a
//! response value would otherwise be infinite.

/// Default number of points in the frequency sweep.
pub const DEFAULT_NPOINTS: usize = 10_000;

/// Default lowest angular frequency (rad/s).
pub const DEFAULT_START_RAD_S: f64 = 0.01;

/// Default highest angular frequency (rad/s).
pub const DEFAULT_STOP_RAD_S: f64 = 1_000_000.0;

/// Magnitude level that defines the gain crossover (dB).
pub const GAIN_CROSSOVER_DB: f64 = 0.0;

/// Phase level that defines the phase crossover (degrees).
pub const PHASE_CROSSOVER_DEG: f64 = -180.0;

/// Phase margin reference: margin = PHASE_MARGIN_REFERENCE_DEG + phase.
pub const PHASE_MARGIN_REFERENCE_DEG: f64 = 180.0;

/// Magnitude assigned to a sampled pole under the clamp policy (dB).
pub const POLE_CLAMP_DB: f64 = 400.0;

/// Magnitude assigned to an exact zero of the response (dB).
/// Replaces the -inf that 20*log10(0) would produce.
pub const MAGNITUDE_FLOOR_DB: f64 = -400.0;

/// Character repeated to draw the fraction bar between numerator and denominator.
pub const DIVIDER_CHAR: char = '-';

/// Name of the Laplace variable in canonical polynomial strings.
pub const VARIABLE: &str = "S";
