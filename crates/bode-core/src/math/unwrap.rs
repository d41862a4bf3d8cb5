//! Phase unwrapping in degrees
//!
//! Each new phase is compared against the previous *corrected* phase and
//! shifted by multiples of 360° until the step lies within [-180°, 180°].
//! Corrections therefore accumulate over the whole sequence.
//!
//! ```
//! use bode_core::math::unwrap_degrees;
//!
//! let unwrapped = unwrap_degrees(&[170.0, -170.0, -150.0]);
//! assert_eq!(unwrapped, vec![170.0, 190.0, 210.0]);
//! ```

/// Stateful phase unwrapper working in degrees.
#[derive(Debug, Clone, Default)]
pub struct PhaseUnwrapper {
    /// Previous corrected phase, `None` until the first sample.
    prev: Option<f64>,
}

impl PhaseUnwrapper {
    /// Create a new phase unwrapper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unwrap a single phase sample (degrees).
    #[inline]
    pub fn process_sample(&mut self, phase: f64) -> f64 {
        let corrected = match self.prev {
            None => phase,
            Some(prev) => {
                let mut corrected = phase;
                while corrected - prev > 180.0 {
                    corrected -= 360.0;
                }
                while corrected - prev < -180.0 {
                    corrected += 360.0;
                }
                corrected
            }
        };
        self.prev = Some(corrected);
        corrected
    }

    /// Last corrected phase, if any sample was processed.
    pub fn last(&self) -> Option<f64> {
        self.prev
    }

    /// Forget the running phase.
    pub fn reset(&mut self) {
        self.prev = None;
    }
}

/// Unwrap a block of phase samples (degrees).
pub fn unwrap_degrees(phases: &[f64]) -> Vec<f64> {
    let mut unwrapper = PhaseUnwrapper::new();
    phases.iter().map(|&p| unwrapper.process_sample(p)).collect()
}
