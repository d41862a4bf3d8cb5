//! Frequency response sampling
//!
//! Turns a transfer function evaluated over a frequency grid into Bode series:
//! magnitude in dB and unwrapped phase in degrees.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::constants::POLE_CLAMP_DB;
use crate::frequency::Frequency;
use crate::math::{complex_2_db, complex_2_degree, PhaseUnwrapper};
use crate::transfer_function::{Evaluation, TransferFunction};

/// What to do with a frequency at which H(jω) is singular
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolePolicy {
    /// Drop the frequency and record it in `singular_frequencies`
    #[default]
    Skip,
    /// Keep the frequency with this magnitude (dB) and the previous raw phase
    Clamp(f64),
}

impl PolePolicy {
    /// Clamp at the default pole magnitude
    pub fn clamp() -> Self {
        PolePolicy::Clamp(POLE_CLAMP_DB)
    }
}

/// One point of a Bode trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencySample {
    /// Angular frequency (rad/s)
    pub omega: f64,
    /// Magnitude (dB)
    pub magnitude_db: f64,
    /// Unwrapped phase (degrees)
    pub phase_deg: f64,
}

impl FrequencySample {
    pub fn new(omega: f64, magnitude_db: f64, phase_deg: f64) -> Self {
        Self {
            omega,
            magnitude_db,
            phase_deg,
        }
    }

    fn is_usable(&self) -> bool {
        self.omega.is_finite()
            && self.omega > 0.0
            && self.magnitude_db.is_finite()
            && self.phase_deg.is_finite()
    }
}

/// Sampled Bode trace, strictly increasing in frequency
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrequencyResponse {
    omega: Array1<f64>,
    magnitude_db: Array1<f64>,
    phase_deg: Array1<f64>,
    singular: Vec<f64>,
}

impl FrequencyResponse {
    /// Sample a transfer function over a frequency grid
    ///
    /// # Arguments
    /// * `tf` - Transfer function to evaluate
    /// * `frequency` - Strictly positive, increasing grid
    /// * `policy` - Handling of frequencies that hit a pole
    ///
    /// A non-finite clamp level is ignored and singular frequencies are skipped.
    pub fn compute(tf: &TransferFunction, frequency: &Frequency, policy: PolePolicy) -> Self {
        let policy = match policy {
            PolePolicy::Clamp(db) if !db.is_finite() => {
                log::warn!("clamp level {} dB is not finite, skipping singular frequencies", db);
                PolePolicy::Skip
            }
            policy => policy,
        };
        let evaluations = tf.response(frequency);
        let npoints = evaluations.len();

        let mut omega = Vec::with_capacity(npoints);
        let mut magnitude_db = Vec::with_capacity(npoints);
        let mut phase_deg = Vec::with_capacity(npoints);
        let mut singular = Vec::new();

        let mut unwrapper = PhaseUnwrapper::new();
        let mut prev_raw_phase = 0.0;

        for (&w, evaluation) in frequency.omega().iter().zip(evaluations) {
            let (mag, raw_phase) = match (evaluation, policy) {
                (Evaluation::Finite(h), _) => (complex_2_db(h), complex_2_degree(h)),
                (Evaluation::Singular, PolePolicy::Skip) => {
                    log::warn!("skipping singular frequency {} rad/s", w);
                    singular.push(w);
                    continue;
                }
                (Evaluation::Singular, PolePolicy::Clamp(db)) => {
                    log::warn!("clamping singular frequency {} rad/s to {} dB", w, db);
                    singular.push(w);
                    (db, prev_raw_phase)
                }
            };

            prev_raw_phase = raw_phase;
            omega.push(w);
            magnitude_db.push(mag);
            phase_deg.push(unwrapper.process_sample(raw_phase));
        }

        log::debug!(
            "sampled {} of {} frequencies ({} singular)",
            omega.len(),
            npoints,
            singular.len()
        );

        Self {
            omega: Array1::from_vec(omega),
            magnitude_db: Array1::from_vec(magnitude_db),
            phase_deg: Array1::from_vec(phase_deg),
            singular,
        }
    }

    /// Build a response from externally produced samples
    ///
    /// Samples with a non-positive or non-finite frequency, non-finite values,
    /// or a frequency not above the previous kept sample are dropped.
    /// Phases are taken as given (no unwrapping).
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = FrequencySample>,
    {
        let mut omega: Vec<f64> = Vec::new();
        let mut magnitude_db = Vec::new();
        let mut phase_deg = Vec::new();
        let mut dropped = 0usize;

        for sample in samples {
            let increasing = omega.last().map_or(true, |&last| sample.omega > last);
            if !sample.is_usable() || !increasing {
                dropped += 1;
                continue;
            }
            omega.push(sample.omega);
            magnitude_db.push(sample.magnitude_db);
            phase_deg.push(sample.phase_deg);
        }

        if dropped > 0 {
            log::warn!("dropped {} unusable samples", dropped);
        }

        Self {
            omega: Array1::from_vec(omega),
            magnitude_db: Array1::from_vec(magnitude_db),
            phase_deg: Array1::from_vec(phase_deg),
            singular: Vec::new(),
        }
    }

    /// Number of samples
    #[inline]
    pub fn len(&self) -> usize {
        self.omega.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.omega.is_empty()
    }

    /// Angular frequencies (rad/s)
    #[inline]
    pub fn omega(&self) -> &Array1<f64> {
        &self.omega
    }

    /// Magnitudes (dB)
    #[inline]
    pub fn magnitude_db(&self) -> &Array1<f64> {
        &self.magnitude_db
    }

    /// Unwrapped phases (degrees)
    #[inline]
    pub fn phase_deg(&self) -> &Array1<f64> {
        &self.phase_deg
    }

    /// Frequencies at which the transfer function was singular
    #[inline]
    pub fn singular_frequencies(&self) -> &[f64] {
        &self.singular
    }

    /// Sample at `index`
    pub fn sample(&self, index: usize) -> Option<FrequencySample> {
        if index >= self.len() {
            return None;
        }
        Some(FrequencySample::new(
            self.omega[index],
            self.magnitude_db[index],
            self.phase_deg[index],
        ))
    }

    /// Iterate over samples in frequency order
    pub fn samples(&self) -> impl Iterator<Item = FrequencySample> + '_ {
        self.omega
            .iter()
            .zip(self.magnitude_db.iter())
            .zip(self.phase_deg.iter())
            .map(|((&w, &m), &p)| FrequencySample::new(w, m, p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_order_lowpass_at_corner() {
        let tf = TransferFunction::from_coefficients(&[1.0], &[1.0, 1.0]);
        let freq = Frequency::from_omega(vec![1.0]).unwrap();
        let response = FrequencyResponse::compute(&tf, &freq, PolePolicy::Skip);

        let sample = response.sample(0).unwrap();
        assert_relative_eq!(sample.magnitude_db, -3.010299956639812, epsilon = 1e-9);
        assert_relative_eq!(sample.phase_deg, -45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unity_system_is_flat() {
        let tf = TransferFunction::from_coefficients(&[1.0], &[1.0]);
        let response = FrequencyResponse::compute(&tf, &Frequency::default(), PolePolicy::Skip);

        assert_eq!(response.len(), 10_000);
        assert!(response.magnitude_db().iter().all(|&m| m == 0.0));
        assert!(response.phase_deg().iter().all(|&p| p == 0.0));
    }

    #[test]
    fn test_third_order_phase_is_unwrapped() {
        // 1 / (s + 1)^3 goes from 0° towards -270°
        let tf = TransferFunction::from_coefficients(&[1.0], &[1.0, 3.0, 3.0, 1.0]);
        let freq = Frequency::new(0.01, 1000.0, 500, crate::frequency::SweepType::Log).unwrap();
        let response = FrequencyResponse::compute(&tf, &freq, PolePolicy::Skip);

        let phase = response.phase_deg();
        for i in 1..phase.len() {
            assert!((phase[i] - phase[i - 1]).abs() <= 180.0);
            // monotonically decreasing phase lag
            assert!(phase[i] < phase[i - 1]);
        }
        assert!(phase[phase.len() - 1] < -269.0);
    }

    #[test]
    fn test_pole_skipped_by_default() {
        let tf = TransferFunction::from_coefficients(&[1.0], &[1.0, 0.0, 1.0]);
        let freq = Frequency::from_omega(vec![0.5, 1.0, 2.0]).unwrap();
        let response = FrequencyResponse::compute(&tf, &freq, PolePolicy::default());

        assert_eq!(response.len(), 2);
        assert_eq!(response.omega().to_vec(), vec![0.5, 2.0]);
        assert_eq!(response.singular_frequencies(), &[1.0]);
        assert!(response.magnitude_db().iter().all(|m| m.is_finite()));
    }

    #[test]
    fn test_pole_clamped() {
        let tf = TransferFunction::from_coefficients(&[1.0], &[1.0, 0.0, 1.0]);
        let freq = Frequency::from_omega(vec![0.5, 1.0, 2.0]).unwrap();
        let response = FrequencyResponse::compute(&tf, &freq, PolePolicy::clamp());

        assert_eq!(response.len(), 3);
        let pole = response.sample(1).unwrap();
        assert_eq!(pole.magnitude_db, POLE_CLAMP_DB);
        // Holds the phase of the previous sample (0° below resonance)
        assert_relative_eq!(pole.phase_deg, 0.0, epsilon = 1e-12);
        assert_eq!(response.singular_frequencies(), &[1.0]);
    }

    #[test]
    fn test_non_finite_clamp_level_skips() {
        let tf = TransferFunction::from_coefficients(&[1.0], &[1.0, 0.0, 1.0]);
        let freq = Frequency::from_omega(vec![0.5, 1.0, 2.0]).unwrap();

        for db in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let response = FrequencyResponse::compute(&tf, &freq, PolePolicy::Clamp(db));
            assert_eq!(response.len(), 2);
            assert_eq!(response.omega().to_vec(), vec![0.5, 2.0]);
            assert_eq!(response.singular_frequencies(), &[1.0]);
            assert!(response.magnitude_db().iter().all(|m| m.is_finite()));
        }
    }

    #[test]
    fn test_high_degree_magnitude_below_floor() {
        // 1 / s^26: -520 dB per decade, far below the zero floor at 1e6 rad/s
        let mut den = vec![0.0; 27];
        den[0] = 1.0;
        let tf = TransferFunction::from_coefficients(&[1.0], &den);
        let freq = Frequency::from_omega(vec![1e5, 1e6]).unwrap();
        let response = FrequencyResponse::compute(&tf, &freq, PolePolicy::Skip);

        assert_eq!(response.len(), 2);
        assert_relative_eq!(response.magnitude_db()[0], -2600.0, max_relative = 1e-9);
        assert_relative_eq!(response.magnitude_db()[1], -3120.0, max_relative = 1e-9);
    }

    #[test]
    fn test_from_samples_filters_invalid() {
        let response = FrequencyResponse::from_samples(vec![
            FrequencySample::new(-1.0, 0.0, 0.0),
            FrequencySample::new(0.0, 0.0, 0.0),
            FrequencySample::new(1.0, 2.0, -10.0),
            FrequencySample::new(1.0, 3.0, -20.0),
            FrequencySample::new(2.0, f64::NAN, -20.0),
            FrequencySample::new(3.0, -1.0, -30.0),
        ]);

        assert_eq!(response.len(), 2);
        let samples: Vec<FrequencySample> = response.samples().collect();
        assert_eq!(samples[0], FrequencySample::new(1.0, 2.0, -10.0));
        assert_eq!(samples[1], FrequencySample::new(3.0, -1.0, -30.0));
    }

    #[test]
    fn test_sample_out_of_range() {
        let response = FrequencyResponse::default();
        assert!(response.is_empty());
        assert_eq!(response.sample(0), None);
    }
}
