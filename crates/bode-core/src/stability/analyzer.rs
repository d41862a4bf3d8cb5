//! Crossover detection
//!
//! A single left-to-right pass over the samples looks for two independent
//! events, each reported at most once (first found wins):
//!
//! - gain crossover: magnitude reaches 0 dB; phase margin = 180° + phase
//! - phase crossover: phase reaches -180°; gain margin = magnitude
//!
//! The first sample only serves as the left neighbour of the second. From the
//! second sample on, a sample exactly at the level gives a single value and a
//! crossing between it and its predecessor is resolved by the `MarginStrategy`.

use serde::{Deserialize, Serialize};

use super::report::{Margin, StabilityReport};
use crate::constants::{GAIN_CROSSOVER_DB, PHASE_CROSSOVER_DEG, PHASE_MARGIN_REFERENCE_DEG};
use crate::response::{FrequencyResponse, FrequencySample};

/// How a crossing between two samples is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginStrategy {
    /// Interval spanned by the two bracketing samples
    #[default]
    Bracket,
    /// Value of the bracketing sample closest to the crossover level
    Nearest,
}

impl MarginStrategy {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bracket" | "interval" => Some(MarginStrategy::Bracket),
            "nearest" => Some(MarginStrategy::Nearest),
            _ => None,
        }
    }
}

/// Gain and phase margin analyzer
#[derive(Debug, Clone, Copy, Default)]
pub struct StabilityAnalyzer {
    strategy: MarginStrategy,
}

impl StabilityAnalyzer {
    pub fn new(strategy: MarginStrategy) -> Self {
        Self { strategy }
    }

    #[inline]
    pub fn strategy(&self) -> MarginStrategy {
        self.strategy
    }

    /// Analyze a sampled response
    pub fn analyze(&self, response: &FrequencyResponse) -> StabilityReport {
        let samples: Vec<FrequencySample> = response.samples().collect();
        self.analyze_samples(&samples)
    }

    /// Analyze samples ordered by increasing frequency
    ///
    /// Fewer than two samples yield an all-undefined report.
    pub fn analyze_samples(&self, samples: &[FrequencySample]) -> StabilityReport {
        let mut report = StabilityReport::default();
        if samples.len() < 2 {
            log::debug!("{} sample(s), margins undefined", samples.len());
            return report;
        }

        let mut gain_found = false;
        let mut phase_found = false;

        for pair in samples.windows(2) {
            let (prev, curr) = (&pair[0], &pair[1]);

            if !gain_found {
                if curr.magnitude_db == GAIN_CROSSOVER_DB {
                    report.phase_margin = Margin::Value(phase_margin(curr));
                    report.gain_crossover_frequency = Margin::Value(curr.omega);
                    gain_found = true;
                } else {
                    let a = prev.magnitude_db - GAIN_CROSSOVER_DB;
                    let b = curr.magnitude_db - GAIN_CROSSOVER_DB;
                    if a * b < 0.0 {
                        let (margin, omega) = self.resolve(prev, curr, a, b, phase_margin);
                        report.phase_margin = margin;
                        report.gain_crossover_frequency = omega;
                        gain_found = true;
                    }
                }
                if gain_found {
                    log::debug!(
                        "gain crossover at {} rad/s, phase margin {}",
                        report.gain_crossover_frequency,
                        report.phase_margin
                    );
                }
            }

            if !phase_found {
                if curr.phase_deg == PHASE_CROSSOVER_DEG {
                    report.gain_margin = Margin::Value(curr.magnitude_db);
                    report.phase_crossover_frequency = Margin::Value(curr.omega);
                    phase_found = true;
                } else {
                    let a = prev.phase_deg - PHASE_CROSSOVER_DEG;
                    let b = curr.phase_deg - PHASE_CROSSOVER_DEG;
                    if (a < 0.0 && b > 0.0) || (a > 0.0 && b < 0.0) {
                        let (margin, omega) =
                            self.resolve(prev, curr, a, b, |s| s.magnitude_db);
                        report.gain_margin = margin;
                        report.phase_crossover_frequency = omega;
                        phase_found = true;
                    }
                }
                if phase_found {
                    log::debug!(
                        "phase crossover at {} rad/s, gain margin {} dB",
                        report.phase_crossover_frequency,
                        report.gain_margin
                    );
                }
            }

            if gain_found && phase_found {
                break;
            }
        }

        report
    }

    /// Margin and frequency for a crossing between `prev` and `curr`
    ///
    /// `a` and `b` are the signed distances of both samples to the crossover level.
    fn resolve(
        &self,
        prev: &FrequencySample,
        curr: &FrequencySample,
        a: f64,
        b: f64,
        margin: impl Fn(&FrequencySample) -> f64,
    ) -> (Margin, Margin) {
        match self.strategy {
            MarginStrategy::Bracket => (
                Margin::Interval(margin(prev), margin(curr)),
                Margin::Interval(prev.omega, curr.omega),
            ),
            MarginStrategy::Nearest => {
                let nearest = if a.abs() <= b.abs() { prev } else { curr };
                (Margin::Value(margin(nearest)), Margin::Value(nearest.omega))
            }
        }
    }
}

fn phase_margin(sample: &FrequencySample) -> f64 {
    PHASE_MARGIN_REFERENCE_DEG + sample.phase_deg
}
