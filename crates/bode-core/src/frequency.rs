//! Frequency module - angular frequency grid for Bode sweeps
//!
//! Frequencies are angular (rad/s), strictly positive and strictly increasing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_NPOINTS, DEFAULT_START_RAD_S, DEFAULT_STOP_RAD_S};

/// Frequency grid construction errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrequencyError {
    #[error("frequency sweep needs at least one point")]
    NoPoints,

    #[error("frequency bounds must be finite and positive, got start={start}, stop={stop}")]
    NonPositiveBound { start: f64, stop: f64 },

    #[error("frequency sweep start {start} must be below stop {stop}")]
    InvalidRange { start: f64, stop: f64 },

    #[error("frequency at index {index} is not finite and positive: {value}")]
    NonPositive { index: usize, value: f64 },

    #[error("frequencies must be strictly increasing (index {index})")]
    NotIncreasing { index: usize },
}

/// Sweep type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepType {
    Linear,
    #[default]
    Log,
}

impl SweepType {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "linear" | "lin" => Some(SweepType::Linear),
            "log" | "logarithmic" => Some(SweepType::Log),
            _ => None,
        }
    }
}

/// A grid of angular frequencies in rad/s
#[derive(Debug, Clone, PartialEq)]
pub struct Frequency {
    /// Angular frequency vector in rad/s
    omega: Vec<f64>,
    /// Sweep type (linear or log)
    sweep_type: SweepType,
}

impl Frequency {
    /// Create a new Frequency grid with start/stop/npoints
    ///
    /// # Arguments
    /// * `start` - Lowest angular frequency (rad/s), must be > 0
    /// * `stop` - Highest angular frequency (rad/s), must be > `start` unless `npoints == 1`
    /// * `npoints` - Number of frequency points
    /// * `sweep_type` - Linear or logarithmic spacing
    ///
    /// # Example
    /// ```
    /// use bode_core::frequency::{Frequency, SweepType};
    /// let freq = Frequency::new(0.1, 100.0, 31, SweepType::Log).unwrap();
    /// assert_eq!(freq.npoints(), 31);
    /// ```
    pub fn new(
        start: f64,
        stop: f64,
        npoints: usize,
        sweep_type: SweepType,
    ) -> Result<Self, FrequencyError> {
        if npoints == 0 {
            return Err(FrequencyError::NoPoints);
        }
        let positive = |x: f64| x.is_finite() && x > 0.0;
        if !positive(start) || !positive(stop) {
            return Err(FrequencyError::NonPositiveBound { start, stop });
        }
        if npoints > 1 && start >= stop {
            return Err(FrequencyError::InvalidRange { start, stop });
        }

        let omega = match sweep_type {
            SweepType::Linear => linear_spaced(start, stop, npoints),
            SweepType::Log => log_spaced(start, stop, npoints),
        };
        // Ranges narrower than the f64 resolution repeat values
        check_increasing(&omega)?;

        Ok(Self { omega, sweep_type })
    }

    /// Create from an explicit angular frequency vector
    ///
    /// The vector must be strictly positive, finite and strictly increasing.
    pub fn from_omega(omega: Vec<f64>) -> Result<Self, FrequencyError> {
        if omega.is_empty() {
            return Err(FrequencyError::NoPoints);
        }
        for (index, &value) in omega.iter().enumerate() {
            if !(value.is_finite() && value > 0.0) {
                return Err(FrequencyError::NonPositive { index, value });
            }
        }
        check_increasing(&omega)?;
        Ok(Self {
            omega,
            sweep_type: SweepType::Linear, // actual spacing unknown
        })
    }

    /// Create from an angular frequency vector, dropping unusable entries
    ///
    /// Non-positive and non-finite values are removed before the ordering check.
    pub fn from_omega_filtered(omega: Vec<f64>) -> Result<Self, FrequencyError> {
        let total = omega.len();
        let kept: Vec<f64> = omega
            .into_iter()
            .filter(|w| w.is_finite() && *w > 0.0)
            .collect();
        if kept.len() < total {
            log::warn!(
                "dropped {} non-positive or non-finite frequencies",
                total - kept.len()
            );
        }
        Self::from_omega(kept)
    }

    /// Get angular frequency vector in rad/s
    #[inline]
    pub fn omega(&self) -> &[f64] {
        &self.omega
    }

    /// Get the number of frequency points
    #[inline]
    pub fn npoints(&self) -> usize {
        self.omega.len()
    }

    /// Get the start frequency in rad/s
    #[inline]
    pub fn start(&self) -> f64 {
        *self.omega.first().unwrap_or(&0.0)
    }

    /// Get the stop frequency in rad/s
    #[inline]
    pub fn stop(&self) -> f64 {
        *self.omega.last().unwrap_or(&0.0)
    }

    /// Get the sweep type
    #[inline]
    pub fn sweep_type(&self) -> SweepType {
        self.sweep_type
    }
}

impl Default for Frequency {
    /// 10,000 log-spaced points from 0.01 to 1e6 rad/s
    fn default() -> Self {
        Self {
            omega: log_spaced(DEFAULT_START_RAD_S, DEFAULT_STOP_RAD_S, DEFAULT_NPOINTS),
            sweep_type: SweepType::Log,
        }
    }
}

fn linear_spaced(start: f64, stop: f64, npoints: usize) -> Vec<f64> {
    if npoints == 1 {
        return vec![start];
    }
    let step = (stop - start) / (npoints - 1) as f64;
    (0..npoints).map(|i| start + i as f64 * step).collect()
}

fn log_spaced(start: f64, stop: f64, npoints: usize) -> Vec<f64> {
    if npoints == 1 {
        return vec![start];
    }
    let log_start = start.log10();
    let log_step = (stop.log10() - log_start) / (npoints - 1) as f64;
    (0..npoints)
        .map(|i| 10.0_f64.powf(log_start + i as f64 * log_step))
        .collect()
}

fn check_increasing(omega: &[f64]) -> Result<(), FrequencyError> {
    match omega.windows(2).position(|w| w[1] <= w[0]) {
        Some(i) => Err(FrequencyError::NotIncreasing { index: i + 1 }),
        None => Ok(()),
    }
}
