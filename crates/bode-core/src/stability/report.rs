//! Stability report values

use std::fmt;

use serde::{Deserialize, Serialize};

/// A margin or crossover frequency
///
/// A crossing that falls between two samples is reported as the interval
/// spanned by the bracketing samples, in frequency order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Margin {
    #[default]
    Undefined,
    Value(f64),
    Interval(f64, f64),
}

impl Margin {
    #[inline]
    pub fn is_defined(&self) -> bool {
        !matches!(self, Margin::Undefined)
    }

    /// The single value, if the margin is exact
    pub fn value(&self) -> Option<f64> {
        match *self {
            Margin::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Both endpoints, if the margin is an interval
    pub fn interval(&self) -> Option<(f64, f64)> {
        match *self {
            Margin::Interval(a, b) => Some((a, b)),
            _ => None,
        }
    }

    /// True if `x` equals the value or lies between the interval endpoints
    pub fn contains(&self, x: f64) -> bool {
        match *self {
            Margin::Undefined => false,
            Margin::Value(v) => v == x,
            Margin::Interval(a, b) => a.min(b) <= x && x <= a.max(b),
        }
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    match f.precision() {
        Some(p) => write!(f, "{:.*}", p, v),
        None => write!(f, "{}", v),
    }
}

/// Honors an explicit precision, e.g. `{:.2}`
impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Margin::Undefined => f.write_str("-"),
            Margin::Value(v) => write_number(f, v),
            Margin::Interval(a, b) => {
                write_number(f, a)?;
                f.write_str(" to ")?;
                write_number(f, b)
            }
        }
    }
}

/// Gain/phase margins and their crossover frequencies
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StabilityReport {
    /// Magnitude (dB) at the -180° phase crossover
    pub gain_margin: Margin,
    /// 180° + phase at the 0 dB gain crossover
    pub phase_margin: Margin,
    /// Frequency (rad/s) where the phase crosses -180°
    pub phase_crossover_frequency: Margin,
    /// Frequency (rad/s) where the magnitude crosses 0 dB
    pub gain_crossover_frequency: Margin,
}

impl StabilityReport {
    /// True if no crossover was found
    pub fn is_undefined(&self) -> bool {
        !(self.gain_margin.is_defined()
            || self.phase_margin.is_defined()
            || self.phase_crossover_frequency.is_defined()
            || self.gain_crossover_frequency.is_defined())
    }
}
