//! Analysis configuration
//!
//! All settings have defaults matching the classic Bode view: 10,000 log-spaced
//! points from 0.01 to 1e6 rad/s, poles skipped, crossings reported as intervals.
//! Missing fields in a serialized config fall back to these defaults.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_NPOINTS, DEFAULT_START_RAD_S, DEFAULT_STOP_RAD_S};
use crate::frequency::{Frequency, FrequencyError, SweepType};
use crate::response::PolePolicy;
use crate::stability::{MarginStrategy, StabilityAnalyzer};

/// Frequency sweep settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Lowest angular frequency (rad/s)
    pub start: f64,
    /// Highest angular frequency (rad/s)
    pub stop: f64,
    /// Number of points
    pub npoints: usize,
    /// Point spacing
    pub sweep_type: SweepType,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_RAD_S,
            stop: DEFAULT_STOP_RAD_S,
            npoints: DEFAULT_NPOINTS,
            sweep_type: SweepType::Log,
        }
    }
}

impl SweepConfig {
    /// Set start/stop bounds.
    pub fn with_bounds(mut self, start: f64, stop: f64) -> Self {
        self.start = start;
        self.stop = stop;
        self
    }

    /// Set number of points.
    pub fn with_npoints(mut self, npoints: usize) -> Self {
        self.npoints = npoints;
        self
    }

    /// Set sweep type.
    pub fn with_sweep_type(mut self, sweep_type: SweepType) -> Self {
        self.sweep_type = sweep_type;
        self
    }

    /// Build the frequency grid
    pub fn frequency(&self) -> Result<Frequency, FrequencyError> {
        Frequency::new(self.start, self.stop, self.npoints, self.sweep_type)
    }
}

/// Complete analysis settings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub sweep: SweepConfig,
    pub pole_policy: PolePolicy,
    pub margin_strategy: MarginStrategy,
}

impl AnalysisConfig {
    pub fn with_sweep(mut self, sweep: SweepConfig) -> Self {
        self.sweep = sweep;
        self
    }

    pub fn with_pole_policy(mut self, pole_policy: PolePolicy) -> Self {
        self.pole_policy = pole_policy;
        self
    }

    pub fn with_margin_strategy(mut self, margin_strategy: MarginStrategy) -> Self {
        self.margin_strategy = margin_strategy;
        self
    }

    /// Analyzer using the configured strategy
    pub fn analyzer(&self) -> StabilityAnalyzer {
        StabilityAnalyzer::new(self.margin_strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.sweep.npoints, 10_000);
        assert_eq!(config.sweep.start, 0.01);
        assert_eq!(config.sweep.stop, 1e6);
        assert_eq!(config.sweep.sweep_type, SweepType::Log);
        assert_eq!(config.pole_policy, PolePolicy::Skip);
        assert_eq!(config.margin_strategy, MarginStrategy::Bracket);
    }

    #[test]
    fn test_default_sweep_matches_default_frequency() {
        let freq = SweepConfig::default().frequency().unwrap();
        assert_eq!(freq.npoints(), Frequency::default().npoints());
        assert_eq!(freq.start(), Frequency::default().start());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"sweep": {"npoints": 200}, "margin_strategy": "nearest"}"#)
                .unwrap();
        assert_eq!(config.sweep.npoints, 200);
        assert_eq!(config.sweep.stop, 1e6);
        assert_eq!(config.margin_strategy, MarginStrategy::Nearest);
        assert_eq!(config.pole_policy, PolePolicy::Skip);
    }

    #[test]
    fn test_pole_policy_json() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"pole_policy": {"clamp": 250.0}}"#).unwrap();
        assert_eq!(config.pole_policy, PolePolicy::Clamp(250.0));

        let skip: PolePolicy = serde_json::from_str(r#""skip""#).unwrap();
        assert_eq!(skip, PolePolicy::Skip);
    }

    #[test]
    fn test_invalid_sweep_is_reported() {
        let sweep = SweepConfig::default().with_bounds(0.0, 10.0);
        assert!(sweep.frequency().is_err());
    }

    #[test]
    fn test_builders() {
        let config = AnalysisConfig::default()
            .with_sweep(SweepConfig::default().with_npoints(50).with_sweep_type(SweepType::Linear))
            .with_pole_policy(PolePolicy::clamp())
            .with_margin_strategy(MarginStrategy::Nearest);
        assert_eq!(config.sweep.npoints, 50);
        assert_eq!(config.analyzer().strategy(), MarginStrategy::Nearest);
    }
}
