//! Stability module - gain and phase margins from a sampled Bode trace
//!
//! Crossovers are detected in a single pass; no interpolation is performed.

mod analyzer;
mod report;

pub use analyzer::{MarginStrategy, StabilityAnalyzer};
pub use report::{Margin, StabilityReport};
