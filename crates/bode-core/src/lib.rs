//! bode-core: Frequency response and stability margins of transfer functions
//!
//! Turns free-form numerator/denominator text into a Laplace-domain transfer
//! function, samples it along the imaginary axis and reports gain and phase
//! margins.
//!
//! ## Modules
//!
//! - `polynomial` - Coefficient parsing and canonical formatting
//! - `transfer_function` - Rational function evaluation at s = jω
//! - `frequency` - Angular frequency grids
//! - `response` - Magnitude/phase sampling with phase unwrapping
//! - `stability` - Gain/phase crossover detection
//! - `analysis` - End-to-end pipeline from text to report
//! - `config` - Serializable analysis configuration
//! - `math` - dB/degree conversions and phase unwrapping
//!
//! ## Example
//!
//! ```
//! use bode_core::analysis::BodeAnalysis;
//! use bode_core::config::AnalysisConfig;
//!
//! let analysis = BodeAnalysis::run("10", "1 3 3 1", &AnalysisConfig::default()).unwrap();
//! assert_eq!(analysis.denominator.display, "1S^3 + 3S^2 + 3S + 1");
//! assert!(analysis.report.gain_margin.is_defined());
//! ```

pub mod analysis;
pub mod config;
pub mod constants;
pub mod frequency;
pub mod math;
pub mod polynomial;
pub mod response;
pub mod stability;
pub mod transfer_function;

pub use analysis::BodeAnalysis;
pub use frequency::Frequency;
pub use polynomial::Polynomial;
pub use response::{FrequencyResponse, FrequencySample};
pub use stability::{Margin, StabilityAnalyzer, StabilityReport};
pub use transfer_function::TransferFunction;
