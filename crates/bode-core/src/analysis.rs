//! End-to-end analysis: text → coefficients → transfer function → response → report
//!
//! Every run starts from scratch; the result is a plain value that a
//! presentation layer can render without calling back into the core.

use crate::config::AnalysisConfig;
use crate::frequency::FrequencyError;
use crate::polynomial::{divider, parse_coefficients, ParsedPolynomial};
use crate::response::FrequencyResponse;
use crate::stability::StabilityReport;
use crate::transfer_function::TransferFunction;

/// Result of one analysis run
#[derive(Debug, Clone)]
pub struct BodeAnalysis {
    /// Parsed numerator field
    pub numerator: ParsedPolynomial,
    /// Parsed denominator field
    pub denominator: ParsedPolynomial,
    /// Fraction bar as wide as the longer display string
    pub divider: String,
    pub transfer_function: TransferFunction,
    pub response: FrequencyResponse,
    pub report: StabilityReport,
}

impl BodeAnalysis {
    /// Run the full pipeline on numerator/denominator text
    ///
    /// Only an invalid sweep configuration can fail; unparseable text falls
    /// back to the constant polynomial `1`.
    pub fn run(
        numerator: &str,
        denominator: &str,
        config: &AnalysisConfig,
    ) -> Result<Self, FrequencyError> {
        let frequency = config.sweep.frequency()?;

        let numerator = parse_coefficients(numerator);
        let denominator = parse_coefficients(denominator);
        let divider = divider(&numerator.display, &denominator.display);

        let transfer_function = TransferFunction::new(
            numerator.polynomial.clone(),
            denominator.polynomial.clone(),
        );
        let response = FrequencyResponse::compute(&transfer_function, &frequency, config.pole_policy);
        let report = config.analyzer().analyze(&response);

        log::debug!(
            "analyzed ({}) / ({}) over {} points",
            numerator.display,
            denominator.display,
            response.len()
        );

        Ok(Self {
            numerator,
            denominator,
            divider,
            transfer_function,
            response,
            report,
        })
    }
}
