//! Text and JSON rendering of an analysis result.

use anyhow::{Context, Result};
use bode_core::config::AnalysisConfig;
use bode_core::polynomial::ParsedPolynomial;
use bode_core::response::{FrequencySample, PolePolicy};
use bode_core::stability::StabilityReport;
use bode_core::BodeAnalysis;
use serde::Serialize;

/// Decimal places for margins and frequencies in text output
const PRECISION: usize = 6;

#[derive(Serialize)]
struct JsonOutput<'a> {
    numerator: &'a ParsedPolynomial,
    denominator: &'a ParsedPolynomial,
    divider: &'a str,
    config: &'a AnalysisConfig,
    report: &'a StabilityReport,
    singular_frequencies: &'a [f64],
    #[serde(skip_serializing_if = "Option::is_none")]
    samples: Option<Vec<FrequencySample>>,
}

pub fn to_json(analysis: &BodeAnalysis, config: &AnalysisConfig, trace: bool) -> Result<String> {
    let output = JsonOutput {
        numerator: &analysis.numerator,
        denominator: &analysis.denominator,
        divider: &analysis.divider,
        config,
        report: &analysis.report,
        singular_frequencies: analysis.response.singular_frequencies(),
        samples: trace.then(|| analysis.response.samples().collect()),
    };
    serde_json::to_string_pretty(&output).context("Failed to serialize analysis")
}

pub fn print_text(analysis: &BodeAnalysis, policy: PolePolicy, trace: bool) {
    println!("{}", analysis.numerator.display);
    println!("{}", analysis.divider);
    println!("{}", analysis.denominator.display);
    println!();

    for (field, parsed) in [
        ("numerator", &analysis.numerator),
        ("denominator", &analysis.denominator),
    ] {
        for token in &parsed.skipped {
            eprintln!(
                "Warning: {} ignored '{}' at byte {} ({:?})",
                field, token.text, token.offset, token.reason
            );
        }
    }

    if let Some(warning) = singular_warning(analysis.response.singular_frequencies().len(), policy)
    {
        eprintln!("Warning: {}", warning);
    }

    let report = &analysis.report;
    println!("Stability Margins");
    println!("==========================================");
    for (label, margin) in [
        ("Gain Margin (dB):", report.gain_margin),
        ("Phase Margin (deg):", report.phase_margin),
        ("Phase Crossover Frequency (rad/s):", report.phase_crossover_frequency),
        ("Gain Crossover Frequency (rad/s):", report.gain_crossover_frequency),
    ] {
        println!("  {:<36}{:.*}", label, PRECISION, margin);
    }

    if trace {
        println!();
        println!("omega (rad/s)\tmagnitude (dB)\tphase (deg)");
        for sample in analysis.response.samples() {
            println!(
                "{:.6e}\t{:.6}\t{:.6}",
                sample.omega, sample.magnitude_db, sample.phase_deg
            );
        }
    }
}

/// What happened to frequency points that landed on a pole
fn singular_warning(count: usize, policy: PolePolicy) -> Option<String> {
    if count == 0 {
        return None;
    }
    let action = match policy {
        PolePolicy::Clamp(db) if db.is_finite() => format!("were clamped to {} dB", db),
        _ => "were skipped".to_string(),
    };
    Some(format!("{} frequency point(s) on a pole {}", count, action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bode_core::config::SweepConfig;

    #[test]
    fn test_json_output() {
        let config = AnalysisConfig::default().with_sweep(SweepConfig::default().with_npoints(20));
        let analysis = BodeAnalysis::run("K=10", "1 3 3 1", &config).unwrap();

        let json = to_json(&analysis, &config, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["numerator"]["display"], "10");
        assert_eq!(value["denominator"]["display"], "1S^3 + 3S^2 + 3S + 1");
        assert_eq!(value["numerator"]["skipped"][0]["reason"], "not_a_number");
        assert!(value.get("samples").is_none());

        let json = to_json(&analysis, &config, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["samples"].as_array().unwrap().len(), 20);
    }

    #[test]
    fn test_singular_warning_follows_policy() {
        assert_eq!(singular_warning(0, PolePolicy::Skip), None);
        assert_eq!(
            singular_warning(2, PolePolicy::Skip).unwrap(),
            "2 frequency point(s) on a pole were skipped"
        );
        assert_eq!(
            singular_warning(1, PolePolicy::Clamp(400.0)).unwrap(),
            "1 frequency point(s) on a pole were clamped to 400 dB"
        );
    }
}
