//! Margin analysis on externally produced traces

use bode_core::response::{FrequencyResponse, FrequencySample};
use bode_core::stability::{Margin, MarginStrategy, StabilityAnalyzer};

fn response(points: &[(f64, f64, f64)]) -> FrequencyResponse {
    FrequencyResponse::from_samples(
        points
            .iter()
            .map(|&(w, m, p)| FrequencySample::new(w, m, p)),
    )
}

#[test]
fn test_exact_crossings_at_sampled_points() {
    let trace = response(&[
        (0.1, 12.0, -95.0),
        (0.5, 4.0, -130.0),
        (1.0, 0.0, -150.0),
        (2.0, -6.0, -180.0),
        (4.0, -15.0, -210.0),
    ]);
    let report = StabilityAnalyzer::default().analyze(&trace);

    assert_eq!(report.gain_crossover_frequency, Margin::Value(1.0));
    assert_eq!(report.phase_margin, Margin::Value(30.0));
    assert_eq!(report.phase_crossover_frequency, Margin::Value(2.0));
    assert_eq!(report.gain_margin, Margin::Value(-6.0));
    assert_eq!(report.gain_margin.to_string(), "-6");
}

#[test]
fn test_fewer_than_two_samples() {
    let analyzer = StabilityAnalyzer::default();
    assert!(analyzer.analyze(&FrequencyResponse::default()).is_undefined());
    assert!(analyzer
        .analyze(&response(&[(1.0, 0.0, -180.0)]))
        .is_undefined());
}

#[test]
fn test_unusable_samples_are_dropped_before_analysis() {
    let trace = response(&[
        (1.0, 3.0, -170.0),
        (f64::NAN, 0.0, -180.0),
        (0.5, 0.0, -180.0),
        (2.0, -3.0, -190.0),
    ]);
    assert_eq!(trace.len(), 2);

    let report = StabilityAnalyzer::default().analyze(&trace);
    assert_eq!(report.gain_crossover_frequency, Margin::Interval(1.0, 2.0));
    assert_eq!(report.phase_margin, Margin::Interval(10.0, -10.0));
    assert_eq!(report.phase_crossover_frequency, Margin::Interval(1.0, 2.0));
    assert_eq!(report.gain_margin.to_string(), "3 to -3");
}

#[test]
fn test_strategies_agree_on_exact_hits() {
    let trace = response(&[(1.0, 5.0, -100.0), (2.0, 0.0, -180.0), (3.0, -5.0, -200.0)]);

    let bracket = StabilityAnalyzer::new(MarginStrategy::Bracket).analyze(&trace);
    let nearest = StabilityAnalyzer::new(MarginStrategy::Nearest).analyze(&trace);
    assert_eq!(bracket, nearest);
    assert_eq!(bracket.phase_margin, Margin::Value(0.0));
    assert_eq!(bracket.gain_margin, Margin::Value(0.0));
}
