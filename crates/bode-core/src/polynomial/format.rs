//! Canonical polynomial strings
//!
//! `[1, -2.5, 4]` renders as `1S^2 - 2.5S + 4`.

use crate::constants::{DIVIDER_CHAR, VARIABLE};

/// Render coefficients (highest power first) as a canonical polynomial string
pub fn format_coefficients(coefficients: &[f64]) -> String {
    let mut result = String::new();
    let mut power = coefficients.len();

    for &value in coefficients {
        power -= 1;

        if result.is_empty() {
            if value < 0.0 {
                result.push('-');
            }
        } else if value < 0.0 {
            result.push_str(" - ");
        } else {
            result.push_str(" + ");
        }

        // Sign is already handled above
        result.push_str(&value.abs().to_string());

        match power {
            0 => {}
            1 => result.push_str(VARIABLE),
            p => {
                result.push_str(VARIABLE);
                result.push('^');
                result.push_str(&p.to_string());
            }
        }
    }

    result
}

/// Fraction bar as wide as the longer of the two strings
pub fn divider(numerator: &str, denominator: &str) -> String {
    let width = numerator.chars().count().max(denominator.chars().count());
    std::iter::repeat(DIVIDER_CHAR).take(width).collect()
}
