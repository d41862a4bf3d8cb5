//! Polynomial module - coefficients of a polynomial in the Laplace variable
//!
//! Coefficients are stored most-significant power first: index 0 multiplies
//! s^degree and the last index multiplies s^0.

pub mod format;
pub mod parser;

use std::fmt;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

pub use format::{divider, format_coefficients};
pub use parser::{parse_coefficients, ParsedPolynomial, SkipReason, SkippedToken};

/// A real-coefficient polynomial, never empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Create a polynomial from coefficients, highest power first
    ///
    /// An empty coefficient list becomes the constant polynomial `1`.
    pub fn new(coefficients: Vec<f64>) -> Self {
        if coefficients.is_empty() {
            return Self::one();
        }
        Self { coefficients }
    }

    /// The constant polynomial `1`
    pub fn one() -> Self {
        Self {
            coefficients: vec![1.0],
        }
    }

    /// Coefficients, highest power first
    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Degree (number of coefficients minus one)
    #[inline]
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Evaluate at a complex point
    ///
    /// Accumulates `coefficient[i] * s^(degree - i)` term by term.
    pub fn evaluate(&self, s: Complex64) -> Complex64 {
        let degree = self.degree();
        self.coefficients
            .iter()
            .enumerate()
            .fold(Complex64::new(0.0, 0.0), |acc, (i, &c)| {
                acc + c * s.powu((degree - i) as u32)
            })
    }
}

impl Default for Polynomial {
    fn default() -> Self {
        Self::one()
    }
}

impl From<Vec<f64>> for Polynomial {
    fn from(coefficients: Vec<f64>) -> Self {
        Self::new(coefficients)
    }
}

impl From<Polynomial> for Vec<f64> {
    fn from(p: Polynomial) -> Self {
        p.coefficients
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_coefficients(&self.coefficients))
    }
}
