//! Transfer function H(s) = N(s) / D(s)
//!
//! Evaluation is done on the imaginary axis, s = jω.

use num_complex::Complex64;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::frequency::Frequency;
use crate::polynomial::Polynomial;

/// Value of H(jω) at one frequency
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    /// Finite complex response
    Finite(Complex64),
    /// Denominator is exactly zero, or N(jω) / D(jω) is not finite
    Singular,
}

impl Evaluation {
    /// The finite response, if any
    pub fn finite(self) -> Option<Complex64> {
        match self {
            Evaluation::Finite(h) => Some(h),
            Evaluation::Singular => None,
        }
    }

    #[inline]
    pub fn is_singular(&self) -> bool {
        matches!(self, Evaluation::Singular)
    }
}

/// Rational transfer function with real coefficients
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransferFunction {
    numerator: Polynomial,
    denominator: Polynomial,
}

impl TransferFunction {
    /// Create a transfer function from numerator and denominator polynomials
    pub fn new(numerator: Polynomial, denominator: Polynomial) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Create from coefficient slices, highest power first
    ///
    /// # Example
    /// ```
    /// use bode_core::TransferFunction;
    /// // 1 / (s + 1)
    /// let tf = TransferFunction::from_coefficients(&[1.0], &[1.0, 1.0]);
    /// let h = tf.evaluate(1.0).finite().unwrap();
    /// assert!((h.arg().to_degrees() + 45.0).abs() < 1e-12);
    /// ```
    pub fn from_coefficients(numerator: &[f64], denominator: &[f64]) -> Self {
        Self::new(
            Polynomial::new(numerator.to_vec()),
            Polynomial::new(denominator.to_vec()),
        )
    }

    #[inline]
    pub fn numerator(&self) -> &Polynomial {
        &self.numerator
    }

    #[inline]
    pub fn denominator(&self) -> &Polynomial {
        &self.denominator
    }

    /// Evaluate H(jω) at one angular frequency
    pub fn evaluate(&self, omega: f64) -> Evaluation {
        let s = Complex64::new(0.0, omega);
        let num = self.numerator.evaluate(s);
        let den = self.denominator.evaluate(s);

        if den.re == 0.0 && den.im == 0.0 {
            return Evaluation::Singular;
        }
        let h = scaled_div(num, den);
        if h.re.is_finite() && h.im.is_finite() {
            Evaluation::Finite(h)
        } else {
            Evaluation::Singular
        }
    }

    /// Evaluate H(jω) over a frequency grid, order preserved
    pub fn response(&self, frequency: &Frequency) -> Vec<Evaluation> {
        #[cfg(feature = "parallel")]
        {
            frequency
                .omega()
                .par_iter()
                .map(|&w| self.evaluate(w))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            frequency.omega().iter().map(|&w| self.evaluate(w)).collect()
        }
    }
}

/// Complex division without forming |den|², which overflows for |den| > ~1e154
///
/// Smith's algorithm: scale by the larger component of the denominator.
fn scaled_div(num: Complex64, den: Complex64) -> Complex64 {
    let (a, b, c, d) = (num.re, num.im, den.re, den.im);
    if c.abs() >= d.abs() {
        let r = d / c;
        let t = c + d * r;
        Complex64::new((a + b * r) / t, (b - a * r) / t)
    } else {
        let r = c / d;
        let t = c * r + d;
        Complex64::new((a * r + b) / t, (b * r - a) / t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_order_lowpass_at_corner() {
        let tf = TransferFunction::from_coefficients(&[1.0], &[1.0, 1.0]);
        let h = tf.evaluate(1.0).finite().unwrap();

        // 1 / (1 + j) = 0.5 - 0.5j
        assert_relative_eq!(h.re, 0.5, epsilon = 1e-12);
        assert_relative_eq!(h.im, -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_unity_system() {
        let tf = TransferFunction::from_coefficients(&[1.0], &[1.0]);
        for w in [0.01, 1.0, 1e6] {
            assert_eq!(tf.evaluate(w), Evaluation::Finite(Complex64::new(1.0, 0.0)));
        }
    }

    #[test]
    fn test_pole_on_imaginary_axis_is_singular() {
        // 1 / (s^2 + 1) has poles at s = ±j
        let tf = TransferFunction::from_coefficients(&[1.0], &[1.0, 0.0, 1.0]);
        assert!(tf.evaluate(1.0).is_singular());
        assert!(!tf.evaluate(2.0).is_singular());
    }

    #[test]
    fn test_zero_denominator_polynomial() {
        let tf = TransferFunction::from_coefficients(&[1.0], &[0.0]);
        assert!(tf.evaluate(3.0).is_singular());
    }

    #[test]
    fn test_integrator() {
        // 1 / s at ω = 2 -> -0.5j
        let tf = TransferFunction::from_coefficients(&[1.0], &[1.0, 0.0]);
        let h = tf.evaluate(2.0).finite().unwrap();
        assert_relative_eq!(h.re, 0.0, epsilon = 1e-12);
        assert_relative_eq!(h.im, -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_scaled_division_matches_naive() {
        let num = Complex64::new(3.0, -2.0);
        for den in [
            Complex64::new(1.0, 1.0),
            Complex64::new(0.5, -4.0),
            Complex64::new(-7.0, 0.25),
        ] {
            let h = scaled_div(num, den);
            let expected = num / den;
            assert_relative_eq!(h.re, expected.re, epsilon = 1e-12);
            assert_relative_eq!(h.im, expected.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_high_degree_denominator_does_not_overflow() {
        // 1 / s^26 at ω = 1e6: |D| = 1e156, so |D|² would overflow
        let mut den = vec![0.0; 27];
        den[0] = 1.0;
        let tf = TransferFunction::from_coefficients(&[1.0], &den);
        let h = tf.evaluate(1e6).finite().unwrap();
        assert_relative_eq!(h.norm().log10(), -156.0, epsilon = 1e-9);

        // s^26 / (s^26 + 1) at ω = 1e6 is not a pole
        let mut num = vec![0.0; 27];
        num[0] = 1.0;
        den[26] = 1.0;
        let tf = TransferFunction::from_coefficients(&num, &den);
        let h = tf.evaluate(1e6).finite().unwrap();
        assert_relative_eq!(h.re, 1.0, epsilon = 1e-12);
        assert_relative_eq!(h.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_response_preserves_order() {
        let tf = TransferFunction::from_coefficients(&[1.0], &[1.0, 1.0]);
        let freq = Frequency::from_omega(vec![0.5, 1.0, 2.0]).unwrap();
        let response = tf.response(&freq);

        assert_eq!(response.len(), 3);
        for (eval, &w) in response.iter().zip(freq.omega()) {
            assert_eq!(*eval, tf.evaluate(w));
        }
    }
}
