//! Coefficient parser
//!
//! Extracts signed decimal numbers from free-form text. The parser never
//! fails: anything that is not a number is reported in `skipped` and, when no
//! number is found at all, the result is the constant polynomial `1`.
//!
//! Numbers are an optional sign (whitespace allowed before the digits), digits,
//! and an optional fractional part. A comma is a decimal separator only when it
//! is the single comma of its numeric run and that run has no dot, so
//! `"1,5 2,25"` reads as `[1.5, 2.25]` while `"1,2,3"` reads as `[1, 2, 3]`.

use serde::Serialize;

use super::format::format_coefficients;
use super::Polynomial;

/// Why a piece of input was not turned into a coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Text containing no digits
    NotANumber,
    /// Numeric literal whose value is not a finite f64
    OutOfRange,
}

/// A fragment of the input that did not become a coefficient
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedToken {
    /// The fragment as it appeared in the input
    pub text: String,
    /// Byte offset of the fragment in the input
    pub offset: usize,
    pub reason: SkipReason,
}

/// Result of parsing one coefficient field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedPolynomial {
    /// Parsed polynomial (`1` when nothing parsed)
    pub polynomial: Polynomial,
    /// Canonical display string, e.g. `1S^2 + 2S + 3`
    pub display: String,
    /// Diagnostics for discarded input
    pub skipped: Vec<SkippedToken>,
    /// True when no number was found and the `1` fallback was used
    pub defaulted: bool,
}

impl ParsedPolynomial {
    /// Coefficients, highest power first
    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        self.polynomial.coefficients()
    }
}

/// Parse free text into polynomial coefficients
///
/// # Example
/// ```
/// use bode_core::polynomial::parse_coefficients;
///
/// let parsed = parse_coefficients("1,2,3");
/// assert_eq!(parsed.coefficients(), &[1.0, 2.0, 3.0]);
/// assert_eq!(parsed.display, "1S^2 + 2S + 3");
/// ```
pub fn parse_coefficients(text: &str) -> ParsedPolynomial {
    let (values, skipped) = Scanner::new(text).run();

    let defaulted = values.is_empty();
    let polynomial = Polynomial::new(values);
    let display = format_coefficients(polynomial.coefficients());

    log::debug!(
        "parsed {:?} into {} coefficient(s), {} skipped token(s)",
        text,
        polynomial.coefficients().len(),
        skipped.len()
    );

    ParsedPolynomial {
        polynomial,
        display,
        skipped,
        defaulted,
    }
}

/// Characters that separate numbers without being reported as noise
fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | ';' | '.' | '(' | ')' | '[' | ']' | '{' | '}')
}

fn is_sign(c: char) -> bool {
    c == '+' || c == '-'
}

/// Mark the commas that act as decimal separators
///
/// A numeric run is a maximal sequence of digits, dots and commas.
fn decimal_commas(chars: &[(usize, char)]) -> Vec<bool> {
    let in_run = |c: char| c.is_ascii_digit() || c == '.' || c == ',';
    let mut flags = vec![false; chars.len()];

    let mut i = 0;
    while i < chars.len() {
        if !in_run(chars[i].1) {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && in_run(chars[i].1) {
            i += 1;
        }
        let run = &chars[start..i];
        let commas = run.iter().filter(|(_, c)| *c == ',').count();
        let dots = run.iter().filter(|(_, c)| *c == '.').count();
        if commas != 1 || dots != 0 {
            continue;
        }
        if let Some(k) = run.iter().position(|(_, c)| *c == ',') {
            // Only digits surround it inside such a run
            if k > 0 && k + 1 < run.len() {
                flags[start + k] = true;
            }
        }
    }

    flags
}

/// Internal scanner state
struct Scanner<'a> {
    text: &'a str,
    chars: Vec<(usize, char)>,
    decimal_comma: Vec<bool>,
    pos: usize,
    values: Vec<f64>,
    skipped: Vec<SkippedToken>,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let decimal_comma = decimal_commas(&chars);
        Self {
            text,
            chars,
            decimal_comma,
            pos: 0,
            values: Vec::new(),
            skipped: Vec::new(),
        }
    }

    fn run(mut self) -> (Vec<f64>, Vec<SkippedToken>) {
        while let Some(c) = self.char_at(self.pos) {
            if c.is_ascii_digit() {
                self.number(self.pos, None);
            } else if is_sign(c) {
                self.signed_number(c);
            } else if is_separator(c) {
                self.pos += 1;
            } else {
                self.noise();
            }
        }
        (self.values, self.skipped)
    }

    #[inline]
    fn char_at(&self, idx: usize) -> Option<char> {
        self.chars.get(idx).map(|&(_, c)| c)
    }

    fn byte_offset(&self, idx: usize) -> usize {
        self.chars
            .get(idx)
            .map(|&(b, _)| b)
            .unwrap_or(self.text.len())
    }

    /// Sign at `pos`: attach it to the next number if only whitespace follows
    fn signed_number(&mut self, sign: char) {
        let mut next = self.pos + 1;
        while self.char_at(next).is_some_and(char::is_whitespace) {
            next += 1;
        }
        if self.char_at(next).is_some_and(|d| d.is_ascii_digit()) {
            let start = self.pos;
            self.pos = next;
            self.number(start, Some(sign));
        } else {
            // A dangling sign is a separator
            self.pos += 1;
        }
    }

    /// Number whose first digit is at `pos`; `start` includes the sign if any
    fn number(&mut self, start: usize, sign: Option<char>) {
        let mut literal = String::new();
        if sign == Some('-') {
            literal.push('-');
        }
        self.take_digits(&mut literal);

        if let Some(sep) = self.char_at(self.pos) {
            let is_decimal = sep == '.' || (sep == ',' && self.decimal_comma[self.pos]);
            if is_decimal && self.char_at(self.pos + 1).is_some_and(|d| d.is_ascii_digit()) {
                literal.push('.');
                self.pos += 1;
                self.take_digits(&mut literal);
            }
        }

        match literal.parse::<f64>() {
            Ok(value) if value.is_finite() => self.values.push(value),
            _ => self.skip(start, SkipReason::OutOfRange),
        }
    }

    fn take_digits(&mut self, literal: &mut String) {
        while let Some(d) = self.char_at(self.pos).filter(char::is_ascii_digit) {
            literal.push(d);
            self.pos += 1;
        }
    }

    /// Run of characters that are neither digits, signs nor separators
    fn noise(&mut self) {
        let start = self.pos;
        while let Some(c) = self.char_at(self.pos) {
            if c.is_ascii_digit() || is_sign(c) || is_separator(c) {
                break;
            }
            self.pos += 1;
        }
        self.skip(start, SkipReason::NotANumber);
    }

    fn skip(&mut self, start: usize, reason: SkipReason) {
        let from = self.byte_offset(start);
        let to = self.byte_offset(self.pos);
        let text = self.text[from..to].to_string();
        log::debug!("skipping {:?} at byte {}: {:?}", text, from, reason);
        self.skipped.push(SkippedToken {
            text,
            offset: from,
            reason,
        });
    }
}
