//! Parsing of the numeric text fields: scale factors and the center of dilation.
//!
//! Scale factors accept either a plain number (`1.5`) or a fraction of two unsigned
//! decimals (`3/2`). Plain numbers are read the way a lenient number field reads them:
//! the longest numeric prefix counts, so `2x` is 2 and `-3/2` is -3.

use crate::types::Point;
use thiserror::Error;

/// Invalid text in one of the numeric input fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A fraction was entered with a zero denominator
    #[error("Denominator cannot be zero.")]
    ZeroDenominator {
        /// The offending input text
        input: String,
    },
    /// A scale factor was not a number, or was zero
    #[error("Please enter a valid non-zero number or fraction (e.g., 3/2).")]
    InvalidScale {
        /// The offending input text
        input: String,
    },
    /// A center coordinate was not a number
    #[error("Please enter valid numbers for center of dilation.")]
    InvalidCenter,
}

/// Parses a scale factor. Empty input is the neutral scale 1.
///
/// Returns an error for a zero denominator, for text that is not a number, and for a
/// value that is zero or too large to represent.
pub fn parse_fraction(input: &str) -> Result<f64, InputError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(1.0);
    }

    if let Some((numerator, denominator)) = split_fraction(input) {
        if denominator == 0.0 {
            return Err(InputError::ZeroDenominator {
                input: input.to_string(),
            });
        }
        let value = numerator / denominator;
        if value == 0.0 || !value.is_finite() {
            return Err(InputError::InvalidScale {
                input: input.to_string(),
            });
        }
        return Ok(value);
    }

    match parse_leading_number(input) {
        Some(value) if value != 0.0 && value.is_finite() => Ok(value),
        _ => Err(InputError::InvalidScale {
            input: input.to_string(),
        }),
    }
}

/// Parses the two center-of-dilation fields.
pub fn parse_center(x: &str, y: &str) -> Result<Point, InputError> {
    match (parse_leading_number(x.trim()), parse_leading_number(y.trim())) {
        (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Ok(Point::new(x, y)),
        _ => Err(InputError::InvalidCenter),
    }
}

/// A scale factor as typed, together with the value it resolves to.
///
/// Invalid text resolves to the neutral scale 1 and keeps the error, so callers can
/// both report the problem and carry on with a safe value.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleFactor {
    /// Trimmed input text
    pub text: String,
    /// Resolved value (1 when the text is empty or invalid)
    pub value: f64,
    /// Parse failure, if any
    pub error: Option<InputError>,
}

impl ScaleFactor {
    /// Parses scale text, falling back to 1 on failure.
    pub fn parse(input: &str) -> Self {
        let text = input.trim().to_string();
        match parse_fraction(&text) {
            Ok(value) => Self {
                text,
                value,
                error: None,
            },
            Err(err) => Self {
                text,
                value: 1.0,
                error: Some(err),
            },
        }
    }

    /// Returns true if nothing was typed.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    /// The text to show in the log: the raw input if present, else the resolved value.
    pub fn label(&self) -> String {
        if self.text.is_empty() {
            self.value.to_string()
        } else {
            self.text.clone()
        }
    }
}

/// Splits `a/b` where both sides are unsigned decimals (`12`, `1.5`, `3.`).
fn split_fraction(input: &str) -> Option<(f64, f64)> {
    let (numerator, denominator) = input.split_once('/')?;
    Some((
        fraction_operand(numerator.trim())?,
        fraction_operand(denominator.trim())?,
    ))
}

fn fraction_operand(text: &str) -> Option<f64> {
    let integer_len = text.bytes().take_while(u8::is_ascii_digit).count();
    if integer_len == 0 {
        return None;
    }
    let rest = &text[integer_len..];
    let fraction = match rest.strip_prefix('.') {
        Some(fraction) => fraction,
        None if rest.is_empty() => "",
        None => return None,
    };
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.trim_end_matches('.').parse().ok()
}

/// Reads the longest prefix of `text` that forms a decimal number.
///
/// Accepts an optional sign, digits with an optional fractional part, and an optional
/// exponent. Returns `None` if no digits are found at the start.
fn parse_leading_number(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    text[..end].trim_end_matches('.').parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
