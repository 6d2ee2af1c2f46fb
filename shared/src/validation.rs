//! Form field validators
//!
//! Every validator takes a single input and answers with a plain `bool`;
//! invalid input is never an error. The checks are deliberately shallow:
//! CPF and barcode are checked for shape only, no check digits.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

// Longest numeric prefix a lenient float parser would accept.
static FLOAT_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("float prefix pattern is valid")
});

/// Checks `something@domain.tld`, where no part contains whitespace or `@`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// A CPF is accepted when exactly 11 digits remain after dropping every
/// other character (dots, dashes, spaces).
pub fn is_valid_cpf(cpf: &str) -> bool {
    cpf.chars().filter(|c| c.is_ascii_digit()).count() == 11
}

/// Accepts any input whose leading number is finite and not negative.
///
/// Parsing is lenient about trailing text: `"10.50 reais"` reads as `10.5`.
pub fn is_valid_money(value: &str) -> bool {
    match parse_leading_float(value) {
        Some(num) => num.is_finite() && num >= 0.0,
        None => false,
    }
}

/// At least 8 characters, all of them ASCII digits.
pub fn is_valid_barcode(barcode: &str) -> bool {
    barcode.len() >= 8 && barcode.bytes().all(|b| b.is_ascii_digit())
}

pub(crate) fn parse_leading_float(input: &str) -> Option<f64> {
    let trimmed = input.trim_start();
    let prefix = FLOAT_PREFIX_RE.find(trimmed)?;
    prefix.as_str().parse::<f64>().ok()
}
