//! Numeric cleaning and currency derivation.
//!
//! Gross figures in the export arrive as free text: dollar prefixed,
//! comma grouped, sometimes quoted and often carrying wiki-style footnote
//! markers such as `[a]` or `[note 1]`. These helpers turn that text into
//! plain `f64` values and derive the converted counterparts.

use crate::constants::{CURRENCY_DECIMAL_PLACES, FOOTNOTE_PATTERN, NUMERIC_NOISE_CHARS};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static FOOTNOTE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FOOTNOTE_PATTERN).expect("footnote pattern is valid"));

/// Parse a messy currency cell into a finite number
///
/// Returns `None` for absent, blank or non-numeric input. Every `$`,
/// quote, comma and apostrophe is removed, then every bracketed
/// footnote span, before the remainder is trimmed and parsed. An
/// underscore is accepted as a digit separator only between two digits,
/// so `1_000` parses while `_1000` and `1__000` do not.
///
/// # Examples
///
/// ```
/// use tour_gross_normalizer::cleaning::clean_price;
///
/// assert_eq!(clean_price(Some("$1,234.50")), Some(1234.50));
/// assert_eq!(clean_price(Some("45,000,000[note 1]")), Some(45_000_000.0));
/// assert_eq!(clean_price(Some("1_000")), Some(1000.0));
/// assert_eq!(clean_price(Some("N/A")), None);
/// assert_eq!(clean_price(None), None);
/// ```
pub fn clean_price(raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }

    let stripped: String = raw
        .chars()
        .filter(|c| !NUMERIC_NOISE_CHARS.contains(c))
        .collect();
    let without_notes = FOOTNOTE_REGEX.replace_all(&stripped, "");

    strip_digit_separators(without_notes.trim())?
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn strip_digit_separators(text: &str) -> Option<Cow<'_, str>> {
    if !text.contains('_') {
        return Some(Cow::Borrowed(text));
    }

    let chars: Vec<char> = text.chars().collect();
    let mut digits = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        if c != '_' {
            digits.push(c);
            continue;
        }
        let between_digits = i > 0
            && chars[i - 1].is_ascii_digit()
            && chars.get(i + 1).is_some_and(char::is_ascii_digit);
        if !between_digits {
            return None;
        }
    }
    Some(Cow::Owned(digits))
}

/// Round to the number of decimal places kept on currency values
///
/// Rounds the exact binary value, so a product such as `0.03 * 83.5`,
/// stored just below `2.505`, rounds down to `2.5`.
pub fn round_currency(value: f64) -> f64 {
    format!("{:.*}", CURRENCY_DECIMAL_PLACES, value)
        .parse()
        .unwrap_or(value)
}

/// Convert a USD amount at `rate`, rounded to two decimal places
///
/// A missing amount and a zero amount both yield `None`, so a genuine
/// zero gross is indistinguishable from a missing one in the output.
pub fn derive_converted(usd: Option<f64>, rate: f64) -> Option<f64> {
    usd.filter(|amount| *amount != 0.0)
        .map(|amount| round_currency(amount * rate))
}
