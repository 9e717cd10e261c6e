use std::fmt::Display;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Currency suffix used wherever an amount is shown to the user.
pub const CURRENCY: &str = "kr";

/// Error returned when a field cannot be parsed as a whole number.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{input}' is not a whole number")]
pub struct ParseNumberError {
    input: String,
}

/// Normalizes numeric input: trims, and drops the space, no-break space and
/// underscore digit separators people type into number fields.
fn normalize_number_input(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}' | '_'))
        .collect()
}

/// Parses a whole number from form text.
///
/// Empty or whitespace-only input is `Ok(None)`. Fractions, signs the
/// target type cannot hold, and any other text are errors.
pub fn parse_whole_number<T: FromStr>(s: &str) -> Result<Option<T>, ParseNumberError> {
    let normalized = normalize_number_input(s);
    if normalized.is_empty() {
        return Ok(None);
    }
    normalized.parse().map(Some).map_err(|_| {
        tracing::debug!(input = %s, "rejected non-integer input");
        ParseNumberError {
            input: s.to_string(),
        }
    })
}

/// Formats an amount with the currency suffix, e.g. `13000 kr`.
pub fn format_money(amount: Decimal) -> String {
    format!("{amount} {CURRENCY}")
}

/// Formats an optional value for display, using "—" when `None`.
pub fn opt_display<T: Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "—".to_string())
}
