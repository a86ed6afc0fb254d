//! Amount coercion and display helpers.
//!
//! Stored and user-entered amounts are plain `f64`. Anything that is not a finite number is
//! treated as zero when summing so totals never turn into NaN.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Maps non-finite values to `0.0`.
pub fn coerce_amount(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Parses raw text the way a browser `Number()` call does: blank input is `0`, anything that
/// is not numeric is `NaN`. Validation later rejects both as non-positive.
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Returns `true` when the amount is a finite number strictly greater than zero.
pub fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Sums amounts, skipping anything non-finite.
pub fn sum_amounts<I>(amounts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    amounts
        .into_iter()
        .map(coerce_amount)
        .fold(0.0, |total, amount| total + amount)
}

/// Deserializes a stored amount leniently: numbers pass through, numeric strings are parsed,
/// and `null`, booleans, malformed text or non-finite values become `0.0`.
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let amount = match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => text.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(coerce_amount(amount))
}

/// Formats a whole-unit currency figure with thousands grouping, e.g. `$1,234` or `-$80`.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let rounded = coerce_amount(amount).round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{symbol}{}", group_thousands(rounded.abs() as u64))
}

/// Formats an amount keeping up to two decimals, e.g. `$1,234.5`.
pub fn format_amount(amount: f64, symbol: &str) -> String {
    let value = coerce_amount(amount);
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    let whole = group_thousands(cents / 100);
    match cents % 100 {
        0 => format!("{sign}{symbol}{whole}"),
        fraction if fraction % 10 == 0 => format!("{sign}{symbol}{whole}.{}", fraction / 10),
        fraction => format!("{sign}{symbol}{whole}.{fraction:02}"),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
