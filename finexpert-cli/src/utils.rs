use finexpert_core::calculations::common::round_half_up;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator in either Western (`"1,234,567"`)
/// or Indian (`"12,34,567"`) grouping. Empty or whitespace-only input is
/// treated as 0. Used as the clap value parser for every amount and rate.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses an amount that may be left blank.
///
/// Unlike [`parse_decimal`], empty or whitespace-only input is `None`
/// rather than 0, so a blank field still counts as not provided. Invalid
/// non-empty input is an error.
pub fn parse_optional_decimal(s: &str) -> Result<Option<Decimal>, ParseDecimalError> {
    if normalize_decimal_input(s).is_empty() {
        return Ok(None);
    }
    parse_decimal(s).map(Some)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grouping {
    /// 12,34,567: thousands, then pairs.
    Indian,
    /// 1,234,567
    Western,
}

fn group_integer(
    digits: &str,
    grouping: Grouping,
) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let size = match grouping {
        Grouping::Indian => 2,
        Grouping::Western => 3,
    };

    let mut parts = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(size);
        parts.push(&head[start..end]);
        end = start;
    }
    parts.reverse();
    parts.push(tail);
    parts.join(",")
}

fn format_money(
    symbol: &str,
    amount: Decimal,
    grouping: Grouping,
) -> String {
    let rounded = round_half_up(amount);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{symbol}{}.{frac_part}", group_integer(int_part, grouping))
}

/// Rupee amount with Indian digit grouping, e.g. `₹12,34,567.89`.
pub fn format_inr(amount: Decimal) -> String {
    format_money("₹", amount, Grouping::Indian)
}

/// Dollar amount with Western digit grouping, e.g. `$1,234,567.89`.
pub fn format_usd(amount: Decimal) -> String {
    format_money("$", amount, Grouping::Western)
}

/// Percentage with at most two decimals and no trailing zeros.
pub fn format_percent(percent: Decimal) -> String {
    format!("{}%", percent.round_dp(2).normalize())
}
