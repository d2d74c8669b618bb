//! Value codec - conversions between platform and caller representations.
//!
//! Money enters the platform as micros and leaves it as two-decimal currency.
//! Everything here is pure; functions fail with `InvalidArguments` outside
//! their documented domain.

use chrono::NaiveDate;

use crate::domains::tools::{ToolError, ToolResult};

/// Number of micros in one currency unit.
pub const MICROS_PER_UNIT: i64 = 1_000_000;

const MICROS_DIGITS: usize = 6;

/// Convert a dollar amount to micros.
///
/// The amount is read in its shortest round-trip decimal form and truncated
/// toward zero after the sixth fractional digit. Reading the decimal form
/// instead of multiplying the float keeps `0.29` at `290000` micros rather than
/// `289999`.
pub fn dollars_to_micros(dollars: f64) -> ToolResult<i64> {
    if !dollars.is_finite() {
        return Err(ToolError::invalid_arguments(format!(
            "amount must be a finite number, got {dollars}"
        )));
    }
    if dollars < 0.0 {
        return Err(ToolError::invalid_arguments(format!(
            "amount must not be negative, got {dollars}"
        )));
    }
    if dollars == 0.0 {
        return Ok(0);
    }

    let text = dollars.to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let too_large = || ToolError::invalid_arguments(format!("amount {dollars} is too large"));

    let whole: i64 = whole.parse().map_err(|_| too_large())?;
    let mut fraction: String = fraction.chars().take(MICROS_DIGITS).collect();
    while fraction.len() < MICROS_DIGITS {
        fraction.push('0');
    }
    let fraction: i64 = fraction.parse().map_err(|_| too_large())?;

    whole
        .checked_mul(MICROS_PER_UNIT)
        .and_then(|w| w.checked_add(fraction))
        .ok_or_else(too_large)
}

/// Convert micros to a dollar amount.
pub fn micros_to_dollars(micros: i64) -> f64 {
    micros as f64 / MICROS_PER_UNIT as f64
}

/// Format micros as currency rounded half-up to the cent, e.g. `$50.00`.
pub fn format_money(micros: i64) -> String {
    let sign = if micros < 0 { "-" } else { "" };
    let cents = (micros.unsigned_abs() + 5_000) / 10_000;
    format!("{}${}.{:02}", sign, cents / 100, cents % 100)
}

/// Format a ratio (0.0 - 1.0) as a percentage with two decimals.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Format an integer count with thousands separators.
pub fn format_count(count: i64) -> String {
    let digits = count.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if count < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Format a fractional count (conversions) with one decimal.
pub fn format_fractional(value: f64) -> String {
    format!("{value:.1}")
}

/// Split a delimited string into trimmed, non-empty items.
///
/// Fails when nothing remains after trimming.
pub fn split_list(input: &str, delimiter: char) -> ToolResult<Vec<String>> {
    let items: Vec<String> = input
        .split(delimiter)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        return Err(ToolError::invalid_arguments(format!(
            "expected a '{delimiter}'-separated list with at least one item"
        )));
    }
    Ok(items)
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> ToolResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        ToolError::invalid_arguments(format!("'{}' is not a YYYY-MM-DD date", input.trim()))
    })
}

/// Reject a start/end pair that is out of order.
pub fn ensure_ordered(start: NaiveDate, end: NaiveDate) -> ToolResult<()> {
    if start > end {
        return Err(ToolError::invalid_arguments(format!(
            "start date {start} is after end date {end}"
        )));
    }
    Ok(())
}
