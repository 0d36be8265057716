//! Formatting utilities for metrics display.

use rust_decimal::Decimal;

use super::types::MetricValue;

/// Format a percentage value (already in % units).
#[must_use]
pub fn format_pct(value: Decimal) -> String {
    format!("{value:.2}%")
}

/// Format a currency amount.
#[must_use]
pub fn format_currency(value: Decimal) -> String {
    if value < Decimal::ZERO {
        format!("-${:.2}", value.abs())
    } else {
        format!("${value:.2}")
    }
}

/// Format a decimal with 2 decimal places.
#[must_use]
pub fn format_decimal(value: Decimal) -> String {
    format!("{value:.2}")
}

/// Format a tagged ratio, spelling out its sentinels.
#[must_use]
pub fn format_ratio(value: MetricValue) -> String {
    value.to_string()
}

/// Format an optional decimal, using N/A when absent.
#[must_use]
pub fn format_optional(value: Option<Decimal>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}"))
}
