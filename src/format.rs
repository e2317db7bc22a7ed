use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` with `"$"` → `"$1,234,567.89"`
pub(crate) fn format_amount(val: Decimal, symbol: &str) -> String {
    let abs = val.abs().round_dp(2);
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO {
        format!("-{symbol}{with_commas}.{dec_part}")
    } else {
        format!("{symbol}{with_commas}.{dec_part}")
    }
}

/// One decimal place with a sign, or `n/a` when there is nothing to compare.
pub(crate) fn format_change(percent: Option<Decimal>) -> String {
    match percent {
        Some(p) if p > Decimal::ZERO => format!("+{:.1}%", p.round_dp(1)),
        Some(p) => format!("{:.1}%", p.round_dp(1)),
        None => "n/a".into(),
    }
}

pub(crate) fn format_percent(percent: Option<Decimal>) -> String {
    match percent {
        Some(p) => format!("{:.1}%", p.round_dp(1)),
        None => "n/a".into(),
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max - 1).collect();
    format!("{truncated}…")
}

/// A proportional bar of `width` cells for `value` out of `max`.
pub(crate) fn bar(value: Decimal, max: Decimal, width: usize) -> String {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return String::new();
    }
    let ratio = (value / max).min(Decimal::ONE);
    let cells = (ratio * Decimal::from(width)).round().to_usize().unwrap_or(0);
    "█".repeat(cells.max(1))
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
