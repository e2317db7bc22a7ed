use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ValidationError;

/// Formats tried after ISO dates, in order.
const FALLBACK_DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%m-%d-%Y", "%m/%d/%y", "%d/%m/%Y"];

/// Parse a user- or file-supplied amount.
/// Accepts currency symbols, thousands separators, surrounding quotes and
/// accounting-style parentheses for negatives.
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let cleaned = raw
        .replace(['$', ',', '"'], "")
        .replace('(', "-")
        .replace(')', "")
        .trim()
        .to_string();
    if cleaned.is_empty() {
        return Err(ValidationError::MissingAmount);
    }
    Decimal::from_str(&cleaned).map_err(|_| ValidationError::InvalidAmount(raw.trim().to_string()))
}

/// Parse a calendar date. ISO `YYYY-MM-DD` first, then RFC 3339 timestamps
/// (the date part in UTC), then a few common bank formats.
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(ValidationError::MissingDate);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc().date());
    }
    for fmt in FALLBACK_DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(ValidationError::InvalidDate(s.to_string()))
}

/// Parse a `YYYY-MM` month key into the first day of that month.
pub(crate) fn parse_month(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(raw.trim().to_string()))
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
