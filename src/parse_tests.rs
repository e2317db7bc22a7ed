#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

// ── parse_amount ──────────────────────────────────────────────

#[test]
fn test_parse_amount_basic() {
    assert_eq!(parse_amount("100.50").unwrap(), dec!(100.50));
    assert_eq!(parse_amount("-42.99").unwrap(), dec!(-42.99));
    assert_eq!(parse_amount("42").unwrap(), dec!(42));
}

#[test]
fn test_parse_amount_with_currency() {
    assert_eq!(parse_amount("$1,234.56").unwrap(), dec!(1234.56));
    assert_eq!(parse_amount("-$99.99").unwrap(), dec!(-99.99));
    assert_eq!(parse_amount("$1,234,567.89").unwrap(), dec!(1234567.89));
}

#[test]
fn test_parse_amount_parentheses_negative() {
    assert_eq!(parse_amount("(500.00)").unwrap(), dec!(-500.00));
}

#[test]
fn test_parse_amount_quoted() {
    assert_eq!(parse_amount("\"100.00\"").unwrap(), dec!(100.00));
}

#[test]
fn test_parse_amount_empty_is_missing() {
    assert_eq!(parse_amount(""), Err(ValidationError::MissingAmount));
    assert_eq!(parse_amount("   "), Err(ValidationError::MissingAmount));
}

#[test]
fn test_parse_amount_rejects_text() {
    assert_eq!(
        parse_amount("ten dollars"),
        Err(ValidationError::InvalidAmount("ten dollars".into()))
    );
    assert!(parse_amount("NaN").is_err());
    assert!(parse_amount("Infinity").is_err());
}

// ── parse_date ────────────────────────────────────────────────

#[test]
fn test_parse_date_iso() {
    let d = parse_date("2024-01-15").unwrap();
    assert_eq!(d, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
}

#[test]
fn test_parse_date_rfc3339_timestamp() {
    let d = parse_date("2024-03-05T18:30:00.000Z").unwrap();
    assert_eq!(d, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
}

#[test]
fn test_parse_date_us_fallback() {
    let d = parse_date("01/15/2024").unwrap();
    assert_eq!(d, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
}

#[test]
fn test_parse_date_day_first_fallback() {
    // 25 can't be a month, so the day-first format picks it up
    let d = parse_date("25/12/2024").unwrap();
    assert_eq!(d, NaiveDate::from_ymd_opt(2024, 12, 25).unwrap());
}

#[test]
fn test_parse_date_invalid() {
    assert_eq!(
        parse_date("2024-02-30"),
        Err(ValidationError::InvalidDate("2024-02-30".into()))
    );
    assert!(parse_date("yesterday").is_err());
    assert_eq!(parse_date(" "), Err(ValidationError::MissingDate));
}

// ── parse_month ───────────────────────────────────────────────

#[test]
fn test_parse_month() {
    assert_eq!(
        parse_month("2024-02").unwrap(),
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    );
    assert!(parse_month("2024-13").is_err());
    assert!(parse_month("Feb").is_err());
}
