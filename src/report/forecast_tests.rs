#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn expense(amount: Decimal, on: &str) -> Expense {
    Expense {
        id: format!("exp-{on}"),
        amount,
        description: "Test".into(),
        category_id: "1".into(),
        date: NaiveDate::parse_from_str(on, "%Y-%m-%d").unwrap(),
        notes: None,
        receipt_url: None,
        status: None,
    }
}

fn from() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 20).unwrap()
}

#[test]
fn test_monthly_totals() {
    let expenses = vec![
        expense(dec!(10), "2024-01-05"),
        expense(dec!(15), "2024-01-25"),
        expense(dec!(40), "2024-03-01"),
    ];
    let totals = monthly_totals(&expenses);
    let entries: Vec<(&str, Decimal)> = totals.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    assert_eq!(entries, [("2024-01", dec!(25)), ("2024-03", dec!(40))]);
}

#[test]
fn test_forecast_mean_of_months_with_data() {
    let expenses = vec![
        expense(dec!(100), "2024-01-05"),
        expense(dec!(200), "2024-03-01"),
    ];
    let f = forecast(&expenses, 6, dec!(0.02), from());
    assert_eq!(f.average_monthly, dec!(150));
    assert_eq!(f.points.len(), 6);
    assert_eq!(f.points[0].predicted, dec!(150));
    assert_eq!(f.points[1].predicted, dec!(153));
    assert_eq!(f.points[2].predicted, dec!(156.06));
}

#[test]
fn test_forecast_months_start_at_from() {
    let f = forecast(&[expense(dec!(1), "2024-01-05")], 3, dec!(0.02), from());
    let labels: Vec<&str> = f.points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, ["Nov 2024", "Dec 2024", "Jan 2025"]);
    assert_eq!(f.points[0].month, NaiveDate::from_ymd_opt(2024, 11, 1).unwrap());
}

#[test]
fn test_forecast_monotonic_for_positive_mean_and_rate() {
    let expenses = vec![expense(dec!(0.01), "2024-01-05"), expense(dec!(42), "2024-02-05")];
    let f = forecast(&expenses, 12, dec!(0.02), from());
    for pair in f.points.windows(2) {
        assert!(pair[1].predicted > pair[0].predicted);
    }
}

#[test]
fn test_forecast_empty_history() {
    let f = forecast(&[], 6, dec!(0.02), from());
    assert_eq!(f.average_monthly, Decimal::ZERO);
    assert!(f.points.iter().all(|p| p.predicted.is_zero()));
}

#[test]
fn test_forecast_zero_horizon() {
    let f = forecast(&[expense(dec!(5), "2024-01-05")], 0, dec!(0.02), from());
    assert!(f.points.is_empty());
}

#[test]
fn test_forecast_stops_before_overflow() {
    let history = [expense(dec!(100), "2024-01-05")];

    let f = forecast(&history, 5000, dec!(0.02), from());
    assert!(!f.points.is_empty());
    assert!(f.points.len() < 5000);
    for pair in f.points.windows(2) {
        assert!(pair[1].predicted > pair[0].predicted);
    }

    let f = forecast(&history, 120, dec!(1), from());
    assert!(f.points.len() < 120);
    assert_eq!(f.points[3].predicted, dec!(800));
}
