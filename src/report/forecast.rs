use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::Expense;

/// Total per calendar month, keyed `YYYY-MM` in chronological order.
/// Months without expenses are absent.
pub(crate) fn monthly_totals(expenses: &[Expense]) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.month_key()).or_insert(Decimal::ZERO) += expense.amount;
    }
    totals
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ForecastPoint {
    /// First day of the projected month.
    pub(crate) month: NaiveDate,
    pub(crate) label: String,
    pub(crate) predicted: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Forecast {
    /// Mean over the months that have expenses.
    pub(crate) average_monthly: Decimal,
    pub(crate) growth_rate: Decimal,
    pub(crate) points: Vec<ForecastPoint>,
}

/// Project spending forward from the month containing `from`.
///
/// This is a placeholder rather than a fitted model: the historical monthly
/// mean grows by `growth_rate` per month, compounded, so point `i` is
/// `mean * (1 + growth_rate)^i`.
pub(crate) fn forecast(
    expenses: &[Expense],
    horizon_months: u32,
    growth_rate: Decimal,
    from: NaiveDate,
) -> Forecast {
    let totals = monthly_totals(expenses);
    let average_monthly = if totals.is_empty() {
        Decimal::ZERO
    } else {
        totals.values().copied().sum::<Decimal>() / Decimal::from(totals.len())
    };

    let first_month = from.with_day(1).unwrap_or(from);
    let step = Decimal::ONE + growth_rate;
    let mut factor = Decimal::ONE;
    let mut points = Vec::new();

    // Stops early once the projection no longer fits in a Decimal.
    for i in 0..horizon_months {
        let Some(month) = first_month.checked_add_months(Months::new(i)) else {
            break;
        };
        let Some(predicted) = average_monthly.checked_mul(factor) else {
            break;
        };
        points.push(ForecastPoint {
            month,
            label: month.format("%b %Y").to_string(),
            predicted,
        });
        let Some(next) = factor.checked_mul(step) else {
            break;
        };
        factor = next;
    }

    Forecast {
        average_monthly,
        growth_rate,
        points,
    }
}

#[cfg(test)]
#[path = "forecast_tests.rs"]
mod tests;
