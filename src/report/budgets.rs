use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{BudgetPeriod, Budgets, Category, Expense};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BudgetStatus {
    pub(crate) category_id: String,
    pub(crate) name: String,
    pub(crate) period: BudgetPeriod,
    pub(crate) spent: Decimal,
    /// Zero when the category has no budget.
    pub(crate) limit: Decimal,
    /// Percentage of the limit consumed; `None` when there is no usable limit.
    pub(crate) percent: Option<Decimal>,
    pub(crate) near_limit: bool,
}

/// Budget consumption per category for the period containing `today`.
///
/// An explicit budget wins over the category's default budget, which is
/// treated as monthly. Every category is listed, budgeted or not.
pub(crate) fn budget_status(
    expenses: &[Expense],
    categories: &[Category],
    budgets: &Budgets,
    today: NaiveDate,
    warning_percent: Decimal,
) -> Vec<BudgetStatus> {
    categories
        .iter()
        .map(|category| {
            let (limit, period) = match budgets.get(&category.id) {
                Some(b) => (b.limit_amount, b.period),
                None => (
                    category.default_budget.unwrap_or(Decimal::ZERO),
                    BudgetPeriod::Monthly,
                ),
            };

            let spent: Decimal = expenses
                .iter()
                .filter(|e| e.category_id == category.id && in_period(e.date, period, today))
                .map(|e| e.amount)
                .sum();

            let percent = if limit > Decimal::ZERO {
                Some(spent * Decimal::ONE_HUNDRED / limit)
            } else {
                None
            };

            BudgetStatus {
                category_id: category.id.clone(),
                name: category.name.clone(),
                period,
                spent,
                limit,
                percent,
                near_limit: percent.is_some_and(|p| p > warning_percent),
            }
        })
        .collect()
}

fn in_period(date: NaiveDate, period: BudgetPeriod, today: NaiveDate) -> bool {
    match period {
        BudgetPeriod::Monthly => date.year() == today.year() && date.month() == today.month(),
        BudgetPeriod::Yearly => date.year() == today.year(),
    }
}

#[cfg(test)]
#[path = "budgets_tests.rs"]
mod tests;
