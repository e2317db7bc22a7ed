use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{Category, Expense, UNCATEGORIZED_ID, UNCATEGORIZED_NAME};

/// Label of the sentinel returned by `highest_category` on empty input.
pub(crate) const NO_EXPENSES: &str = "No expenses";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryTotal {
    pub(crate) category_id: String,
    pub(crate) name: String,
    pub(crate) color: String,
    pub(crate) total: Decimal,
}

impl CategoryTotal {
    fn for_category(category: &Category, total: Decimal) -> Self {
        Self {
            category_id: category.id.clone(),
            name: category.name.clone(),
            color: category.color.clone(),
            total,
        }
    }

    fn no_expenses() -> Self {
        Self {
            category_id: String::new(),
            name: NO_EXPENSES.into(),
            color: String::new(),
            total: Decimal::ZERO,
        }
    }

    pub(crate) fn is_empty_sentinel(&self) -> bool {
        self.category_id.is_empty()
    }
}

/// Whether categories without spending stay in a grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ZeroTotals {
    /// Keep them, e.g. for budget tracking.
    Retain,
    /// Drop them, e.g. for a distribution chart.
    Drop,
}

pub(crate) fn total_for<'a, I>(expenses: I) -> Decimal
where
    I: IntoIterator<Item = &'a Expense>,
{
    expenses.into_iter().map(|e| e.amount).sum()
}

/// Mean amount per expense, zero for no expenses.
pub(crate) fn average_amount(expenses: &[Expense]) -> Decimal {
    if expenses.is_empty() {
        return Decimal::ZERO;
    }
    total_for(expenses) / Decimal::from(expenses.len())
}

/// Sum per category, in category table order.
///
/// Amounts whose category id is not in `categories` are collected under a
/// trailing uncategorized entry, so the entries always add up to
/// `total_for(expenses)`.
pub(crate) fn group_by_category(
    expenses: &[Expense],
    categories: &[Category],
    zeros: ZeroTotals,
) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = categories
        .iter()
        .map(|c| CategoryTotal::for_category(c, Decimal::ZERO))
        .collect();
    let mut orphaned = Decimal::ZERO;

    for expense in expenses {
        match totals
            .iter_mut()
            .find(|t| t.category_id == expense.category_id)
        {
            Some(entry) => entry.total += expense.amount,
            None => orphaned += expense.amount,
        }
    }

    if !orphaned.is_zero() {
        match totals.iter_mut().find(|t| t.category_id == UNCATEGORIZED_ID) {
            Some(entry) => entry.total += orphaned,
            None => totals.push(CategoryTotal::for_category(
                &Category::uncategorized(),
                orphaned,
            )),
        }
    }

    if zeros == ZeroTotals::Drop {
        totals.retain(|t| !t.total.is_zero());
    }
    totals
}

/// Category with the largest sum. Ties go to the category whose first
/// expense appears earliest; no expenses yields the `NO_EXPENSES` sentinel.
pub(crate) fn highest_category(expenses: &[Expense], categories: &[Category]) -> CategoryTotal {
    let mut sums: Vec<(&str, Decimal)> = Vec::new();
    for expense in expenses {
        match sums.iter_mut().find(|(id, _)| *id == expense.category_id) {
            Some((_, total)) => *total += expense.amount,
            None => sums.push((expense.category_id.as_str(), expense.amount)),
        }
    }

    let Some((id, total)) = sums
        .into_iter()
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
    else {
        return CategoryTotal::no_expenses();
    };

    match Category::find_by_id(categories, id) {
        Some(category) => CategoryTotal::for_category(category, total),
        None => CategoryTotal {
            category_id: id.to_string(),
            name: if id == UNCATEGORIZED_ID {
                UNCATEGORIZED_NAME.to_string()
            } else {
                id.to_string()
            },
            color: String::new(),
            total,
        },
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryShare {
    pub(crate) category: CategoryTotal,
    /// Share of the overall total, 0-100.
    pub(crate) percent: Decimal,
}

/// Non-zero category totals with their share of overall spending.
pub(crate) fn category_distribution(
    expenses: &[Expense],
    categories: &[Category],
) -> Vec<CategoryShare> {
    let total = total_for(expenses);
    group_by_category(expenses, categories, ZeroTotals::Drop)
        .into_iter()
        .map(|category| {
            let percent = if total.is_zero() {
                Decimal::ZERO
            } else {
                category.total * Decimal::ONE_HUNDRED / total
            };
            CategoryShare { category, percent }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SpendingInsights {
    pub(crate) total: Decimal,
    pub(crate) count: usize,
    pub(crate) average: Decimal,
    pub(crate) highest: CategoryTotal,
}

pub(crate) fn spending_insights(expenses: &[Expense], categories: &[Category]) -> SpendingInsights {
    SpendingInsights {
        total: total_for(expenses),
        count: expenses.len(),
        average: average_amount(expenses),
        highest: highest_category(expenses, categories),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthlySummary {
    pub(crate) total: Decimal,
    pub(crate) this_month: Decimal,
    pub(crate) last_month: Decimal,
    /// Percent change from last month; `None` when last month had nothing.
    pub(crate) change_percent: Option<Decimal>,
}

/// Dashboard headline numbers relative to the month containing `today`.
pub(crate) fn monthly_summary(expenses: &[Expense], today: NaiveDate) -> MonthlySummary {
    let this_month = (today.year(), today.month());
    let last_month = today
        .with_day(1)
        .and_then(|d| d.checked_sub_months(Months::new(1)))
        .map(|d| (d.year(), d.month()));

    let in_month = |e: &&Expense, month: (i32, u32)| (e.date.year(), e.date.month()) == month;

    let this_total = total_for(expenses.iter().filter(|e| in_month(e, this_month)));
    let last_total = match last_month {
        Some(month) => total_for(expenses.iter().filter(|e| in_month(e, month))),
        None => Decimal::ZERO,
    };

    let change_percent = if last_total.is_zero() {
        None
    } else {
        Some((this_total - last_total) * Decimal::ONE_HUNDRED / last_total)
    };

    MonthlySummary {
        total: total_for(expenses),
        this_month: this_total,
        last_month: last_total,
        change_percent,
    }
}

#[cfg(test)]
#[path = "totals_tests.rs"]
mod tests;
