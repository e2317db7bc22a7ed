use chrono::NaiveDate;

use crate::models::Expense;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub(crate) enum SortKey {
    #[default]
    Date,
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub(crate) enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filters and ordering for the expense list. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub(crate) struct ExpenseQuery {
    /// Case-insensitive substring of the description.
    pub(crate) search: Option<String>,
    pub(crate) category_id: Option<String>,
    /// Inclusive bounds.
    pub(crate) from: Option<NaiveDate>,
    pub(crate) to: Option<NaiveDate>,
    /// `YYYY-MM`.
    pub(crate) month: Option<String>,
    pub(crate) sort: SortKey,
    pub(crate) order: SortOrder,
}

impl ExpenseQuery {
    pub(crate) fn matches(&self, expense: &Expense) -> bool {
        if let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) {
            if !expense
                .description
                .to_lowercase()
                .contains(&term.to_lowercase())
            {
                return false;
            }
        }
        if let Some(id) = &self.category_id {
            if &expense.category_id != id {
                return false;
            }
        }
        if self.from.is_some_and(|from| expense.date < from) {
            return false;
        }
        if self.to.is_some_and(|to| expense.date > to) {
            return false;
        }
        if let Some(month) = &self.month {
            if &expense.month_key() != month {
                return false;
            }
        }
        true
    }

    /// Matching expenses in the requested order. Ties keep stored order.
    pub(crate) fn apply<'a>(&self, expenses: &'a [Expense]) -> Vec<&'a Expense> {
        let mut matched: Vec<&Expense> = expenses.iter().filter(|e| self.matches(e)).collect();
        matched.sort_by(|a, b| {
            let ord = match self.sort {
                SortKey::Date => a.date.cmp(&b.date),
                SortKey::Amount => a.amount.cmp(&b.amount),
            };
            match self.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        matched
    }
}

/// One page of a list.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Page<'a, T> {
    pub(crate) items: &'a [T],
    /// 1-based, clamped to `1..=total_pages`.
    pub(crate) number: usize,
    pub(crate) total_pages: usize,
    /// 1-based position of the first item, 0 when empty.
    pub(crate) first: usize,
    pub(crate) last: usize,
    pub(crate) total_items: usize,
}

pub(crate) fn paginate<T>(items: &[T], page: usize, size: usize) -> Page<'_, T> {
    let size = size.max(1);
    let total_pages = items.len().div_ceil(size).max(1);
    let number = page.clamp(1, total_pages);
    let start = ((number - 1) * size).min(items.len());
    let end = (start + size).min(items.len());
    Page {
        items: &items[start..end],
        number,
        total_pages,
        first: if start == end { 0 } else { start + 1 },
        last: end,
        total_items: items.len(),
    }
}

/// Most recent first, ties by stored order.
pub(crate) fn newest_first(expenses: &[Expense]) -> Vec<&Expense> {
    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}
