use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;

use crate::models::Expense;

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateRange {
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
}

impl DateRange {
    /// Endpoints given in either order.
    pub(crate) fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub(crate) fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BucketUnit {
    Day,
    /// Weeks start on Sunday.
    Week,
    Month,
}

impl BucketUnit {
    /// First day of the unit that follows the one containing `date`.
    fn next_start(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Day => date.checked_add_days(Days::new(1)),
            Self::Week => {
                let offset = u64::from(date.weekday().num_days_from_sunday());
                date.checked_sub_days(Days::new(offset))?
                    .checked_add_days(Days::new(7))
            }
            Self::Month => date.with_day(1)?.checked_add_months(Months::new(1)),
        }
    }

    fn label(&self, start: NaiveDate) -> String {
        match self {
            Self::Day => start.format("%a %b %-d").to_string(),
            Self::Week => start.format("%b %-d").to_string(),
            Self::Month => start.format("%b %Y").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Bucket {
    pub(crate) start: NaiveDate,
    /// Inclusive.
    pub(crate) end: NaiveDate,
    pub(crate) label: String,
    pub(crate) total: Decimal,
}

/// Split `range` into contiguous unit-aligned buckets and sum the expenses
/// dated inside each. The first and last buckets are clipped to the range;
/// expenses outside the range are ignored.
pub(crate) fn bucket_by_period(
    expenses: &[Expense],
    unit: BucketUnit,
    range: DateRange,
) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    let mut cursor = Some(range.start);
    while let Some(start) = cursor.filter(|d| *d <= range.end) {
        let next = unit.next_start(start);
        let end = next
            .and_then(|n| n.pred_opt())
            .map_or(range.end, |last| last.min(range.end));
        buckets.push(Bucket {
            start,
            end,
            label: unit.label(start),
            total: Decimal::ZERO,
        });
        cursor = next;
    }

    for expense in expenses.iter().filter(|e| range.contains(e.date)) {
        // Buckets are sorted and disjoint
        let idx = buckets.partition_point(|b| b.end < expense.date);
        if let Some(bucket) = buckets.get_mut(idx) {
            bucket.total += expense.amount;
        }
    }
    buckets
}

/// The trend windows offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum Timeframe {
    /// Last 7 days, one bucket per day
    Week,
    /// Last month, one bucket per week
    Month,
    /// Last 12 months, one bucket per month
    Year,
}

impl Timeframe {
    pub(crate) fn window(&self, today: NaiveDate) -> (DateRange, BucketUnit) {
        match self {
            Self::Week => {
                let start = today.checked_sub_days(Days::new(6)).unwrap_or(today);
                (DateRange::new(start, today), BucketUnit::Day)
            }
            Self::Month => {
                let start = today.checked_sub_months(Months::new(1)).unwrap_or(today);
                (DateRange::new(start, today), BucketUnit::Week)
            }
            Self::Year => {
                let start = today
                    .with_day(1)
                    .and_then(|d| d.checked_sub_months(Months::new(11)))
                    .unwrap_or(today);
                (DateRange::new(start, today), BucketUnit::Month)
            }
        }
    }
}

#[cfg(test)]
#[path = "buckets_tests.rs"]
mod tests;
