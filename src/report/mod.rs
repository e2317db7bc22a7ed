//! Derived views over the expense collection.
//!
//! Every function here is a pure, total transform over a snapshot slice:
//! inputs are already validated, so nothing can fail and empty input always
//! has a defined answer.

mod budgets;
mod buckets;
mod forecast;
mod totals;

pub(crate) use budgets::budget_status;
pub(crate) use buckets::{bucket_by_period, Timeframe};
pub(crate) use forecast::forecast;
pub(crate) use totals::{
    category_distribution, group_by_category, monthly_summary, spending_insights, ZeroTotals,
};
