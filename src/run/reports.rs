use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::filtered;
use crate::args::FilterArgs;
use crate::error::ValidationError;
use crate::format::{bar, format_amount, format_change, format_percent};
use crate::parse::parse_amount;
use crate::report::{
    budget_status, bucket_by_period, category_distribution, forecast, monthly_summary,
    spending_insights, Timeframe,
};
use crate::storage::Storage;
use crate::store::ExpenseStore;

const BAR_WIDTH: usize = 30;

pub(super) fn cmd_summary<S: Storage>(store: &ExpenseStore<S>, today: NaiveDate) -> Result<()> {
    let summary = monthly_summary(store.expenses(), today);
    let symbol = &store.settings().currency_symbol;

    println!("Spendboard - {}", today.format("%B %Y"));
    println!("{}", "─".repeat(40));
    println!("  Total spent:  {}", format_amount(summary.total, symbol));
    println!("  This month:   {}", format_amount(summary.this_month, symbol));
    println!("  Last month:   {}", format_amount(summary.last_month, symbol));
    println!("  Change:       {}", format_change(summary.change_percent));
    println!("  Expenses:     {}", store.expenses().len());
    Ok(())
}

pub(super) fn cmd_insights<S: Storage>(store: &ExpenseStore<S>, filter: &FilterArgs) -> Result<()> {
    let subset = filtered(store, filter)?;
    let insights = spending_insights(&subset, store.categories());
    let symbol = &store.settings().currency_symbol;

    println!("  Total spent:      {}", format_amount(insights.total, symbol));
    println!("  Expenses:         {}", insights.count);
    println!("  Average expense:  {}", format_amount(insights.average, symbol));
    if insights.highest.is_empty_sentinel() {
        println!("  Top category:     {}", insights.highest.name);
    } else {
        println!(
            "  Top category:     {} ({})",
            insights.highest.name,
            format_amount(insights.highest.total, symbol)
        );
    }
    Ok(())
}

pub(super) fn cmd_trend<S: Storage>(
    store: &ExpenseStore<S>,
    timeframe: Timeframe,
    today: NaiveDate,
) -> Result<()> {
    let (range, unit) = timeframe.window(today);
    let buckets = bucket_by_period(store.expenses(), unit, range);
    let symbol = &store.settings().currency_symbol;
    let max = buckets.iter().map(|b| b.total).max().unwrap_or(Decimal::ZERO);

    println!("Spending {} to {}", range.start, range.end);
    println!("{}", "─".repeat(60));
    for bucket in &buckets {
        println!(
            "  {:<14} {:>12}  {}",
            bucket.label,
            format_amount(bucket.total, symbol),
            bar(bucket.total, max, BAR_WIDTH)
        );
    }
    Ok(())
}

pub(super) fn cmd_distribution<S: Storage>(
    store: &ExpenseStore<S>,
    filter: &FilterArgs,
) -> Result<()> {
    let subset = filtered(store, filter)?;
    let shares = category_distribution(&subset, store.categories());
    if shares.is_empty() {
        println!("No spending to show");
        return Ok(());
    }

    let symbol = &store.settings().currency_symbol;
    for share in &shares {
        println!(
            "  {:<18} {:<8} {:>12} {:>7}  {}",
            share.category.name,
            share.category.color,
            format_amount(share.category.total, symbol),
            format_percent(Some(share.percent)),
            bar(share.percent, Decimal::ONE_HUNDRED, BAR_WIDTH)
        );
    }
    Ok(())
}

pub(super) fn cmd_budgets<S: Storage>(store: &ExpenseStore<S>, today: NaiveDate) -> Result<()> {
    let settings = store.settings();
    let statuses = budget_status(
        store.expenses(),
        store.categories(),
        store.budgets(),
        today,
        settings.budget_warning_percent,
    );
    let symbol = &settings.currency_symbol;

    println!(
        "{:<18} {:<8} {:>12} {:>12} {:>8}",
        "Category", "Period", "Spent", "Limit", "Used"
    );
    println!("{}", "─".repeat(64));
    for status in statuses
        .iter()
        .filter(|s| s.limit > Decimal::ZERO || s.spent > Decimal::ZERO)
    {
        println!(
            "{:<18} {:<8} {:>12} {:>12} {:>8}{}",
            status.name,
            status.period.as_str(),
            format_amount(status.spent, symbol),
            format_amount(status.limit, symbol),
            format_percent(status.percent),
            if status.near_limit { "  !" } else { "" }
        );
    }
    Ok(())
}

pub(super) fn cmd_forecast<S: Storage>(
    store: &ExpenseStore<S>,
    months: Option<u32>,
    growth: Option<&str>,
    today: NaiveDate,
) -> Result<()> {
    let settings = store.settings();
    let horizon = months.unwrap_or(settings.forecast_months);
    let rate = match growth {
        Some(raw) => parse_amount(raw).map_err(|_| ValidationError::InvalidSetting {
            key: "growth".into(),
            value: raw.to_string(),
        })?,
        None => settings.forecast_growth_rate,
    };
    let projection = forecast(store.expenses(), horizon, rate, today);
    let symbol = &settings.currency_symbol;

    println!(
        "Average monthly spending: {}",
        format_amount(projection.average_monthly, symbol)
    );
    println!(
        "Growth per month:         {}",
        format_percent(Some(projection.growth_rate * Decimal::ONE_HUNDRED))
    );
    println!("{}", "─".repeat(40));
    for point in &projection.points {
        println!("  {:<12} {:>14}", point.label, format_amount(point.predicted, symbol));
    }
    Ok(())
}
