use anyhow::Result;
use rust_decimal::Decimal;

use crate::format::format_amount;
use crate::models::{BudgetPeriod, Category, CategoryDraft, OrphanPolicy, Settings};
use crate::parse::parse_amount;
use crate::report::{group_by_category, ZeroTotals};
use crate::storage::Storage;
use crate::store::ExpenseStore;

// ── Budgets ───────────────────────────────────────────────────

pub(super) fn cmd_budget_set<S: Storage>(
    store: &mut ExpenseStore<S>,
    category: &str,
    amount: &str,
    period: &str,
) -> Result<()> {
    let period = BudgetPeriod::parse(period)
        .ok_or_else(|| anyhow::anyhow!("Unknown budget period '{period}' (expected monthly or yearly)"))?;
    let limit = parse_amount(amount)?;
    let budget = store.set_budget(category, limit, period)?;
    println!(
        "{} budget for {}: {}",
        budget.period,
        Category::name_for(store.categories(), &budget.category_id),
        format_amount(budget.limit_amount, &store.settings().currency_symbol)
    );
    Ok(())
}

pub(super) fn cmd_budget_remove<S: Storage>(
    store: &mut ExpenseStore<S>,
    category: &str,
) -> Result<()> {
    if store.remove_budget(category)? {
        println!("Removed budget for {category}");
    } else {
        println!("No budget set for {category}");
    }
    Ok(())
}

// ── Categories ────────────────────────────────────────────────

pub(super) fn cmd_categories<S: Storage>(store: &ExpenseStore<S>) -> Result<()> {
    let symbol = &store.settings().currency_symbol;
    let totals = group_by_category(store.expenses(), store.categories(), ZeroTotals::Retain);
    println!(
        "{:<16} {:<18} {:<8} {:>12} {:>12}  Icon",
        "ID", "Name", "Color", "Budget", "Spent"
    );
    println!("{}", "─".repeat(78));
    for c in store.categories() {
        let spent = totals
            .iter()
            .find(|t| t.category_id == c.id)
            .map_or(Decimal::ZERO, |t| t.total);
        println!(
            "{:<16} {:<18} {:<8} {:>12} {:>12}  {}",
            c.id,
            c.name,
            c.color,
            c.default_budget
                .map(|b| format_amount(b, symbol))
                .unwrap_or_else(|| "-".into()),
            format_amount(spent, symbol),
            c.icon.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

pub(super) fn cmd_category_add<S: Storage>(
    store: &mut ExpenseStore<S>,
    name: String,
    color: Option<String>,
    icon: Option<String>,
    budget: Option<String>,
) -> Result<()> {
    let draft = CategoryDraft {
        name,
        color,
        icon,
        default_budget: budget,
    };
    let category = store.add_category(&draft)?;
    println!("Added category {} ({})", category.name, category.id);
    Ok(())
}

pub(super) fn cmd_category_edit<S: Storage>(
    store: &mut ExpenseStore<S>,
    key: &str,
    name: Option<String>,
    color: Option<String>,
    icon: Option<String>,
    budget: Option<String>,
) -> Result<()> {
    let current = Category::resolve(store.categories(), key)
        .ok_or_else(|| anyhow::anyhow!("Category '{key}' not found"))?;
    let mut draft = CategoryDraft::from_category(current);
    if let Some(name) = name {
        draft.name = name;
    }
    if color.is_some() {
        draft.color = color;
    }
    if icon.is_some() {
        draft.icon = icon;
    }
    if budget.is_some() {
        draft.default_budget = budget;
    }
    let category = store.update_category(key, &draft)?;
    println!("Updated category {} ({})", category.name, category.id);
    Ok(())
}

pub(super) fn cmd_category_delete<S: Storage>(
    store: &mut ExpenseStore<S>,
    key: &str,
    policy: OrphanPolicy,
) -> Result<()> {
    let moved = store.delete_category(key, policy)?;
    if moved > 0 {
        println!("Deleted category {key}; {moved} expense(s) moved to Uncategorized");
    } else {
        println!("Deleted category {key}");
    }
    Ok(())
}

// ── Settings ──────────────────────────────────────────────────

pub(super) fn cmd_settings<S: Storage>(store: &ExpenseStore<S>) -> Result<()> {
    for (key, value) in store.settings().entries() {
        println!("  {key:<24} {value}");
    }
    Ok(())
}

pub(super) fn cmd_setting_set<S: Storage>(
    store: &mut ExpenseStore<S>,
    key: &str,
    value: &str,
) -> Result<()> {
    if !Settings::KEYS.contains(&key) {
        anyhow::bail!(
            "Unknown setting '{key}'. Available: {}",
            Settings::KEYS.join(", ")
        );
    }
    store.update_setting(key, value)?;
    println!("{key} = {}", value.trim());
    Ok(())
}
