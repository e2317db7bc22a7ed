use anyhow::Result;

use crate::args::EditFields;
use crate::format::{format_amount, truncate};
use crate::models::{Category, Expense, ExpenseDraft, OrphanPolicy};
use crate::storage::Storage;
use crate::store::{paginate, ExpenseQuery, ExpenseStore};

pub(super) fn cmd_add<S: Storage>(store: &mut ExpenseStore<S>, draft: &ExpenseDraft) -> Result<()> {
    let expense = store.add_expense(draft, OrphanPolicy::Reject)?;
    let symbol = &store.settings().currency_symbol;
    println!(
        "Added {} {} ({}) on {}",
        expense.id,
        format_amount(expense.amount, symbol),
        Category::name_for(store.categories(), &expense.category_id),
        expense.date
    );
    Ok(())
}

pub(super) fn cmd_edit<S: Storage>(
    store: &mut ExpenseStore<S>,
    id: &str,
    fields: &EditFields,
) -> Result<()> {
    let current = store
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("Expense '{id}' not found"))?;
    let draft = apply_edits(ExpenseDraft::from_expense(current), fields);
    let expense = store.update_expense(id, &draft, OrphanPolicy::Reject)?;
    println!("Updated {}", expense.id);
    print_expense(&expense, store.categories(), &store.settings().currency_symbol);
    Ok(())
}

/// Overlay the fields given on the command line onto an existing draft.
pub(super) fn apply_edits(mut draft: ExpenseDraft, fields: &EditFields) -> ExpenseDraft {
    if let Some(amount) = &fields.amount {
        draft.amount = amount.clone();
    }
    if let Some(description) = &fields.description {
        draft.description = description.clone();
    }
    if let Some(category) = &fields.category {
        draft.category = category.clone();
    }
    if let Some(date) = &fields.date {
        draft.date = date.clone();
    }
    if fields.notes.is_some() {
        draft.notes = fields.notes.clone();
    }
    if fields.receipt_url.is_some() {
        draft.receipt_url = fields.receipt_url.clone();
    }
    if fields.status.is_some() {
        draft.status = fields.status.clone();
    }
    draft
}

pub(super) fn cmd_delete<S: Storage>(store: &mut ExpenseStore<S>, ids: &[String]) -> Result<()> {
    let ids: Vec<String> = unique_ids(ids).into_iter().map(String::from).collect();
    let removed = store.delete_expenses(&ids)?;
    let missing = ids.len().saturating_sub(removed);
    if missing > 0 {
        println!("Deleted {removed} expense(s), {missing} not found");
    } else {
        println!("Deleted {removed} expense(s)");
    }
    Ok(())
}

/// Ids in first-seen order with repeats dropped.
pub(super) fn unique_ids(ids: &[String]) -> Vec<&str> {
    let mut unique: Vec<&str> = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id.as_str()) {
            unique.push(id);
        }
    }
    unique
}

pub(super) fn cmd_list<S: Storage>(
    store: &ExpenseStore<S>,
    query: &ExpenseQuery,
    page: usize,
) -> Result<()> {
    let matched = store.query(query);
    if matched.is_empty() {
        println!("No expenses found");
        return Ok(());
    }

    let page = paginate(&matched, page, store.settings().page_size);
    print_table(page.items, store.categories(), &store.settings().currency_symbol);
    println!();
    println!(
        "Showing {}-{} of {} (page {}/{})",
        page.first, page.last, page.total_items, page.number, page.total_pages
    );
    Ok(())
}

pub(super) fn cmd_show<S: Storage>(store: &ExpenseStore<S>, id: &str) -> Result<()> {
    let expense = store
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("Expense '{id}' not found"))?;
    print_expense(expense, store.categories(), &store.settings().currency_symbol);
    Ok(())
}

pub(super) fn cmd_recent<S: Storage>(store: &ExpenseStore<S>, count: Option<usize>) -> Result<()> {
    let recent = store.recent(count.unwrap_or(store.settings().recent_count));
    if recent.is_empty() {
        println!("No expenses yet");
        return Ok(());
    }
    print_table(&recent, store.categories(), &store.settings().currency_symbol);
    Ok(())
}

fn print_table(expenses: &[&Expense], categories: &[Category], symbol: &str) {
    println!(
        "{:<18} {:<10} {:<30} {:<16} {:>12}  Status",
        "ID", "Date", "Description", "Category", "Amount"
    );
    println!("{}", "─".repeat(98));
    for e in expenses {
        println!(
            "{:<18} {:<10} {:<30} {:<16} {:>12}  {}",
            truncate(&e.id, 18),
            e.date,
            truncate(&e.description, 30),
            truncate(Category::name_for(categories, &e.category_id), 16),
            format_amount(e.amount, symbol),
            e.status(),
        );
    }
}

fn print_expense(expense: &Expense, categories: &[Category], symbol: &str) {
    println!("  ID:          {}", expense.id);
    println!("  Date:        {}", expense.date);
    println!("  Description: {}", expense.description);
    println!(
        "  Category:    {}",
        Category::name_for(categories, &expense.category_id)
    );
    println!("  Amount:      {}", format_amount(expense.amount, symbol));
    println!("  Status:      {}", expense.status());
    if let Some(notes) = &expense.notes {
        println!("  Notes:       {notes}");
    }
    if let Some(url) = &expense.receipt_url {
        println!("  Receipt:     {url}");
    }
}
