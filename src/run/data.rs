use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use super::build_query;
use crate::args::FilterArgs;
use crate::models::{ExpenseDraft, OrphanPolicy};
use crate::storage::Storage;
use crate::store::ExpenseStore;
use crate::transfer::{export_csv, import_csv, parse_import};

pub(super) fn cmd_export<S: Storage>(store: &ExpenseStore<S>, path: Option<&Path>) -> Result<()> {
    let document = store.snapshot();
    let json = document.to_json()?;
    match path {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(
                expenses = document.expenses.len(),
                path = %path.display(),
                "Exported data"
            );
            println!(
                "Exported {} expenses and {} categories to {}",
                document.expenses.len(),
                document.categories.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub(super) fn cmd_import<S: Storage>(
    store: &mut ExpenseStore<S>,
    path: &Path,
    policy: OrphanPolicy,
) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document = parse_import(&text, policy)
        .with_context(|| format!("Import of {} failed, nothing was changed", path.display()))?;
    let (expenses, categories) = (document.expenses.len(), document.categories.len());
    store.replace_all(document)?;
    println!("Imported {expenses} expenses and {categories} categories");
    Ok(())
}

pub(super) fn cmd_export_csv<S: Storage>(
    store: &ExpenseStore<S>,
    path: &Path,
    filter: &FilterArgs,
) -> Result<()> {
    let query = build_query(filter, store.categories())?;
    let expenses = store.query(&query);
    export_csv(path, &expenses, store.categories())?;
    if expenses.is_empty() {
        println!("No expenses matched; wrote header only to {}", path.display());
    } else {
        println!("Exported {} expenses to {}", expenses.len(), path.display());
    }
    Ok(())
}

pub(super) fn cmd_import_csv<S: Storage>(
    store: &mut ExpenseStore<S>,
    path: &Path,
    policy: OrphanPolicy,
) -> Result<()> {
    let rows = import_csv(path)?;
    if rows.is_empty() {
        println!("No rows found in {}", path.display());
        return Ok(());
    }
    let drafts: Vec<ExpenseDraft> = rows.iter().map(|row| row.to_draft()).collect();
    let added = store
        .add_expenses(&drafts, policy)
        .with_context(|| format!("Import of {} failed, nothing was added", path.display()))?;
    println!("Imported {} expenses", added.len());
    Ok(())
}

pub(super) fn cmd_clear<S: Storage>(store: &mut ExpenseStore<S>, yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!("This deletes every expense, category, budget and setting. Re-run with --yes to confirm");
    }
    store.clear_all()?;
    println!("All data cleared");
    Ok(())
}
