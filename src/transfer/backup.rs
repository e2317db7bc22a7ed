use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::error::{ImportError, ValidationError};
use crate::models::{
    Budget, Budgets, Category, CategoryDraft, Expense, ExpenseDraft, OrphanPolicy, Settings,
};
use crate::store::next_id;

/// Everything the store holds, as written by `export` and read by `import`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ExportDocument {
    pub(crate) expenses: Vec<Expense>,
    pub(crate) categories: Vec<Category>,
    pub(crate) budgets: Budgets,
    pub(crate) settings: Settings,
}

impl ExportDocument {
    pub(crate) fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize export document")
    }
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default, alias = "defaultBudget", alias = "budget")]
    default_budget: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawExpense {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    amount: Value,
    #[serde(default)]
    description: String,
    #[serde(default, alias = "categoryId")]
    category_id: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    date: String,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default, alias = "receiptUrl")]
    receipt_url: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// Budgets arrive either keyed by category or as a plain list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawBudgets {
    Keyed(BTreeMap<String, Budget>),
    Listed(Vec<Budget>),
}

/// Parse and validate an export document. Nothing is applied; the caller
/// hands the result to the store only when this succeeds.
pub(crate) fn parse_import(text: &str, policy: OrphanPolicy) -> Result<ExportDocument, ImportError> {
    let root: Value = serde_json::from_str(text)?;
    let Value::Object(root) = root else {
        return Err(ImportError::NotAnObject);
    };

    let raw_expenses: Vec<RawExpense> = required_section(&root, "expenses")?;
    let raw_categories: Vec<RawCategory> = required_section(&root, "categories")?;
    let raw_budgets: Option<RawBudgets> = optional_section(&root, "budgets")?;
    let settings: Settings = optional_section(&root, "settings")?.unwrap_or_default();
    settings.validate().map_err(ImportError::InvalidSettings)?;

    let categories = import_categories(raw_categories)?;
    let expenses = import_expenses(raw_expenses, &categories, policy)?;
    let budgets = import_budgets(raw_budgets, &categories)?;

    info!(
        expenses = expenses.len(),
        categories = categories.len(),
        budgets = budgets.len(),
        "Parsed import document"
    );
    Ok(ExportDocument {
        expenses,
        categories,
        budgets,
        settings,
    })
}

fn required_section<T: DeserializeOwned>(
    root: &Map<String, Value>,
    key: &'static str,
) -> Result<T, ImportError> {
    optional_section(root, key)?.ok_or(ImportError::MissingKey(key))
}

/// Sections may hold the value itself or a JSON string encoding it.
fn optional_section<T: DeserializeOwned>(
    root: &Map<String, Value>,
    key: &'static str,
) -> Result<Option<T>, ImportError> {
    let invalid = |source| ImportError::InvalidSection { key, source };
    match root.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(encoded)) => serde_json::from_str(encoded).map(Some).map_err(invalid),
        Some(value) => T::deserialize(value).map(Some).map_err(invalid),
    }
}

fn import_categories(raw: Vec<RawCategory>) -> Result<Vec<Category>, ImportError> {
    let mut categories: Vec<Category> = Vec::with_capacity(raw.len() + 1);
    for (i, raw) in raw.into_iter().enumerate() {
        let id = match raw.id.filter(|id| !id.trim().is_empty()) {
            Some(id) => id,
            None => next_id("cat", |candidate| {
                Category::find_by_id(&categories, candidate).is_some()
            }),
        };
        let draft = CategoryDraft {
            name: raw.name,
            color: raw.color,
            icon: raw.icon,
            default_budget: raw.default_budget.as_ref().and_then(value_text),
        };
        let category = draft
            .validate(id, &categories)
            .map_err(|source| ImportError::InvalidCategory { index: i + 1, source })?;
        categories.push(category);
    }
    if !categories.iter().any(Category::is_sentinel) {
        categories.push(Category::uncategorized());
    }
    Ok(categories)
}

fn import_expenses(
    raw: Vec<RawExpense>,
    categories: &[Category],
    policy: OrphanPolicy,
) -> Result<Vec<Expense>, ImportError> {
    let mut expenses: Vec<Expense> = Vec::with_capacity(raw.len());
    for (i, raw) in raw.into_iter().enumerate() {
        let id = match raw.id.filter(|id| !id.trim().is_empty()) {
            Some(id) if !expenses.iter().any(|e| e.id == id) => id,
            _ => next_id("exp", |candidate| expenses.iter().any(|e| e.id == candidate)),
        };
        let draft = ExpenseDraft {
            amount: value_text(&raw.amount).unwrap_or_default(),
            description: raw.description,
            category: raw.category_id.or(raw.category).unwrap_or_default(),
            date: raw.date,
            notes: raw.notes,
            receipt_url: raw.receipt_url,
            status: raw.status,
        };
        let expense = draft
            .validate(id, categories, policy)
            .map_err(|source| ImportError::InvalidExpense { index: i + 1, source })?;
        expenses.push(expense);
    }
    Ok(expenses)
}

fn import_budgets(
    raw: Option<RawBudgets>,
    categories: &[Category],
) -> Result<Budgets, ImportError> {
    let listed = match raw {
        None => Vec::new(),
        Some(RawBudgets::Keyed(map)) => map.into_values().collect(),
        Some(RawBudgets::Listed(list)) => list,
    };

    let mut budgets = Budgets::new();
    for (i, budget) in listed.into_iter().enumerate() {
        if budget.limit_amount < Decimal::ZERO {
            return Err(ImportError::InvalidBudget {
                index: i + 1,
                source: ValidationError::NegativeBudget(budget.limit_amount),
            });
        }
        let Some(category) = Category::resolve(categories, &budget.category_id) else {
            warn!(category = %budget.category_id, "Dropped budget for unknown category");
            continue;
        };
        budgets.insert(
            category.id.clone(),
            Budget::new(category.id.clone(), budget.limit_amount, budget.period),
        );
    }
    Ok(budgets)
}

/// Numbers and strings both carry amounts in browser exports.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "backup_tests.rs"]
mod tests;
