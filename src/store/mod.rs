//! The expense store: in-memory collections backed by a `Storage` port.
//!
//! Every mutation validates first, then rewrites the affected blob whole.
//! In-memory state only changes once the write has succeeded.

mod query;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ValidationError;
use crate::models::{
    Budget, BudgetPeriod, Budgets, Category, CategoryDraft, Expense, ExpenseDraft, OrphanPolicy,
    Settings, UNCATEGORIZED_ID,
};
use crate::storage::{BlobKey, Storage};
use crate::transfer::ExportDocument;

use query::newest_first;
pub(crate) use query::{paginate, ExpenseQuery, SortKey, SortOrder};

pub(crate) struct ExpenseStore<S: Storage> {
    storage: S,
    expenses: Vec<Expense>,
    categories: Vec<Category>,
    budgets: Budgets,
    settings: Settings,
}

impl<S: Storage> ExpenseStore<S> {
    /// Load every blob, seeding the default categories on first start.
    pub(crate) fn open(storage: S) -> Result<Self> {
        let expenses = load_blob(&storage, BlobKey::Expenses)?.unwrap_or_default();
        let categories = load_blob(&storage, BlobKey::Categories)?.unwrap_or_default();
        let budgets = load_blob(&storage, BlobKey::Budgets)?.unwrap_or_default();
        let settings = load_blob(&storage, BlobKey::Settings)?.unwrap_or_default();

        let mut store = Self {
            storage,
            expenses,
            categories,
            budgets,
            settings,
        };
        store.ensure_categories()?;
        Ok(store)
    }

    fn ensure_categories(&mut self) -> Result<()> {
        let seeded = with_sentinel(self.categories.clone());
        if seeded != self.categories {
            self.commit_categories(seeded)?;
        }
        Ok(())
    }

    // ── Expenses ──────────────────────────────────────────────

    pub(crate) fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub(crate) fn get(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub(crate) fn add_expense(&mut self, draft: &ExpenseDraft, policy: OrphanPolicy) -> Result<Expense> {
        let id = next_id("exp", |candidate| self.get(candidate).is_some());
        let expense = draft.validate(id, &self.categories, policy)?;
        let mut next = self.expenses.clone();
        next.push(expense.clone());
        self.commit_expenses(next)?;
        Ok(expense)
    }

    pub(crate) fn add_expenses(
        &mut self,
        drafts: &[ExpenseDraft],
        policy: OrphanPolicy,
    ) -> Result<Vec<Expense>> {
        let mut added = Vec::with_capacity(drafts.len());
        for (i, draft) in drafts.iter().enumerate() {
            let id = next_id("exp", |candidate| {
                self.get(candidate).is_some() || added.iter().any(|e: &Expense| e.id == candidate)
            });
            let expense = draft
                .validate(id, &self.categories, policy)
                .with_context(|| format!("Row {}", i + 1))?;
            added.push(expense);
        }
        let mut next = self.expenses.clone();
        next.extend(added.iter().cloned());
        self.commit_expenses(next)?;
        Ok(added)
    }

    pub(crate) fn update_expense(
        &mut self,
        id: &str,
        draft: &ExpenseDraft,
        policy: OrphanPolicy,
    ) -> Result<Expense> {
        let idx = self
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| anyhow::anyhow!("Expense '{id}' not found"))?;
        let expense = draft.validate(id.to_string(), &self.categories, policy)?;
        let mut next = self.expenses.clone();
        next[idx] = expense.clone();
        self.commit_expenses(next)?;
        Ok(expense)
    }

    /// Remove every expense whose id is listed. Returns how many were removed.
    pub(crate) fn delete_expenses(&mut self, ids: &[String]) -> Result<usize> {
        let next: Vec<Expense> = self
            .expenses
            .iter()
            .filter(|e| !ids.contains(&e.id))
            .cloned()
            .collect();
        let removed = self.expenses.len() - next.len();
        if removed > 0 {
            self.commit_expenses(next)?;
        }
        Ok(removed)
    }

    pub(crate) fn query(&self, query: &ExpenseQuery) -> Vec<&Expense> {
        query.apply(&self.expenses)
    }

    pub(crate) fn recent(&self, count: usize) -> Vec<&Expense> {
        let mut sorted = newest_first(&self.expenses);
        sorted.truncate(count);
        sorted
    }

    // ── Categories ────────────────────────────────────────────

    pub(crate) fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub(crate) fn add_category(&mut self, draft: &CategoryDraft) -> Result<Category> {
        let id = next_id("cat", |candidate| {
            Category::find_by_id(&self.categories, candidate).is_some()
        });
        let category = draft.validate(id, &self.categories)?;
        let mut next = self.categories.clone();
        next.push(category.clone());
        self.commit_categories(next)?;
        Ok(category)
    }

    /// Edit a category in place. Expenses keep pointing at it by id.
    pub(crate) fn update_category(&mut self, key: &str, draft: &CategoryDraft) -> Result<Category> {
        let id = self.resolve_category(key)?.id.clone();
        let category = draft.validate(id.clone(), &self.categories)?;
        let mut next = self.categories.clone();
        if let Some(slot) = next.iter_mut().find(|c| c.id == id) {
            *slot = category.clone();
        }
        self.commit_categories(next)?;
        Ok(category)
    }

    /// Delete a category. Its expenses are reassigned to the uncategorized
    /// sentinel or, under `Reject`, block the deletion. Returns how many
    /// expenses were moved.
    pub(crate) fn delete_category(&mut self, key: &str, policy: OrphanPolicy) -> Result<usize> {
        let category = self.resolve_category(key)?.clone();
        if category.is_sentinel() {
            return Err(ValidationError::ProtectedCategory(category.name).into());
        }

        let in_use = self
            .expenses
            .iter()
            .filter(|e| e.category_id == category.id)
            .count();
        if in_use > 0 && policy == OrphanPolicy::Reject {
            return Err(ValidationError::CategoryInUse {
                name: category.name,
                count: in_use,
            }
            .into());
        }

        let mut expenses = self.expenses.clone();
        for expense in expenses.iter_mut().filter(|e| e.category_id == category.id) {
            expense.category_id = UNCATEGORIZED_ID.to_string();
        }
        let mut categories = self.categories.clone();
        categories.retain(|c| c.id != category.id);
        let mut budgets = self.budgets.clone();
        let had_budget = budgets.remove(&category.id).is_some();

        let mut blobs = vec![(BlobKey::Categories, encode(BlobKey::Categories, &categories)?)];
        if in_use > 0 {
            blobs.push((BlobKey::Expenses, encode(BlobKey::Expenses, &expenses)?));
        }
        if had_budget {
            blobs.push((BlobKey::Budgets, encode(BlobKey::Budgets, &budgets)?));
        }
        self.write_blobs(&blobs)?;

        if in_use > 0 {
            warn!(
                category = %category.name,
                count = in_use,
                "Moved expenses of deleted category to uncategorized"
            );
        }
        self.expenses = expenses;
        self.categories = categories;
        self.budgets = budgets;
        Ok(in_use)
    }

    fn resolve_category(&self, key: &str) -> Result<&Category> {
        Category::resolve(&self.categories, key)
            .ok_or_else(|| ValidationError::UnknownCategory(key.trim().to_string()).into())
    }

    // ── Budgets ───────────────────────────────────────────────

    pub(crate) fn budgets(&self) -> &Budgets {
        &self.budgets
    }

    pub(crate) fn set_budget(
        &mut self,
        category: &str,
        limit: Decimal,
        period: BudgetPeriod,
    ) -> Result<Budget> {
        if limit < Decimal::ZERO {
            return Err(ValidationError::NegativeBudget(limit).into());
        }
        let id = self.resolve_category(category)?.id.clone();
        let budget = Budget::new(id.clone(), limit, period);
        let mut next = self.budgets.clone();
        next.insert(id, budget.clone());
        self.commit_budgets(next)?;
        Ok(budget)
    }

    /// Returns whether a budget was removed.
    pub(crate) fn remove_budget(&mut self, category: &str) -> Result<bool> {
        let id = self.resolve_category(category)?.id.clone();
        let mut next = self.budgets.clone();
        let removed = next.remove(&id).is_some();
        if removed {
            self.commit_budgets(next)?;
        }
        Ok(removed)
    }

    // ── Settings ──────────────────────────────────────────────

    pub(crate) fn settings(&self) -> &Settings {
        &self.settings
    }

    pub(crate) fn update_setting(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.settings.clone();
        next.set(key, value)?;
        let text = encode(BlobKey::Settings, &next)?;
        self.write_blobs(&[(BlobKey::Settings, text)])?;
        self.settings = next;
        Ok(())
    }

    // ── Whole-state operations ────────────────────────────────

    pub(crate) fn snapshot(&self) -> ExportDocument {
        ExportDocument {
            expenses: self.expenses.clone(),
            categories: self.categories.clone(),
            budgets: self.budgets.clone(),
            settings: self.settings.clone(),
        }
    }

    /// Overwrite all state with an already validated document. The four
    /// blobs are written in one batch, so a failed write changes nothing.
    pub(crate) fn replace_all(&mut self, document: ExportDocument) -> Result<()> {
        let categories = with_sentinel(document.categories);
        let blobs = [
            (BlobKey::Expenses, encode(BlobKey::Expenses, &document.expenses)?),
            (BlobKey::Categories, encode(BlobKey::Categories, &categories)?),
            (BlobKey::Budgets, encode(BlobKey::Budgets, &document.budgets)?),
            (BlobKey::Settings, encode(BlobKey::Settings, &document.settings)?),
        ];
        self.write_blobs(&blobs)?;

        self.expenses = document.expenses;
        self.categories = categories;
        self.budgets = document.budgets;
        self.settings = document.settings;
        info!(
            expenses = self.expenses.len(),
            categories = self.categories.len(),
            "Replaced all stored data"
        );
        Ok(())
    }

    /// Drop every blob and start over with the default categories.
    pub(crate) fn clear_all(&mut self) -> Result<()> {
        self.storage.clear()?;
        self.expenses.clear();
        self.categories.clear();
        self.budgets.clear();
        self.settings = Settings::default();
        self.ensure_categories()?;
        info!("Cleared all stored data");
        Ok(())
    }

    // ── Persistence ───────────────────────────────────────────

    fn commit_expenses(&mut self, next: Vec<Expense>) -> Result<()> {
        let text = encode(BlobKey::Expenses, &next)?;
        self.write_blobs(&[(BlobKey::Expenses, text)])?;
        self.expenses = next;
        Ok(())
    }

    fn commit_categories(&mut self, next: Vec<Category>) -> Result<()> {
        let text = encode(BlobKey::Categories, &next)?;
        self.write_blobs(&[(BlobKey::Categories, text)])?;
        self.categories = next;
        Ok(())
    }

    fn commit_budgets(&mut self, next: Budgets) -> Result<()> {
        let text = encode(BlobKey::Budgets, &next)?;
        self.write_blobs(&[(BlobKey::Budgets, text)])?;
        self.budgets = next;
        Ok(())
    }

    fn write_blobs(&mut self, blobs: &[(BlobKey, String)]) -> Result<()> {
        match blobs {
            [(key, text)] => self.storage.save(*key, text)?,
            _ => {
                let batch: Vec<(BlobKey, &str)> =
                    blobs.iter().map(|(key, text)| (*key, text.as_str())).collect();
                self.storage.save_all(&batch)?;
            }
        }
        for (key, text) in blobs {
            debug!(key = key.as_str(), bytes = text.len(), "Saved blob");
        }
        Ok(())
    }
}

/// Seed the defaults into an empty table and make sure the sentinel exists.
fn with_sentinel(mut categories: Vec<Category>) -> Vec<Category> {
    if categories.is_empty() {
        return Category::defaults();
    }
    if !categories.iter().any(Category::is_sentinel) {
        categories.push(Category::uncategorized());
    }
    categories
}

fn load_blob<S: Storage, T: DeserializeOwned>(storage: &S, key: BlobKey) -> Result<Option<T>> {
    let Some(text) = storage.load(key)? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&text)
        .with_context(|| format!("Stored '{}' data is unreadable", key.as_str()))?;
    Ok(Some(value))
}

fn encode<T: Serialize + ?Sized>(key: BlobKey, value: &T) -> Result<String> {
    serde_json::to_string(value).with_context(|| format!("Failed to serialize '{}'", key.as_str()))
}

/// Timestamp-derived id, suffixed when it would collide.
pub(crate) fn next_id(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    let base = format!("{prefix}-{}", chrono::Utc::now().timestamp_millis());
    if !taken(&base) {
        return base;
    }
    (1..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or(base)
}
