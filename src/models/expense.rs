use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::category::{Category, UNCATEGORIZED_ID};
use crate::error::ValidationError;
use crate::parse::{parse_amount, parse_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    Pending,
    Completed,
}

impl ExpenseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "completed" | "complete" | "done" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub amount: Decimal,
    pub description: String,
    pub category_id: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ExpenseStatus>,
}

impl Expense {
    /// Expenses without an explicit status are shown as completed.
    pub fn status(&self) -> ExpenseStatus {
        self.status.unwrap_or(ExpenseStatus::Completed)
    }

    /// `YYYY-MM` key of the month the expense falls in.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

/// What to do with a category reference that has no matching category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrphanPolicy {
    Reject,
    Reassign,
}

/// Raw, unvalidated expense fields as they come from a form, the command
/// line or an import file.
#[derive(Debug, Clone, Default)]
pub struct ExpenseDraft {
    pub amount: String,
    pub description: String,
    /// Category id or name.
    pub category: String,
    pub date: String,
    pub notes: Option<String>,
    pub receipt_url: Option<String>,
    pub status: Option<String>,
}

impl ExpenseDraft {
    /// Validate every field and resolve the category reference.
    pub fn validate(
        &self,
        id: String,
        categories: &[Category],
        policy: OrphanPolicy,
    ) -> Result<Expense, ValidationError> {
        let amount = parse_amount(&self.amount)?;
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(amount));
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingDescription);
        }

        let date = parse_date(&self.date)?;
        let category_id = resolve_category(&self.category, categories, policy)?;

        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                ExpenseStatus::parse(raw)
                    .ok_or_else(|| ValidationError::InvalidStatus(raw.to_string()))?,
            ),
        };

        Ok(Expense {
            id,
            amount,
            description: description.to_string(),
            category_id,
            date,
            notes: non_blank(self.notes.as_deref()),
            receipt_url: non_blank(self.receipt_url.as_deref()),
            status,
        })
    }

    /// Seed a draft from an existing expense so partial edits keep the rest.
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            amount: expense.amount.to_string(),
            description: expense.description.clone(),
            category: expense.category_id.clone(),
            date: expense.date.format("%Y-%m-%d").to_string(),
            notes: expense.notes.clone(),
            receipt_url: expense.receipt_url.clone(),
            status: expense.status.map(|s| s.as_str().to_string()),
        }
    }
}

fn resolve_category(
    reference: &str,
    categories: &[Category],
    policy: OrphanPolicy,
) -> Result<String, ValidationError> {
    let reference = reference.trim();
    if let Some(category) = Category::resolve(categories, reference) {
        return Ok(category.id.clone());
    }
    match policy {
        OrphanPolicy::Reject => Err(ValidationError::UnknownCategory(reference.to_string())),
        OrphanPolicy::Reassign => {
            warn!(category = reference, "Unknown category, filing under uncategorized");
            Ok(UNCATEGORIZED_ID.to_string())
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
