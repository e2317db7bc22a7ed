//! Typed errors raised at the ingestion boundary.
//!
//! Everything past validation works on well-formed values, so these are the
//! only failures a caller is expected to match on. Plumbing errors (storage,
//! file access) travel as `anyhow::Error` and may wrap one of these.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Amount is required")]
    MissingAmount,

    #[error("Amount '{0}' is not a number")]
    InvalidAmount(String),

    #[error("Amount must be greater than zero (got {0})")]
    NonPositiveAmount(Decimal),

    #[error("Description is required")]
    MissingDescription,

    #[error("Date is required")]
    MissingDate,

    #[error("Date '{0}' is not a valid calendar date")]
    InvalidDate(String),

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Category name is required")]
    MissingCategoryName,

    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),

    #[error("Color '{0}' is not a #RRGGBB hex color")]
    InvalidColor(String),

    #[error("Budget limit must not be negative (got {0})")]
    NegativeBudget(Decimal),

    #[error("Unknown status '{0}' (expected pending or completed)")]
    InvalidStatus(String),

    #[error("Category '{name}' is still used by {count} expense(s)")]
    CategoryInUse { name: String, count: usize },

    #[error("The '{0}' category cannot be removed")]
    ProtectedCategory(String),

    #[error("Unknown setting '{0}'")]
    UnknownSetting(String),

    #[error("Invalid value '{value}' for setting '{key}'")]
    InvalidSetting { key: String, value: String },
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Malformed export file: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Export file must contain a JSON object")]
    NotAnObject,

    #[error("Export file is missing the '{0}' key")]
    MissingKey(&'static str),

    #[error("Invalid '{key}' data: {source}")]
    InvalidSection {
        key: &'static str,
        source: serde_json::Error,
    },

    #[error("Category #{index}: {source}")]
    InvalidCategory {
        index: usize,
        source: ValidationError,
    },

    #[error("Expense #{index}: {source}")]
    InvalidExpense {
        index: usize,
        source: ValidationError,
    },

    #[error("Budget #{index}: {source}")]
    InvalidBudget {
        index: usize,
        source: ValidationError,
    },

    #[error("Settings: {0}")]
    InvalidSettings(#[source] ValidationError),
}
