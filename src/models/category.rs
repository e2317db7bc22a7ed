use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::parse::parse_amount;

/// Id of the sentinel category that orphaned expenses are moved to.
pub const UNCATEGORIZED_ID: &str = "uncategorized";
pub const UNCATEGORIZED_NAME: &str = "Uncategorized";
const UNCATEGORIZED_COLOR: &str = "#9CA3AF";

pub const DEFAULT_COLOR: &str = "#000000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Limit used by budget tracking when no explicit budget is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_budget: Option<Decimal>,
}

impl Category {
    pub fn new(id: String, name: String, color: String) -> Self {
        Self {
            id,
            name,
            color,
            icon: None,
            default_budget: None,
        }
    }

    pub fn uncategorized() -> Self {
        Self::new(
            UNCATEGORIZED_ID.into(),
            UNCATEGORIZED_NAME.into(),
            UNCATEGORIZED_COLOR.into(),
        )
    }

    /// The seed list written on first start.
    pub fn defaults() -> Vec<Category> {
        let seeds: [(&str, &str, &str, i64); 5] = [
            ("1", "Food", "#FF6B6B", 500),
            ("2", "Transportation", "#4ECDC4", 300),
            ("3", "Entertainment", "#45B7D1", 200),
            ("4", "Shopping", "#96CEB4", 400),
            ("5", "Bills", "#FFEEAD", 1000),
        ];
        let mut categories: Vec<Category> = seeds
            .iter()
            .map(|(id, name, color, budget)| Category {
                default_budget: Some(Decimal::from(*budget)),
                ..Category::new((*id).into(), (*name).into(), (*color).into())
            })
            .collect();
        categories.push(Category::uncategorized());
        categories
    }

    pub fn is_sentinel(&self) -> bool {
        self.id == UNCATEGORIZED_ID
    }

    /// Find a category by name (case-insensitive) in a slice.
    pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
        let lower = name.trim().to_lowercase();
        categories.iter().find(|c| c.name.to_lowercase() == lower)
    }

    /// Find a category by ID in a slice.
    pub fn find_by_id<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
        categories.iter().find(|c| c.id == id)
    }

    /// Resolve a user-supplied reference: exact id first, then name.
    pub fn resolve<'a>(categories: &'a [Category], key: &str) -> Option<&'a Category> {
        Self::find_by_id(categories, key.trim()).or_else(|| Self::find_by_name(categories, key))
    }

    /// Display name for a category id, falling back to the raw id for orphans.
    pub fn name_for<'a>(categories: &'a [Category], id: &'a str) -> &'a str {
        Self::find_by_id(categories, id)
            .map(|c| c.name.as_str())
            .unwrap_or(id)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Raw category fields from a form or the command line.
#[derive(Debug, Clone, Default)]
pub struct CategoryDraft {
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub default_budget: Option<String>,
}

impl CategoryDraft {
    /// Validate against the existing table. `id` is the id the category
    /// will carry; a category may keep its own name when edited.
    pub fn validate(&self, id: String, existing: &[Category]) -> Result<Category, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingCategoryName);
        }
        if let Some(other) = Category::find_by_name(existing, name) {
            if other.id != id {
                return Err(ValidationError::DuplicateCategory(name.to_string()));
            }
        }

        let color = match self.color.as_deref() {
            Some(c) => validate_color(c)?,
            None => DEFAULT_COLOR.to_string(),
        };

        let default_budget = match self.default_budget.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let limit = parse_amount(raw)?;
                if limit < Decimal::ZERO {
                    return Err(ValidationError::NegativeBudget(limit));
                }
                Some(limit)
            }
        };

        Ok(Category {
            id,
            name: name.to_string(),
            color,
            icon: self
                .icon
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
            default_budget,
        })
    }

    /// Seed a draft from an existing category so partial edits keep the rest.
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            color: Some(category.color.clone()),
            icon: category.icon.clone(),
            default_budget: category.default_budget.map(|d| d.to_string()),
        }
    }
}

/// Normalize a `#RRGGBB` color to upper case.
pub(crate) fn validate_color(color: &str) -> Result<String, ValidationError> {
    let trimmed = color.trim();
    let valid = Regex::new("^#[0-9A-Fa-f]{6}$").is_ok_and(|re| re.is_match(trimmed));
    if valid {
        Ok(trimmed.to_uppercase())
    } else {
        Err(ValidationError::InvalidColor(trimmed.to_string()))
    }
}
