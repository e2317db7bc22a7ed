use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    #[default]
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" | "m" => Some(Self::Monthly),
            "yearly" | "year" | "annual" | "y" => Some(Self::Yearly),
            _ => None,
        }
    }
}

impl std::fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A spending limit for one category. Display only, never enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    #[serde(alias = "categoryId")]
    pub category_id: String,
    #[serde(alias = "amount")]
    pub limit_amount: Decimal,
    #[serde(default)]
    pub period: BudgetPeriod,
}

impl Budget {
    pub fn new(category_id: String, limit_amount: Decimal, period: BudgetPeriod) -> Self {
        Self {
            category_id,
            limit_amount,
            period,
        }
    }
}

/// Budgets keyed by category id.
pub type Budgets = BTreeMap<String, Budget>;
