use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// User preferences stored in the `settings` blob. Missing fields take
/// their defaults, so older or foreign blobs still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub currency_symbol: String,
    pub page_size: usize,
    pub recent_count: usize,
    pub forecast_months: u32,
    /// Per-month growth assumed by the forecast, as a fraction.
    pub forecast_growth_rate: Decimal,
    /// Budget usage above this percentage is flagged.
    pub budget_warning_percent: Decimal,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "$".into(),
            page_size: 10,
            recent_count: 5,
            forecast_months: 6,
            forecast_growth_rate: Decimal::new(2, 2),
            budget_warning_percent: Decimal::from(90),
        }
    }
}

impl Settings {
    pub const KEYS: &'static [&'static str] = &[
        "currency_symbol",
        "page_size",
        "recent_count",
        "forecast_months",
        "forecast_growth_rate",
        "budget_warning_percent",
    ];

    /// Current values as (key, rendered value) pairs, in `KEYS` order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("currency_symbol", self.currency_symbol.clone()),
            ("page_size", self.page_size.to_string()),
            ("recent_count", self.recent_count.to_string()),
            ("forecast_months", self.forecast_months.to_string()),
            ("forecast_growth_rate", self.forecast_growth_rate.to_string()),
            ("budget_warning_percent", self.budget_warning_percent.to_string()),
        ]
    }

    /// Longest projection `forecast` will be asked for.
    pub const MAX_FORECAST_MONTHS: u32 = 120;

    /// Apply one `key = value` update. The value is range-checked the same
    /// way `validate` checks a whole settings blob.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ValidationError> {
        let invalid = || ValidationError::InvalidSetting {
            key: key.to_string(),
            value: value.to_string(),
        };
        let value = value.trim();
        let mut next = self.clone();
        match key {
            "currency_symbol" => next.currency_symbol = value.to_string(),
            "page_size" => next.page_size = value.parse().map_err(|_| invalid())?,
            "recent_count" => next.recent_count = value.parse().map_err(|_| invalid())?,
            "forecast_months" => next.forecast_months = value.parse().map_err(|_| invalid())?,
            "forecast_growth_rate" => {
                next.forecast_growth_rate = Decimal::from_str(value).map_err(|_| invalid())?;
            }
            "budget_warning_percent" => {
                next.budget_warning_percent = Decimal::from_str(value).map_err(|_| invalid())?;
            }
            other => return Err(ValidationError::UnknownSetting(other.to_string())),
        }
        if !next.in_range(key) {
            return Err(invalid());
        }
        *self = next;
        Ok(())
    }

    /// Reject a settings blob with any value `set` would refuse.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (key, value) in self.entries() {
            if !self.in_range(key) {
                return Err(ValidationError::InvalidSetting {
                    key: key.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    fn in_range(&self, key: &str) -> bool {
        match key {
            "currency_symbol" => !self.currency_symbol.trim().is_empty(),
            "page_size" => self.page_size > 0,
            "recent_count" => self.recent_count > 0,
            "forecast_months" => (1..=Self::MAX_FORECAST_MONTHS).contains(&self.forecast_months),
            "budget_warning_percent" => self.budget_warning_percent >= Decimal::ZERO,
            _ => true,
        }
    }
}
