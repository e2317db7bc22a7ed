#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::error::ValidationError;

fn draft(amount: &str, description: &str, category: &str, date: &str) -> ExpenseDraft {
    ExpenseDraft {
        amount: amount.into(),
        description: description.into(),
        category: category.into(),
        date: date.into(),
        ..Default::default()
    }
}

fn validate(d: &ExpenseDraft) -> Result<Expense, ValidationError> {
    d.validate("exp-1".into(), &Category::defaults(), OrphanPolicy::Reject)
}

// ── ExpenseDraft ──────────────────────────────────────────────

#[test]
fn test_valid_draft() {
    let expense = validate(&draft("12.50", "Lunch", "Food", "2024-01-15")).unwrap();
    assert_eq!(expense.id, "exp-1");
    assert_eq!(expense.amount, dec!(12.50));
    assert_eq!(expense.description, "Lunch");
    assert_eq!(expense.category_id, "1");
    assert_eq!(expense.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    assert!(expense.notes.is_none());
    assert!(expense.status.is_none());
}

#[test]
fn test_category_resolved_by_id_or_name() {
    let by_id = validate(&draft("5", "Bus", "2", "2024-01-15")).unwrap();
    let by_name = validate(&draft("5", "Bus", "transportation", "2024-01-15")).unwrap();
    assert_eq!(by_id.category_id, "2");
    assert_eq!(by_name.category_id, "2");
}

#[test]
fn test_non_numeric_amount_rejected() {
    let err = validate(&draft("abc", "Lunch", "Food", "2024-01-15")).unwrap_err();
    assert_eq!(err, ValidationError::InvalidAmount("abc".into()));
}

#[test]
fn test_zero_and_negative_amounts_rejected() {
    let err = validate(&draft("0", "Lunch", "Food", "2024-01-15")).unwrap_err();
    assert_eq!(err, ValidationError::NonPositiveAmount(Decimal::ZERO));
    let err = validate(&draft("-3", "Lunch", "Food", "2024-01-15")).unwrap_err();
    assert_eq!(err, ValidationError::NonPositiveAmount(dec!(-3)));
}

#[test]
fn test_blank_description_rejected() {
    let err = validate(&draft("5", "   ", "Food", "2024-01-15")).unwrap_err();
    assert_eq!(err, ValidationError::MissingDescription);
}

#[test]
fn test_invalid_date_rejected() {
    let err = validate(&draft("5", "Lunch", "Food", "2024-13-01")).unwrap_err();
    assert_eq!(err, ValidationError::InvalidDate("2024-13-01".into()));
}

#[test]
fn test_unknown_category_rejected() {
    let err = validate(&draft("5", "Lunch", "Groceries", "2024-01-15")).unwrap_err();
    assert_eq!(err, ValidationError::UnknownCategory("Groceries".into()));
}

#[test]
fn test_unknown_category_reassigned() {
    let expense = draft("5", "Lunch", "Groceries", "2024-01-15")
        .validate("exp-1".into(), &Category::defaults(), OrphanPolicy::Reassign)
        .unwrap();
    assert_eq!(expense.category_id, UNCATEGORIZED_ID);
}

#[test]
fn test_optional_fields_trimmed() {
    let mut d = draft("5", "  Lunch  ", "Food", "2024-01-15");
    d.notes = Some("   ".into());
    d.receipt_url = Some(" https://example.com/r.png ".into());
    d.status = Some("Pending".into());
    let expense = validate(&d).unwrap();
    assert_eq!(expense.description, "Lunch");
    assert!(expense.notes.is_none());
    assert_eq!(expense.receipt_url.as_deref(), Some("https://example.com/r.png"));
    assert_eq!(expense.status, Some(ExpenseStatus::Pending));
}

#[test]
fn test_invalid_status_rejected() {
    let mut d = draft("5", "Lunch", "Food", "2024-01-15");
    d.status = Some("refunded".into());
    assert_eq!(
        validate(&d).unwrap_err(),
        ValidationError::InvalidStatus("refunded".into())
    );
}

#[test]
fn test_status_defaults_to_completed() {
    let expense = validate(&draft("5", "Lunch", "Food", "2024-01-15")).unwrap();
    assert_eq!(expense.status(), ExpenseStatus::Completed);
    assert_eq!(expense.month_key(), "2024-01");
}

#[test]
fn test_draft_from_expense_revalidates_unchanged() {
    let mut d = draft("19.99", "Cinema", "Entertainment", "2024-02-29");
    d.notes = Some("with friends".into());
    d.status = Some("pending".into());
    let expense = validate(&d).unwrap();
    let again = validate(&ExpenseDraft::from_expense(&expense)).unwrap();
    assert_eq!(expense, again);
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_default_categories() {
    let cats = Category::defaults();
    assert_eq!(cats.len(), 6);
    assert!(cats.iter().any(|c| c.is_sentinel()));
    let food = Category::find_by_name(&cats, "food").unwrap();
    assert_eq!(food.default_budget, Some(dec!(500)));
    assert_eq!(format!("{food}"), "Food");
}

#[test]
fn test_category_name_for_orphan() {
    let cats = Category::defaults();
    assert_eq!(Category::name_for(&cats, "3"), "Entertainment");
    assert_eq!(Category::name_for(&cats, "cat-gone"), "cat-gone");
}

#[test]
fn test_category_draft_valid() {
    let d = CategoryDraft {
        name: " Travel ".into(),
        color: Some("#a1b2c3".into()),
        icon: Some("plane".into()),
        default_budget: Some("250".into()),
    };
    let cat = d.validate("cat-1".into(), &Category::defaults()).unwrap();
    assert_eq!(cat.name, "Travel");
    assert_eq!(cat.color, "#A1B2C3");
    assert_eq!(cat.icon.as_deref(), Some("plane"));
    assert_eq!(cat.default_budget, Some(dec!(250)));
}

#[test]
fn test_category_draft_defaults_color() {
    let d = CategoryDraft {
        name: "Travel".into(),
        ..Default::default()
    };
    let cat = d.validate("cat-1".into(), &[]).unwrap();
    assert_eq!(cat.color, "#000000");
    assert!(cat.default_budget.is_none());
}

#[test]
fn test_category_draft_rejects_bad_input() {
    let cats = Category::defaults();
    let blank = CategoryDraft::default();
    assert_eq!(
        blank.validate("cat-1".into(), &cats).unwrap_err(),
        ValidationError::MissingCategoryName
    );

    let dupe = CategoryDraft {
        name: "FOOD".into(),
        ..Default::default()
    };
    assert_eq!(
        dupe.validate("cat-1".into(), &cats).unwrap_err(),
        ValidationError::DuplicateCategory("FOOD".into())
    );

    let bad_color = CategoryDraft {
        name: "Travel".into(),
        color: Some("red".into()),
        ..Default::default()
    };
    assert_eq!(
        bad_color.validate("cat-1".into(), &cats).unwrap_err(),
        ValidationError::InvalidColor("red".into())
    );
}

#[test]
fn test_category_rename_keeps_own_name() {
    let cats = Category::defaults();
    let food = Category::find_by_name(&cats, "Food").unwrap();
    let d = CategoryDraft::from_category(food);
    let same = d.validate(food.id.clone(), &cats).unwrap();
    assert_eq!(&same, food);
}

// ── Budget ────────────────────────────────────────────────────

#[test]
fn test_budget_period_parse() {
    assert_eq!(BudgetPeriod::parse("monthly"), Some(BudgetPeriod::Monthly));
    assert_eq!(BudgetPeriod::parse("YEARLY"), Some(BudgetPeriod::Yearly));
    assert_eq!(BudgetPeriod::parse("weekly"), None);
    assert_eq!(BudgetPeriod::default(), BudgetPeriod::Monthly);
}

#[test]
fn test_budget_accepts_browser_field_names() {
    let budget: Budget =
        serde_json::from_str(r#"{"categoryId":"1","amount":450,"period":"yearly"}"#).unwrap();
    assert_eq!(budget.category_id, "1");
    assert_eq!(budget.limit_amount, dec!(450));
    assert_eq!(budget.period, BudgetPeriod::Yearly);
}

// ── Settings ──────────────────────────────────────────────────

#[test]
fn test_settings_defaults_fill_missing_fields() {
    let settings: Settings = serde_json::from_str(r#"{"page_size": 25}"#).unwrap();
    assert_eq!(settings.page_size, 25);
    assert_eq!(settings.currency_symbol, "$");
    assert_eq!(settings.forecast_growth_rate, dec!(0.02));
}

#[test]
fn test_settings_set() {
    let mut settings = Settings::default();
    settings.set("currency_symbol", "€").unwrap();
    settings.set("forecast_months", "12").unwrap();
    settings.set("forecast_growth_rate", "0.05").unwrap();
    assert_eq!(settings.currency_symbol, "€");
    assert_eq!(settings.forecast_months, 12);
    assert_eq!(settings.forecast_growth_rate, dec!(0.05));
}

#[test]
fn test_settings_set_rejects_bad_values() {
    let mut settings = Settings::default();
    assert_eq!(
        settings.set("page_size", "0").unwrap_err(),
        ValidationError::InvalidSetting {
            key: "page_size".into(),
            value: "0".into()
        }
    );
    assert_eq!(
        settings.set("theme", "dark").unwrap_err(),
        ValidationError::UnknownSetting("theme".into())
    );
}

#[test]
fn test_settings_entries_cover_keys() {
    let entries = Settings::default().entries();
    let keys: Vec<&str> = entries.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, Settings::KEYS);
}

#[test]
fn test_settings_forecast_months_bounded() {
    let mut settings = Settings::default();
    settings.set("forecast_months", "120").unwrap();
    assert!(settings.set("forecast_months", "121").is_err());
    assert!(settings.set("forecast_months", "0").is_err());
    assert!(settings.set("forecast_months", "4000000000").is_err());
    assert_eq!(settings.forecast_months, 120);
}

#[test]
fn test_settings_validate_whole_blob() {
    assert!(Settings::default().validate().is_ok());

    let settings: Settings =
        serde_json::from_str(r#"{"page_size": 0, "forecast_months": 4000000000}"#).unwrap();
    assert_eq!(
        settings.validate().unwrap_err(),
        ValidationError::InvalidSetting {
            key: "page_size".into(),
            value: "0".into()
        }
    );

    let settings = Settings {
        forecast_months: 500,
        ..Default::default()
    };
    assert_eq!(
        settings.validate().unwrap_err(),
        ValidationError::InvalidSetting {
            key: "forecast_months".into(),
            value: "500".into()
        }
    );
}
