mod budget;
mod category;
mod expense;
mod settings;

pub use budget::{Budget, BudgetPeriod, Budgets};
pub use category::{Category, CategoryDraft, UNCATEGORIZED_ID, UNCATEGORIZED_NAME};
pub use expense::{Expense, ExpenseDraft, ExpenseStatus, OrphanPolicy};
pub use settings::Settings;

#[cfg(test)]
mod tests;
