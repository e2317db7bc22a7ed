mod data;
mod expenses;
mod manage;
mod reports;

use anyhow::Result;
use chrono::NaiveDate;

use crate::args::{BudgetsAction, CategoriesAction, Commands, FilterArgs, SettingsAction};
use crate::error::ValidationError;
use crate::models::{Category, Expense, OrphanPolicy};
use crate::parse::{parse_date, parse_month};
use crate::storage::Storage;
use crate::store::{ExpenseQuery, ExpenseStore};

pub(crate) fn as_cli<S: Storage>(command: Commands, store: &mut ExpenseStore<S>) -> Result<()> {
    match command {
        Commands::Add {
            amount,
            description,
            category,
            date,
            notes,
            receipt_url,
            status,
        } => {
            let draft = crate::models::ExpenseDraft {
                amount,
                description,
                category,
                date: date.unwrap_or_else(|| today().format("%Y-%m-%d").to_string()),
                notes,
                receipt_url,
                status,
            };
            expenses::cmd_add(store, &draft)
        }
        Commands::Edit { id, fields } => expenses::cmd_edit(store, &id, &fields),
        Commands::Delete { ids } => expenses::cmd_delete(store, &ids),
        Commands::List {
            filter,
            sort,
            order,
            page,
        } => {
            let mut query = build_query(&filter, store.categories())?;
            query.sort = sort;
            query.order = order;
            expenses::cmd_list(store, &query, page)
        }
        Commands::Show { id } => expenses::cmd_show(store, &id),
        Commands::Recent { count } => expenses::cmd_recent(store, count),
        Commands::Summary => reports::cmd_summary(store, today()),
        Commands::Insights { filter } => reports::cmd_insights(store, &filter),
        Commands::Trend { timeframe } => reports::cmd_trend(store, timeframe, today()),
        Commands::Distribution { filter } => reports::cmd_distribution(store, &filter),
        Commands::Budgets { action } => match action.unwrap_or(BudgetsAction::Show) {
            BudgetsAction::Show => reports::cmd_budgets(store, today()),
            BudgetsAction::Set {
                category,
                amount,
                period,
            } => manage::cmd_budget_set(store, &category, &amount, &period),
            BudgetsAction::Remove { category } => manage::cmd_budget_remove(store, &category),
        },
        Commands::Categories { action } => match action.unwrap_or(CategoriesAction::List) {
            CategoriesAction::List => manage::cmd_categories(store),
            CategoriesAction::Add {
                name,
                color,
                icon,
                budget,
            } => manage::cmd_category_add(store, name, color, icon, budget),
            CategoriesAction::Edit {
                category,
                name,
                color,
                icon,
                budget,
            } => manage::cmd_category_edit(store, &category, name, color, icon, budget),
            CategoriesAction::Delete { category, reassign } => {
                manage::cmd_category_delete(store, &category, policy(reassign))
            }
        },
        Commands::Forecast { months, growth } => {
            reports::cmd_forecast(store, months, growth.as_deref(), today())
        }
        Commands::Export { path } => data::cmd_export(store, path.as_deref()),
        Commands::Import { path, reassign } => data::cmd_import(store, &path, policy(reassign)),
        Commands::ExportCsv { path, filter } => data::cmd_export_csv(store, &path, &filter),
        Commands::ImportCsv { path, reassign } => {
            data::cmd_import_csv(store, &path, policy(reassign))
        }
        Commands::Settings { action } => match action.unwrap_or(SettingsAction::Show) {
            SettingsAction::Show => manage::cmd_settings(store),
            SettingsAction::Set { key, value } => manage::cmd_setting_set(store, &key, &value),
        },
        Commands::Clear { yes } => data::cmd_clear(store, yes),
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn policy(reassign: bool) -> OrphanPolicy {
    if reassign {
        OrphanPolicy::Reassign
    } else {
        OrphanPolicy::Reject
    }
}

/// Turn command-line filters into a query, resolving the category and
/// checking the dates up front.
fn build_query(filter: &FilterArgs, categories: &[Category]) -> Result<ExpenseQuery> {
    let category_id = match filter.category.as_deref() {
        Some(key) => Some(
            Category::resolve(categories, key)
                .map(|c| c.id.clone())
                .ok_or_else(|| ValidationError::UnknownCategory(key.trim().to_string()))?,
        ),
        None => None,
    };
    let month = match filter.month.as_deref() {
        Some(raw) => Some(parse_month(raw)?.format("%Y-%m").to_string()),
        None => None,
    };
    Ok(ExpenseQuery {
        search: filter.search.clone(),
        category_id,
        from: filter.from.as_deref().map(parse_date).transpose()?,
        to: filter.to.as_deref().map(parse_date).transpose()?,
        month,
        ..Default::default()
    })
}

/// The expenses matching `filter`, owned so report functions can take a slice.
fn filtered<S: Storage>(store: &ExpenseStore<S>, filter: &FilterArgs) -> Result<Vec<Expense>> {
    let query = build_query(filter, store.categories())?;
    Ok(store.query(&query).into_iter().cloned().collect())
}
