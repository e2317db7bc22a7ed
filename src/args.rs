//! CLI argument definitions using clap.
//!
//! The command implementations live in the `run` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::Settings;
use crate::report::Timeframe;
use crate::store::{SortKey, SortOrder};

/// Spendboard - Track where the money goes
#[derive(Parser)]
#[command(name = "spendboard")]
#[command(about = "Local-only personal expense dashboard", long_about = None)]
#[command(version)]
pub(crate) struct Cli {
    /// Database path (defaults to the platform data directory)
    #[arg(long, env = "SPENDBOARD_DB", global = true)]
    pub(crate) db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Record a new expense
    Add {
        /// Amount spent, e.g. 12.50 or $1,200
        amount: String,
        /// What it was for
        description: String,
        /// Category name or id
        #[arg(short, long)]
        category: String,
        /// Date of the expense (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        receipt_url: Option<String>,
        /// pending or completed
        #[arg(long)]
        status: Option<String>,
    },

    /// Change fields of an existing expense
    Edit {
        /// Expense ID
        id: String,
        #[command(flatten)]
        fields: EditFields,
    },

    /// Delete one or more expenses
    Delete {
        /// Expense IDs
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// List expenses with filters, sorting and paging
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Sort field
        #[arg(long, value_enum, default_value = "date")]
        sort: SortKey,
        /// Sort direction
        #[arg(long, value_enum, default_value = "desc")]
        order: SortOrder,
        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Show one expense in full
    Show {
        /// Expense ID
        id: String,
    },

    /// Show the most recent expenses
    Recent {
        /// How many to show (defaults to the recent_count setting)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Totals for all time, this month and last month
    Summary,

    /// Total, count, average and top category
    Insights {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Spending over time
    Trend {
        #[arg(short, long, value_enum, default_value = "month")]
        timeframe: Timeframe,
    },

    /// Share of spending per category
    Distribution {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Budget tracking (show, set, remove)
    Budgets {
        #[command(subcommand)]
        action: Option<BudgetsAction>,
    },

    /// Manage categories (list, add, edit, delete)
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Project monthly spending forward
    Forecast {
        /// Months to project, at most 120 (defaults to the forecast_months setting)
        #[arg(
            short,
            long,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(Settings::MAX_FORECAST_MONTHS))
        )]
        months: Option<u32>,
        /// Monthly growth as a fraction, e.g. 0.02
        #[arg(short, long)]
        growth: Option<String>,
    },

    /// Export all data as JSON
    Export {
        /// Output file (stdout if omitted)
        path: Option<PathBuf>,
    },

    /// Replace all data with a JSON export
    Import {
        /// JSON file written by `export`
        path: PathBuf,
        /// Move expenses with unknown categories to Uncategorized instead of failing
        #[arg(long)]
        reassign: bool,
    },

    /// Export the filtered expense list as CSV
    ExportCsv {
        /// Output file
        #[arg(default_value = "expenses.csv")]
        path: PathBuf,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Add expenses from a CSV file
    ImportCsv {
        /// CSV file with Date, Description, Category and Amount columns
        path: PathBuf,
        /// Move rows with unknown categories to Uncategorized instead of failing
        #[arg(long)]
        reassign: bool,
    },

    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },

    /// Delete all stored data
    Clear {
        /// Confirm the deletion
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Filters shared by the list, report and export commands.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct FilterArgs {
    /// Text to look for in descriptions
    #[arg(short, long)]
    pub(crate) search: Option<String>,
    /// Category name or id
    #[arg(short, long)]
    pub(crate) category: Option<String>,
    /// Only this month (YYYY-MM)
    #[arg(short, long)]
    pub(crate) month: Option<String>,
    /// Earliest date, inclusive
    #[arg(long)]
    pub(crate) from: Option<String>,
    /// Latest date, inclusive
    #[arg(long)]
    pub(crate) to: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub(crate) struct EditFields {
    #[arg(short, long)]
    pub(crate) amount: Option<String>,
    #[arg(long)]
    pub(crate) description: Option<String>,
    #[arg(short, long)]
    pub(crate) category: Option<String>,
    #[arg(short, long)]
    pub(crate) date: Option<String>,
    /// Pass an empty string to clear
    #[arg(long)]
    pub(crate) notes: Option<String>,
    /// Pass an empty string to clear
    #[arg(long)]
    pub(crate) receipt_url: Option<String>,
    #[arg(long)]
    pub(crate) status: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum BudgetsAction {
    /// Spending against each budget (default)
    Show,
    /// Set a category's budget
    Set {
        /// Category name or id
        category: String,
        /// Limit amount
        amount: String,
        /// monthly or yearly
        #[arg(short, long, default_value = "monthly")]
        period: String,
    },
    /// Remove a category's explicit budget
    Remove {
        /// Category name or id
        category: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum CategoriesAction {
    /// List categories (default)
    List,
    /// Add a category
    Add {
        name: String,
        /// Hex color, e.g. #FF6B6B
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        /// Default monthly budget
        #[arg(long)]
        budget: Option<String>,
    },
    /// Edit a category
    Edit {
        /// Category name or id
        category: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        /// Default monthly budget, empty to clear
        #[arg(long)]
        budget: Option<String>,
    },
    /// Delete a category
    Delete {
        /// Category name or id
        category: String,
        /// Move its expenses to Uncategorized instead of refusing
        #[arg(long)]
        reassign: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum SettingsAction {
    /// Show all settings (default)
    Show,
    /// Change a setting
    Set { key: String, value: String },
}
