mod args;
mod error;
mod format;
mod models;
mod parse;
mod report;
mod run;
mod storage;
mod store;
mod transfer;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use args::Cli;
use storage::SqliteStorage;
use store::ExpenseStore;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let db_path = match cli.db {
        Some(path) => path,
        None => get_db_path()?,
    };
    let storage = SqliteStorage::open(&db_path)?;
    let mut store = ExpenseStore::open(storage)
        .with_context(|| format!("Failed to load data from {}", db_path.display()))?;

    run::as_cli(cli.command, &mut store)
}

fn get_db_path() -> Result<std::path::PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "spendboard", "Spendboard")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("spendboard.db"))
}
