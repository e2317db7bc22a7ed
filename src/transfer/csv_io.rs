use anyhow::{Context, Result};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

use crate::models::{Category, Expense, ExpenseDraft};
use crate::parse::{parse_amount, parse_date};

const HEADER: [&str; 4] = ["Date", "Description", "Category", "Amount"];

/// One line of an expense CSV, still as text. Parsing happens when the row
/// is turned into a draft and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CsvRow {
    pub(crate) date: String,
    pub(crate) description: String,
    pub(crate) category: String,
    pub(crate) amount: String,
}

impl CsvRow {
    pub(crate) fn to_draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            amount: self.amount.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            date: self.date.clone(),
            ..Default::default()
        }
    }
}

/// Write `Date,Description,Category,Amount` rows, categories by name.
pub(crate) fn write_csv<W: Write>(
    writer: W,
    expenses: &[&Expense],
    categories: &[Category],
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER).context("Failed to write CSV header")?;
    for expense in expenses {
        wtr.write_record([
            expense.date.format("%Y-%m-%d").to_string(),
            expense.description.clone(),
            Category::name_for(categories, &expense.category_id).to_string(),
            expense.amount.to_string(),
        ])
        .with_context(|| format!("Failed to write expense '{}'", expense.id))?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(())
}

pub(crate) fn export_csv(path: &Path, expenses: &[&Expense], categories: &[Category]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    write_csv(file, expenses, categories)?;
    info!(rows = expenses.len(), path = %path.display(), "Exported CSV");
    Ok(())
}

/// Read expense rows. A header line is detected and used to locate the
/// columns; without one the columns are taken in export order.
pub(crate) fn read_csv<R: Read>(reader: R) -> Result<Vec<CsvRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result.context("Failed to read CSV record")?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        records.push(record.iter().map(str::to_string).collect());
    }

    let Some(first) = records.first() else {
        return Ok(Vec::new());
    };

    // Headers don't parse as dates or amounts
    let looks_like_header = first
        .iter()
        .all(|field| parse_amount(field).is_err() && parse_date(field).is_err());
    let columns = if looks_like_header {
        let columns = Columns::from_header(first);
        records.remove(0);
        columns
    } else {
        Columns::default()
    };

    let rows = records
        .iter()
        .map(|record| columns.row(record))
        .filter(|row| !row.date.is_empty())
        .collect();
    Ok(rows)
}

pub(crate) fn import_csv(path: &Path) -> Result<Vec<CsvRow>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    let rows = read_csv(file)?;
    info!(rows = rows.len(), path = %path.display(), "Read CSV");
    Ok(rows)
}

struct Columns {
    date: usize,
    description: usize,
    category: usize,
    amount: usize,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            date: 0,
            description: 1,
            category: 2,
            amount: 3,
        }
    }
}

impl Columns {
    fn from_header(header: &[String]) -> Self {
        let defaults = Self::default();
        let find = |names: &[&str], fallback: usize| {
            header
                .iter()
                .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
                .unwrap_or(fallback)
        };
        Self {
            date: find(&["date"], defaults.date),
            description: find(&["description", "memo", "payee"], defaults.description),
            category: find(&["category"], defaults.category),
            amount: find(&["amount", "total"], defaults.amount),
        }
    }

    fn row(&self, record: &[String]) -> CsvRow {
        let field = |i: usize| record.get(i).cloned().unwrap_or_default();
        CsvRow {
            date: field(self.date),
            description: field(self.description),
            category: field(self.category),
            amount: field(self.amount),
        }
    }
}

#[cfg(test)]
#[path = "csv_io_tests.rs"]
mod tests;
