//! Persistence port for the expense store.
//!
//! State is a handful of named text blobs, each read and written whole.
//! Nothing here knows what the blobs contain.

#[cfg(test)]
mod memory;
mod schema;
mod sqlite;

use anyhow::Result;

#[cfg(test)]
pub(crate) use memory::MemoryStorage;
pub(crate) use sqlite::SqliteStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum BlobKey {
    Expenses,
    Categories,
    Budgets,
    Settings,
}

impl BlobKey {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Expenses => "expenses",
            Self::Categories => "categories",
            Self::Budgets => "budgets",
            Self::Settings => "settings",
        }
    }
}

pub(crate) trait Storage {
    /// Read a blob. `None` when it has never been written.
    fn load(&self, key: BlobKey) -> Result<Option<String>>;

    /// Replace a blob wholesale.
    fn save(&mut self, key: BlobKey, value: &str) -> Result<()>;

    /// Replace several blobs at once. Either every blob is written or none is.
    fn save_all(&mut self, blobs: &[(BlobKey, &str)]) -> Result<()>;

    /// Drop every blob.
    fn clear(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests;
