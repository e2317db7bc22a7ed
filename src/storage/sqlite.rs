use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;

use super::{schema, BlobKey, Storage};

/// Blob storage in a single SQLite key/value table.
pub(crate) struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut storage = Self { conn };
        storage.migrate().context("Database migration failed")?;
        Ok(storage)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut storage = Self { conn };
        storage.migrate()?;
        Ok(storage)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    #[cfg(test)]
    pub(crate) fn schema_version(&self) -> Result<i32> {
        Ok(self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })?)
    }
}

impl Storage for SqliteStorage {
    fn load(&self, key: BlobKey) -> Result<Option<String>> {
        let result = self.conn.query_row(
            "SELECT value FROM blobs WHERE key = ?1",
            params![key.as_str()],
            |row| row.get(0),
        );
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read '{}'", key.as_str())),
        }
    }

    fn save(&mut self, key: BlobKey, value: &str) -> Result<()> {
        write_blob(&self.conn, key, value)
    }

    fn save_all(&mut self, blobs: &[(BlobKey, &str)]) -> Result<()> {
        let tx = self.conn.transaction()?;
        for &(key, value) in blobs {
            write_blob(&tx, key, value)?;
        }
        tx.commit().context("Failed to commit stored data")?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.conn
            .execute("DELETE FROM blobs", [])
            .context("Failed to clear stored data")?;
        Ok(())
    }
}

fn write_blob(conn: &Connection, key: BlobKey, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO blobs (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
        params![key.as_str(), value, chrono::Utc::now().to_rfc3339()],
    )
    .with_context(|| format!("Failed to write '{}'", key.as_str()))?;
    Ok(())
}
