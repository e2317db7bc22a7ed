#![allow(clippy::unwrap_used)]

use super::*;

fn exercise(storage: &mut dyn Storage) {
    assert_eq!(storage.load(BlobKey::Expenses).unwrap(), None);

    storage.save(BlobKey::Expenses, "[]").unwrap();
    storage.save(BlobKey::Settings, "{}").unwrap();
    assert_eq!(storage.load(BlobKey::Expenses).unwrap().as_deref(), Some("[]"));

    // Writes replace the whole blob
    storage.save(BlobKey::Expenses, r#"[{"id":"exp-1"}]"#).unwrap();
    assert_eq!(
        storage.load(BlobKey::Expenses).unwrap().as_deref(),
        Some(r#"[{"id":"exp-1"}]"#)
    );

    // Blobs are independent
    assert_eq!(storage.load(BlobKey::Categories).unwrap(), None);

    storage
        .save_all(&[(BlobKey::Budgets, "{}"), (BlobKey::Expenses, "[]")])
        .unwrap();
    assert_eq!(storage.load(BlobKey::Budgets).unwrap().as_deref(), Some("{}"));
    assert_eq!(storage.load(BlobKey::Expenses).unwrap().as_deref(), Some("[]"));

    storage.clear().unwrap();
    assert_eq!(storage.load(BlobKey::Expenses).unwrap(), None);
    assert_eq!(storage.load(BlobKey::Settings).unwrap(), None);
}

#[test]
fn test_memory_storage_contract() {
    exercise(&mut MemoryStorage::new());
}

#[test]
fn test_sqlite_storage_contract() {
    exercise(&mut SqliteStorage::open_in_memory().unwrap());
}

#[test]
fn test_memory_storage_counts_writes() {
    let mut storage = MemoryStorage::new();
    storage.save(BlobKey::Budgets, "{}").unwrap();
    storage.save(BlobKey::Budgets, "{}").unwrap();
    assert_eq!(storage.writes, 2);
}

#[test]
fn test_blob_key_names() {
    assert_eq!(BlobKey::Expenses.as_str(), "expenses");
    assert_eq!(BlobKey::Categories.as_str(), "categories");
    assert_eq!(BlobKey::Budgets.as_str(), "budgets");
    assert_eq!(BlobKey::Settings.as_str(), "settings");
}

#[test]
fn test_sqlite_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spendboard.db");
    {
        let mut storage = SqliteStorage::open(&path).unwrap();
        storage.save(BlobKey::Categories, "[1,2,3]").unwrap();
    }
    let storage = SqliteStorage::open(&path).unwrap();
    assert_eq!(
        storage.load(BlobKey::Categories).unwrap().as_deref(),
        Some("[1,2,3]")
    );
    assert_eq!(storage.schema_version().unwrap(), schema::CURRENT_VERSION);
}

#[test]
fn test_sqlite_save_all_rolls_back_on_failure() {
    let mut storage = SqliteStorage::open_in_memory().unwrap();
    storage.save(BlobKey::Expenses, "[]").unwrap();
    storage
        .connection()
        .execute_batch(
            "CREATE TRIGGER reject_settings BEFORE INSERT ON blobs WHEN NEW.key = 'settings'
             BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
        )
        .unwrap();

    let result = storage.save_all(&[(BlobKey::Expenses, "[1]"), (BlobKey::Settings, "{}")]);
    assert!(result.is_err());
    assert_eq!(storage.load(BlobKey::Expenses).unwrap().as_deref(), Some("[]"));
    assert_eq!(storage.load(BlobKey::Settings).unwrap(), None);
}
