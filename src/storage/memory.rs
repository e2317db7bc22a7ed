use anyhow::Result;
use std::collections::HashMap;

use super::{BlobKey, Storage};

/// Storage kept in a map, for tests.
#[derive(Debug, Default)]
pub(crate) struct MemoryStorage {
    blobs: HashMap<BlobKey, String>,
    /// Number of `save` calls so far.
    pub(crate) writes: usize,
}

impl MemoryStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a blob, as if an earlier session had written it.
    pub(crate) fn with_blob(mut self, key: BlobKey, value: &str) -> Self {
        self.blobs.insert(key, value.to_string());
        self
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: BlobKey) -> Result<Option<String>> {
        Ok(self.blobs.get(&key).cloned())
    }

    fn save(&mut self, key: BlobKey, value: &str) -> Result<()> {
        self.blobs.insert(key, value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn save_all(&mut self, blobs: &[(BlobKey, &str)]) -> Result<()> {
        for &(key, value) in blobs {
            self.save(key, value)?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.blobs.clear();
        Ok(())
    }
}
