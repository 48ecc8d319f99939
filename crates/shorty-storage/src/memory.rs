use async_trait::async_trait;
use parking_lot::RwLock;
use shorty_core::error::{Result, StorageError};
use shorty_core::{Repository, ShortCode};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::trace;

/// In-memory implementation of the [`Repository`] trait.
///
/// A single reader/writer lock guards the whole map: lookups share the read
/// lock, saves take the write lock so the existence check and the insert
/// happen in one critical section.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    urls: RwLock<HashMap<String, String>>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            urls: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.urls.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.read().is_empty()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn save(&self, code: &ShortCode, original_url: &str) -> Result<()> {
        let mut urls = self.urls.write();

        match urls.entry(code.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::AlreadyExists(code.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(original_url.to_owned());
                trace!(code = %code, "stored short url in memory");
                Ok(())
            }
        }
    }

    async fn get(&self, code: &ShortCode) -> Result<String> {
        self.urls
            .read()
            .get(code.as_str())
            .cloned()
            .ok_or_else(|| StorageError::NotFound(code.to_string()))
    }
}
