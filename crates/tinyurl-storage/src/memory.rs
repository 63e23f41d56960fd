use crate::error::{Result, StorageError};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tinyurl_core::{ShortCode, ShortUrl, Store};
use tracing::trace;

/// In-memory implementation of [`Store`] backed by a `DashMap`.
///
/// Inserts go through the entry API, so the existence check and the write
/// happen under the same shard lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    storage: DashMap<String, ShortUrl>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    type Error = StorageError;

    async fn insert(&self, code: &ShortCode, record: ShortUrl) -> Result<()> {
        match self.storage.entry(code.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::AlreadyExists(code.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(record);
                trace!(code = %code, "inserted short url");
                Ok(())
            }
        }
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<ShortUrl>> {
        let record = self.storage.get(code.as_str()).map(|entry| entry.clone());
        trace!(code = %code, found = record.is_some(), "looked up short url");
        Ok(record)
    }

    fn is_already_exists(&self, err: &StorageError) -> bool {
        err.is_already_exists()
    }
}
