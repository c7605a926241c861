//! Process-local cache store.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::CacheError;
use crate::traits::CacheStore;

/// In-memory hash store.
///
/// Contents live as long as the value; share it through `Arc` to keep one
/// cache across services.
#[derive(Debug, Default)]
pub struct MemoryCache {
    hashes: RwLock<HashMap<String, HashMap<String, String>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a hash exists at `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.hashes.read().contains_key(key)
    }

    /// Number of fields in the hash at `key`.
    pub fn field_count(&self, key: &str) -> usize {
        self.hashes.read().get(key).map_or(0, HashMap::len)
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, CacheError> {
        Ok(self.hashes.read().get(key).cloned().unwrap_or_default())
    }

    async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), CacheError> {
        self.hashes
            .write()
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.hashes.write().remove(key);
        Ok(())
    }

    async fn ping(&self) -> bool {
        true
    }
}
