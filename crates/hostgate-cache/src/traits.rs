//! Cache store trait.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CacheError;

/// Key-value store holding string hashes.
///
/// Only the operations needed to replace a user's host list wholesale are
/// exposed. Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read every field of the hash at `key`. A missing key is an empty map.
    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, CacheError>;

    /// Set one field of the hash at `key`, creating the hash if needed.
    async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), CacheError>;

    /// Delete `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Liveness check. Never fails; an unreachable store reports `false`.
    async fn ping(&self) -> bool;
}

/// Blanket implementation for `Arc<C>` where `C: CacheStore`.
#[async_trait]
impl<C: CacheStore + ?Sized> CacheStore for Arc<C> {
    #[inline]
    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, CacheError> {
        (**self).hash_get_all(key).await
    }

    #[inline]
    async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), CacheError> {
        (**self).hash_set(key, field, value).await
    }

    #[inline]
    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key).await
    }

    #[inline]
    async fn ping(&self) -> bool {
        (**self).ping().await
    }
}

/// Blanket implementation for `Box<C>` where `C: CacheStore`.
#[async_trait]
impl<C: CacheStore + ?Sized> CacheStore for Box<C> {
    #[inline]
    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, CacheError> {
        (**self).hash_get_all(key).await
    }

    #[inline]
    async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), CacheError> {
        (**self).hash_set(key, field, value).await
    }

    #[inline]
    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key).await
    }

    #[inline]
    async fn ping(&self) -> bool {
        (**self).ping().await
    }
}
