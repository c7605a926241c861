//! Redis cache store.

use std::collections::HashMap;

use async_trait::async_trait;
use hostgate_core::ERROR_CACHE;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::{debug, warn};

use crate::error::CacheError;
use crate::traits::CacheStore;

/// Cache store backed by Redis hashes.
///
/// Commands go through a [`ConnectionManager`], which reconnects on its own
/// after a dropped connection. Cloning the manager per command is cheap.
#[derive(Clone)]
pub struct RedisCache {
    manager: ConnectionManager,
}

impl RedisCache {
    /// Connect to the server named by `url`, e.g. `redis://localhost:6379/0`.
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(url)?;
        let manager = client.get_connection_manager().await?;
        debug!("connected to redis cache");
        Ok(Self { manager })
    }
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache").finish_non_exhaustive()
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, CacheError> {
        let mut conn = self.manager.clone();
        let fields: HashMap<String, String> = conn.hgetall(key).await?;
        Ok(fields)
    }

    async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();
        let _: () = conn.hset(key, field, value).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }

    async fn ping(&self) -> bool {
        let mut conn = self.manager.clone();
        let pong: Result<String, _> = redis::cmd("PING").query_async(&mut conn).await;
        match pong {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, error_type = ERROR_CACHE, "redis ping failed");
                false
            }
        }
    }
}
