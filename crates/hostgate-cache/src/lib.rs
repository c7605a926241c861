//! Cache stores for per-user host lists.
//!
//! A user's hosts are kept in one hash under `<username>:hosts`, one field
//! per fqdn, each value a JSON-encoded [`HostRecord`](hostgate_core::HostRecord)
//! including its categories.
//!
//! # Stores
//!
//! - [`MemoryCache`]: process-local, always reachable
//! - `RedisCache` (feature `redis`): Redis hashes over a tokio connection manager
//!
//! [`open`] picks a store from a URL: `memory://` or `redis://` / `rediss://`.

mod codec;
mod error;
mod memory;
mod traits;

#[cfg(feature = "redis")]
mod redis_store;

pub use codec::{decode_host, encode_host, user_hosts_key};
pub use error::CacheError;
pub use memory::MemoryCache;
pub use traits::CacheStore;

#[cfg(feature = "redis")]
pub use redis_store::RedisCache;

use tracing::debug;

/// Open the cache store named by `url`.
///
/// Connection errors are returned; reachability is checked separately with
/// [`CacheStore::ping`].
pub async fn open(url: &str) -> Result<Box<dyn CacheStore>, CacheError> {
    let scheme = url.split_once("://").map(|(s, _)| s).unwrap_or("");
    debug!(scheme, "opening cache store");
    match scheme {
        "memory" => Ok(Box::new(MemoryCache::new())),
        #[cfg(feature = "redis")]
        "redis" | "rediss" => Ok(Box::new(RedisCache::connect(url).await?)),
        _ => Err(CacheError::UnsupportedUrl(url.to_string())),
    }
}
