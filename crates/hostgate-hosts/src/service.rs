//! Per-user host listing with cache fallback.

use std::sync::Arc;

use hostgate_cache::{CacheStore, decode_host, encode_host, user_hosts_key};
use hostgate_core::{ERROR_CACHE, ERROR_CACHE_CODEC, HostRecord};
use hostgate_idp::{IdentityProvider, IdpError};
use hostgate_rules::RuleRegistry;
use tracing::{debug, error, info, warn};

/// Lists the hosts one user may reach, tagged with their categories.
///
/// The identity provider is the authority. The cache store, when present,
/// holds the last categorized answer under `<username>:hosts` and is served
/// verbatim while it is populated. Any cache failure degrades to a provider
/// call; provider errors are returned unchanged.
///
/// The cache store is pinged once at construction. A store that fails the
/// ping is dropped and never consulted for the lifetime of the service.
pub struct HostListService<P = Box<dyn IdentityProvider>> {
    idp: P,
    cache: Option<Box<dyn CacheStore>>,
    registry: Arc<RuleRegistry>,
    username: String,
    cache_key: String,
}

impl<P: IdentityProvider> HostListService<P> {
    /// Create a service for `username`, pinging `cache` for liveness.
    pub async fn new(
        idp: P,
        cache: Option<Box<dyn CacheStore>>,
        registry: Arc<RuleRegistry>,
        username: impl Into<String>,
    ) -> Self {
        let username = username.into();
        let cache = match cache {
            Some(store) => {
                if store.ping().await {
                    Some(store)
                } else {
                    error!(
                        user = %username,
                        error_type = ERROR_CACHE,
                        "cache store unreachable, all calls will fall back to the identity provider"
                    );
                    None
                }
            }
            None => None,
        };
        Self::from_parts(idp, cache, registry, username)
    }

    /// Create a service that always asks the identity provider.
    pub fn without_cache(
        idp: P,
        registry: Arc<RuleRegistry>,
        username: impl Into<String>,
    ) -> Self {
        Self::from_parts(idp, None, registry, username.into())
    }

    fn from_parts(
        idp: P,
        cache: Option<Box<dyn CacheStore>>,
        registry: Arc<RuleRegistry>,
        username: String,
    ) -> Self {
        let cache_key = user_hosts_key(&username);
        Self {
            idp,
            cache,
            registry,
            username,
            cache_key,
        }
    }

    /// List the user's allowed hosts.
    ///
    /// With `use_cache` and a reachable store, a populated cache entry that
    /// decodes cleanly is returned as is, sorted by fqdn then port. Otherwise
    /// the provider is queried, every host is categorized and, if the store
    /// is reachable, the user's entry is replaced with the result. Categories
    /// supplied by the provider are discarded; only rules grant them. The
    /// fresh list keeps provider order.
    pub async fn list_allowed(&self, use_cache: bool) -> Result<Vec<HostRecord>, IdpError> {
        if use_cache {
            if let Some(ref cache) = self.cache {
                if let Some(hosts) = self.load_from_cache(cache.as_ref()).await {
                    info!(user = %self.username, count = hosts.len(), "loaded hosts from cache");
                    return Ok(hosts);
                }
            }
        }

        let mut hosts = self.idp.list_allowed().await?;
        debug!(
            user = %self.username,
            provider = self.idp.name(),
            count = hosts.len(),
            "loaded hosts from identity provider"
        );
        for host in &mut hosts {
            host.clear_categories();
        }
        self.registry.categorize_all(&mut hosts);

        if let Some(ref cache) = self.cache {
            self.save_to_cache(cache.as_ref(), &hosts).await;
        }
        Ok(hosts)
    }

    /// Drop the user's cache entry. Failures are logged, not returned.
    pub async fn invalidate_cache(&self) {
        if let Some(ref cache) = self.cache {
            self.delete_entry(cache.as_ref()).await;
        }
    }

    /// Whether a reachable cache store is attached.
    #[inline]
    pub fn cache_available(&self) -> bool {
        self.cache.is_some()
    }

    #[inline]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Cache key of the user's host list.
    #[inline]
    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    /// Shared category registry.
    #[inline]
    pub fn registry(&self) -> &Arc<RuleRegistry> {
        &self.registry
    }

    /// `None` means miss: empty entry, store error or an undecodable value.
    async fn load_from_cache(&self, cache: &dyn CacheStore) -> Option<Vec<HostRecord>> {
        let entries = match cache.hash_get_all(&self.cache_key).await {
            Ok(entries) => entries,
            Err(e) => {
                error!(user = %self.username, error = %e, error_type = ERROR_CACHE, "cache read failed");
                return None;
            }
        };

        if entries.is_empty() {
            info!(user = %self.username, "no hosts in cache");
            return None;
        }

        let mut hosts = Vec::with_capacity(entries.len());
        for (field, value) in &entries {
            match decode_host(value) {
                Ok(host) => hosts.push(host),
                Err(e) => {
                    error!(
                        user = %self.username,
                        field = %field,
                        error = %e,
                        error_type = ERROR_CACHE_CODEC,
                        "undecodable cache entry"
                    );
                    return None;
                }
            }
        }

        hosts.sort_by(|a, b| a.fqdn.cmp(&b.fqdn).then(a.ssh_port.cmp(&b.ssh_port)));
        Some(hosts)
    }

    async fn save_to_cache(&self, cache: &dyn CacheStore, hosts: &[HostRecord]) {
        self.delete_entry(cache).await;

        let mut written = 0usize;
        for host in hosts {
            let value = match encode_host(host) {
                Ok(value) => value,
                Err(e) => {
                    error!(host = %host, error = %e, error_type = ERROR_CACHE_CODEC, "failed to encode host for cache");
                    continue;
                }
            };
            match cache.hash_set(&self.cache_key, &host.fqdn, &value).await {
                Ok(()) => {
                    debug!(user = %self.username, host = %host, "added host to cache");
                    written += 1;
                }
                Err(e) => {
                    error!(user = %self.username, host = %host, error = %e, error_type = ERROR_CACHE, "failed to save host to cache");
                }
            }
        }

        if written < hosts.len() {
            warn!(user = %self.username, written, total = hosts.len(), "cache entry only partially written, dropping it");
            self.delete_entry(cache).await;
        } else {
            info!(user = %self.username, count = written, "rewrote cached hosts");
        }
    }

    async fn delete_entry(&self, cache: &dyn CacheStore) {
        debug!(user = %self.username, key = %self.cache_key, "deleting cached hosts");
        if let Err(e) = cache.delete(&self.cache_key).await {
            error!(user = %self.username, error = %e, error_type = ERROR_CACHE, "failed to delete cached hosts");
        }
    }
}

impl<P> std::fmt::Debug for HostListService<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostListService")
            .field("username", &self.username)
            .field("cache_key", &self.cache_key)
            .field("cache_available", &self.cache.is_some())
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
