//! Error types for the host-list layer.

use hostgate_cache::CacheError;
use hostgate_config::ConfigError;
use hostgate_core::{ERROR_CACHE, ERROR_CONFIG, ERROR_IDP, ERROR_RULES};
use hostgate_idp::IdpError;
use hostgate_rules::RulesError;

/// Any error raised while setting up or running a host listing.
#[derive(Debug, thiserror::Error)]
pub enum HostsError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("rules: {0}")]
    Rules(#[from] RulesError),
    #[error("idp: {0}")]
    Idp(#[from] IdpError),
    #[error("cache: {0}")]
    Cache(#[from] CacheError),
}

impl HostsError {
    /// Get the error type string for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            HostsError::Config(_) => ERROR_CONFIG,
            HostsError::Rules(_) => ERROR_RULES,
            HostsError::Idp(_) => ERROR_IDP,
            HostsError::Cache(_) => ERROR_CACHE,
        }
    }
}
