//! Configuration type definitions for categories, identity provider, cache and logging.

use std::collections::HashMap;

use hostgate_core::HostRecord;
use serde::{Deserialize, Serialize};

use crate::defaults::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Category rule file. Unset means hosts are listed without categories.
    #[serde(default)]
    pub categories_path: Option<String>,
    /// Register the CIDR matcher for category rules.
    #[serde(default = "default_categories_allow_cidr")]
    pub categories_allow_cidr: bool,
    /// Hostgroup served by this gateway; providers filter hosts by it.
    #[serde(default)]
    pub gateway_hostgroup: Option<String>,
    #[serde(default)]
    pub idp: IdpConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories_path: None,
            categories_allow_cidr: default_categories_allow_cidr(),
            gateway_hostgroup: None,
            idp: IdpConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Identity provider selection and settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdpConfig {
    /// Provider name: "memory", "json", "http" or a registered extension.
    #[serde(default = "default_idp_provider")]
    pub provider: String,
    /// Directory file for the `json` provider.
    #[serde(default)]
    pub path: Option<String>,
    /// Base URL for the `http` provider.
    #[serde(default)]
    pub url: Option<String>,
    /// Bearer token for the `http` provider.
    #[serde(default)]
    pub token: Option<String>,
    /// Request timeout for the `http` provider in seconds.
    #[serde(default = "default_idp_timeout_secs")]
    pub timeout_secs: u64,
    /// Static host list for the `memory` provider.
    #[serde(default)]
    pub hosts: Vec<HostRecord>,
}

impl Default for IdpConfig {
    fn default() -> Self {
        Self {
            provider: default_idp_provider(),
            path: None,
            url: None,
            token: None,
            timeout_secs: default_idp_timeout_secs(),
            hosts: Vec::new(),
        }
    }
}

/// Host-list cache store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// Store URL. `memory://` selects the process-local store.
    #[serde(default = "default_cache_url")]
    pub url: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            url: default_cache_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: Option<String>,
    /// Log format: json, pretty, or compact. Default: pretty.
    pub format: Option<String>,
    /// Output target: stdout or stderr. Default: stderr.
    pub output: Option<String>,
    /// Per-module log level filters (e.g., {"hostgate_rules": "debug"}).
    #[serde(default)]
    pub filters: HashMap<String, String>,
}
