//! CLI override definitions and application logic.

use clap::Parser;

use crate::Config;

#[derive(Debug, Clone, Parser, Default)]
pub struct CliOverrides {
    /// Override category rule file path
    #[arg(long)]
    pub categories_path: Option<String>,
    /// Enable or disable CIDR category rules
    #[arg(long)]
    pub categories_allow_cidr: Option<bool>,
    /// Override gateway hostgroup
    #[arg(long)]
    pub gateway_hostgroup: Option<String>,
    /// Override identity provider (memory, json, http)
    #[arg(long)]
    pub idp_provider: Option<String>,
    /// Override directory file of the json provider
    #[arg(long)]
    pub idp_path: Option<String>,
    /// Override base URL of the http provider
    #[arg(long)]
    pub idp_url: Option<String>,
    /// Enable or disable the host-list cache
    #[arg(long)]
    pub cache_enabled: Option<bool>,
    /// Override cache store URL, e.g. redis://127.0.0.1:6379/0
    #[arg(long)]
    pub cache_url: Option<String>,
    /// Override log level (trace/debug/info/warn/error)
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) {
    if let Some(v) = &overrides.categories_path {
        config.categories_path = Some(v.clone());
    }
    if let Some(v) = overrides.categories_allow_cidr {
        config.categories_allow_cidr = v;
    }
    if let Some(v) = &overrides.gateway_hostgroup {
        config.gateway_hostgroup = Some(v.clone());
    }
    if let Some(v) = &overrides.idp_provider {
        config.idp.provider = v.clone();
    }
    if let Some(v) = &overrides.idp_path {
        config.idp.path = Some(v.clone());
    }
    if let Some(v) = &overrides.idp_url {
        config.idp.url = Some(v.clone());
    }
    if let Some(v) = overrides.cache_enabled {
        config.cache.enabled = v;
    }
    if let Some(v) = &overrides.cache_url {
        config.cache.url = v.clone();
    }
    if let Some(v) = &overrides.log_level {
        config.logging.level = Some(v.clone());
    }
}
