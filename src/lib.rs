//! # hostgate
//!
//! Lists the backend hosts an SSH gateway user may reach and tags each one
//! with categories derived from configurable matching rules.
//!
//! ## Crates
//!
//! - [`hostgate_core`] - Host record, defaults and log error kinds
//! - [`hostgate_rules`] - Matchers, category files and the rule registry
//! - [`hostgate_config`] - Configuration loading and validation
//! - [`hostgate_idp`] - Identity providers
//! - [`hostgate_cache`] - Host-list cache stores
//! - [`hostgate_hosts`] - Host listing service and CLI commands

pub use hostgate_cache as cache;
pub use hostgate_config as config;
pub use hostgate_core as core;
pub use hostgate_hosts as hosts;
pub use hostgate_idp as idp;
pub use hostgate_rules as rules;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use hostgate_cache::{CacheStore, MemoryCache};
    pub use hostgate_config::{Config, load_config, validate_config};
    pub use hostgate_core::HostRecord;
    pub use hostgate_hosts::{HostListService, HostsError, build_registry};
    pub use hostgate_idp::{IdentityProvider, IdpFactory};
    pub use hostgate_rules::{Category, Matcher, RuleRegistry, RuleSpec};
}
