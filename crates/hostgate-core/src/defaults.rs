//! Default configuration values.
//!
//! Centralized default constants for use across all crates.

// ============================================================================
// Host Defaults
// ============================================================================

/// Default SSH port of a backend host.
pub const DEFAULT_SSH_PORT: u16 = 22;

// ============================================================================
// Cache Defaults
// ============================================================================

/// Suffix appended to a username to form its host-list cache key.
pub const HOSTS_CACHE_KEY_SUFFIX: &str = ":hosts";
/// Whether the host-list cache is used unless configured otherwise.
pub const DEFAULT_CACHE_ENABLED: bool = true;
/// Default cache store URL (local Redis, database 0).
pub const DEFAULT_CACHE_URL: &str = "redis://localhost:6379/0";

// ============================================================================
// Rule Defaults
// ============================================================================

/// CIDR rules are opt-in.
pub const DEFAULT_CATEGORIES_ALLOW_CIDR: bool = false;

// ============================================================================
// Identity Provider Defaults
// ============================================================================

/// Default identity provider name.
pub const DEFAULT_IDP_PROVIDER: &str = "json";
/// Default request timeout for remote identity providers in seconds.
pub const DEFAULT_IDP_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Logging Defaults
// ============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Default log output format.
pub const DEFAULT_LOG_FORMAT: &str = "pretty";
/// Default log output target.
pub const DEFAULT_LOG_OUTPUT: &str = "stderr";
