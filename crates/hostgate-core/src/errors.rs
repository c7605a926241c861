//! Error type constants for logging.
//!
//! These constants provide consistent error classification across all crates.

/// Cache store connectivity or command error.
pub const ERROR_CACHE: &str = "cache";
/// Cache value could not be encoded or decoded.
pub const ERROR_CACHE_CODEC: &str = "cache_codec";
/// Identity provider error.
pub const ERROR_IDP: &str = "idp";
/// Category rule loading or validation error.
pub const ERROR_RULES: &str = "rules";
/// Configuration error.
pub const ERROR_CONFIG: &str = "config";
