//! Core types and constants shared across hostgate crates.
//!
//! This crate provides:
//! - [`HostRecord`], the host entry passed between providers, rules and cache
//! - Default configuration values
//! - Error type constants for logging

pub mod defaults;
pub mod errors;
pub mod host;

// Re-export commonly used items at crate root
pub use defaults::*;
pub use errors::*;
pub use host::HostRecord;

/// Project name.
pub const PROJECT_NAME: &str = "hostgate";
/// Project version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
