//! Allowed-host listing for hostgate.
//!
//! [`HostListService`] answers "which hosts may this user reach, and in
//! which categories": it serves the user's cached list when one exists and
//! otherwise asks the identity provider, classifies every host with the
//! shared [`RuleRegistry`](hostgate_rules::RuleRegistry) and rewrites the
//! cache.

pub mod cli;
mod error;
mod rules;
mod service;

pub use error::HostsError;
pub use rules::build_registry;
pub use service::HostListService;
