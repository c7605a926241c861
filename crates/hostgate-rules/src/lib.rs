//! Category rule engine for hostgate.
//!
//! Classifies hosts into named categories. A category is an ordered list of
//! rules; each rule names a rule type, a host field and a list of values.
//! Rule types are served by pluggable [`Matcher`]s looked up by tag.
//!
//! # Architecture
//!
//! - **Matchers**: `ExactMatcher` (literal equality), `PatternMatcher`
//!   (compiled regex, cached), `CidrMatcher` (IP network membership, opt-in)
//! - **Provider**: `FileProvider` loads categories from JSON or YAML files
//! - **Registry**: `RuleRegistry` owns the matchers and the ordered
//!   categories and tags hosts with matching categories
//!
//! # Example
//!
//! ```
//! use hostgate_core::HostRecord;
//! use hostgate_rules::{Category, RuleRegistry, RuleSpec};
//!
//! let mut registry = RuleRegistry::new();
//! registry
//!     .add_category(Category::new(
//!         "db",
//!         vec![RuleSpec::new("PATTERN", "fqdn", ["^db-"])],
//!     ))
//!     .unwrap();
//!
//! let mut host = HostRecord::new("db-01.example.com");
//! registry.categorize(&mut host);
//! assert!(host.has_category("db"));
//! ```

pub mod error;
pub mod matcher;
pub mod provider;
pub mod registry;
pub mod rule;

pub use error::RulesError;
pub use matcher::{CidrMatcher, ExactMatcher, Matcher, PatternMatcher};
pub use registry::{RegistryOptions, RuleRegistry};
pub use rule::{Category, RuleSpec};
