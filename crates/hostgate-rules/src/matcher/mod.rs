//! Rule matchers for different rule types.

pub mod cidr;
pub mod exact;
pub mod pattern;

use std::fmt::Debug;

use hostgate_core::HostRecord;

use crate::rule::RuleSpec;

pub use cidr::CidrMatcher;
pub use exact::ExactMatcher;
pub use pattern::PatternMatcher;

/// Comparison strategy for one rule type.
///
/// A matcher reads the host field named by [`RuleSpec::target`] and compares
/// it against [`RuleSpec::values`]. A missing field never matches.
///
/// Implementations must be `Send + Sync`; one registry is shared by every
/// request.
pub trait Matcher: Send + Sync + Debug {
    /// Tag this matcher is registered under by default.
    fn rule_type(&self) -> &str;

    /// Check whether `host` satisfies `rule`.
    fn matches(&self, host: &HostRecord, rule: &RuleSpec) -> bool;
}
