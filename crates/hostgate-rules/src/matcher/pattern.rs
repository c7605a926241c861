//! Regular expression matcher.

use std::collections::HashMap;

use hostgate_core::HostRecord;
use parking_lot::RwLock;
use regex::Regex;
use tracing::{trace, warn};

use super::Matcher;
use crate::rule::RuleSpec;

/// Matcher for PATTERN rules.
///
/// Patterns are anchored at the start of the field value; a pattern that
/// must cover the whole value ends with `$`. Each distinct pattern is compiled
/// once and kept for the lifetime of the matcher. Patterns that fail to
/// compile are remembered as such, logged once and never match.
#[derive(Debug, Default)]
pub struct PatternMatcher {
    compiled: RwLock<HashMap<String, Option<Regex>>>,
}

impl PatternMatcher {
    pub const RULE_TYPE: &'static str = "PATTERN";
    /// Tag used by older category files.
    pub const LEGACY_RULE_TYPE: &'static str = "REGEX";

    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct patterns compiled so far (including invalid ones).
    pub fn compiled_count(&self) -> usize {
        self.compiled.read().len()
    }

    fn compile(&self, pattern: &str) -> Option<Regex> {
        if let Some(entry) = self.compiled.read().get(pattern) {
            return entry.clone();
        }

        let mut compiled = self.compiled.write();
        compiled
            .entry(pattern.to_string())
            .or_insert_with(|| match Regex::new(&format!("^(?:{pattern})")) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!(pattern = %pattern, error = %e, "invalid category pattern, it will never match");
                    None
                }
            })
            .clone()
    }
}

impl Matcher for PatternMatcher {
    fn rule_type(&self) -> &str {
        Self::RULE_TYPE
    }

    fn matches(&self, host: &HostRecord, rule: &RuleSpec) -> bool {
        let Some(value) = host.field(rule.target()) else {
            return false;
        };

        for pattern in rule.values() {
            trace!(target_field = %rule.target(), value = %value, pattern = %pattern, "matching pattern");
            if let Some(re) = self.compile(pattern) {
                if re.is_match(&value) {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_prefix() {
        let m = PatternMatcher::new();
        let rule = RuleSpec::new("PATTERN", "fqdn", ["^db-"]);
        assert!(m.matches(&HostRecord::new("db-01.example.com"), &rule));
        assert!(!m.matches(&HostRecord::new("web-01.example.com"), &rule));
    }

    #[test]
    fn pattern_anchored_at_start() {
        let m = PatternMatcher::new();
        let rule = RuleSpec::new("PATTERN", "fqdn", ["db"]);
        assert!(m.matches(&HostRecord::new("db-01.example.com"), &rule));
        // search semantics would match this, start-anchored semantics do not
        assert!(!m.matches(&HostRecord::new("web-db.example.com"), &rule));
    }

    #[test]
    fn pattern_explicit_end_anchor() {
        let m = PatternMatcher::new();
        let rule = RuleSpec::new("PATTERN", "fqdn", [r"db-\d+$"]);
        assert!(m.matches(&HostRecord::new("db-01"), &rule));
        assert!(!m.matches(&HostRecord::new("db-01.example.com"), &rule));
    }

    #[test]
    fn pattern_alternation_stays_anchored() {
        let m = PatternMatcher::new();
        let rule = RuleSpec::new("PATTERN", "fqdn", ["db|cache"]);
        assert!(m.matches(&HostRecord::new("cache-1"), &rule));
        assert!(!m.matches(&HostRecord::new("web-cache-1"), &rule));
    }

    #[test]
    fn pattern_any_of_values() {
        let m = PatternMatcher::new();
        let rule = RuleSpec::new("PATTERN", "fqdn", ["^db-", r".*\.internal$"]);
        assert!(m.matches(&HostRecord::new("web.internal"), &rule));
        assert!(!m.matches(&HostRecord::new("web.example.com"), &rule));
    }

    #[test]
    fn pattern_compiled_once() {
        let m = PatternMatcher::new();
        let rule = RuleSpec::new("PATTERN", "fqdn", ["^db-", "^web-"]);
        for name in ["db-1", "db-2", "web-1", "mail-1"] {
            m.matches(&HostRecord::new(name), &rule);
        }
        assert_eq!(m.compiled_count(), 2);
    }

    #[test]
    fn pattern_invalid_never_matches() {
        let m = PatternMatcher::new();
        let rule = RuleSpec::new("PATTERN", "fqdn", ["(unclosed", "^db-"]);
        assert!(m.matches(&HostRecord::new("db-1"), &rule));
        assert!(!m.matches(&HostRecord::new("(unclosed"), &rule));
        assert_eq!(m.compiled_count(), 2);
    }

    #[test]
    fn pattern_missing_field() {
        let m = PatternMatcher::new();
        let rule = RuleSpec::new("PATTERN", "environment", [".*"]);
        assert!(!m.matches(&HostRecord::new("db-1"), &rule));
    }
}
