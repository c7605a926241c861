//! Literal equality matcher.

use hostgate_core::HostRecord;

use super::Matcher;
use crate::rule::RuleSpec;

/// Matcher for EXACT rules.
///
/// True when the target field equals one of the rule values byte for byte.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactMatcher;

impl ExactMatcher {
    pub const RULE_TYPE: &'static str = "EXACT";
    /// Tag used by older category files.
    pub const LEGACY_RULE_TYPE: &'static str = "BASIC";
}

impl Matcher for ExactMatcher {
    fn rule_type(&self) -> &str {
        Self::RULE_TYPE
    }

    fn matches(&self, host: &HostRecord, rule: &RuleSpec) -> bool {
        let Some(value) = host.field(rule.target()) else {
            return false;
        };
        rule.values().iter().any(|v| v.as_str() == value.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_fqdn() {
        let rule = RuleSpec::new("EXACT", "fqdn", ["a.example.com"]);
        assert!(ExactMatcher.matches(&HostRecord::new("a.example.com"), &rule));
        assert!(!ExactMatcher.matches(&HostRecord::new("b.example.com"), &rule));
        // no substring or prefix semantics
        assert!(!ExactMatcher.matches(&HostRecord::new("a.example.com.au"), &rule));
    }

    #[test]
    fn exact_is_case_sensitive() {
        let rule = RuleSpec::new("EXACT", "fqdn", ["a.example.com"]);
        assert!(!ExactMatcher.matches(&HostRecord::new("A.EXAMPLE.COM"), &rule));
    }

    #[test]
    fn exact_any_value() {
        let rule = RuleSpec::new("EXACT", "ssh_port", ["22", "2222"]);
        assert!(ExactMatcher.matches(&HostRecord::new("a").with_ssh_port(2222), &rule));
        assert!(!ExactMatcher.matches(&HostRecord::new("a").with_ssh_port(2200), &rule));
    }

    #[test]
    fn exact_missing_field() {
        let rule = RuleSpec::new("EXACT", "environment", ["prod"]);
        assert!(!ExactMatcher.matches(&HostRecord::new("a"), &rule));

        let host = HostRecord::new("a").with_attribute("environment", "prod");
        assert!(ExactMatcher.matches(&host, &rule));
    }

    #[test]
    fn exact_no_values() {
        let rule = RuleSpec::new("EXACT", "fqdn", Vec::<String>::new());
        assert!(!ExactMatcher.matches(&HostRecord::new("a"), &rule));
    }
}
