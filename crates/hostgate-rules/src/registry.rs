//! Rule registry: owns matchers and categories and classifies hosts.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use hostgate_core::{ERROR_RULES, HostRecord};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::RulesError;
use crate::matcher::{CidrMatcher, ExactMatcher, Matcher, PatternMatcher};
use crate::provider::FileProvider;
use crate::rule::{Category, rule_type_str};

/// Options used to build a [`RuleRegistry`].
#[derive(Debug, Clone, Default)]
pub struct RegistryOptions {
    /// Category definition file. `None` means no categories.
    pub categories_path: Option<PathBuf>,
    /// Register the CIDR matcher.
    pub allow_cidr: bool,
}

/// The rule registry: matchers keyed by rule type plus an ordered list of
/// categories.
///
/// Category order is definition order and is also classification order.
/// Send + Sync, designed to be shared via `Arc<RuleRegistry>`.
pub struct RuleRegistry {
    matchers: HashMap<String, Arc<dyn Matcher>>,
    categories: Vec<Category>,
}

impl RuleRegistry {
    /// Create a registry with the built-in EXACT and PATTERN matchers (and
    /// their legacy BASIC and REGEX tags) and no categories.
    pub fn new() -> Self {
        let mut registry = Self {
            matchers: HashMap::new(),
            categories: Vec::new(),
        };

        let exact: Arc<dyn Matcher> = Arc::new(ExactMatcher);
        let pattern: Arc<dyn Matcher> = Arc::new(PatternMatcher::new());
        registry.add_matcher(exact.clone());
        registry.add_matcher_as(ExactMatcher::LEGACY_RULE_TYPE, exact);
        registry.add_matcher(pattern.clone());
        registry.add_matcher_as(PatternMatcher::LEGACY_RULE_TYPE, pattern);
        registry
    }

    /// Build a registry from options: built-ins, CIDR when allowed, then the
    /// categories of the configured file.
    pub fn with_options(options: &RegistryOptions) -> Result<Self, RulesError> {
        let mut registry = Self::new();

        if options.allow_cidr {
            registry.add_matcher(Arc::new(CidrMatcher::new()));
        }

        if let Some(ref path) = options.categories_path {
            let categories = FileProvider::load(path).map_err(|e| {
                warn!(path = %path.display(), error = %e, error_type = ERROR_RULES, "failed to load categories");
                e
            })?;
            for category in categories {
                registry.add_category(category)?;
            }
            info!(
                path = %path.display(),
                categories = registry.categories.len(),
                allow_cidr = options.allow_cidr,
                "loaded host categories"
            );
        }

        registry.warn_unmatched_rule_types();
        Ok(registry)
    }

    /// Register a matcher under its own rule type, replacing any previous
    /// matcher for that tag. Returns the replaced matcher.
    pub fn add_matcher(&mut self, matcher: Arc<dyn Matcher>) -> Option<Arc<dyn Matcher>> {
        let tag = matcher.rule_type().to_string();
        self.add_matcher_as(tag, matcher)
    }

    /// Register a matcher under an explicit tag.
    pub fn add_matcher_as(
        &mut self,
        rule_type: impl Into<String>,
        matcher: Arc<dyn Matcher>,
    ) -> Option<Arc<dyn Matcher>> {
        let rule_type = rule_type.into();
        debug!(rule_type = %rule_type, matcher = ?matcher, "registering matcher");
        self.matchers.insert(rule_type, matcher)
    }

    /// Append a category. Names must be unique.
    pub fn add_category(&mut self, category: Category) -> Result<(), RulesError> {
        if self.categories.iter().any(|c| c.name() == category.name()) {
            return Err(RulesError::DuplicateCategory(category.name().to_string()));
        }
        self.categories.push(category);
        Ok(())
    }

    /// Look up the matcher for a rule type.
    ///
    /// `None` means the rule cannot be evaluated; it is not an error.
    pub fn get_matcher(&self, rule_type: &str) -> Option<&dyn Matcher> {
        self.matchers.get(rule_type).map(|m| m.as_ref())
    }

    /// Look up a matcher from untyped input.
    ///
    /// Returns [`RulesError::Validation`] if `rule_type` is not a string.
    pub fn resolve_matcher(&self, rule_type: &Value) -> Result<Option<&dyn Matcher>, RulesError> {
        rule_type_str(rule_type).map(|tag| self.get_matcher(tag))
    }

    /// Categories in definition order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Tag `host` with every category that has a matching rule.
    ///
    /// Rules within a category are tried in order and the first match wins;
    /// rules whose type has no matcher are skipped. Existing categories on
    /// the host are kept.
    pub fn categorize(&self, host: &mut HostRecord) {
        for category in &self.categories {
            for rule in category.rules() {
                let Some(matcher) = self.get_matcher(rule.rule_type()) else {
                    debug!(
                        category = %category.name(),
                        rule_type = %rule.rule_type(),
                        "no matcher registered for rule type, skipping rule"
                    );
                    continue;
                };

                if matcher.matches(host, rule) {
                    debug!(host = %host, category = %category.name(), rule_type = %rule.rule_type(), "host matches category");
                    host.add_category(category.name());
                    break;
                }
            }
        }
    }

    /// Run [`categorize`](Self::categorize) over every host.
    pub fn categorize_all(&self, hosts: &mut [HostRecord]) {
        for host in hosts.iter_mut() {
            self.categorize(host);
        }
    }

    /// Number of registered rule-type tags.
    pub fn matcher_count(&self) -> usize {
        self.matchers.len()
    }

    /// Number of categories.
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Warn once per rule type that no registered matcher can evaluate.
    fn warn_unmatched_rule_types(&self) {
        let mut reported: Vec<&str> = Vec::new();
        for category in &self.categories {
            for rule in category.rules() {
                let tag = rule.rule_type();
                if !self.matchers.contains_key(tag) && !reported.contains(&tag) {
                    warn!(
                        rule_type = %tag,
                        category = %category.name(),
                        "category rules use a rule type with no registered matcher; they will never match"
                    );
                    reported.push(tag);
                }
            }
        }
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut rule_types: Vec<&str> = self.matchers.keys().map(String::as_str).collect();
        rule_types.sort_unstable();
        f.debug_struct("RuleRegistry")
            .field("rule_types", &rule_types)
            .field("categories", &self.categories.len())
            .finish()
    }
}
