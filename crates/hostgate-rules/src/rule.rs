//! Rule and category type definitions.

use serde_json::Value;

use crate::error::RulesError;

/// One matching condition within a category.
///
/// `rule_type` selects the matcher, `target` names the host field the matcher
/// reads, and `values` are the literals, patterns or CIDR blocks it compares
/// against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    rule_type: String,
    target: String,
    values: Vec<String>,
}

impl RuleSpec {
    pub fn new<I, S>(rule_type: impl Into<String>, target: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rule_type: rule_type.into(),
            target: target.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Tag of the matcher that evaluates this rule.
    #[inline]
    pub fn rule_type(&self) -> &str {
        &self.rule_type
    }

    /// Host field inspected by this rule.
    #[inline]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Values compared against the target field, in definition order.
    #[inline]
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// A named host category granted when any of its rules matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    rules: Vec<RuleSpec>,
}

impl Category {
    pub fn new(name: impl Into<String>, rules: Vec<RuleSpec>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in evaluation order.
    #[inline]
    pub fn rules(&self) -> &[RuleSpec] {
        &self.rules
    }
}

/// Extract a rule-type tag from untyped input.
///
/// Anything other than a JSON string is a validation error.
pub(crate) fn rule_type_str(value: &Value) -> Result<&str, RulesError> {
    match value {
        Value::String(s) => Ok(s.as_str()),
        other => Err(RulesError::Validation(format!(
            "rule type must be a string, got {other}"
        ))),
    }
}
