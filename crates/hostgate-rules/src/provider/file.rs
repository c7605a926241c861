//! File-based category provider.
//!
//! A category file maps category names to ordered rule lists:
//!
//! ```json
//! {
//!   "db":   [{"type": "PATTERN", "target": "fqdn", "rules": ["^db-"]}],
//!   "prod": [{"type": "EXACT",   "target": "environment", "rules": ["prod"]}]
//! }
//! ```
//!
//! Definition order is kept and becomes classification order.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::RulesError;
use crate::rule::{Category, RuleSpec, rule_type_str};

/// Serialization format of a category file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFormat {
    Json,
    /// JSON with `//` and `/* */` comments.
    Jsonc,
    Yaml,
}

impl CategoryFormat {
    /// Pick a format from the file extension; anything unknown is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()).unwrap_or("") {
            "yaml" | "yml" => Self::Yaml,
            "jsonc" => Self::Jsonc,
            _ => Self::Json,
        }
    }
}

/// Provider that loads categories from local files.
pub struct FileProvider;

impl FileProvider {
    /// Load and parse a category file.
    pub fn load(path: &Path) -> Result<Vec<Category>, RulesError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, CategoryFormat::from_path(path))
    }

    /// Parse category definitions from a string.
    pub fn parse(content: &str, format: CategoryFormat) -> Result<Vec<Category>, RulesError> {
        let root: Value = match format {
            CategoryFormat::Json => serde_json::from_str(content)?,
            CategoryFormat::Jsonc => {
                let stripped = json_comments::StripComments::new(content.as_bytes());
                serde_json::from_reader(stripped)?
            }
            CategoryFormat::Yaml => serde_yaml::from_str(content)?,
        };
        Self::from_value(&root)
    }

    /// Build categories from an already-parsed document.
    pub fn from_value(root: &Value) -> Result<Vec<Category>, RulesError> {
        let map = match root {
            Value::Object(map) => map,
            Value::Null => return Ok(Vec::new()),
            _ => {
                return Err(RulesError::Parse(
                    "category file must map category names to rule lists".into(),
                ));
            }
        };

        let mut categories = Vec::with_capacity(map.len());
        for (name, rules) in map {
            let rules = match rules {
                Value::Array(items) => items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| parse_rule(name, index, item))
                    .collect::<Result<Vec<_>, _>>()?,
                Value::Null => Vec::new(),
                _ => {
                    return Err(RulesError::Parse(format!(
                        "category '{name}': rules must be a list"
                    )));
                }
            };
            categories.push(Category::new(name.clone(), rules));
        }
        Ok(categories)
    }
}

fn parse_rule(category: &str, index: usize, item: &Value) -> Result<RuleSpec, RulesError> {
    let Value::Object(obj) = item else {
        return Err(RulesError::Parse(format!(
            "category '{category}' rule #{index}: expected an object"
        )));
    };

    let rule_type = match obj.get("type") {
        Some(v) => rule_type_str(v).map_err(|_| {
            RulesError::Validation(format!(
                "category '{category}' rule #{index}: rule type must be a string, got {v}"
            ))
        })?,
        None => {
            return Err(RulesError::Parse(format!(
                "category '{category}' rule #{index}: missing 'type'"
            )));
        }
    };

    let target = match obj.get("target") {
        Some(Value::String(s)) => s.as_str(),
        Some(_) => {
            return Err(RulesError::Parse(format!(
                "category '{category}' rule #{index}: 'target' must be a string"
            )));
        }
        None => {
            return Err(RulesError::Parse(format!(
                "category '{category}' rule #{index}: missing 'target'"
            )));
        }
    };

    let values = parse_values(category, index, obj)?;
    Ok(RuleSpec::new(rule_type, target, values))
}

fn parse_values(
    category: &str,
    index: usize,
    obj: &Map<String, Value>,
) -> Result<Vec<String>, RulesError> {
    match obj.get("rules") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| {
                scalar_to_string(v).ok_or_else(|| {
                    RulesError::Parse(format!(
                        "category '{category}' rule #{index}: rule values must be scalars, got {v}"
                    ))
                })
            })
            .collect(),
        Some(single) => scalar_to_string(single).map(|s| vec![s]).ok_or_else(|| {
            RulesError::Parse(format!(
                "category '{category}' rule #{index}: 'rules' must be a list"
            ))
        }),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
