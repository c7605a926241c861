//! Error types for the rule engine.

use thiserror::Error;

/// Errors that can occur in the rule engine.
#[derive(Error, Debug)]
pub enum RulesError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("duplicate category: {0}")]
    DuplicateCategory(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
