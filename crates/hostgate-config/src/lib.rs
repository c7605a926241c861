//! Configuration loading, validation and CLI overrides.
//!
//! A configuration file is JSON (optionally with comments), YAML or TOML,
//! chosen by extension. Every section has defaults, so an empty file is a
//! valid configuration for the `json` provider once `idp.path` is set.

mod cli;
mod defaults;
mod loader;
mod types;
mod validate;

pub use cli::{CliOverrides, apply_overrides};
pub use loader::{ConfigError, ConfigFormat, load_config, parse_config};
pub use types::*;
pub use validate::validate_config;
