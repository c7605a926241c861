//! Configuration file loading and error types.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::Config;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported config format: {} (expected .json, .jsonc, .yaml, .yml or .toml)", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("validation: {0}")]
    Validation(String),
}

/// Serialization format of a hostgate config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    /// JSON with `//` and `/* */` comments.
    Jsonc,
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick a format from the file extension. `None` if it is not one of ours.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str())? {
            "json" => Some(Self::Json),
            "jsonc" => Some(Self::Jsonc),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Read a config file, picking the format from its extension.
///
/// The extension is checked before the file is opened, so a typo in the
/// suffix is reported as such even when the file does not exist.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let format =
        ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
    let data = fs::read_to_string(path)?;
    parse_config(&data, format)
}

/// Parse a config document already held in memory.
pub fn parse_config(data: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
    match format {
        ConfigFormat::Json => Ok(serde_json::from_str(data)?),
        ConfigFormat::Jsonc => {
            let stripped = json_comments::StripComments::new(data.as_bytes());
            Ok(serde_json::from_reader(stripped)?)
        }
        ConfigFormat::Yaml => Ok(serde_yaml::from_str(data)?),
        ConfigFormat::Toml => Ok(toml::from_str(data)?),
    }
}
