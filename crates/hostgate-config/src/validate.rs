//! Configuration validation logic.

use crate::Config;
use crate::loader::ConfigError;

const LOG_FORMATS: [&str; 3] = ["pretty", "compact", "json"];
const LOG_OUTPUTS: [&str; 2] = ["stderr", "stdout"];

pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if let Some(ref path) = config.categories_path {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation("categories_path is empty".into()));
        }
    }
    if let Some(ref group) = config.gateway_hostgroup {
        if group.trim().is_empty() {
            return Err(ConfigError::Validation("gateway_hostgroup is empty".into()));
        }
    }

    let idp = &config.idp;
    if idp.provider.trim().is_empty() {
        return Err(ConfigError::Validation("idp.provider is empty".into()));
    }
    match idp.provider.as_str() {
        "json" if idp.path.as_deref().unwrap_or("").trim().is_empty() => {
            return Err(ConfigError::Validation(
                "idp.path is required for the json provider".into(),
            ));
        }
        "http" if idp.url.as_deref().unwrap_or("").trim().is_empty() => {
            return Err(ConfigError::Validation(
                "idp.url is required for the http provider".into(),
            ));
        }
        _ => {}
    }
    if idp.timeout_secs == 0 {
        return Err(ConfigError::Validation("idp.timeout_secs must be > 0".into()));
    }

    if config.cache.enabled && config.cache.url.trim().is_empty() {
        return Err(ConfigError::Validation(
            "cache.url is empty while cache is enabled".into(),
        ));
    }

    if let Some(ref format) = config.logging.format {
        if !LOG_FORMATS.contains(&format.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.format must be one of: {:?}",
                LOG_FORMATS
            )));
        }
    }
    if let Some(ref output) = config.logging.output {
        if !LOG_OUTPUTS.contains(&output.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.output must be one of: {:?}",
                LOG_OUTPUTS
            )));
        }
    }
    Ok(())
}
