//! Bridge between hostgate-config and hostgate-rules.

use std::path::PathBuf;

use hostgate_config::Config;
use hostgate_rules::{RegistryOptions, RuleRegistry, RulesError};

/// Build the category registry described by `config`.
pub fn build_registry(config: &Config) -> Result<RuleRegistry, RulesError> {
    let options = RegistryOptions {
        categories_path: config.categories_path.as_ref().map(PathBuf::from),
        allow_cidr: config.categories_allow_cidr,
    };
    RuleRegistry::with_options(&options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn no_categories_path() {
        let registry = build_registry(&Config::default()).unwrap();
        assert_eq!(registry.category_count(), 0);
        assert!(registry.get_matcher("CIDR").is_none());
    }

    #[test]
    fn loads_configured_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "lan:\n  - type: CIDR\n    target: ip_address\n    rules: [10.0.0.0/8]").unwrap();

        let config = Config {
            categories_path: Some(file.path().display().to_string()),
            categories_allow_cidr: true,
            ..Config::default()
        };
        let registry = build_registry(&config).unwrap();
        assert_eq!(registry.category_count(), 1);
        assert!(registry.get_matcher("CIDR").is_some());
    }

    #[test]
    fn missing_file_fails() {
        let config = Config {
            categories_path: Some("/nonexistent/categories.json".into()),
            ..Config::default()
        };
        assert!(matches!(build_registry(&config), Err(RulesError::Io(_))));
    }
}
