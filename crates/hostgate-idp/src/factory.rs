//! Name-keyed construction of identity providers.

use std::collections::HashMap;
use std::sync::Arc;

use hostgate_config::IdpConfig;
use tracing::debug;

use crate::error::IdpError;
use crate::json::JsonIdp;
use crate::memory::MemoryIdp;
use crate::traits::IdentityProvider;

/// Builds a provider for `(config, username, gateway_hostgroup)`.
pub type IdpConstructor = Arc<
    dyn Fn(&IdpConfig, &str, Option<&str>) -> Result<Box<dyn IdentityProvider>, IdpError>
        + Send
        + Sync,
>;

/// Registry of identity provider constructors keyed by provider name.
///
/// [`IdpFactory::new`] registers `memory`, `json` and, with the `http`
/// feature, `http`. Extensions add their own with [`register`](Self::register).
#[derive(Clone)]
pub struct IdpFactory {
    constructors: HashMap<String, IdpConstructor>,
}

impl IdpFactory {
    pub fn new() -> Self {
        let mut factory = Self {
            constructors: HashMap::new(),
        };

        factory.register("memory", |config: &IdpConfig, _: &str, _: Option<&str>| {
            Ok(Box::new(MemoryIdp::new(config.hosts.iter().cloned())) as Box<dyn IdentityProvider>)
        });

        factory.register("json", |config: &IdpConfig, username: &str, hostgroup: Option<&str>| {
            let path = config
                .path
                .as_deref()
                .ok_or_else(|| IdpError::Config("idp.path is required for the json provider".into()))?;
            Ok(Box::new(JsonIdp::new(path, username, hostgroup.map(String::from)))
                as Box<dyn IdentityProvider>)
        });

        #[cfg(feature = "http")]
        factory.register("http", |config: &IdpConfig, username: &str, hostgroup: Option<&str>| {
            let url = config
                .url
                .as_deref()
                .ok_or_else(|| IdpError::Config("idp.url is required for the http provider".into()))?;
            let idp = crate::http::HttpIdp::new(
                url,
                username,
                hostgroup.map(String::from),
                config.token.clone(),
                std::time::Duration::from_secs(config.timeout_secs),
            )?;
            Ok(Box::new(idp) as Box<dyn IdentityProvider>)
        });

        factory
    }

    /// Register a constructor, replacing any previous one with that name.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&IdpConfig, &str, Option<&str>) -> Result<Box<dyn IdentityProvider>, IdpError>
            + Send
            + Sync
            + 'static,
    {
        self.constructors.insert(name.into(), Arc::new(constructor));
    }

    /// Build the provider named by `config.provider` for one user.
    pub fn create(
        &self,
        config: &IdpConfig,
        username: &str,
        hostgroup: Option<&str>,
    ) -> Result<Box<dyn IdentityProvider>, IdpError> {
        let constructor = self
            .constructors
            .get(&config.provider)
            .ok_or_else(|| IdpError::UnknownProvider(config.provider.clone()))?;
        debug!(provider = %config.provider, user = %username, hostgroup = ?hostgroup, "creating identity provider");
        constructor(config, username, hostgroup)
    }

    /// Registered provider names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for IdpFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IdpFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdpFactory")
            .field("providers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hostgate_core::HostRecord;

    fn config(provider: &str) -> IdpConfig {
        IdpConfig {
            provider: provider.into(),
            ..IdpConfig::default()
        }
    }

    #[test]
    fn builtin_names() {
        let factory = IdpFactory::new();
        let names = factory.names();
        assert!(names.contains(&"memory"));
        assert!(names.contains(&"json"));
        #[cfg(feature = "http")]
        assert!(names.contains(&"http"));
    }

    #[test]
    fn unknown_provider() {
        let result = IdpFactory::new().create(&config("ldap"), "alice", None);
        assert!(matches!(result, Err(IdpError::UnknownProvider(name)) if name == "ldap"));
    }

    #[test]
    fn json_requires_path() {
        let result = IdpFactory::new().create(&config("json"), "alice", None);
        assert!(matches!(result, Err(IdpError::Config(_))));
    }

    #[tokio::test]
    async fn memory_from_config() {
        let mut cfg = config("memory");
        cfg.hosts = vec![HostRecord::new("db-1")];
        let idp = IdpFactory::new().create(&cfg, "alice", None).unwrap();
        assert_eq!(idp.name(), "memory");
        assert_eq!(idp.list_allowed().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn registered_extension_receives_arguments() {
        struct Echo {
            user: String,
            group: Option<String>,
        }

        #[async_trait]
        impl IdentityProvider for Echo {
            async fn list_allowed(&self) -> Result<Vec<HostRecord>, IdpError> {
                let mut host = HostRecord::new(format!("{}.example.com", self.user));
                if let Some(ref g) = self.group {
                    host = host.with_attribute("hostgroup", g.clone());
                }
                Ok(vec![host])
            }

            fn name(&self) -> &str {
                "echo"
            }
        }

        let mut factory = IdpFactory::new();
        factory.register("echo", |_: &IdpConfig, user: &str, group: Option<&str>| {
            Ok(Box::new(Echo {
                user: user.to_string(),
                group: group.map(String::from),
            }) as Box<dyn IdentityProvider>)
        });

        let idp = factory.create(&config("echo"), "alice", Some("gw-eu")).unwrap();
        let hosts = idp.list_allowed().await.unwrap();
        assert_eq!(hosts[0].fqdn, "alice.example.com");
        assert_eq!(hosts[0].field("hostgroup").as_deref(), Some("gw-eu"));
    }
}
