//! Host entry returned by identity providers and stored in the cache.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::defaults::DEFAULT_SSH_PORT;

fn default_ssh_port() -> u16 {
    DEFAULT_SSH_PORT
}

/// A backend host a user may reach through the gateway.
///
/// Identity is `(fqdn, ssh_port)`: two records with the same pair compare
/// equal regardless of description, key path or categories.
///
/// Categories form a set. After construction they only grow through
/// [`add_category`](Self::add_category), which ignores names already present,
/// or are dropped all at once with [`clear_categories`](Self::clear_categories).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostRecord {
    /// Fully qualified domain name; the unique key of the host.
    #[serde(alias = "name")]
    pub fqdn: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// SSH port (default 22).
    #[serde(default = "default_ssh_port", alias = "sshPort")]
    pub ssh_port: u16,
    /// Path of the private key used to reach the host.
    #[serde(default, alias = "keyPath", alias = "private_key_path")]
    pub key_path: String,
    #[serde(default)]
    categories: BTreeSet<String>,
    /// Extra provider-supplied fields that rules may target by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl HostRecord {
    /// Create a host with default port and no categories.
    pub fn new(fqdn: impl Into<String>) -> Self {
        Self {
            fqdn: fqdn.into(),
            description: String::new(),
            ssh_port: DEFAULT_SSH_PORT,
            key_path: String::new(),
            categories: BTreeSet::new(),
            attributes: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[inline]
    pub fn with_ssh_port(mut self, port: u16) -> Self {
        self.ssh_port = port;
        self
    }

    #[inline]
    pub fn with_key_path(mut self, key_path: impl Into<String>) -> Self {
        self.key_path = key_path.into();
        self
    }

    #[inline]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Tag the host with a category. Returns `false` if it already had it.
    pub fn add_category(&mut self, category: impl Into<String>) -> bool {
        self.categories.insert(category.into())
    }

    /// Drop every category. Categories are only granted by rules, so hosts
    /// arriving from a provider are cleared before categorization.
    pub fn clear_categories(&mut self) {
        self.categories.clear();
    }

    /// Categories assigned to this host, in name order.
    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    /// Check whether the host carries the given category.
    #[inline]
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    /// Look up a field by name for rule evaluation.
    ///
    /// Built-in fields are checked first (`fqdn`/`name`, `description`,
    /// `ssh_port`/`sshPort`/`port`, `key_path`/`keyPath`), then
    /// [`attributes`](Self::attributes). Returns `None` if the field does not
    /// exist on this host.
    pub fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "fqdn" | "name" => Some(Cow::Borrowed(self.fqdn.as_str())),
            "description" => Some(Cow::Borrowed(self.description.as_str())),
            "ssh_port" | "sshPort" | "port" => Some(Cow::Owned(self.ssh_port.to_string())),
            "key_path" | "keyPath" => Some(Cow::Borrowed(self.key_path.as_str())),
            other => self.attributes.get(other).map(|v| Cow::Borrowed(v.as_str())),
        }
    }
}

impl PartialEq for HostRecord {
    fn eq(&self, other: &Self) -> bool {
        self.fqdn == other.fqdn && self.ssh_port == other.ssh_port
    }
}

impl Eq for HostRecord {}

impl Hash for HostRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fqdn.hash(state);
        self.ssh_port.hash(state);
    }
}

impl fmt::Display for HostRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.fqdn, self.ssh_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_category_is_idempotent() {
        let mut host = HostRecord::new("db-1.example.com");
        assert!(host.add_category("db"));
        assert!(!host.add_category("db"));
        assert!(host.add_category("prod"));
        assert_eq!(host.categories().len(), 2);
        assert!(host.has_category("db"));
        assert!(!host.has_category("web"));
    }

    #[test]
    fn clear_categories_empties_set() {
        let mut host = HostRecord::new("db-1.example.com");
        host.add_category("db");
        host.add_category("prod");
        host.clear_categories();
        assert!(host.categories().is_empty());
        assert!(host.add_category("db"));
    }

    #[test]
    fn equality_uses_fqdn_and_port() {
        let a = HostRecord::new("a.example.com").with_description("primary");
        let b = HostRecord::new("a.example.com").with_description("other");
        let c = HostRecord::new("a.example.com").with_ssh_port(2222);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn field_lookup() {
        let host = HostRecord::new("a.example.com")
            .with_ssh_port(2222)
            .with_key_path("/keys/a")
            .with_attribute("ip_address", "10.0.0.5");

        assert_eq!(host.field("fqdn").as_deref(), Some("a.example.com"));
        assert_eq!(host.field("name").as_deref(), Some("a.example.com"));
        assert_eq!(host.field("ssh_port").as_deref(), Some("2222"));
        assert_eq!(host.field("sshPort").as_deref(), Some("2222"));
        assert_eq!(host.field("keyPath").as_deref(), Some("/keys/a"));
        assert_eq!(host.field("description").as_deref(), Some(""));
        assert_eq!(host.field("ip_address").as_deref(), Some("10.0.0.5"));
        assert!(host.field("environment").is_none());
    }

    #[test]
    fn builtin_fields_shadow_attributes() {
        let host = HostRecord::new("a.example.com").with_attribute("fqdn", "spoofed");
        assert_eq!(host.field("fqdn").as_deref(), Some("a.example.com"));
    }

    #[test]
    fn deserialize_defaults_and_aliases() {
        let host: HostRecord = serde_json::from_str(r#"{"name": "a.example.com"}"#).unwrap();
        assert_eq!(host.fqdn, "a.example.com");
        assert_eq!(host.ssh_port, DEFAULT_SSH_PORT);
        assert!(host.categories().is_empty());

        let host: HostRecord = serde_json::from_str(
            r#"{"fqdn": "b.example.com", "sshPort": 2200, "keyPath": "/k", "categories": ["x", "x", "y"]}"#,
        )
        .unwrap();
        assert_eq!(host.ssh_port, 2200);
        assert_eq!(host.key_path, "/k");
        assert_eq!(host.categories().len(), 2);
    }

    #[test]
    fn serialize_omits_empty_attributes() {
        let mut host = HostRecord::new("a.example.com");
        host.add_category("prod");
        let value = serde_json::to_value(&host).unwrap();
        assert_eq!(value["ssh_port"], 22);
        assert_eq!(value["categories"], serde_json::json!(["prod"]));
        assert!(value.get("attributes").is_none());
    }
}
