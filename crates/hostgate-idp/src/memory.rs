//! In-memory identity provider.

use async_trait::async_trait;
use hostgate_core::HostRecord;

use crate::error::IdpError;
use crate::traits::IdentityProvider;

/// Identity provider serving a fixed host list.
///
/// Every user sees the same hosts. Suitable for single-tenant gateways and
/// for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryIdp {
    hosts: Vec<HostRecord>,
}

impl MemoryIdp {
    pub fn new<I>(hosts: I) -> Self
    where
        I: IntoIterator<Item = HostRecord>,
    {
        Self {
            hosts: hosts.into_iter().collect(),
        }
    }

    /// Add a host to the list.
    #[inline]
    pub fn add_host(&mut self, host: HostRecord) {
        self.hosts.push(host);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdp {
    async fn list_allowed(&self) -> Result<Vec<HostRecord>, IdpError> {
        Ok(self.hosts.clone())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_configured_hosts_in_order() {
        let idp = MemoryIdp::new([HostRecord::new("db-1"), HostRecord::new("web-1")]);
        let hosts = idp.list_allowed().await.unwrap();
        let names: Vec<_> = hosts.iter().map(|h| h.fqdn.as_str()).collect();
        assert_eq!(names, ["db-1", "web-1"]);
    }

    #[tokio::test]
    async fn returned_hosts_are_copies() {
        let idp = MemoryIdp::new([HostRecord::new("db-1")]);
        let mut first = idp.list_allowed().await.unwrap();
        first[0].add_category("db");
        let second = idp.list_allowed().await.unwrap();
        assert!(second[0].categories().is_empty());
    }

    #[test]
    fn add_host() {
        let mut idp = MemoryIdp::default();
        assert!(idp.is_empty());
        idp.add_host(HostRecord::new("db-1"));
        assert_eq!(idp.len(), 1);
    }
}
