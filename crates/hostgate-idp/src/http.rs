//! HTTP identity provider.
//!
//! Asks a directory service for the hosts of one user:
//!
//! ```text
//! GET {base_url}/users/{username}/hosts?hostgroup={hostgroup}
//! Authorization: Bearer {token}
//! ```
//!
//! The response body is a JSON list of host records.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use hostgate_idp::http::HttpIdp;
//!
//! let idp = HttpIdp::new(
//!     "https://idp.example.com",
//!     "alice",
//!     Some("gw-eu".into()),
//!     Some("node-token".into()),
//!     Duration::from_secs(10),
//! )
//! .unwrap();
//! ```

use std::time::Duration;

use async_trait::async_trait;
use hostgate_core::{ERROR_IDP, HostRecord};
use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::error::IdpError;
use crate::traits::IdentityProvider;

/// HTTP identity provider bound to one user.
#[derive(Debug)]
pub struct HttpIdp {
    client: Client,
    hosts_url: Url,
    hostgroup: Option<String>,
    token: Option<String>,
}

impl HttpIdp {
    /// Create a provider with its own client using `timeout` per request.
    pub fn new(
        base_url: &str,
        username: &str,
        hostgroup: Option<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, IdpError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(IdpError::backend)?;
        Self::with_client(client, base_url, username, hostgroup, token)
    }

    /// Create with a custom reqwest [`Client`] (for proxies, TLS roots, etc.).
    pub fn with_client(
        client: Client,
        base_url: &str,
        username: &str,
        hostgroup: Option<String>,
        token: Option<String>,
    ) -> Result<Self, IdpError> {
        let mut hosts_url = Url::parse(base_url)
            .map_err(|e| IdpError::Config(format!("invalid idp.url '{base_url}': {e}")))?;
        hosts_url
            .path_segments_mut()
            .map_err(|_| IdpError::Config(format!("idp.url '{base_url}' cannot be a base URL")))?
            .pop_if_empty()
            .extend(["users", username, "hosts"]);

        Ok(Self {
            client,
            hosts_url,
            hostgroup,
            token,
        })
    }

    /// Endpoint queried by [`list_allowed`](IdentityProvider::list_allowed).
    pub fn hosts_url(&self) -> &Url {
        &self.hosts_url
    }
}

#[async_trait]
impl IdentityProvider for HttpIdp {
    async fn list_allowed(&self) -> Result<Vec<HostRecord>, IdpError> {
        let mut req = self.client.get(self.hosts_url.clone());
        if let Some(ref group) = self.hostgroup {
            req = req.query(&[("hostgroup", group)]);
        }
        if let Some(ref token) = self.token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let resp = req.send().await.map_err(|e| {
            warn!(url = %self.hosts_url, error = %e, error_type = ERROR_IDP, "identity provider request failed");
            IdpError::backend(e)
        })?;

        if !resp.status().is_success() {
            return Err(IdpError::Backend(format!(
                "HTTP {}",
                resp.status().as_u16()
            )));
        }

        let hosts: Vec<HostRecord> = resp.json().await.map_err(IdpError::backend)?;
        debug!(url = %self.hosts_url, count = hosts.len(), "listed hosts from identity provider");
        Ok(hosts)
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn idp(base: &str, hostgroup: Option<&str>, token: Option<&str>) -> HttpIdp {
        HttpIdp::new(
            base,
            "alice",
            hostgroup.map(String::from),
            token.map(String::from),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn builds_user_url() {
        let idp = idp("https://idp.example.com/api/", None, None);
        assert_eq!(
            idp.hosts_url().as_str(),
            "https://idp.example.com/api/users/alice/hosts"
        );
    }

    #[test]
    fn username_is_path_encoded() {
        let idp = HttpIdp::new(
            "https://idp.example.com",
            "a/b c",
            None,
            None,
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            idp.hosts_url().as_str(),
            "https://idp.example.com/users/a%2Fb%20c/hosts"
        );
    }

    #[test]
    fn invalid_base_url() {
        let result = HttpIdp::new("not a url", "alice", None, None, Duration::from_secs(5));
        assert!(matches!(result, Err(IdpError::Config(_))));
    }

    #[tokio::test]
    async fn lists_hosts() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/alice/hosts")
            .match_query(Matcher::UrlEncoded("hostgroup".into(), "gw-eu".into()))
            .match_header("authorization", "Bearer s3cret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"fqdn": "db-1", "ssh_port": 2222}, {"fqdn": "web-1"}]"#)
            .create_async()
            .await;

        let hosts = idp(&server.url(), Some("gw-eu"), Some("s3cret"))
            .list_allowed()
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(hosts.len(), 2);
        assert_eq!(hosts[0].ssh_port, 2222);
        assert_eq!(hosts[1].ssh_port, 22);
    }

    #[tokio::test]
    async fn non_success_status_is_backend_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/alice/hosts")
            .with_status(503)
            .create_async()
            .await;

        let result = idp(&server.url(), None, None).list_allowed().await;
        assert!(matches!(result, Err(IdpError::Backend(msg)) if msg == "HTTP 503"));
    }

    #[tokio::test]
    async fn malformed_body_is_backend_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/alice/hosts")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let result = idp(&server.url(), None, None).list_allowed().await;
        assert!(matches!(result, Err(IdpError::Backend(_))));
    }
}
