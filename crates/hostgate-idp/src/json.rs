//! JSON directory identity provider.
//!
//! The directory file lists every known host and, per user, the fqdns that
//! user may reach:
//!
//! ```json
//! {
//!   "hosts": [
//!     {"fqdn": "db-1.example.com", "ssh_port": 22, "hostgroups": ["gw-eu"]},
//!     {"fqdn": "web-1.example.com", "attributes": {"ip_address": "10.0.0.7"}}
//!   ],
//!   "users": {
//!     "alice": ["db-1.example.com", "web-1.example.com"]
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use hostgate_core::{ERROR_IDP, HostRecord};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::IdpError;
use crate::traits::IdentityProvider;

#[derive(Debug, Default, Deserialize)]
struct RawDirectory {
    #[serde(default)]
    hosts: Vec<Map<String, Value>>,
    #[serde(default)]
    users: HashMap<String, Vec<String>>,
}

struct Directory {
    hosts: Vec<DirectoryHost>,
    users: HashMap<String, Vec<String>>,
}

struct DirectoryHost {
    host: HostRecord,
    hostgroups: Vec<String>,
}

impl TryFrom<RawDirectory> for Directory {
    type Error = serde_json::Error;

    fn try_from(raw: RawDirectory) -> Result<Self, Self::Error> {
        let hosts = raw
            .hosts
            .into_iter()
            .map(|mut entry| {
                let hostgroups = match entry.remove("hostgroups") {
                    Some(v) => serde_json::from_value(v)?,
                    None => Vec::new(),
                };
                let host = serde_json::from_value(Value::Object(entry))?;
                Ok(DirectoryHost { host, hostgroups })
            })
            .collect::<Result<_, serde_json::Error>>()?;
        Ok(Self {
            hosts,
            users: raw.users,
        })
    }
}

/// Identity provider backed by a JSON directory file.
///
/// The file is read on every call so edits take effect without a restart.
/// A user missing from the directory has no allowed hosts.
#[derive(Debug, Clone)]
pub struct JsonIdp {
    path: PathBuf,
    username: String,
    hostgroup: Option<String>,
}

impl JsonIdp {
    pub fn new(
        path: impl Into<PathBuf>,
        username: impl Into<String>,
        hostgroup: Option<String>,
    ) -> Self {
        Self {
            path: path.into(),
            username: username.into(),
            hostgroup,
        }
    }

    /// Directory file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_directory(&self) -> Result<Directory, IdpError> {
        let data = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            warn!(path = %self.path.display(), error = %e, error_type = ERROR_IDP, "failed to read host directory");
            e
        })?;
        let raw: RawDirectory = serde_json::from_str(&data)?;
        Ok(Directory::try_from(raw)?)
    }

    fn in_hostgroup(&self, entry: &DirectoryHost) -> bool {
        match self.hostgroup {
            Some(ref group) => entry.hostgroups.iter().any(|g| g == group),
            None => true,
        }
    }
}

#[async_trait]
impl IdentityProvider for JsonIdp {
    async fn list_allowed(&self) -> Result<Vec<HostRecord>, IdpError> {
        let directory = self.read_directory().await?;

        let Some(allowed) = directory.users.get(&self.username) else {
            debug!(user = %self.username, "user not present in host directory");
            return Ok(Vec::new());
        };

        let mut hosts = Vec::with_capacity(allowed.len());
        for fqdn in allowed {
            let mut found = false;
            for entry in directory.hosts.iter().filter(|e| &e.host.fqdn == fqdn) {
                found = true;
                if self.in_hostgroup(entry) {
                    hosts.push(entry.host.clone());
                }
            }
            if !found {
                warn!(user = %self.username, host = %fqdn, "allowed host missing from host directory");
            }
        }

        debug!(
            user = %self.username,
            hostgroup = ?self.hostgroup,
            count = hosts.len(),
            "listed hosts from directory"
        );
        Ok(hosts)
    }

    fn name(&self) -> &str {
        "json"
    }
}
