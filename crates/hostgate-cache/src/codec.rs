//! Cache key and value encoding.

use hostgate_core::{HOSTS_CACHE_KEY_SUFFIX, HostRecord};

use crate::error::CacheError;

/// Cache key holding the host list of `username`.
#[inline]
pub fn user_hosts_key(username: &str) -> String {
    format!("{username}{HOSTS_CACHE_KEY_SUFFIX}")
}

/// Encode a host (with its categories) as a cache field value.
pub fn encode_host(host: &HostRecord) -> Result<String, CacheError> {
    Ok(serde_json::to_string(host)?)
}

/// Decode a cache field value back into a host.
pub fn decode_host(value: &str) -> Result<HostRecord, CacheError> {
    Ok(serde_json::from_str(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_format() {
        assert_eq!(user_hosts_key("alice"), "alice:hosts");
    }

    #[test]
    fn categorized_host_survives_cache() {
        let mut host = HostRecord::new("db-1.example.com")
            .with_description("primary")
            .with_ssh_port(2222)
            .with_key_path("/keys/db")
            .with_attribute("ip_address", "10.0.0.5");
        host.add_category("db");
        host.add_category("prod");

        let decoded = decode_host(&encode_host(&host).unwrap()).unwrap();
        assert_eq!(decoded, host);
        assert_eq!(decoded.description, "primary");
        assert_eq!(decoded.key_path, "/keys/db");
        assert_eq!(decoded.categories(), host.categories());
        assert_eq!(decoded.field("ip_address").as_deref(), Some("10.0.0.5"));
    }

    #[test]
    fn encoded_layout() {
        let mut host = HostRecord::new("db-1");
        host.add_category("db");
        let value: serde_json::Value = serde_json::from_str(&encode_host(&host).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "fqdn": "db-1",
                "description": "",
                "ssh_port": 22,
                "key_path": "",
                "categories": ["db"]
            })
        );
    }

    #[test]
    fn decode_accepts_camel_case() {
        let host =
            decode_host(r#"{"fqdn": "web-1", "sshPort": 2200, "keyPath": "/k", "categories": ["web", "web"]}"#)
                .unwrap();
        assert_eq!(host.ssh_port, 2200);
        assert_eq!(host.key_path, "/k");
        assert_eq!(host.categories().len(), 1);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(decode_host("not json"), Err(CacheError::Codec(_))));
        assert!(matches!(decode_host(r#"{"ssh_port": 22}"#), Err(CacheError::Codec(_))));
    }
}
