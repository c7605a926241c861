//! CLI module for hostgate host listing.
//!
//! Provides the `list` and `classify` commands used by the unified
//! `hostgate` binary.

use std::fmt::Write as _;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use hostgate_cache::CacheStore;
use hostgate_config::{
    CacheConfig, CliOverrides, LoggingConfig, apply_overrides, load_config, validate_config,
};
use hostgate_core::{ERROR_CACHE, HostRecord};
use hostgate_idp::IdpFactory;
use hostgate_rules::{RegistryOptions, RuleRegistry};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::HostsError;
use crate::rules::build_registry;
use crate::service::HostListService;

/// Arguments of `hostgate list`.
#[derive(Parser, Debug, Clone)]
#[command(name = "hostgate-list", version, about = "List the hosts a user may reach")]
pub struct ListArgs {
    /// Config file path (json/yaml/toml)
    #[arg(short, long, default_value = "hostgate.toml")]
    pub config: PathBuf,

    /// User whose hosts are listed
    #[arg(short, long)]
    pub user: String,

    /// Skip the cache and rebuild the user's entry from the identity provider
    #[arg(long)]
    pub no_cache: bool,

    /// Print hosts as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub overrides: CliOverrides,
}

/// Arguments of `hostgate classify`.
#[derive(Parser, Debug, Clone)]
#[command(name = "hostgate-classify", version, about = "Show the categories of host names")]
pub struct ClassifyArgs {
    /// Category rule file (json/jsonc/yaml)
    #[arg(long)]
    pub categories: PathBuf,

    /// Enable CIDR rules
    #[arg(long)]
    pub allow_cidr: bool,

    /// Print hosts as JSON
    #[arg(long)]
    pub json: bool,

    /// Log level (trace/debug/info/warn/error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Host names to classify
    #[arg(required = true)]
    pub hosts: Vec<String>,
}

/// Run `hostgate list`.
pub async fn run_list(args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(&args.config)?;
    apply_overrides(&mut config, &args.overrides);
    validate_config(&config)?;

    init_tracing(&config.logging);

    let registry = Arc::new(build_registry(&config)?);
    let idp = IdpFactory::new()
        .create(&config.idp, &args.user, config.gateway_hostgroup.as_deref())
        .map_err(HostsError::from)?;
    let cache = connect_cache(&config.cache).await;

    let service = HostListService::new(idp, cache, registry, args.user.as_str()).await;
    let hosts = service.list_allowed(!args.no_cache).await.map_err(|e| {
        let e = HostsError::from(e);
        error!(user = %args.user, error = %e, error_type = e.error_type(), "failed to list hosts");
        e
    })?;

    info!(user = %args.user, count = hosts.len(), "listed allowed hosts");
    if args.json {
        println!("{}", serde_json::to_string_pretty(&hosts)?);
    } else {
        print!("{}", render_text(&hosts));
    }
    Ok(())
}

/// Run `hostgate classify`.
pub fn run_classify(args: ClassifyArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(&LoggingConfig {
        level: Some(args.log_level.clone()),
        ..LoggingConfig::default()
    });

    let registry = RuleRegistry::with_options(&RegistryOptions {
        categories_path: Some(args.categories.clone()),
        allow_cidr: args.allow_cidr,
    })?;

    let mut hosts: Vec<HostRecord> = args.hosts.iter().map(HostRecord::new).collect();
    registry.categorize_all(&mut hosts);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&hosts)?);
    } else {
        print!("{}", render_text(&hosts));
    }
    Ok(())
}

/// Open and return the configured cache store, or `None` when disabled or
/// unreachable.
pub async fn connect_cache(config: &CacheConfig) -> Option<Box<dyn CacheStore>> {
    if !config.enabled {
        info!("host-list cache disabled");
        return None;
    }
    match hostgate_cache::open(&config.url).await {
        Ok(store) => Some(store),
        Err(e) => {
            error!(url = %config.url, error = %e, error_type = ERROR_CACHE, "failed to open cache store");
            None
        }
    }
}

/// One line per host: `fqdn:port`, categories, description, tab separated.
pub fn render_text(hosts: &[HostRecord]) -> String {
    let mut out = String::new();
    for host in hosts {
        let categories: Vec<&str> = host.categories().iter().map(String::as_str).collect();
        let categories = if categories.is_empty() {
            "-".to_string()
        } else {
            categories.join(",")
        };
        let _ = writeln!(out, "{host}\t{categories}\t{}", host.description);
    }
    out
}

/// Initialize tracing subscriber with the given logging configuration.
///
/// Supports:
/// - `level`: Base log level (trace, debug, info, warn, error)
/// - `format`: Output format (json, pretty, compact). Default: pretty
/// - `output`: Output target (stdout, stderr). Default: stderr
/// - `filters`: Per-module level overrides
///
/// A second call is a no-op.
pub fn init_tracing(config: &LoggingConfig) {
    let base_level = config
        .level
        .as_deref()
        .unwrap_or(hostgate_core::DEFAULT_LOG_LEVEL);
    let mut filter_str = base_level.to_string();

    for (module, level) in &config.filters {
        filter_str.push(',');
        filter_str.push_str(module);
        filter_str.push('=');
        filter_str.push_str(level);
    }

    let filter = EnvFilter::try_new(&filter_str)
        .unwrap_or_else(|_| EnvFilter::new(hostgate_core::DEFAULT_LOG_LEVEL));

    let format = config
        .format
        .as_deref()
        .unwrap_or(hostgate_core::DEFAULT_LOG_FORMAT);
    let output = config
        .output
        .as_deref()
        .unwrap_or(hostgate_core::DEFAULT_LOG_OUTPUT);

    let registry = tracing_subscriber::registry().with(filter);
    let _ = match (format, output) {
        ("json", "stdout") => registry
            .with(fmt::layer().json().with_writer(io::stdout))
            .try_init(),
        ("json", _) => registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init(),
        ("compact", "stdout") => registry
            .with(fmt::layer().compact().with_writer(io::stdout))
            .try_init(),
        ("compact", _) => registry
            .with(fmt::layer().compact().with_writer(io::stderr))
            .try_init(),
        (_, "stdout") => registry.with(fmt::layer().with_writer(io::stdout)).try_init(),
        _ => registry.with(fmt::layer().with_writer(io::stderr)).try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_hosts() {
        let mut db = HostRecord::new("db-1").with_description("primary");
        db.add_category("prod");
        db.add_category("db");
        let web = HostRecord::new("web-1").with_ssh_port(2222);

        assert_eq!(
            render_text(&[db, web]),
            "db-1:22\tdb,prod\tprimary\nweb-1:2222\t-\t\n"
        );
    }

    #[test]
    fn parse_list_args() {
        let args = ListArgs::parse_from([
            "hostgate-list",
            "--user",
            "alice",
            "--no-cache",
            "--cache-enabled",
            "false",
        ]);
        assert_eq!(args.user, "alice");
        assert!(args.no_cache);
        assert!(!args.json);
        assert_eq!(args.config, PathBuf::from("hostgate.toml"));
        assert_eq!(args.overrides.cache_enabled, Some(false));
    }

    #[test]
    fn parse_classify_args() {
        let args = ClassifyArgs::parse_from([
            "hostgate-classify",
            "--categories",
            "c.json",
            "--allow-cidr",
            "db-1",
            "10.0.0.1",
        ]);
        assert!(args.allow_cidr);
        assert_eq!(args.hosts, ["db-1", "10.0.0.1"]);
        assert!(ClassifyArgs::try_parse_from(["hostgate-classify", "--categories", "c.json"]).is_err());
    }

    #[tokio::test]
    async fn disabled_cache_is_none() {
        let config = CacheConfig {
            enabled: false,
            url: "memory://".into(),
        };
        assert!(connect_cache(&config).await.is_none());
    }

    #[tokio::test]
    async fn unsupported_cache_is_none() {
        let config = CacheConfig {
            enabled: true,
            url: "memcached://localhost".into(),
        };
        assert!(connect_cache(&config).await.is_none());
    }

    #[tokio::test]
    async fn memory_cache_connects() {
        let config = CacheConfig {
            enabled: true,
            url: "memory://".into(),
        };
        let store = connect_cache(&config).await.unwrap();
        assert!(store.ping().await);
    }
}
