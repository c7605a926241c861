//! IP CIDR matcher.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use hostgate_core::HostRecord;
use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use parking_lot::RwLock;
use tracing::debug;

use super::Matcher;
use crate::rule::RuleSpec;

/// Matcher for CIDR rules. Only registered when CIDR categories are enabled.
///
/// The target field is parsed as an IP address; values are CIDR blocks or
/// bare addresses. Anything that does not parse simply does not match.
/// The blocks of each distinct value list are parsed once and kept.
#[derive(Debug, Default)]
pub struct CidrMatcher {
    sets: RwLock<HashMap<Vec<String>, Arc<CidrSet>>>,
}

impl CidrMatcher {
    pub const RULE_TYPE: &'static str = "CIDR";

    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct value lists parsed so far.
    pub fn parsed_count(&self) -> usize {
        self.sets.read().len()
    }

    fn blocks(&self, values: &[String]) -> Arc<CidrSet> {
        if let Some(set) = self.sets.read().get(values) {
            return Arc::clone(set);
        }

        let mut sets = self.sets.write();
        Arc::clone(
            sets.entry(values.to_vec())
                .or_insert_with(|| Arc::new(CidrSet::from_values(values))),
        )
    }
}

impl Matcher for CidrMatcher {
    fn rule_type(&self) -> &str {
        Self::RULE_TYPE
    }

    fn matches(&self, host: &HostRecord, rule: &RuleSpec) -> bool {
        let Some(value) = host.field(rule.target()) else {
            return false;
        };
        let Ok(ip) = value.trim().parse::<IpAddr>() else {
            return false;
        };
        self.blocks(rule.values()).contains(ip)
    }
}

/// CIDR blocks of one rule, split by address family.
#[derive(Debug, Default)]
struct CidrSet {
    v4: Vec<Ipv4Net>,
    v6: Vec<Ipv6Net>,
}

impl CidrSet {
    fn from_values(values: &[String]) -> Self {
        let mut set = Self::default();
        for raw in values {
            match parse_net(raw) {
                Some(IpNet::V4(net)) => set.v4.push(net),
                Some(IpNet::V6(net)) => set.v6.push(net),
                None => debug!(value = %raw, "ignoring unparsable CIDR rule value"),
            }
        }
        set
    }

    fn contains(&self, ip: IpAddr) -> bool {
        match ip {
            IpAddr::V4(v4) => self.contains_v4(v4),
            IpAddr::V6(v6) => self.contains_v6(v6),
        }
    }

    fn contains_v4(&self, addr: Ipv4Addr) -> bool {
        self.v4.iter().any(|cidr| cidr.contains(&addr))
    }

    fn contains_v6(&self, addr: Ipv6Addr) -> bool {
        self.v6.iter().any(|cidr| cidr.contains(&addr))
    }
}

fn parse_net(raw: &str) -> Option<IpNet> {
    let raw = raw.trim();
    raw.parse::<IpNet>()
        .ok()
        .or_else(|| raw.parse::<IpAddr>().ok().map(IpNet::from))
}
