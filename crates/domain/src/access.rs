use ipnetwork::{IpNetwork, Ipv4Network};
use std::fmt;
use std::net::IpAddr;

use crate::errors::DomainError;

/// One entry of the allowed-sources list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessRule {
    /// `192.168.1.0/24`, `fd00::/8`
    Network(IpNetwork),
    /// `127.0.0.1`, matched against the canonical form of the source
    Exact(IpAddr),
}

impl AccessRule {
    /// Entries containing a `/` are CIDR blocks, everything else must be a
    /// literal address.
    ///
    /// IPv4-mapped IPv6 entries are stored as IPv4, the same form sources
    /// are compared in.
    pub fn parse(entry: &str) -> Result<Self, DomainError> {
        let entry = entry.trim();
        if entry.contains('/') {
            let network = entry
                .parse::<IpNetwork>()
                .map_err(|e| DomainError::InvalidCidr(format!("{}: {}", entry, e)))?;
            Ok(AccessRule::Network(canonical_network(network)))
        } else {
            entry
                .parse::<IpAddr>()
                .map(|ip| AccessRule::Exact(ip.to_canonical()))
                .map_err(|_| DomainError::InvalidIpAddress(entry.to_string()))
        }
    }

    pub fn matches(&self, ip: IpAddr) -> bool {
        match self {
            AccessRule::Network(network) => network.contains(ip),
            AccessRule::Exact(allowed) => *allowed == ip,
        }
    }
}

/// `::ffff:a.b.c.d/n` with `n >= 96` becomes `a.b.c.d/(n - 96)`
fn canonical_network(network: IpNetwork) -> IpNetwork {
    let IpNetwork::V6(v6) = network else {
        return network;
    };
    match v6.ip().to_ipv4_mapped() {
        Some(v4) if v6.prefix() >= 96 => Ipv4Network::new(v4, v6.prefix() - 96)
            .map(IpNetwork::V4)
            .unwrap_or(network),
        _ => network,
    }
}

impl fmt::Display for AccessRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessRule::Network(network) => write!(f, "{}", network),
            AccessRule::Exact(ip) => write!(f, "{}", ip),
        }
    }
}

/// Admission control for query sources
///
/// Rules are evaluated in configured order and the first match admits the
/// source. An empty rule list admits nobody: an open resolver has to be
/// asked for explicitly with `0.0.0.0/0`.
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    rules: Vec<AccessRule>,
}

impl AccessGate {
    pub fn from_entries<S: AsRef<str>>(entries: &[S]) -> Result<Self, DomainError> {
        let rules = entries
            .iter()
            .map(|entry| AccessRule::parse(entry.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// The port of the source is irrelevant, only its address is checked.
    /// IPv4-mapped IPv6 sources from dual-stack sockets are checked as IPv4.
    pub fn is_allowed(&self, source: IpAddr) -> bool {
        let source = source.to_canonical();
        self.rules.iter().any(|rule| rule.matches(source))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[AccessRule] {
        &self.rules
    }
}
