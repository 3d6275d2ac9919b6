use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;

use crate::config::private_domains::{fqdn, PrivateDomains};

/// Private-zone lookup table
///
/// Built once from configuration and never mutated afterwards, so it is
/// shared between resolution tasks behind an `Arc` without locking.
/// Keys are lowercase, dot-terminated FQDNs (`db.internal.`).
#[derive(Debug, Clone, Default)]
pub struct ZoneTable {
    entries: HashMap<Arc<str>, Ipv4Addr>,
}

impl ZoneTable {
    /// Flatten zone → host → address into FQDN → address.
    ///
    /// A later duplicate of the same FQDN replaces the earlier one.
    pub fn from_zones(zones: &PrivateDomains) -> Self {
        let mut entries = HashMap::with_capacity(zones.values().map(|h| h.len()).sum());

        for (zone, hosts) in zones {
            for (host, address) in hosts {
                entries.insert(Arc::from(fqdn(host, zone)), parse_octets_lenient(address));
            }
        }

        Self { entries }
    }

    /// Exact-match lookup; `Some` means the name is private.
    ///
    /// Accepts names with or without the trailing dot, in any case.
    pub fn lookup(&self, name: &str) -> Option<Ipv4Addr> {
        if let Some(address) = self.entries.get(name) {
            return Some(*address);
        }
        let mut normalized = name.to_ascii_lowercase();
        if !normalized.ends_with('.') {
            normalized.push('.');
        }
        self.entries.get(normalized.as_str()).copied()
    }

    pub fn is_private(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All private FQDNs, sorted, for the startup log
    pub fn fqdns(&self) -> Vec<Arc<str>> {
        let mut names: Vec<Arc<str>> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Parse a dotted IPv4 string without ever failing
///
/// Each `.`-separated part is read as a byte; a part that is not a number
/// in `0..=255` becomes `0`, missing parts are `0` and parts past the
/// fourth are ignored. Configuration typos therefore yield addresses like
/// `10.0.2.3` instead of a startup error.
pub fn parse_octets_lenient(address: &str) -> Ipv4Addr {
    let mut octets = [0u8; 4];
    for (slot, part) in octets.iter_mut().zip(address.trim().split('.')) {
        *slot = part.parse::<u8>().unwrap_or(0);
    }
    Ipv4Addr::from(octets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_octets_lenient_valid() {
        assert_eq!(parse_octets_lenient("10.1.2.3"), Ipv4Addr::new(10, 1, 2, 3));
    }

    #[test]
    fn test_parse_octets_lenient_bad_parts_become_zero() {
        assert_eq!(parse_octets_lenient("10.x.2.3"), Ipv4Addr::new(10, 0, 2, 3));
        assert_eq!(parse_octets_lenient("10.300.2.3"), Ipv4Addr::new(10, 0, 2, 3));
        assert_eq!(parse_octets_lenient("10.-1.2.3"), Ipv4Addr::new(10, 0, 2, 3));
    }

    #[test]
    fn test_parse_octets_lenient_short_and_long() {
        assert_eq!(parse_octets_lenient("10.1"), Ipv4Addr::new(10, 1, 0, 0));
        assert_eq!(parse_octets_lenient("1.2.3.4.5"), Ipv4Addr::new(1, 2, 3, 4));
        assert_eq!(parse_octets_lenient(""), Ipv4Addr::UNSPECIFIED);
    }
}
