use splitzone_dns_domain::config::PrivateDomains;
use splitzone_dns_domain::ZoneTable;
use std::collections::BTreeMap;
use std::net::Ipv4Addr;

fn zones(entries: &[(&str, &[(&str, &str)])]) -> PrivateDomains {
    entries
        .iter()
        .map(|(zone, hosts)| {
            let hosts: BTreeMap<String, String> = hosts
                .iter()
                .map(|(host, ip)| (host.to_string(), ip.to_string()))
                .collect();
            (zone.to_string(), hosts)
        })
        .collect()
}

#[test]
fn test_every_configured_host_is_private() {
    let table = ZoneTable::from_zones(&zones(&[
        ("internal", &[("db", "10.1.2.3"), ("cache", "10.1.2.4")]),
        ("home.lan", &[("nas", "192.168.1.100")]),
    ]));

    assert_eq!(table.len(), 3);
    assert_eq!(table.lookup("db.internal."), Some(Ipv4Addr::new(10, 1, 2, 3)));
    assert_eq!(table.lookup("cache.internal."), Some(Ipv4Addr::new(10, 1, 2, 4)));
    assert_eq!(table.lookup("nas.home.lan."), Some(Ipv4Addr::new(192, 168, 1, 100)));
}

#[test]
fn test_unknown_names_are_not_private() {
    let table = ZoneTable::from_zones(&zones(&[("internal", &[("db", "10.1.2.3")])]));

    assert!(!table.is_private("example.com."));
    assert!(!table.is_private("internal."));
    assert!(!table.is_private("x.db.internal."));
    assert_eq!(table.lookup("web.internal."), None);
}

#[test]
fn test_lookup_is_exact_not_suffix() {
    let table = ZoneTable::from_zones(&zones(&[("internal", &[("db", "10.1.2.3")])]));

    assert!(table.is_private("db.internal."));
    assert!(!table.is_private("replica.db.internal."));
}

#[test]
fn test_lookup_normalizes_case_and_trailing_dot() {
    let table = ZoneTable::from_zones(&zones(&[("internal", &[("db", "10.1.2.3")])]));

    assert!(table.is_private("DB.Internal."));
    assert!(table.is_private("db.internal"));
}

#[test]
fn test_malformed_octets_default_to_zero() {
    let table = ZoneTable::from_zones(&zones(&[("internal", &[("broken", "10.abc.2.999")])]));

    assert_eq!(table.lookup("broken.internal."), Some(Ipv4Addr::new(10, 0, 2, 0)));
}

#[test]
fn test_duplicate_fqdn_last_write_wins() {
    // "internal" and "internal." flatten to the same FQDN
    let table = ZoneTable::from_zones(&zones(&[
        ("internal", &[("db", "10.0.0.1")]),
        ("internal.", &[("db", "10.0.0.2")]),
    ]));

    assert_eq!(table.len(), 1);
    assert_eq!(table.lookup("db.internal."), Some(Ipv4Addr::new(10, 0, 0, 2)));
}

#[test]
fn test_fqdns_sorted_for_logging() {
    let table = ZoneTable::from_zones(&zones(&[("b", &[("y", "1.1.1.1"), ("x", "1.1.1.2")])]));

    let names: Vec<String> = table.fqdns().iter().map(|n| n.to_string()).collect();
    assert_eq!(names, vec!["x.b.", "y.b."]);
}

#[test]
fn test_empty_configuration_builds_empty_table() {
    let table = ZoneTable::from_zones(&PrivateDomains::new());
    assert!(table.is_empty());
    assert!(!table.is_private("db.internal."));
}
