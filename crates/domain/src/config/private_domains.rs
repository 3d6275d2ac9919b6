use std::collections::BTreeMap;

/// Static private zones: zone name → host name → dotted IPv4 string
///
/// ```toml
/// [private_domains.internal]
/// db = "10.1.2.3"
/// cache = "10.1.2.4"
/// ```
///
/// Every leaf becomes one entry of the zone table, keyed by its FQDN.
pub type PrivateDomains = BTreeMap<String, BTreeMap<String, String>>;

/// Build the fully qualified, dot-terminated name of a private host
///
/// # Examples
/// ```
/// use splitzone_dns_domain::config::private_domains::fqdn;
///
/// assert_eq!(fqdn("db", "internal"), "db.internal.");
///
/// // A zone written in absolute form is not doubled
/// assert_eq!(fqdn("nas", "home.lan."), "nas.home.lan.");
///
/// // DNS names are case-insensitive, keys are stored lowercase
/// assert_eq!(fqdn("NAS", "Home.Lan"), "nas.home.lan.");
/// ```
pub fn fqdn(host: &str, zone: &str) -> String {
    let zone = zone.trim_end_matches('.');
    format!("{}.{}.", host, zone).to_ascii_lowercase()
}
