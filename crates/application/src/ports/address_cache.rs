use async_trait::async_trait;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Lifetime of every cached address; no sliding expiration.
pub const CACHE_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// Application-layer port for the resolved-address cache.
///
/// Caching is best-effort. Implementations swallow their own failures:
/// a broken backend reads as a miss and writes as a no-op, after logging.
/// Both methods must be safe to call from many tasks at once.
#[async_trait]
pub trait AddressCache: Send + Sync {
    /// Cached address for `fqdn`, `None` on miss, expiry or backend error.
    async fn get(&self, fqdn: &str) -> Option<Ipv4Addr>;

    /// Store `address` for `fqdn` for [`CACHE_TTL`].
    async fn set(&self, fqdn: &str, address: Ipv4Addr);

    /// Backend name for logs
    fn backend_name(&self) -> &'static str;
}
