use super::clock::{Clock, SystemClock};
use async_trait::async_trait;
use dashmap::DashMap;
use splitzone_dns_application::ports::{AddressCache, CACHE_TTL};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
struct CachedAddress {
    address: Ipv4Addr,
    expires_at: u64,
}

/// In-process address cache.
///
/// Entries expire [`CACHE_TTL`] after they were written. Expired entries
/// are removed lazily on read and in bulk by [`MemoryCache::purge_expired`].
pub struct MemoryCache {
    entries: DashMap<Arc<str>, CachedAddress>,
    clock: Arc<dyn Clock>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every expired entry; returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now_secs();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!(removed = removed, remaining = self.entries.len(), "Purged expired cache entries");
        }
        removed
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AddressCache for MemoryCache {
    async fn get(&self, fqdn: &str) -> Option<Ipv4Addr> {
        let now = self.clock.now_secs();
        if let Some(entry) = self.entries.get(fqdn) {
            if entry.expires_at > now {
                return Some(entry.address);
            }
        } else {
            return None;
        }

        self.entries.remove_if(fqdn, |_, entry| entry.expires_at <= now);
        None
    }

    async fn set(&self, fqdn: &str, address: Ipv4Addr) {
        let expires_at = self.clock.now_secs() + CACHE_TTL.as_secs();
        self.entries
            .insert(Arc::from(fqdn), CachedAddress { address, expires_at });
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
