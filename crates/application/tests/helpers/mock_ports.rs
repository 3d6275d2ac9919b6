#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use splitzone_dns_application::ports::{AddressCache, UpstreamAnswer, UpstreamResolver};
use splitzone_dns_domain::DomainError;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// Mock UpstreamResolver
// ============================================================================

#[derive(Clone)]
pub struct MockUpstream {
    reply: Arc<Mutex<Result<UpstreamAnswer, String>>>,
    calls: Arc<AtomicUsize>,
}

impl MockUpstream {
    /// Upstream that answers every query with `address`
    pub fn answering(address: Ipv4Addr) -> Self {
        Self::with_reply(Ok(UpstreamAnswer::new(
            Some(address),
            Bytes::from_static(b"upstream-wire"),
        )))
    }

    /// Upstream whose reply has no A record (NXDOMAIN, CNAME-only, ...)
    pub fn empty() -> Self {
        Self::with_reply(Ok(UpstreamAnswer::new(
            None,
            Bytes::from_static(b"nxdomain-wire"),
        )))
    }

    /// Upstream that fails every call
    pub fn failing() -> Self {
        Self::with_reply(Err("connection refused".to_string()))
    }

    fn with_reply(reply: Result<UpstreamAnswer, String>) -> Self {
        Self {
            reply: Arc::new(Mutex::new(reply)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstream {
    async fn resolve(&self, _raw_query: &[u8]) -> Result<UpstreamAnswer, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .lock()
            .unwrap()
            .clone()
            .map_err(DomainError::IoError)
    }
}

// ============================================================================
// Mock AddressCache
// ============================================================================

#[derive(Clone, Default)]
pub struct MockCache {
    entries: Arc<Mutex<HashMap<String, Ipv4Addr>>>,
    gets: Arc<AtomicUsize>,
    sets: Arc<AtomicUsize>,
}

impl MockCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preload(&self, fqdn: &str, address: Ipv4Addr) {
        self.entries.lock().unwrap().insert(fqdn.to_string(), address);
    }

    pub fn stored(&self, fqdn: &str) -> Option<Ipv4Addr> {
        self.entries.lock().unwrap().get(fqdn).copied()
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    /// Cache writes are spawned; poll until `fqdn` lands or give up.
    pub async fn wait_for(&self, fqdn: &str) -> Option<Ipv4Addr> {
        for _ in 0..100 {
            if let Some(address) = self.stored(fqdn) {
                return Some(address);
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        None
    }
}

#[async_trait]
impl AddressCache for MockCache {
    async fn get(&self, fqdn: &str) -> Option<Ipv4Addr> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.stored(fqdn)
    }

    async fn set(&self, fqdn: &str, address: Ipv4Addr) {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.preload(fqdn, address);
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}
