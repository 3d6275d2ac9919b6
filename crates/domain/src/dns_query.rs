use super::RecordType;
use std::net::SocketAddr;
use std::sync::Arc;

/// A single inbound question (name + record type) and who asked it.
/// Uses `Arc<str>` so the name can move into the cache-write task for free.
#[derive(Debug, Clone)]
pub struct DnsQuery {
    /// Question name, lowercased and dot-terminated
    pub domain: Arc<str>,
    pub record_type: RecordType,
    pub client: SocketAddr,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType, client: SocketAddr) -> Self {
        Self {
            domain: domain.into(),
            record_type,
            client,
        }
    }
}
