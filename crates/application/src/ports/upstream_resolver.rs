use async_trait::async_trait;
use bytes::Bytes;
use splitzone_dns_domain::DomainError;
use std::net::Ipv4Addr;

/// Reply of the upstream resolver to one relayed query.
#[derive(Debug, Clone)]
pub struct UpstreamAnswer {
    /// First A/IN record of the answer section, if any
    pub address: Option<Ipv4Addr>,
    /// Raw wire bytes of the upstream response, for pass-through mode
    pub wire: Bytes,
}

impl UpstreamAnswer {
    pub fn new(address: Option<Ipv4Addr>, wire: Bytes) -> Self {
        Self { address, wire }
    }
}

/// Application-layer port for forwarding a query to the external resolver.
///
/// The raw query is relayed unmodified. Every failure (socket, timeout,
/// unparseable reply) comes back as an error; the caller decides how to
/// degrade, nothing here retries.
#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    async fn resolve(&self, raw_query: &[u8]) -> Result<UpstreamAnswer, DomainError>;
}
