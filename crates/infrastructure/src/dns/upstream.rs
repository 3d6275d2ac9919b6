use async_trait::async_trait;
use bytes::Bytes;
use splitzone_dns_application::ports::{UpstreamAnswer, UpstreamResolver};
use splitzone_dns_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

use super::forwarding::ResponseParser;
use super::transport::{DnsTransport, UdpTransport};

/// Relays raw client queries to the single external resolver over UDP.
pub struct UdpForwarder {
    transport: UdpTransport,
    timeout: Duration,
}

impl UdpForwarder {
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        Self {
            transport: UdpTransport::new(server),
            timeout,
        }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.transport.server_addr()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl UpstreamResolver for UdpForwarder {
    async fn resolve(&self, raw_query: &[u8]) -> Result<UpstreamAnswer, DomainError> {
        let response = self.transport.send(raw_query, self.timeout).await?;
        let parsed = ResponseParser::parse_bytes(Bytes::from(response.bytes))?;

        debug!(
            server = %self.server_addr(),
            protocol = self.transport.protocol_name(),
            rcode = ?parsed.rcode,
            nxdomain = parsed.is_nxdomain(),
            address = ?parsed.address,
            "Upstream exchange complete"
        );

        Ok(UpstreamAnswer::new(parsed.address, parsed.raw_bytes))
    }
}
