use super::server::DnsServerHandler;
use super::transport::udp::MAX_UDP_RESPONSE_SIZE;
use splitzone_dns_domain::AccessGate;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, error, info, warn};

const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// UDP receive loop.
///
/// Each accepted datagram is handled on its own task, so a slow upstream
/// never delays other clients. Sources outside the allow-list are dropped
/// before any parsing.
pub struct DnsListener {
    socket: Arc<UdpSocket>,
    gate: Arc<AccessGate>,
    handler: Arc<DnsServerHandler>,
    query_timeout: Duration,
}

impl DnsListener {
    pub fn new(socket: UdpSocket, gate: Arc<AccessGate>, handler: Arc<DnsServerHandler>) -> Self {
        Self {
            socket: Arc::new(socket),
            gate,
            handler,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    /// Upper bound on the time spent on one query, upstream included.
    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Serve until `shutdown` completes. In-flight query tasks are not
    /// awaited.
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut recv_buf = [0u8; MAX_UDP_RESPONSE_SIZE];
        tokio::pin!(shutdown);

        info!(address = ?self.socket.local_addr().ok(), "DNS listener ready");

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("DNS listener stopping");
                    break;
                }
                result = self.socket.recv_from(&mut recv_buf) => {
                    match result {
                        Ok((n, from)) => self.dispatch(&recv_buf[..n], from),
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                        // ICMP port unreachable from a previous send_to surfaces here on some platforms
                        Err(e) if e.kind() == io::ErrorKind::ConnectionReset => continue,
                        Err(e) => {
                            error!(error = %e, "UDP recv error");
                        }
                    }
                }
            }
        }
    }

    fn dispatch(&self, datagram: &[u8], from: SocketAddr) {
        if !self.gate.is_allowed(from.ip()) {
            debug!(client = %from, "Source not allowed, dropping datagram");
            return;
        }

        let handler = Arc::clone(&self.handler);
        let socket = Arc::clone(&self.socket);
        let query_timeout = self.query_timeout;
        let owned_buf: Arc<[u8]> = Arc::from(datagram);

        tokio::spawn(async move {
            let response =
                match tokio::time::timeout(query_timeout, handler.handle_raw_udp(&owned_buf, from))
                    .await
                {
                    Ok(response) => response,
                    Err(_) => {
                        warn!(
                            client = %from,
                            timeout_ms = query_timeout.as_millis() as u64,
                            "Query deadline exceeded"
                        );
                        return;
                    }
                };

            if let Some(response) = response {
                if let Err(e) = socket.send_to(&response, from).await {
                    warn!(client = %from, error = %e, "Failed to send response");
                }
            }
        });
    }
}
