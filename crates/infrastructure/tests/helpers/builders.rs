#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use splitzone_dns_application::ports::AddressCache;
use splitzone_dns_application::use_cases::HandleDnsQueryUseCase;
use splitzone_dns_domain::config::{ForwardMode, PrivateDomains};
use splitzone_dns_domain::{AccessGate, ZoneTable};
use splitzone_dns_infrastructure::dns::{DnsListener, DnsServerHandler, UdpForwarder};
use std::collections::BTreeMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// Wire-format query with a single question
pub fn build_query_for(id: u16, name: &str, record_type: RecordType) -> Vec<u8> {
    let mut query = Query::new();
    query.set_name(Name::from_str(name).unwrap());
    query.set_query_type(record_type);
    query.set_query_class(DNSClass::IN);

    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(query);

    let mut buf = Vec::new();
    let mut encoder = BinEncoder::new(&mut buf);
    message.emit(&mut encoder).unwrap();
    buf
}

pub fn build_query(name: &str) -> Vec<u8> {
    build_query_for(0x4242, name, RecordType::A)
}

/// `[private_domains.<zone>]` with the given host entries
pub fn single_zone(zone: &str, hosts: &[(&str, &str)]) -> PrivateDomains {
    let mut zones = BTreeMap::new();
    zones.insert(
        zone.to_string(),
        hosts
            .iter()
            .map(|(h, ip)| (h.to_string(), ip.to_string()))
            .collect(),
    );
    zones
}

/// Handler wired to a real `UdpForwarder` pointing at `upstream`
pub fn resolver_stack(
    zones: &PrivateDomains,
    upstream: SocketAddr,
    cache: Option<Arc<dyn AddressCache>>,
    forward_mode: ForwardMode,
) -> Arc<DnsServerHandler> {
    let forwarder = Arc::new(UdpForwarder::new(upstream, Duration::from_millis(500)));
    let mut use_case = HandleDnsQueryUseCase::new(Arc::new(ZoneTable::from_zones(zones)), forwarder)
        .with_forward_mode(forward_mode);
    if let Some(cache) = cache {
        use_case = use_case.with_cache(cache);
    }
    Arc::new(DnsServerHandler::new(Arc::new(use_case)))
}

/// Listener running on loopback plus a client socket to talk to it
pub struct TestServer {
    pub server_addr: SocketAddr,
    pub client: UdpSocket,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn serve(handler: Arc<DnsServerHandler>, allowed: &[&str]) -> Self {
        Self::serve_with_timeout(handler, allowed, Duration::from_secs(2)).await
    }

    /// Same as `serve` with a custom per-query deadline
    pub async fn serve_with_timeout(
        handler: Arc<DnsServerHandler>,
        allowed: &[&str],
        query_timeout: Duration,
    ) -> Self {
        let gate = Arc::new(AccessGate::from_entries(allowed).unwrap());
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let listener = DnsListener::new(socket, gate, handler).with_query_timeout(query_timeout);
        let server_addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(listener.run_until(async move {
            let _ = shutdown_rx.await;
        }));

        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        Self {
            server_addr,
            client,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Send `query` and wait up to `wait` for a reply
    pub async fn ask(&self, query: &[u8], wait: Duration) -> Option<Vec<u8>> {
        self.client.send_to(query, self.server_addr).await.unwrap();
        let mut buf = vec![0u8; 4096];
        match tokio::time::timeout(wait, self.client.recv_from(&mut buf)).await {
            Ok(Ok((n, _))) => {
                buf.truncate(n);
                Some(buf)
            }
            _ => None,
        }
    }

    pub async fn ask_a(&self, name: &str) -> Option<Ipv4Addr> {
        let reply = self.ask(&build_query(name), Duration::from_secs(3)).await?;
        first_a(&Message::from_vec(&reply).unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub fn first_a(message: &Message) -> Option<Ipv4Addr> {
    message.answers().iter().find_map(|r| match r.data() {
        hickory_proto::rr::RData::A(a) => Some(a.0),
        _ => None,
    })
}
