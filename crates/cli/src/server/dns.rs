use socket2::{Domain, Protocol, Socket, Type};
use splitzone_dns_domain::AccessGate;
use splitzone_dns_infrastructure::dns::{DnsListener, DnsServerHandler};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::info;

pub async fn start_dns_server<F>(
    socket_addr: SocketAddr,
    gate: Arc<AccessGate>,
    handler: Arc<DnsServerHandler>,
    query_timeout: Duration,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    info!(bind_address = %socket_addr, "Starting DNS server");

    let socket = create_udp_socket(socket_addr)?;
    let listener = DnsListener::new(socket, gate, handler).with_query_timeout(query_timeout);

    info!(protocol = "UDP", address = %listener.local_addr()?, "DNS server listening");

    listener.run_until(shutdown).await;

    info!("DNS server stopped");
    Ok(())
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
