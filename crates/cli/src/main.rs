//! # Splitzone DNS
//!
//! Split-horizon resolver: answers A queries for private zones from a
//! static table and forwards everything else upstream.

mod bootstrap;
mod di;
mod server;

use clap::Parser;
use splitzone_dns_domain::CliOverrides;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "splitzone-dns")]
#[command(version)]
#[command(about = "Split-horizon DNS resolver for private zones")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Listen address (overrides server.listen_addr)
    #[arg(short = 'b', long)]
    listen_addr: Option<String>,

    /// Listen port (overrides server.listen_port)
    #[arg(short = 'p', long)]
    listen_port: Option<u16>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short = 'l', long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        listen_addr: cli.listen_addr,
        listen_port: cli.listen_port,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);

    let listen = config.server.listen_socket_addr()?;

    info!("Splitzone DNS starting");

    let services = di::DnsServices::new(&config)?;

    info!(
        config_file = cli.config.as_deref().unwrap_or("default"),
        listen = %listen,
        upstream = %services.forwarder.server_addr(),
        upstream_timeout_ms = services.forwarder.timeout().as_millis() as u64,
        cache = services.cache.as_ref().map(|c| c.backend_name()).unwrap_or("disabled"),
        forward_mode = config.server.forward_mode.as_str(),
        private_hosts = config.private_host_count(),
        "Configuration loaded"
    );

    for fqdn in services.zones.fqdns() {
        info!(domain = %fqdn, "Private domain");
    }

    server::start_dns_server(
        listen,
        services.gate.clone(),
        services.handler.clone(),
        config.server.query_timeout(),
        async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => {
                    warn!(error = %e, "Unable to listen for shutdown signal");
                    std::future::pending::<()>().await;
                }
            }
        },
    )
    .await
}
