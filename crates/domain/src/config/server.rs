use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use super::errors::ConfigError;

/// Port used for the upstream resolver when `external_dns` carries none.
pub const DEFAULT_UPSTREAM_PORT: u16 = 53;

/// How non-private queries are answered.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ForwardMode {
    /// Parse the upstream reply and answer with the first A record it carries.
    #[default]
    Extract,

    /// Relay the upstream reply to the client byte for byte.
    PassThrough,
}

impl ForwardMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extract => "extract",
            Self::PassThrough => "pass_through",
        }
    }
}

/// What to send when the upstream cannot resolve a name.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedPolicy {
    /// Answer with an A record pointing at `0.0.0.0`.
    #[default]
    ZeroAddress,

    /// Send nothing.
    Drop,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Upstream recursive resolver, `ip` or `ip:port`
    pub external_dns: String,

    /// Literal IPs and CIDR blocks allowed to query. Empty denies everyone.
    #[serde(default)]
    pub allowed_ips: Vec<String>,

    #[serde(default)]
    pub forward_mode: ForwardMode,

    #[serde(default)]
    pub unresolved: UnresolvedPolicy,

    #[serde(default = "default_upstream_timeout_ms")]
    pub upstream_timeout_ms: u64,

    /// Deadline for a whole query task, upstream round trip included
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

impl ServerConfig {
    pub fn listen_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.listen_addr.parse().map_err(|_| {
            ConfigError::Validation(format!("Invalid listen_addr '{}'", self.listen_addr))
        })?;
        Ok(SocketAddr::new(ip, self.listen_port))
    }

    /// Resolve `external_dns` to a socket address, defaulting to port 53.
    pub fn upstream_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = self.external_dns.trim();
        if let Ok(addr) = raw.parse::<SocketAddr>() {
            return Ok(addr);
        }
        raw.parse::<IpAddr>()
            .map(|ip| SocketAddr::new(ip, DEFAULT_UPSTREAM_PORT))
            .map_err(|_| {
                ConfigError::Validation(format!(
                    "external_dns '{}' is not an IP address",
                    self.external_dns
                ))
            })
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            listen_port: default_listen_port(),
            external_dns: "8.8.8.8".to_string(),
            allowed_ips: vec![],
            forward_mode: ForwardMode::default(),
            unresolved: UnresolvedPolicy::default(),
            upstream_timeout_ms: default_upstream_timeout_ms(),
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_listen_port() -> u16 {
    53
}

fn default_upstream_timeout_ms() -> u64 {
    2000
}

fn default_query_timeout_ms() -> u64 {
    5000
}
