use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Response cache backend
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CacheBackend {
    /// External key-value store speaking the Redis protocol
    #[default]
    Redis,

    /// Process-local expiring map
    Memory,
}

/// Optional response cache configuration
///
/// When the `[cache]` section is absent, every lookup is a miss and
/// nothing is ever written.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,

    /// `host` or `host:port` of the key-value store
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default)]
    pub password: Option<String>,

    /// Database index selected after connecting
    #[serde(default)]
    pub db: i64,

    /// Reconnect attempts made by the connection manager
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Connect and per-command timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl CacheConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            host: default_host(),
            password: None,
            db: 0,
            max_retries: default_max_retries(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1:6379".to_string()
}

fn default_max_retries() -> usize {
    3
}

fn default_timeout_ms() -> u64 {
    500
}
