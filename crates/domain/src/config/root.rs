use serde::{Deserialize, Serialize};
use std::path::Path;

use super::cache::{CacheBackend, CacheConfig};
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::private_domains::PrivateDomains;
use super::server::{ForwardMode, ServerConfig};
use crate::access::AccessRule;

const DEFAULT_CONFIG_PATHS: [&str; 2] = ["splitzone.toml", "/etc/splitzone/config.toml"];

/// Main configuration structure for Splitzone DNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener, upstream resolver and access list
    pub server: ServerConfig,

    /// Response cache; absent means no caching
    #[serde(default)]
    pub cache: Option<CacheConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Zones answered locally
    #[serde(default)]
    pub private_domains: PrivateDomains,
}

impl Config {
    /// Load configuration from file
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. splitzone.toml in current directory
    /// 3. /etc/splitzone/config.toml
    ///
    /// Unlike most settings files there is no built-in fallback: serving
    /// without the operator's zones and access list is refused.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let found = DEFAULT_CONFIG_PATHS
                    .iter()
                    .find(|candidate| Path::new(candidate).exists())
                    .ok_or_else(|| ConfigError::NotFound(DEFAULT_CONFIG_PATHS.join(", ")))?;
                Self::from_file(found)?
            }
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(addr) = overrides.listen_addr {
            self.server.listen_addr = addr;
        }
        if let Some(port) = overrides.listen_port {
            self.server.listen_port = port;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.listen_port == 0 {
            return Err(ConfigError::Validation(
                "listen_port cannot be 0".to_string(),
            ));
        }

        self.server.listen_socket_addr()?;
        self.server.upstream_addr()?;

        if self.server.upstream_timeout_ms == 0 || self.server.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Timeouts must be greater than 0".to_string(),
            ));
        }

        for entry in &self.server.allowed_ips {
            AccessRule::parse(entry).map_err(|e| ConfigError::Validation(e.to_string()))?;
        }

        if let Some(cache) = &self.cache {
            if cache.backend == CacheBackend::Redis && cache.host.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "Cache host cannot be empty".to_string(),
                ));
            }
            if cache.timeout_ms == 0 {
                return Err(ConfigError::Validation(
                    "Cache timeout_ms must be greater than 0".to_string(),
                ));
            }
            if self.server.forward_mode == ForwardMode::PassThrough {
                return Err(ConfigError::Validation(
                    "forward_mode 'pass_through' cannot be combined with a cache".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Total number of private hosts across all zones
    pub fn private_host_count(&self) -> usize {
        self.private_domains.values().map(|hosts| hosts.len()).sum()
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub listen_addr: Option<String>,
    pub listen_port: Option<u16>,
    pub log_level: Option<String>,
}
