//! Configuration module for Splitzone DNS
//!
//! This module contains all configuration structures organized by concern:
//! - `root`: Main configuration, file discovery and CLI overrides
//! - `server`: Listener binding, upstream resolver and access list
//! - `cache`: Optional response cache connection
//! - `logging`: Logging settings
//! - `private_domains`: Static zone → host → address map
//! - `errors`: Configuration errors

pub mod cache;
pub mod errors;
pub mod logging;
pub mod private_domains;
pub mod root;
pub mod server;

pub use cache::{CacheBackend, CacheConfig};
pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use private_domains::PrivateDomains;
pub use root::{CliOverrides, Config};
pub use server::{ForwardMode, ServerConfig, UnresolvedPolicy};
