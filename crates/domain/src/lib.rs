//! Splitzone DNS Domain Layer
pub mod access;
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod zone_table;

pub use access::{AccessGate, AccessRule};
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::DnsQuery;
pub use dns_record::{DnsRecord, RecordType, ANSWER_TTL};
pub use errors::DomainError;
pub use zone_table::ZoneTable;
