use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid CIDR: {0}")]
    InvalidCidr(String),

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Upstream {server} did not answer within {timeout_ms}ms")]
    UpstreamTimeout { server: String, timeout_ms: u64 },

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}
