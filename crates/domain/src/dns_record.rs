use std::fmt;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// TTL carried by every synthesized A answer, in seconds
pub const ANSWER_TTL: u32 = 600;

/// Record types seen in inbound questions.
///
/// Only `A` is answered; the others exist so that dropped queries can be
/// logged by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    MX,
    TXT,
    PTR,
    SRV,
    SOA,
    NS,
    HTTPS,
    ANY,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::CNAME => "CNAME",
            RecordType::MX => "MX",
            RecordType::TXT => "TXT",
            RecordType::PTR => "PTR",
            RecordType::SRV => "SRV",
            RecordType::SOA => "SOA",
            RecordType::NS => "NS",
            RecordType::HTTPS => "HTTPS",
            RecordType::ANY => "ANY",
        }
    }

    /// Wire value (RFC 1035 / IANA registry)
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(RecordType::A),
            2 => Some(RecordType::NS),
            5 => Some(RecordType::CNAME),
            6 => Some(RecordType::SOA),
            12 => Some(RecordType::PTR),
            15 => Some(RecordType::MX),
            16 => Some(RecordType::TXT),
            28 => Some(RecordType::AAAA),
            33 => Some(RecordType::SRV),
            65 => Some(RecordType::HTTPS),
            255 => Some(RecordType::ANY),
            _ => None,
        }
    }

    /// Whether the resolver produces answers for this type
    pub fn is_answerable(&self) -> bool {
        matches!(self, RecordType::A)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A synthesized A answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    pub domain: Arc<str>,
    pub address: Ipv4Addr,
    pub ttl: u32,
}

impl DnsRecord {
    pub fn a(domain: Arc<str>, address: Ipv4Addr) -> Self {
        Self {
            domain,
            address,
            ttl: ANSWER_TTL,
        }
    }
}
