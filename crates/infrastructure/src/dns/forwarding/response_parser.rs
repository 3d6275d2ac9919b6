use bytes::Bytes;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{DNSClass, RData, RecordType};
use splitzone_dns_domain::DomainError;
use std::net::Ipv4Addr;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// First A/IN record of the answer section
    pub address: Option<Ipv4Addr>,

    pub rcode: ResponseCode,

    /// Raw wire bytes of the upstream DNS response.
    pub raw_bytes: Bytes,
}

impl UpstreamResponse {
    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }
}

pub struct ResponseParser;

impl ResponseParser {
    /// Parses DNS response from owned bytes (zero-copy for raw_bytes).
    pub fn parse_bytes(response_bytes: Bytes) -> Result<UpstreamResponse, DomainError> {
        let message = Message::from_vec(&response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let address = Self::first_a_record(&message);

        debug!(
            rcode = ?rcode,
            answers = message.answers().len(),
            address = ?address,
            "DNS response parsed"
        );

        Ok(UpstreamResponse {
            address,
            rcode,
            raw_bytes: response_bytes,
        })
    }

    /// Scan the answer section for the first record of type A and class IN.
    ///
    /// CNAMEs and any other records in front of it are skipped.
    pub fn first_a_record(message: &Message) -> Option<Ipv4Addr> {
        message
            .answers()
            .iter()
            .filter(|record| {
                record.record_type() == RecordType::A && record.dns_class() == DNSClass::IN
            })
            .find_map(|record| match record.data() {
                RData::A(a) => Some(a.0),
                _ => None,
            })
    }
}
