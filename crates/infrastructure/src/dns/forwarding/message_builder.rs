//! DNS Message Builder
//!
//! Constructs the synthesized A responses sent to clients, in wire format,
//! using `hickory-proto`.

use hickory_proto::op::{Message, MessageType};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use splitzone_dns_domain::{DnsRecord, DomainError};

/// Builds DNS messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build the A response to `request`
    ///
    /// The response keeps the request ID, opcode, RD flag and first
    /// question, and carries one answer owned by the question name. DNS
    /// names compare case-insensitively; the codec may normalize the case
    /// of the owner name.
    pub fn build_a_response(request: &Message, record: &DnsRecord) -> Result<Vec<u8>, DomainError> {
        let question = request.queries().first().ok_or_else(|| {
            DomainError::InvalidDnsMessage("Request has no question".to_string())
        })?;

        let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
        response.set_recursion_desired(request.recursion_desired());
        response.set_recursion_available(true);
        response.add_query(question.clone());
        response.add_answer(Record::from_rdata(
            question.name().clone(),
            record.ttl,
            RData::A(A(record.address)),
        ));

        Self::serialize_message(&response)
    }

    /// Serialize a Message to wire format bytes
    pub fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsMessage(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
