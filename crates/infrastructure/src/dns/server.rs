use crate::dns::forwarding::{MessageBuilder, RecordTypeMapper};
use hickory_proto::op::{Message, MessageType};
use splitzone_dns_application::use_cases::{HandleDnsQueryUseCase, QueryOutcome};
use splitzone_dns_domain::DnsQuery;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Turns one raw client datagram into the bytes to send back, if any.
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    fn normalize_domain(domain: &str) -> String {
        let mut name = domain.to_ascii_lowercase();
        if !name.ends_with('.') {
            name.push('.');
        }
        name
    }

    /// Handle a raw UDP query.
    ///
    /// Returns `None` whenever nothing must be sent: unparseable datagrams,
    /// responses, messages without a question, unsupported types, and
    /// drops decided by the resolution engine. Only the first question is
    /// considered.
    pub async fn handle_raw_udp(&self, buf: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        let request = match Message::from_vec(buf) {
            Ok(message) => message,
            Err(e) => {
                debug!(client = %client, error = %e, "Discarding malformed datagram");
                return None;
            }
        };

        if request.message_type() != MessageType::Query {
            debug!(client = %client, "Discarding non-query message");
            return None;
        }

        let Some(question) = request.queries().first() else {
            debug!(client = %client, "Discarding message with no question");
            return None;
        };

        let domain = Self::normalize_domain(&question.name().to_utf8());
        let hickory_record_type = question.query_type();

        let Some(record_type) = RecordTypeMapper::from_hickory(hickory_record_type) else {
            debug!(
                domain = %domain,
                record_type = ?hickory_record_type,
                client = %client,
                "Unsupported record type, dropping query"
            );
            return None;
        };

        debug!(domain = %domain, record_type = %record_type, client = %client, "DNS query received");

        let query = DnsQuery::new(domain, record_type, client);

        match self.use_case.execute(&query, buf).await {
            QueryOutcome::Answer { record, source } => {
                info!(
                    domain = %query.domain,
                    address = %record.address,
                    source = source.as_str(),
                    client = %client,
                    "Query answered"
                );
                match MessageBuilder::build_a_response(&request, &record) {
                    Ok(bytes) => Some(bytes),
                    Err(e) => {
                        warn!(domain = %query.domain, error = %e, "Failed to build response");
                        None
                    }
                }
            }
            QueryOutcome::PassThrough(wire) => {
                info!(domain = %query.domain, client = %client, "Query relayed");
                Some(wire.to_vec())
            }
            QueryOutcome::Drop(reason) => {
                debug!(domain = %query.domain, reason = ?reason, client = %client, "Query dropped");
                None
            }
        }
    }
}
