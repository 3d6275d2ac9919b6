use bytes::Bytes;
use splitzone_dns_domain::config::{ForwardMode, UnresolvedPolicy};
use splitzone_dns_domain::{DnsQuery, DnsRecord, ZoneTable};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::ports::{AddressCache, UpstreamResolver};

/// Where the address of an answer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    Cache,
    Local,
    Upstream,
    /// Upstream failed; the answer carries `0.0.0.0`
    Unresolved,
}

impl AnswerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Local => "local",
            Self::Upstream => "upstream",
            Self::Unresolved => "unresolved",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    UnsupportedRecordType,
    Unresolved,
}

/// What the server should send back for one query
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    /// Synthesize an A response carrying this record
    Answer {
        record: DnsRecord,
        source: AnswerSource,
    },
    /// Relay the upstream bytes unchanged
    PassThrough(Bytes),
    /// Send nothing
    Drop(DropReason),
}

/// Resolution engine: cache, then private zones, then upstream.
///
/// Stateless across queries. The zone table is read-only and the cache
/// port is concurrency-safe, so one instance serves every task.
pub struct HandleDnsQueryUseCase {
    zones: Arc<ZoneTable>,
    upstream: Arc<dyn UpstreamResolver>,
    cache: Option<Arc<dyn AddressCache>>,
    forward_mode: ForwardMode,
    unresolved: UnresolvedPolicy,
}

impl HandleDnsQueryUseCase {
    pub fn new(zones: Arc<ZoneTable>, upstream: Arc<dyn UpstreamResolver>) -> Self {
        Self {
            zones,
            upstream,
            cache: None,
            forward_mode: ForwardMode::default(),
            unresolved: UnresolvedPolicy::default(),
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn AddressCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_forward_mode(mut self, forward_mode: ForwardMode) -> Self {
        self.forward_mode = forward_mode;
        self
    }

    pub fn with_unresolved_policy(mut self, unresolved: UnresolvedPolicy) -> Self {
        self.unresolved = unresolved;
        self
    }

    /// Decide the response for `query`; `raw_query` is what gets relayed
    /// upstream when the name is not private.
    pub async fn execute(&self, query: &DnsQuery, raw_query: &[u8]) -> QueryOutcome {
        if !query.record_type.is_answerable() {
            debug!(
                domain = %query.domain,
                record_type = %query.record_type,
                client = %query.client,
                "Unsupported record type, dropping query"
            );
            return QueryOutcome::Drop(DropReason::UnsupportedRecordType);
        }

        if let Some(address) = self.check_cache(query).await {
            return answer(query, address, AnswerSource::Cache);
        }

        if let Some(address) = self.zones.lookup(&query.domain) {
            debug!(domain = %query.domain, address = %address, "Private zone hit");
            return answer(query, address, AnswerSource::Local);
        }

        self.resolve_upstream(query, raw_query).await
    }

    async fn check_cache(&self, query: &DnsQuery) -> Option<Ipv4Addr> {
        let cache = self.cache.as_ref()?;
        let hit = cache.get(&query.domain).await;
        match hit {
            Some(address) => debug!(domain = %query.domain, address = %address, "Cache HIT"),
            None => debug!(domain = %query.domain, "Cache MISS"),
        }
        hit
    }

    async fn resolve_upstream(&self, query: &DnsQuery, raw_query: &[u8]) -> QueryOutcome {
        let reply = match self.upstream.resolve(raw_query).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(domain = %query.domain, error = %e, "Upstream resolution failed");
                return self.unresolved(query);
            }
        };

        if self.forward_mode == ForwardMode::PassThrough {
            debug!(domain = %query.domain, bytes = reply.wire.len(), "Relaying upstream response");
            return QueryOutcome::PassThrough(reply.wire);
        }

        match reply.address {
            Some(address) => {
                debug!(domain = %query.domain, address = %address, "Resolved upstream");
                self.remember(query, address);
                answer(query, address, AnswerSource::Upstream)
            }
            None => {
                debug!(domain = %query.domain, "Upstream response carried no A record");
                self.unresolved(query)
            }
        }
    }

    /// Answer for a name the upstream could not resolve.
    ///
    /// Upstream errors and NXDOMAIN are not relayed in extract mode: the
    /// client gets `0.0.0.0` (or nothing, per policy).
    fn unresolved(&self, query: &DnsQuery) -> QueryOutcome {
        if self.forward_mode == ForwardMode::PassThrough {
            return QueryOutcome::Drop(DropReason::Unresolved);
        }
        match self.unresolved {
            UnresolvedPolicy::ZeroAddress => {
                answer(query, Ipv4Addr::UNSPECIFIED, AnswerSource::Unresolved)
            }
            UnresolvedPolicy::Drop => QueryOutcome::Drop(DropReason::Unresolved),
        }
    }

    /// Fire-and-forget cache write, off the response path.
    fn remember(&self, query: &DnsQuery, address: Ipv4Addr) {
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        let cache = Arc::clone(cache);
        let domain = Arc::clone(&query.domain);
        tokio::spawn(async move {
            cache.set(&domain, address).await;
        });
    }
}

fn answer(query: &DnsQuery, address: Ipv4Addr, source: AnswerSource) -> QueryOutcome {
    QueryOutcome::Answer {
        record: DnsRecord::a(Arc::clone(&query.domain), address),
        source,
    }
}
