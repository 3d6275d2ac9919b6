use splitzone_dns_application::ports::AddressCache;
use splitzone_dns_application::use_cases::HandleDnsQueryUseCase;
use splitzone_dns_domain::config::{CacheBackend, CacheConfig};
use splitzone_dns_domain::{AccessGate, Config, ZoneTable};
use splitzone_dns_infrastructure::dns::cache::CachePurger;
use splitzone_dns_infrastructure::dns::{DnsServerHandler, MemoryCache, RedisCache, UdpForwarder};
use std::sync::Arc;
use tracing::{info, warn};

const MEMORY_CACHE_PURGE_INTERVAL_SECS: u64 = 300;

pub struct DnsServices {
    pub zones: Arc<ZoneTable>,
    pub gate: Arc<AccessGate>,
    pub forwarder: Arc<UdpForwarder>,
    pub cache: Option<Arc<dyn AddressCache>>,
    pub handler: Arc<DnsServerHandler>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        info!("Initializing DNS services");

        let zones = Arc::new(ZoneTable::from_zones(&config.private_domains));
        let gate = Self::build_gate(config)?;

        let forwarder = Arc::new(UdpForwarder::new(
            config.server.upstream_addr()?,
            config.server.upstream_timeout(),
        ));

        let cache = config.cache.as_ref().map(Self::build_cache).transpose()?;

        let mut use_case = HandleDnsQueryUseCase::new(zones.clone(), forwarder.clone())
            .with_forward_mode(config.server.forward_mode)
            .with_unresolved_policy(config.server.unresolved);
        if let Some(cache) = &cache {
            use_case = use_case.with_cache(cache.clone());
        }

        let handler = Arc::new(DnsServerHandler::new(Arc::new(use_case)));

        info!(
            private_hosts = zones.len(),
            allow_rules = gate.rules().len(),
            cache = cache.as_ref().map(|c| c.backend_name()).unwrap_or("disabled"),
            forward_mode = config.server.forward_mode.as_str(),
            "DNS services initialized"
        );

        Ok(Self {
            zones,
            gate,
            forwarder,
            cache,
            handler,
        })
    }

    fn build_gate(config: &Config) -> anyhow::Result<Arc<AccessGate>> {
        let gate = AccessGate::from_entries(config.server.allowed_ips.as_slice())?;
        if gate.is_empty() {
            warn!("allowed_ips is empty, every query will be dropped");
        }
        Ok(Arc::new(gate))
    }

    fn build_cache(cache: &CacheConfig) -> anyhow::Result<Arc<dyn AddressCache>> {
        match cache.backend {
            CacheBackend::Redis => {
                let redis: Arc<dyn AddressCache> = Arc::new(RedisCache::new(cache)?);
                Ok(redis)
            }
            CacheBackend::Memory => {
                let memory = Arc::new(MemoryCache::new());
                CachePurger::new(memory.clone(), MEMORY_CACHE_PURGE_INTERVAL_SECS).start();
                info!("In-memory cache enabled");
                Ok(memory as Arc<dyn AddressCache>)
            }
        }
    }
}
