use super::memory::MemoryCache;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

/// Background task that sweeps expired entries out of a [`MemoryCache`].
pub struct CachePurger {
    cache: Arc<MemoryCache>,
    interval: Duration,
}

impl CachePurger {
    pub fn new(cache: Arc<MemoryCache>, interval_secs: u64) -> Self {
        Self {
            cache,
            interval: Duration::from_secs(interval_secs.max(1)),
        }
    }

    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                interval_secs = self.interval.as_secs(),
                "Cache purger started"
            );

            loop {
                sleep(self.interval).await;
                let removed = self.cache.purge_expired();
                debug!(removed = removed, size = self.cache.len(), "Cache purge cycle");
            }
        })
    }
}
