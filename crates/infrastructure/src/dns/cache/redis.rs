use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{Client, ConnectionInfo, IntoConnectionInfo, RedisResult};
use splitzone_dns_application::ports::{AddressCache, CACHE_TTL};
use splitzone_dns_domain::config::CacheConfig;
use splitzone_dns_domain::DomainError;
use std::future::Future;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// How long the cache is bypassed after a timeout or a failed connect.
const UNAVAILABLE_BACKOFF: Duration = Duration::from_secs(5);

/// Address cache backed by a Redis-compatible key/value server.
///
/// Keys are FQDNs and values the dotted-quad address, written with
/// `SET key value EX 43200`. The connection is opened on first use and
/// re-established by the connection manager after failures.
///
/// Each `get`/`set` is bounded by the configured timeout as a whole,
/// connecting included. After a timeout or a failed connect the cache is
/// bypassed for [`UNAVAILABLE_BACKOFF`], so a hung server costs at most one
/// timeout per window instead of one per query.
pub struct RedisCache {
    client: Client,
    config: ConnectionManagerConfig,
    timeout: Duration,
    conn: OnceCell<ConnectionManager>,
    epoch: Instant,
    /// Milliseconds since `epoch` before which the cache is skipped
    retry_after_ms: AtomicU64,
}

impl RedisCache {
    pub fn new(cache: &CacheConfig) -> Result<Self, DomainError> {
        let info = connection_info(cache)?;
        let client = Client::open(info)
            .map_err(|e| DomainError::CacheError(format!("Invalid cache endpoint: {}", e)))?;

        let timeout = cache.timeout();
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(cache.max_retries)
            .set_connection_timeout(timeout)
            .set_response_timeout(timeout);

        info!(
            host = %cache.host,
            db = cache.db,
            timeout_ms = cache.timeout_ms,
            "Redis cache configured"
        );

        Ok(Self {
            client,
            config,
            timeout,
            conn: OnceCell::new(),
            epoch: Instant::now(),
            retry_after_ms: AtomicU64::new(0),
        })
    }

    fn elapsed_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// Whether the cache is inside its backoff window
    pub fn is_backing_off(&self) -> bool {
        self.elapsed_ms() < self.retry_after_ms.load(Ordering::Relaxed)
    }

    fn back_off(&self) {
        let until = self.elapsed_ms() + UNAVAILABLE_BACKOFF.as_millis() as u64;
        self.retry_after_ms.store(until, Ordering::Relaxed);
    }

    async fn connection(&self) -> Result<ConnectionManager, DomainError> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                let conn =
                    ConnectionManager::new_with_config(self.client.clone(), self.config.clone())
                        .await
                        .map_err(|e| {
                            DomainError::CacheError(format!("Redis connection failed: {}", e))
                        })?;
                debug!("Redis connection established");
                Ok::<_, DomainError>(conn)
            })
            .await?;
        Ok(conn.clone())
    }

    /// Run `operation` under the cache timeout and update the backoff window.
    async fn bounded<T, F>(&self, command: &str, operation: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        match tokio::time::timeout(self.timeout, operation).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                if !self.conn.initialized() {
                    self.back_off();
                }
                Err(e)
            }
            Err(_) => {
                self.back_off();
                Err(DomainError::CacheError(format!(
                    "Redis {} timed out after {}ms",
                    command,
                    self.timeout.as_millis()
                )))
            }
        }
    }

    async fn fetch(&self, fqdn: &str) -> Result<Option<String>, DomainError> {
        self.bounded("GET", async {
            let mut conn = self.connection().await?;
            let reply: RedisResult<Option<String>> =
                redis::cmd("GET").arg(fqdn).query_async(&mut conn).await;
            reply.map_err(|e| DomainError::CacheError(format!("Redis GET failed: {}", e)))
        })
        .await
    }

    async fn store(&self, fqdn: &str, address: Ipv4Addr) -> Result<(), DomainError> {
        self.bounded("SET", async {
            let mut conn = self.connection().await?;
            let reply: RedisResult<()> = redis::cmd("SET")
                .arg(fqdn)
                .arg(address.to_string())
                .arg("EX")
                .arg(CACHE_TTL.as_secs())
                .query_async(&mut conn)
                .await;
            reply.map_err(|e| DomainError::CacheError(format!("Redis SET failed: {}", e)))
        })
        .await
    }
}

#[async_trait]
impl AddressCache for RedisCache {
    async fn get(&self, fqdn: &str) -> Option<Ipv4Addr> {
        if self.is_backing_off() {
            debug!(domain = %fqdn, "Cache unavailable, skipping lookup");
            return None;
        }
        match self.fetch(fqdn).await {
            Ok(Some(value)) => match Ipv4Addr::from_str(&value) {
                Ok(address) => Some(address),
                Err(_) => {
                    warn!(domain = %fqdn, value = %value, "Ignoring non-IPv4 cache value");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(domain = %fqdn, error = %e, "Cache lookup failed");
                None
            }
        }
    }

    async fn set(&self, fqdn: &str, address: Ipv4Addr) {
        if self.is_backing_off() {
            debug!(domain = %fqdn, "Cache unavailable, skipping write");
            return;
        }
        if let Err(e) = self.store(fqdn, address).await {
            warn!(domain = %fqdn, error = %e, "Cache write failed");
        }
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

fn connection_info(cache: &CacheConfig) -> Result<ConnectionInfo, DomainError> {
    let mut info = format!("redis://{}", cache.host)
        .into_connection_info()
        .map_err(|e| {
            DomainError::CacheError(format!("Invalid cache host '{}': {}", cache.host, e))
        })?;
    info.redis.db = cache.db;
    info.redis.password = cache.password.clone().filter(|p| !p.is_empty());
    Ok(info)
}
