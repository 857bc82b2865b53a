//! Redis-based coin cache.

use super::{cache_keys, CacheError, CoinCache};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use memecoin_core::{Coin, CoinId, HealthCheck, HealthStatus};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Lifetime of a cached coin snapshot (15 minutes).
pub const COIN_TTL: Duration = Duration::from_secs(15 * 60);

/// Redis-based coin cache.
///
/// Constructed without a pool it is disabled: every lookup misses and
/// writes succeed without doing anything.
#[derive(Component, Clone)]
#[shaku(interface = CoinCache)]
pub struct RedisCoinCache {
    /// Redis connection pool.
    pool: Option<Arc<Pool>>,
    /// Expiration applied to every entry.
    #[shaku(default = COIN_TTL)]
    ttl: Duration,
}

impl RedisCoinCache {
    /// Creates a Redis-backed coin cache.
    #[must_use]
    pub fn new(pool: Arc<Pool>, ttl: Duration) -> Self {
        Self {
            pool: Some(pool),
            ttl,
        }
    }

    /// Creates a no-op cache (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            pool: None,
            ttl: COIN_TTL,
        }
    }

    /// Entry expiration in whole seconds, never zero.
    fn ttl_secs(&self) -> u64 {
        self.ttl.as_secs().max(1)
    }

    async fn get_conn(&self) -> Result<Option<deadpool_redis::Connection>, CacheError> {
        match &self.pool {
            Some(pool) => Ok(Some(pool.get().await?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CoinCache for RedisCoinCache {
    async fn get(&self, id: CoinId) -> Result<Coin, CacheError> {
        let Some(mut conn) = self.get_conn().await? else {
            return Err(CacheError::KeyNotFound);
        };

        let key = cache_keys::coin_by_id(id);
        let value: Option<String> = conn.get(&key).await?;
        match value {
            Some(json) => {
                debug!("Cache hit for key '{}'", key);
                Ok(serde_json::from_str(&json)?)
            }
            None => {
                debug!("Cache miss for key '{}'", key);
                Err(CacheError::KeyNotFound)
            }
        }
    }

    async fn set(&self, coin: &Coin) -> Result<(), CacheError> {
        let Some(mut conn) = self.get_conn().await? else {
            return Ok(());
        };

        let key = cache_keys::coin_by_id(coin.id);
        let json = serde_json::to_string(coin)?;
        conn.set_ex::<_, _, ()>(&key, json, self.ttl_secs()).await?;

        debug!("Cached key '{}' with TTL {}s", key, self.ttl_secs());
        Ok(())
    }

    async fn del(&self, id: CoinId) -> Result<(), CacheError> {
        let Some(mut conn) = self.get_conn().await? else {
            return Ok(());
        };

        let key = cache_keys::coin_by_id(id);
        let deleted: i64 = conn.del(&key).await?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }
}

#[async_trait]
impl HealthCheck for RedisCoinCache {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        let mut conn = match self.get_conn().await {
            Ok(Some(conn)) => conn,
            Ok(None) => return HealthStatus::Degraded("cache disabled".to_string()),
            Err(e) => return HealthStatus::Degraded(e.to_string()),
        };

        let pong: Result<String, _> = deadpool_redis::redis::cmd("PING")
            .query_async(&mut conn)
            .await;
        match pong {
            Ok(_) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Degraded(e.to_string()),
        }
    }

    // Reads fall back to the store when the cache is down.
    fn is_critical(&self) -> bool {
        false
    }
}

impl std::fmt::Debug for RedisCoinCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCoinCache")
            .field("enabled", &self.is_enabled())
            .field("ttl", &self.ttl)
            .finish()
    }
}
