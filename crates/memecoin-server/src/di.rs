//! Dependency injection module using Shaku.
//!
//! `MemeCoinModule` wires the full stack for a single process:
//! - Database pool and MySQL coin DAO
//! - Redis coin cache (no-op when Redis is disabled)
//! - Cache-aside coin repository
//! - Coin service

use deadpool_redis::{Pool, PoolConfig, Runtime};
use memecoin_config::{CacheConfig, RedisConfig};
use memecoin_core::{module, HealthCheck, MemeCoinError, MemeCoinResult};
use memecoin_repository::{
    CachedCoinRepository, CachedCoinRepositoryParameters, DatabasePool, DatabasePoolInterface,
    DatabasePoolParameters, MySqlCoinDao, RedisCoinCache, RedisCoinCacheParameters, WriteEpochs,
};
use memecoin_service::CoinServiceImpl;
use std::sync::Arc;
use tracing::info;

module! {
    pub MemeCoinModule {
        components = [
            DatabasePool,
            MySqlCoinDao,
            RedisCoinCache,
            CachedCoinRepository,
            CoinServiceImpl,
        ],
        providers = [],
    }
}

/// Creates the Redis pool, or `None` when the cache is disabled.
///
/// Connections are opened lazily, so an unreachable Redis does not stop
/// startup.
pub fn create_redis_pool(config: &RedisConfig) -> MemeCoinResult<Option<Arc<Pool>>> {
    if !config.enabled {
        info!("Redis cache disabled");
        return Ok(None);
    }

    let mut redis_cfg = deadpool_redis::Config::from_url(&config.url);
    redis_cfg.pool = Some(PoolConfig::new(config.pool_size));
    let pool = redis_cfg
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| MemeCoinError::Cache(format!("Failed to create Redis pool: {e}")))?;

    info!(pool_size = config.pool_size, "Redis pool created");
    Ok(Some(Arc::new(pool)))
}

/// Builds the module around already created pools.
pub fn build_module(
    db_pool: &DatabasePool,
    redis_pool: Option<Arc<Pool>>,
    cache_config: &CacheConfig,
) -> Arc<MemeCoinModule> {
    let module = MemeCoinModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.inner().clone(),
        })
        .with_component_parameters::<RedisCoinCache>(RedisCoinCacheParameters {
            pool: redis_pool,
            ttl: cache_config.ttl(),
        })
        .with_component_parameters::<CachedCoinRepository>(CachedCoinRepositoryParameters {
            background_timeout: cache_config.background_timeout(),
            epochs: Arc::new(WriteEpochs::new()),
        })
        .build();

    Arc::new(module)
}

/// Dependencies probed by the readiness endpoint.
///
/// The database is critical. The cache, when enabled, only degrades.
pub fn health_checks(
    db_pool: &DatabasePool,
    redis_pool: Option<Arc<Pool>>,
    cache_config: &CacheConfig,
) -> Vec<Arc<dyn HealthCheck>> {
    let mut checks: Vec<Arc<dyn HealthCheck>> = vec![Arc::new(db_pool.clone())];
    if let Some(pool) = redis_pool {
        checks.push(Arc::new(RedisCoinCache::new(pool, cache_config.ttl())));
    }
    checks
}
