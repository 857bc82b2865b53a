//! Coin cache interface.

use async_trait::async_trait;
use memecoin_core::{Coin, CoinId, Interface};
use thiserror::Error;

/// Errors reported by a coin cache.
///
/// These never leave the repository: a failed read falls back to the
/// store and a failed write or eviction is logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// No entry for the key (absent, expired, or cache disabled).
    #[error("key not found in cache")]
    KeyNotFound,

    /// The cache backend failed (connection, command, pool).
    #[error("cache backend error: {0}")]
    Backend(String),

    /// A stored value could not be encoded or decoded.
    #[error("cache codec error: {0}")]
    Codec(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        Self::Codec(err.to_string())
    }
}

impl From<deadpool_redis::PoolError> for CacheError {
    fn from(err: deadpool_redis::PoolError) -> Self {
        Self::Backend(format!("failed to get connection: {err}"))
    }
}

impl From<deadpool_redis::redis::RedisError> for CacheError {
    fn from(err: deadpool_redis::redis::RedisError) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Key-value store of coin snapshots with a fixed expiration.
#[async_trait]
pub trait CoinCache: Interface {
    /// Loads a snapshot. A miss is `Err(CacheError::KeyNotFound)`.
    async fn get(&self, id: CoinId) -> Result<Coin, CacheError>;

    /// Stores a snapshot of every coin field under the coin's key.
    async fn set(&self, coin: &Coin) -> Result<(), CacheError>;

    /// Evicts the snapshot for `id`. Evicting an absent key succeeds.
    async fn del(&self, id: CoinId) -> Result<(), CacheError>;

    /// Whether the cache is backed by a live store.
    fn is_enabled(&self) -> bool;
}
