//! Coin cache store.
//!
//! Holds transient JSON snapshots of coins keyed by id. The cache is never
//! the source of truth; [`CachedCoinRepository`](crate::CachedCoinRepository)
//! decides when entries are written and evicted.

pub mod cache_keys;
mod coin_cache;
mod redis_coin_cache;

pub use coin_cache::{CacheError, CoinCache};
pub use redis_coin_cache::{RedisCoinCache, RedisCoinCacheParameters, COIN_TTL};
