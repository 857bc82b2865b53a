//! # Meme Coin Repository
//!
//! Cache-aside data access for coins:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn CoinRepository>      (domain interface)
//! CachedCoinRepository              (cache-aside coordination)
//!   ↓  Arc<dyn CoinDao>   ↓  Arc<dyn CoinCache>
//! MySqlCoinDao            RedisCoinCache
//!   ↓                       ↓
//! MySQL                   Redis
//! ```
//!
//! ## Structure
//!
//! ```text
//! src/
//!   traits.rs                      ← CoinRepository trait
//!   background.rs                  ← detached, time-boxed cache tasks
//!   epochs.rs                      ← per-coin write epochs
//!   impl/
//!     cached_coin_repository.rs    ← CachedCoinRepository
//!   cache/
//!     coin_cache.rs                ← CoinCache trait, CacheError
//!     redis_coin_cache.rs          ← RedisCoinCache
//!   dao/
//!     coin_dao.rs                  ← CoinDao trait
//!     impl/mysql/
//!       coin_dao_impl.rs           ← MySqlCoinDao
//! ```

mod background;
pub mod cache;
pub mod dao;
pub mod epochs;
pub mod pool;
pub mod traits;
pub mod r#impl;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use background::BACKGROUND_TASK_TIMEOUT;
pub use cache::{CacheError, CoinCache, RedisCoinCache, RedisCoinCacheParameters, COIN_TTL};
pub use dao::{CoinDao, MySqlCoinDao};
pub use epochs::WriteEpochs;
pub use pool::*;
pub use r#impl::{CachedCoinRepository, CachedCoinRepositoryParameters};
pub use traits::*;
