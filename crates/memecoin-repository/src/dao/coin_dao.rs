//! `CoinDao` trait: low-level coin persistence.
//!
//! This is the DAO (Data Access Object) interface for the durable coin
//! record. Implementations talk to exactly one data source and stamp
//! timestamps themselves.
//!
//! [`CoinRepository`] layers the cache on top of a `CoinDao`.
//!
//! [`CoinRepository`]: crate::traits::CoinRepository

use async_trait::async_trait;
use memecoin_core::{Coin, CoinId, Interface, MemeCoinResult, NewCoin};

/// Low-level coin data access object.
#[async_trait]
pub trait CoinDao: Interface {
    /// Inserts a new coin and returns it with its assigned id and timestamps.
    ///
    /// Fails with `DuplicateName` when the name is already taken.
    async fn insert(&self, new_coin: &NewCoin) -> MemeCoinResult<Coin>;

    /// Writes `description` and a refreshed `updated_at` for `coin.id`.
    async fn update_by_id(&self, coin: &Coin) -> MemeCoinResult<()>;

    /// Loads a coin. Fails with `NotFound` when no row matches.
    async fn find_by_id(&self, id: CoinId) -> MemeCoinResult<Coin>;

    /// Deletes a coin. Fails with `NotFound` when no row matches.
    async fn delete_by_id(&self, id: CoinId) -> MemeCoinResult<()>;

    /// Atomically increments `popularity_score` by one and refreshes
    /// `updated_at`. Fails with `NotFound` when no row matches.
    async fn incr_popularity_score(&self, id: CoinId) -> MemeCoinResult<()>;
}
