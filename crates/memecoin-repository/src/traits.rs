//! Repository trait definitions.

use async_trait::async_trait;
use memecoin_core::{Coin, CoinId, Interface, MemeCoinResult, NewCoin};

/// Coin repository.
///
/// Callers see only persistence outcomes: `NotFound`, `DuplicateName` or a
/// store failure. Cache trouble is handled inside the implementation.
#[async_trait]
pub trait CoinRepository: Interface {
    /// Persists a new coin. The store assigns id and timestamps.
    async fn create(&self, new_coin: &NewCoin) -> MemeCoinResult<Coin>;

    /// Writes the coin's description and refreshes `updated_at`.
    async fn update(&self, coin: &Coin) -> MemeCoinResult<()>;

    /// Loads a coin, from the cache when possible.
    async fn find_by_id(&self, id: CoinId) -> MemeCoinResult<Coin>;

    /// Deletes a coin.
    async fn delete_by_id(&self, id: CoinId) -> MemeCoinResult<()>;

    /// Adds one to the coin's popularity score.
    async fn incr_popularity_score(&self, id: CoinId) -> MemeCoinResult<()>;
}
