//! Coin service trait definition.

use crate::dto::{CoinResponse, CreateCoinRequest, UpdateCoinRequest};
use async_trait::async_trait;
use memecoin_core::{CoinId, Interface, MemeCoinResult};

/// Coin service trait.
#[async_trait]
pub trait CoinService: Interface {
    /// Creates a new coin.
    async fn create_coin(&self, request: CreateCoinRequest) -> MemeCoinResult<CoinResponse>;

    /// Gets a coin by ID.
    async fn get_coin(&self, id: CoinId) -> MemeCoinResult<CoinResponse>;

    /// Replaces a coin's description.
    async fn update_coin(&self, id: CoinId, request: UpdateCoinRequest) -> MemeCoinResult<()>;

    /// Deletes a coin.
    async fn delete_coin(&self, id: CoinId) -> MemeCoinResult<()>;

    /// Adds one to a coin's popularity score.
    async fn poke_coin(&self, id: CoinId) -> MemeCoinResult<()>;
}
