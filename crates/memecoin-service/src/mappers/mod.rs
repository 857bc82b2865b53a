//! Entity-DTO mappers.

use crate::dto::{CoinResponse, CreateCoinRequest};
use memecoin_core::{Coin, NewCoin};

impl From<Coin> for CoinResponse {
    fn from(coin: Coin) -> Self {
        Self {
            id: coin.id,
            name: coin.name,
            description: coin.description,
            created_at: coin.created_at,
            updated_at: coin.updated_at,
            popularity_score: coin.popularity_score,
        }
    }
}

impl From<CreateCoinRequest> for NewCoin {
    fn from(request: CreateCoinRequest) -> Self {
        Self::new(request.name, request.description)
    }
}
