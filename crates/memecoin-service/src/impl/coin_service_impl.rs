//! Coin service implementation.

use crate::coin_service::CoinService;
use crate::dto::{CoinResponse, CreateCoinRequest, UpdateCoinRequest};
use async_trait::async_trait;
use memecoin_core::{CoinId, MemeCoinResult, NewCoin, ValidateExt};
use memecoin_repository::CoinRepository;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// Coin service backed by a [`CoinRepository`].
#[derive(Component)]
#[shaku(interface = CoinService)]
pub struct CoinServiceImpl {
    #[shaku(inject)]
    coin_repository: Arc<dyn CoinRepository>,
}

impl CoinServiceImpl {
    /// Creates a new coin service.
    #[must_use]
    pub fn new(coin_repository: Arc<dyn CoinRepository>) -> Self {
        Self { coin_repository }
    }
}

#[async_trait]
impl CoinService for CoinServiceImpl {
    async fn create_coin(&self, request: CreateCoinRequest) -> MemeCoinResult<CoinResponse> {
        debug!("Creating coin: {}", request.name);

        request.validate_request()?;

        let coin = self.coin_repository.create(&NewCoin::from(request)).await?;

        info!(coin_id = %coin.id, "Coin created");
        Ok(CoinResponse::from(coin))
    }

    async fn get_coin(&self, id: CoinId) -> MemeCoinResult<CoinResponse> {
        debug!("Getting coin: {}", id);

        let coin = self.coin_repository.find_by_id(id).await?;
        Ok(CoinResponse::from(coin))
    }

    async fn update_coin(&self, id: CoinId, request: UpdateCoinRequest) -> MemeCoinResult<()> {
        debug!("Updating coin: {}", id);

        request.validate_request()?;

        let mut coin = self.coin_repository.find_by_id(id).await?;
        coin.update_description(request.description);
        self.coin_repository.update(&coin).await?;

        info!(coin_id = %id, "Coin updated");
        Ok(())
    }

    async fn delete_coin(&self, id: CoinId) -> MemeCoinResult<()> {
        debug!("Deleting coin: {}", id);

        self.coin_repository.delete_by_id(id).await?;

        info!(coin_id = %id, "Coin deleted");
        Ok(())
    }

    async fn poke_coin(&self, id: CoinId) -> MemeCoinResult<()> {
        debug!("Poking coin: {}", id);
        self.coin_repository.incr_popularity_score(id).await
    }
}

impl std::fmt::Debug for CoinServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinServiceImpl").finish_non_exhaustive()
    }
}
