//! Application state for Axum handlers.

use memecoin_core::{HasComponent, HealthCheck};
use memecoin_service::CoinService;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub coin_service: Arc<dyn CoinService>,
    /// Probed by the readiness endpoint.
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(coin_service: Arc<dyn CoinService>) -> Self {
        Self {
            coin_service,
            health_checks: Vec::new(),
        }
    }

    /// Resolves services from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: HasComponent<dyn CoinService>,
    {
        Self::new(module.resolve())
    }

    /// Registers a dependency for readiness probing.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }
}
