//! OpenAPI documentation configuration.

use crate::controllers::{ComponentHealth, HealthResponse, ReadinessResponse};
use memecoin_core::{CoinId, ErrorResponse, FieldError};
use memecoin_service::{CoinResponse, CreateCoinRequest, MessageResponse, UpdateCoinRequest};
use utoipa::OpenApi;

/// OpenAPI documentation for the Meme Coin API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Meme Coin API",
        version = "1.0.0",
        description = "CRUD service for meme coins with popularity scores",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::coin_controller::create_coin,
        crate::controllers::coin_controller::get_coin,
        crate::controllers::coin_controller::update_coin,
        crate::controllers::coin_controller::delete_coin,
        crate::controllers::coin_controller::poke_coin,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            CoinId,
            ErrorResponse,
            FieldError,
            CreateCoinRequest,
            UpdateCoinRequest,
            CoinResponse,
            MessageResponse,
            HealthResponse,
            ReadinessResponse,
            ComponentHealth,
        )
    ),
    tags(
        (name = "meme-coins", description = "Meme coin endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_coin_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| *p == "/api/v1/meme-coins"));
        assert!(paths.iter().any(|p| *p == "/api/v1/meme-coins/{id}"));
        assert!(paths.iter().any(|p| *p == "/api/v1/meme-coins/{id}/poke"));
        assert!(paths.iter().any(|p| *p == "/ready"));
    }
}
