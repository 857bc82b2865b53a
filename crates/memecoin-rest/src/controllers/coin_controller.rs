//! Meme coin controller.

use crate::extractors::ValidatedJson;
use crate::responses::{no_content, ok, ApiResponse, ApiResult, AppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use memecoin_core::{CoinId, MemeCoinError};
use memecoin_service::{CoinResponse, CreateCoinRequest, MessageResponse, UpdateCoinRequest};

/// Mount point of the coin resource.
pub const COINS_PATH: &str = "/api/v1/meme-coins";

/// Creates the coin router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_coin))
        .route("/:id", get(get_coin).put(update_coin).delete(delete_coin))
        .route("/:id/poke", post(poke_coin))
}

/// Creates a new meme coin.
#[utoipa::path(
    post,
    path = "/api/v1/meme-coins",
    tag = "meme-coins",
    request_body = CreateCoinRequest,
    responses(
        (status = 201, description = "Coin created", body = CoinResponse,
            headers(("Location" = String, description = "URL of the new coin"))),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_coin(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateCoinRequest>,
) -> Result<impl IntoResponse, AppError> {
    let coin = state.coin_service.create_coin(request).await?;
    let location = format!("{COINS_PATH}/{}", coin.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::success(coin)),
    ))
}

/// Gets a meme coin by ID.
#[utoipa::path(
    get,
    path = "/api/v1/meme-coins/{id}",
    tag = "meme-coins",
    params(("id" = i64, Path, description = "Coin ID")),
    responses(
        (status = 200, description = "Coin found", body = CoinResponse),
        (status = 400, description = "Invalid coin ID"),
        (status = 404, description = "Coin not found")
    )
)]
pub async fn get_coin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<CoinResponse> {
    let id = parse_coin_id(&id)?;
    ok(state.coin_service.get_coin(id).await?)
}

/// Replaces a meme coin's description.
#[utoipa::path(
    put,
    path = "/api/v1/meme-coins/{id}",
    tag = "meme-coins",
    params(("id" = i64, Path, description = "Coin ID")),
    request_body = UpdateCoinRequest,
    responses(
        (status = 200, description = "Coin updated", body = MessageResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Coin not found")
    )
)]
pub async fn update_coin(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateCoinRequest>,
) -> ApiResult<MessageResponse> {
    let id = parse_coin_id(&id)?;
    state.coin_service.update_coin(id, request).await?;
    ok(MessageResponse::new("Meme coin updated"))
}

/// Deletes a meme coin.
#[utoipa::path(
    delete,
    path = "/api/v1/meme-coins/{id}",
    tag = "meme-coins",
    params(("id" = i64, Path, description = "Coin ID")),
    responses(
        (status = 204, description = "Coin deleted"),
        (status = 400, description = "Invalid coin ID"),
        (status = 404, description = "Coin not found")
    )
)]
pub async fn delete_coin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_coin_id(&id)?;
    state.coin_service.delete_coin(id).await?;
    Ok(no_content())
}

/// Adds one to a meme coin's popularity score.
#[utoipa::path(
    post,
    path = "/api/v1/meme-coins/{id}/poke",
    tag = "meme-coins",
    params(("id" = i64, Path, description = "Coin ID")),
    responses(
        (status = 200, description = "Coin poked", body = MessageResponse),
        (status = 400, description = "Invalid coin ID"),
        (status = 404, description = "Coin not found")
    )
)]
pub async fn poke_coin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MessageResponse> {
    let id = parse_coin_id(&id)?;
    state.coin_service.poke_coin(id).await?;
    ok(MessageResponse::new("Meme coin poked"))
}

fn parse_coin_id(id: &str) -> Result<CoinId, AppError> {
    CoinId::parse(id)
        .map_err(|_| AppError(MemeCoinError::validation(format!("Invalid coin ID: {id}"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coin_id() {
        assert_eq!(parse_coin_id("12").unwrap(), CoinId::new(12));
        assert!(matches!(
            parse_coin_id("doge"),
            Err(AppError(MemeCoinError::Validation(_)))
        ));
        assert!(parse_coin_id("1.5").is_err());
    }
}
