//! Coin DTOs.

use chrono::{DateTime, Utc};
use memecoin_core::rules;
use memecoin_core::CoinId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new coin.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCoinRequest {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "rules::not_blank", message = "Name must not be blank")
    )]
    #[schema(example = "doge")]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 128, message = "Description cannot exceed 128 characters"))]
    #[schema(example = "wow")]
    pub description: String,
}

/// Request to replace a coin's description.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCoinRequest {
    #[serde(default)]
    #[validate(length(max = 128, message = "Description cannot exceed 128 characters"))]
    #[schema(example = "much wow")]
    pub description: String,
}

/// Coin response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoinResponse {
    pub id: CoinId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub popularity_score: u32,
}

/// Plain acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
