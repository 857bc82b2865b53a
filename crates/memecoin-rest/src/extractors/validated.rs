//! Validated JSON extractor for automatic request validation.
//!
//! `ValidatedJson<T>` deserializes a JSON body and validates it using the
//! `validator` crate. Both malformed bodies and rule violations are answered
//! with 400 Bad Request and a `VALIDATION_ERROR` code; rule violations carry
//! field-level details.

use crate::responses::ApiResponse;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use memecoin_core::{field_errors, validation_errors_to_error, ErrorResponse, MemeCoinError};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// JSON extractor that validates the deserialized value.
///
/// # Example
///
/// ```ignore
/// use memecoin_rest::extractors::ValidatedJson;
///
/// async fn create_coin(ValidatedJson(request): ValidatedJson<CreateCoinRequest>) {
///     // request is guaranteed to be valid here
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Rejection type for validated JSON extraction.
#[derive(Debug)]
pub enum ValidatedJsonRejection {
    /// Body missing, not JSON, or not the expected shape.
    JsonError(JsonRejection),
    /// Deserialized fine but broke a field rule.
    ValidationError(ValidationErrors),
}

impl ValidatedJsonRejection {
    fn error_response(&self) -> ErrorResponse {
        match self {
            Self::JsonError(rejection) => ErrorResponse::from_error(&MemeCoinError::validation(
                format!("Invalid request body: {}", rejection.body_text()),
            )),
            Self::ValidationError(errors) => {
                ErrorResponse::from_error(&validation_errors_to_error(errors))
                    .with_details(field_errors(errors))
            }
        }
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let body = ApiResponse::error(self.error_response());
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}
