use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unknown location: {0}")]
    UnknownLocation(String),

    #[error("invalid booking date: {0}")]
    InvalidDate(String),

    #[error("distance provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("distance provider returned no usable distance: {0}")]
    ProviderDataMissing(String),

    #[error("submitted price {submitted} does not match quoted price {quoted}")]
    PriceMismatch { submitted: f64, quoted: f64 },

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AppError::ProviderUnavailable(_) | AppError::ProviderDataMissing(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::UnknownLocation(name) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("unknown location: {name}"),
            ),
            AppError::InvalidDate(raw) => (
                StatusCode::BAD_REQUEST,
                format!("invalid booking date: {raw}"),
            ),
            AppError::ProviderUnavailable(_) | AppError::ProviderDataMissing(_) => {
                tracing::warn!(error = %self, "distance lookup failed");
                (StatusCode::BAD_GATEWAY, "could not get distance".to_string())
            }
            AppError::PriceMismatch { .. } => (StatusCode::CONFLICT, self.to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
