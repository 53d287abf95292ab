use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::Json;
use axum::Router;

use crate::engine::booking::{get_quote, QuoteRequest};
use crate::error::AppError;
use crate::models::quote::Quote;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/quotes", post(create_quote))
}

async fn create_quote(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<QuoteRequest>,
) -> Result<Json<Quote>, AppError> {
    let quote = get_quote(&state, &payload).await?;
    Ok(Json(quote))
}
