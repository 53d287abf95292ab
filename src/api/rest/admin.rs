use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Serialize;
use tracing::info;

use crate::error::AppError;
use crate::models::location::NamedLocation;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/locations", get(list_locations).put(replace_locations))
        .route("/settings", get(get_settings).put(update_settings))
}

#[derive(Serialize)]
pub struct ReplaceLocationsResponse {
    pub count: usize,
}

async fn list_locations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<NamedLocation>>, AppError> {
    Ok(Json(state.locations.list()?))
}

async fn replace_locations(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Vec<NamedLocation>>,
) -> Result<Json<ReplaceLocationsResponse>, AppError> {
    let count = state.locations.replace_all(payload)?;
    info!(count, "named locations replaced");
    Ok(Json(ReplaceLocationsResponse { count }))
}

/// Effective settings as the same flat key/value map `PUT` accepts, with
/// defaults filled in for unset keys.
async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<String, String>>, AppError> {
    Ok(Json(state.settings.pricing_config()?.to_settings()))
}

async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BTreeMap<String, String>>,
) -> Result<Json<BTreeMap<String, String>>, AppError> {
    let keys: Vec<String> = payload.keys().cloned().collect();
    let config = state.settings.update(payload)?;
    info!(?keys, "settings updated");
    Ok(Json(config.to_settings()))
}
