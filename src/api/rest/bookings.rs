use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::Json;
use axum::Router;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::engine::booking::{
    booking_counts, confirm_booking, delete_booking, fully_booked_dates, list_bookings,
    ConfirmBookingRequest, ConfirmBookingResponse,
};
use crate::error::AppError;
use crate::models::booking::Booking;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings", get(list).post(confirm))
        .route("/bookings/counts", get(counts))
        .route("/bookings/fully-booked", get(fully_booked))
        .route("/bookings/:id", delete(remove))
}

async fn confirm(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ConfirmBookingRequest>,
) -> Result<Json<ConfirmBookingResponse>, AppError> {
    let response = confirm_booking(&state, payload).await?;
    Ok(Json(response))
}

async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<Booking>> {
    Json(list_bookings(&state))
}

async fn counts(State(state): State<Arc<AppState>>) -> Json<BTreeMap<NaiveDate, usize>> {
    Json(booking_counts(&state))
}

async fn fully_booked(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<NaiveDate>>, AppError> {
    Ok(Json(fully_booked_dates(&state)?))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(delete_booking(&state, id)?))
}
