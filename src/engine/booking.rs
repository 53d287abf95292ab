use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::admission::Admission;
use crate::engine::pricing::{compute_quote, parse_booking_date};
use crate::engine::resolver::{LocationResolver, ManualResolver, ProviderResolver};
use crate::error::AppError;
use crate::models::booking::{Booking, BookingEvent, BookingEventKind};
use crate::models::pricing::{LocationStrategy, PricingConfig};
use crate::models::quote::Quote;
use crate::state::AppState;

/// Largest difference between a submitted and a recomputed price that is
/// still accepted as the same quote.
const PRICE_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRequest {
    pub start_location: String,
    pub end_location: String,
    pub booking_date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmBookingRequest {
    pub booking_date: String,
    pub start_location: String,
    pub end_location: String,
    pub price: f64,
    pub distance: f64,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfirmBookingResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<Booking>,
}

pub fn resolver_for(
    state: &AppState,
    config: &PricingConfig,
) -> Result<Box<dyn LocationResolver>, AppError> {
    match config.location_strategy {
        LocationStrategy::Manual => Ok(Box::new(ManualResolver::new(
            state.locations.snapshot()?,
            state.garage.coordinate,
        ))),
        LocationStrategy::ExternalProvider => Ok(Box::new(ProviderResolver::new(
            state.distance_provider.clone(),
            state.garage.address.clone(),
        ))),
    }
}

pub async fn get_quote(state: &AppState, request: &QuoteRequest) -> Result<Quote, AppError> {
    let started = Instant::now();
    let result = quote_for_request(state, request).await;

    let outcome = outcome_label(&result);
    state
        .metrics
        .quote_latency_seconds
        .with_label_values(&[outcome])
        .observe(started.elapsed().as_secs_f64());
    state
        .metrics
        .quotes_total
        .with_label_values(&[outcome])
        .inc();

    result
}

async fn quote_for_request(state: &AppState, request: &QuoteRequest) -> Result<Quote, AppError> {
    let (start, end) = trip_endpoints(&request.start_location, &request.end_location)?;
    let config = state.settings.pricing_config()?;
    let date = parse_booking_date(&request.booking_date)?;

    let quote = quote_trip(state, &config, start, end, date).await?;
    info!(
        start,
        end,
        date = %date,
        final_price = quote.final_price,
        urgent = quote.surcharge_urgent,
        weekend = quote.surcharge_weekend,
        "quote computed"
    );
    Ok(quote)
}

async fn quote_trip(
    state: &AppState,
    config: &PricingConfig,
    start: &str,
    end: &str,
    date: NaiveDate,
) -> Result<Quote, AppError> {
    let resolver = resolver_for(state, config)?;
    let legs = resolver.resolve_legs(start, end).await?;
    Ok(compute_quote(&legs, date, state.now(), config))
}

/// Re-prices the trip, then counts and inserts under the daily limit in one
/// step. The stored price and distance are the recomputed ones.
pub async fn confirm_booking(
    state: &AppState,
    request: ConfirmBookingRequest,
) -> Result<ConfirmBookingResponse, AppError> {
    let result = admit_booking(state, request).await;

    let outcome = match &result {
        Ok(response) if response.success => "admitted",
        Ok(_) => "rejected",
        Err(AppError::PriceMismatch { .. }) => "price_mismatch",
        Err(err) if err.is_upstream() => "upstream_error",
        Err(_) => "input_error",
    };
    state
        .metrics
        .bookings_total
        .with_label_values(&[outcome])
        .inc();

    result
}

async fn admit_booking(
    state: &AppState,
    request: ConfirmBookingRequest,
) -> Result<ConfirmBookingResponse, AppError> {
    let (start, end) = trip_endpoints(&request.start_location, &request.end_location)?;
    let name = request.name.trim();
    let phone = request.phone.trim();
    let email = request.email.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }
    if phone.is_empty() {
        return Err(AppError::BadRequest("phone cannot be empty".to_string()));
    }
    if !email.is_empty() && !email.contains('@') {
        return Err(AppError::BadRequest(format!("invalid email: {email}")));
    }
    if !request.price.is_finite() {
        return Err(AppError::BadRequest("price must be a number".to_string()));
    }

    let config = state.settings.pricing_config()?;
    let date = parse_booking_date(&request.booking_date)?;

    let quote = quote_trip(state, &config, start, end, date).await?;
    if (request.price - quote.final_price).abs() > PRICE_TOLERANCE {
        warn!(
            submitted = request.price,
            quoted = quote.final_price,
            date = %date,
            "submitted price does not match quote"
        );
        return Err(AppError::PriceMismatch {
            submitted: request.price,
            quoted: quote.final_price,
        });
    }

    let booking = Booking {
        id: Uuid::new_v4(),
        date,
        start_location: start.to_string(),
        end_location: end.to_string(),
        price: quote.final_price,
        distance: quote.total_distance,
        customer_name: name.to_string(),
        customer_phone: phone.to_string(),
        customer_email: email.to_string(),
        created_at: Utc::now(),
    };

    let (decision, count) = state
        .bookings
        .insert_within_limit(booking.clone(), config.daily_booking_limit);

    match decision {
        Admission::Admitted => {
            state.metrics.bookings_stored.set(state.bookings.len() as i64);
            publish(state, BookingEventKind::Created, booking.id, date, count);
            info!(
                booking_id = %booking.id,
                date = %date,
                count,
                price = booking.price,
                "booking confirmed"
            );

            Ok(ConfirmBookingResponse {
                success: true,
                message: Some("Booking confirmed".to_string()),
                booking: Some(booking),
            })
        }
        Admission::Rejected(reason) => {
            info!(date = %date, count, reason = %reason, "booking rejected");

            Ok(ConfirmBookingResponse {
                success: false,
                message: Some(reason),
                booking: None,
            })
        }
    }
}

pub fn booking_counts(state: &AppState) -> BTreeMap<NaiveDate, usize> {
    state.bookings.counts()
}

pub fn fully_booked_dates(state: &AppState) -> Result<Vec<NaiveDate>, AppError> {
    let limit = state.settings.pricing_config()?.daily_booking_limit as usize;

    Ok(state
        .bookings
        .counts()
        .into_iter()
        .filter(|(_, count)| *count >= limit)
        .map(|(date, _)| date)
        .collect())
}

pub fn list_bookings(state: &AppState) -> Vec<Booking> {
    state.bookings.list()
}

pub fn delete_booking(state: &AppState, id: Uuid) -> Result<Booking, AppError> {
    let (booking, count) = state
        .bookings
        .delete(id)
        .ok_or_else(|| AppError::NotFound(format!("booking {} not found", id)))?;

    state.metrics.bookings_stored.set(state.bookings.len() as i64);
    publish(state, BookingEventKind::Deleted, booking.id, booking.date, count);
    info!(booking_id = %booking.id, date = %booking.date, count, "booking deleted");

    Ok(booking)
}

fn publish(state: &AppState, kind: BookingEventKind, booking_id: Uuid, date: NaiveDate, count: usize) {
    // No subscribers is the normal case.
    let _ = state.booking_events_tx.send(BookingEvent {
        kind,
        booking_id,
        date,
        count,
    });
}

fn trip_endpoints<'a>(start: &'a str, end: &'a str) -> Result<(&'a str, &'a str), AppError> {
    let start = start.trim();
    let end = end.trim();
    if start.is_empty() || end.is_empty() {
        return Err(AppError::BadRequest(
            "start and end location are required".to_string(),
        ));
    }
    Ok((start, end))
}

fn outcome_label<T>(result: &Result<T, AppError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(err) if err.is_upstream() => "upstream_error",
        Err(_) => "input_error",
    }
}
