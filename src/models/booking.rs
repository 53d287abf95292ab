use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub date: NaiveDate,
    pub start_location: String,
    pub end_location: String,
    pub price: f64,
    pub distance: f64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum BookingEventKind {
    Created,
    Deleted,
}

/// Pushed to calendar subscribers whenever the bookings for a date change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingEvent {
    pub kind: BookingEventKind,
    pub booking_id: Uuid,
    pub date: NaiveDate,
    pub count: usize,
}
