use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use tokio::sync::broadcast;

use crate::config::{Config, Garage};
use crate::error::AppError;
use crate::models::booking::BookingEvent;
use crate::observability::metrics::Metrics;
use crate::provider::{DistanceProvider, HttpDistanceProvider, HttpDistanceProviderConfig};
use crate::store::bookings::{BookingStore, InMemoryBookingStore};
use crate::store::locations::LocationDirectory;
use crate::store::settings::SettingsStore;

pub struct AppState {
    pub bookings: Arc<dyn BookingStore>,
    pub locations: LocationDirectory,
    pub settings: SettingsStore,
    pub distance_provider: Arc<dyn DistanceProvider>,
    pub garage: Garage,
    pub timezone: FixedOffset,
    pub booking_events_tx: broadcast::Sender<BookingEvent>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(
        garage: Garage,
        timezone: FixedOffset,
        distance_provider: Arc<dyn DistanceProvider>,
        event_buffer_size: usize,
    ) -> Self {
        let (booking_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        Self {
            bookings: Arc::new(InMemoryBookingStore::new()),
            locations: LocationDirectory::seeded(),
            settings: SettingsStore::new(),
            distance_provider,
            garage,
            timezone,
            booking_events_tx,
            metrics: Metrics::new(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let provider = HttpDistanceProvider::new(HttpDistanceProviderConfig {
            base_url: config.distance_api_url.clone(),
            api_key: config.distance_api_key.clone(),
            timeout: config.distance_timeout(),
        })?;

        Ok(Self::new(
            config.garage.clone(),
            config.booking_timezone()?,
            Arc::new(provider),
            config.event_buffer_size,
        ))
    }

    /// Current time in the zone booking dates are interpreted in.
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.timezone)
    }
}
