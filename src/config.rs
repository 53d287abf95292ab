use std::env;
use std::time::Duration;

use chrono::FixedOffset;

use crate::error::AppError;
use crate::geo::Coordinate;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub event_buffer_size: usize,
    pub garage: Garage,
    pub booking_utc_offset_minutes: i32,
    pub distance_api_url: String,
    pub distance_api_key: String,
    pub distance_timeout_secs: u64,
}

/// Where every trip starts. The coordinate feeds the manual strategy, the
/// address feeds the external distance provider.
#[derive(Debug, Clone)]
pub struct Garage {
    pub coordinate: Coordinate,
    pub address: String,
}

impl Default for Garage {
    fn default() -> Self {
        Self {
            coordinate: Coordinate {
                lat: 23.7745,
                lng: 90.3654,
            },
            address: "Shyamoli, Dhaka, Bangladesh".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        let defaults = Garage::default();
        let garage = Garage {
            coordinate: Coordinate {
                lat: parse_or_default("GARAGE_LAT", defaults.coordinate.lat)?,
                lng: parse_or_default("GARAGE_LNG", defaults.coordinate.lng)?,
            },
            address: env::var("GARAGE_ADDRESS").unwrap_or(defaults.address),
        };
        garage
            .coordinate
            .validate()
            .map_err(|err| AppError::Internal(format!("invalid garage coordinate: {err}")))?;

        let config = Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            event_buffer_size: parse_or_default("EVENT_BUFFER_SIZE", 1024)?,
            garage,
            booking_utc_offset_minutes: parse_or_default("BOOKING_UTC_OFFSET_MINUTES", 360)?,
            distance_api_url: env::var("DISTANCE_API_URL")
                .unwrap_or_else(|_| "https://maps.googleapis.com".to_string()),
            distance_api_key: env::var("DISTANCE_API_KEY").unwrap_or_default(),
            distance_timeout_secs: parse_or_default("DISTANCE_TIMEOUT_SECS", 10)?,
        };

        config.booking_timezone()?;
        Ok(config)
    }

    /// Time zone in which a booking date starts at midnight.
    pub fn booking_timezone(&self) -> Result<FixedOffset, AppError> {
        FixedOffset::east_opt(self.booking_utc_offset_minutes * 60).ok_or_else(|| {
            AppError::Internal(format!(
                "invalid BOOKING_UTC_OFFSET_MINUTES: {}",
                self.booking_utc_offset_minutes
            ))
        })
    }

    pub fn distance_timeout(&self) -> Duration {
        Duration::from_secs(self.distance_timeout_secs)
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
