use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const GARAGE_TO_PICKUP_RATE: &str = "garage_to_pickup_rate";
pub const PICKUP_TO_DROP_RATE: &str = "pickup_to_drop_rate";
pub const URGENT_SURCHARGE_PERCENT: &str = "urgent_surcharge_percent";
pub const WEEKEND_SURCHARGE_PERCENT: &str = "weekend_surcharge_percent";
pub const MINIMUM_PRICE: &str = "minimum_price";
pub const DAILY_BOOKING_LIMIT: &str = "daily_booking_limit";
pub const LOCATION_STRATEGY: &str = "location_strategy";

pub const SETTING_KEYS: [&str; 7] = [
    GARAGE_TO_PICKUP_RATE,
    PICKUP_TO_DROP_RATE,
    URGENT_SURCHARGE_PERCENT,
    WEEKEND_SURCHARGE_PERCENT,
    MINIMUM_PRICE,
    DAILY_BOOKING_LIMIT,
    LOCATION_STRATEGY,
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LocationStrategy {
    Manual,
    #[serde(rename = "external")]
    ExternalProvider,
}

impl FromStr for LocationStrategy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "manual" => Ok(LocationStrategy::Manual),
            "external" => Ok(LocationStrategy::ExternalProvider),
            other => Err(format!("expected manual/external, got {other}")),
        }
    }
}

impl LocationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationStrategy::Manual => "manual",
            LocationStrategy::ExternalProvider => "external",
        }
    }
}

/// Snapshot of the pricing settings taken at the start of one quote or
/// booking operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingConfig {
    pub garage_to_pickup_rate: f64,
    pub pickup_to_drop_rate: f64,
    pub urgent_surcharge_percent: f64,
    pub weekend_surcharge_percent: f64,
    pub minimum_price: f64,
    pub daily_booking_limit: u32,
    pub location_strategy: LocationStrategy,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            garage_to_pickup_rate: 10.0,
            pickup_to_drop_rate: 15.0,
            urgent_surcharge_percent: 20.0,
            weekend_surcharge_percent: 5.0,
            minimum_price: 85.0,
            daily_booking_limit: 2,
            location_strategy: LocationStrategy::Manual,
        }
    }
}

impl PricingConfig {
    /// Builds a config from the flat settings map. Missing keys fall back to
    /// the defaults; present keys must parse and be in range.
    pub fn from_settings(settings: &BTreeMap<String, String>) -> Result<Self, AppError> {
        if let Some(unknown) = settings
            .keys()
            .find(|key| !SETTING_KEYS.contains(&key.as_str()))
        {
            return Err(AppError::BadRequest(format!("unknown setting: {unknown}")));
        }

        let defaults = Self::default();
        let config = Self {
            garage_to_pickup_rate: setting_or(
                settings,
                GARAGE_TO_PICKUP_RATE,
                defaults.garage_to_pickup_rate,
            )?,
            pickup_to_drop_rate: setting_or(
                settings,
                PICKUP_TO_DROP_RATE,
                defaults.pickup_to_drop_rate,
            )?,
            urgent_surcharge_percent: setting_or(
                settings,
                URGENT_SURCHARGE_PERCENT,
                defaults.urgent_surcharge_percent,
            )?,
            weekend_surcharge_percent: setting_or(
                settings,
                WEEKEND_SURCHARGE_PERCENT,
                defaults.weekend_surcharge_percent,
            )?,
            minimum_price: setting_or(settings, MINIMUM_PRICE, defaults.minimum_price)?,
            daily_booking_limit: setting_or(
                settings,
                DAILY_BOOKING_LIMIT,
                defaults.daily_booking_limit,
            )?,
            location_strategy: setting_or(
                settings,
                LOCATION_STRATEGY,
                defaults.location_strategy,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn to_settings(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (
                GARAGE_TO_PICKUP_RATE.to_string(),
                self.garage_to_pickup_rate.to_string(),
            ),
            (
                PICKUP_TO_DROP_RATE.to_string(),
                self.pickup_to_drop_rate.to_string(),
            ),
            (
                URGENT_SURCHARGE_PERCENT.to_string(),
                self.urgent_surcharge_percent.to_string(),
            ),
            (
                WEEKEND_SURCHARGE_PERCENT.to_string(),
                self.weekend_surcharge_percent.to_string(),
            ),
            (MINIMUM_PRICE.to_string(), self.minimum_price.to_string()),
            (
                DAILY_BOOKING_LIMIT.to_string(),
                self.daily_booking_limit.to_string(),
            ),
            (
                LOCATION_STRATEGY.to_string(),
                self.location_strategy.as_str().to_string(),
            ),
        ])
    }

    fn validate(&self) -> Result<(), AppError> {
        let amounts = [
            (GARAGE_TO_PICKUP_RATE, self.garage_to_pickup_rate),
            (PICKUP_TO_DROP_RATE, self.pickup_to_drop_rate),
            (URGENT_SURCHARGE_PERCENT, self.urgent_surcharge_percent),
            (WEEKEND_SURCHARGE_PERCENT, self.weekend_surcharge_percent),
            (MINIMUM_PRICE, self.minimum_price),
        ];
        for (key, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::BadRequest(format!(
                    "{key} must be a non-negative number"
                )));
            }
        }

        if self.daily_booking_limit == 0 {
            return Err(AppError::BadRequest(format!(
                "{DAILY_BOOKING_LIMIT} must be at least 1"
            )));
        }

        Ok(())
    }
}

fn setting_or<T>(settings: &BTreeMap<String, String>, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match settings.get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|err| AppError::BadRequest(format!("invalid {key}: {err}"))),
        None => Ok(default),
    }
}
