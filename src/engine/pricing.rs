use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Weekday};

use crate::error::AppError;
use crate::models::pricing::PricingConfig;
use crate::models::quote::{Legs, Quote};

const URGENT_WINDOW_SECS: i64 = 86_400;

pub fn parse_booking_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(raw.to_string()))
}

/// Prices a trip. `now` fixes the clock and the zone in which the booking
/// date starts at midnight, so the same inputs always give the same quote.
///
/// Surcharges compound: urgent first, then weekend on the surcharged amount.
/// The floor is applied last and rounding happens only on output.
pub fn compute_quote(
    legs: &Legs,
    date: NaiveDate,
    now: DateTime<FixedOffset>,
    config: &PricingConfig,
) -> Quote {
    let garage_to_pickup_charge = legs.garage_to_pickup_km * config.garage_to_pickup_rate;
    let pickup_to_drop_charge = legs.pickup_to_drop_km * config.pickup_to_drop_rate;
    let mut price = garage_to_pickup_charge + pickup_to_drop_charge;

    let surcharge_urgent = seconds_until(date, now) < URGENT_WINDOW_SECS;
    if surcharge_urgent {
        price *= 1.0 + config.urgent_surcharge_percent / 100.0;
    }

    let surcharge_weekend = is_weekend(date);
    if surcharge_weekend {
        price *= 1.0 + config.weekend_surcharge_percent / 100.0;
    }

    let final_price = price.max(config.minimum_price);

    Quote {
        distance_garage_to_pickup: round2(legs.garage_to_pickup_km),
        distance_pickup_to_drop: round2(legs.pickup_to_drop_km),
        total_distance: round2(legs.garage_to_pickup_km + legs.pickup_to_drop_km),
        garage_to_pickup_charge: round2(garage_to_pickup_charge),
        pickup_to_drop_charge: round2(pickup_to_drop_charge),
        surcharge_urgent,
        surcharge_weekend,
        urgent_percent: config.urgent_surcharge_percent,
        weekend_percent: config.weekend_surcharge_percent,
        final_price: round2(final_price),
    }
}

/// Seconds from `now` until midnight of `date` in `now`'s zone. Negative for
/// dates already started.
fn seconds_until(date: NaiveDate, now: DateTime<FixedOffset>) -> i64 {
    let local_midnight = date.and_time(NaiveTime::MIN).and_utc().timestamp();
    let booking_ts = local_midnight - i64::from(now.offset().local_minus_utc());
    booking_ts - now.timestamp()
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
