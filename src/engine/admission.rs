use chrono::NaiveDate;
use serde::Serialize;

use crate::models::pricing::PricingConfig;
use crate::store::bookings::BookingStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Admission {
    Admitted,
    Rejected(String),
}

pub fn evaluate(existing: usize, limit: u32) -> Admission {
    if existing >= limit as usize {
        Admission::Rejected(format!("Maximum {limit} bookings allowed per day"))
    } else {
        Admission::Admitted
    }
}

/// Check-only admission: reads the count and decides, leaving the insert to
/// the caller. Two callers can both pass before either inserts; confirmation
/// goes through `BookingStore::insert_within_limit` instead.
pub fn try_admit(store: &dyn BookingStore, date: NaiveDate, config: &PricingConfig) -> Admission {
    evaluate(store.count_on(date), config.daily_booking_limit)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    use super::{evaluate, try_admit, Admission};
    use crate::models::booking::Booking;
    use crate::models::pricing::PricingConfig;
    use crate::store::bookings::{BookingStore, InMemoryBookingStore};

    fn booking(date: NaiveDate) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            date,
            start_location: "Gulshan".to_string(),
            end_location: "Banani".to_string(),
            price: 85.0,
            distance: 4.1,
            customer_name: "Karim".to_string(),
            customer_phone: "01800000000".to_string(),
            customer_email: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn rejects_when_limit_reached() {
        assert_eq!(
            evaluate(2, 2),
            Admission::Rejected("Maximum 2 bookings allowed per day".to_string())
        );
        assert!(matches!(evaluate(3, 2), Admission::Rejected(_)));
    }

    #[test]
    fn admits_below_limit() {
        assert_eq!(evaluate(0, 2), Admission::Admitted);
        assert_eq!(evaluate(1, 2), Admission::Admitted);
    }

    #[test]
    fn try_admit_reads_store_count() {
        let store = InMemoryBookingStore::new();
        let config = PricingConfig::default();
        let date = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();

        store.insert(booking(date));
        assert_eq!(try_admit(&store, date, &config), Admission::Admitted);

        store.insert(booking(date));
        assert!(matches!(
            try_admit(&store, date, &config),
            Admission::Rejected(_)
        ));
    }

    #[test]
    fn check_then_act_can_overshoot_the_limit() {
        let store = InMemoryBookingStore::new();
        let config = PricingConfig::default();
        let date = NaiveDate::from_ymd_opt(2026, 5, 5).unwrap();
        store.insert(booking(date));

        // Both callers check before either inserts.
        let first = try_admit(&store, date, &config);
        let second = try_admit(&store, date, &config);
        assert_eq!(first, Admission::Admitted);
        assert_eq!(second, Admission::Admitted);

        store.insert(booking(date));
        store.insert(booking(date));
        assert_eq!(store.count_on(date), 3);
    }

    #[test]
    fn atomic_insert_closes_the_same_interleaving() {
        let store = InMemoryBookingStore::new();
        let date = NaiveDate::from_ymd_opt(2026, 5, 6).unwrap();
        store.insert(booking(date));

        let (first, _) = store.insert_within_limit(booking(date), 2);
        let (second, count) = store.insert_within_limit(booking(date), 2);

        assert_eq!(first, Admission::Admitted);
        assert!(matches!(second, Admission::Rejected(_)));
        assert_eq!(count, 2);
    }
}
