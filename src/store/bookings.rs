use std::collections::BTreeMap;

use chrono::NaiveDate;
use dashmap::DashMap;
use uuid::Uuid;

use crate::engine::admission::{evaluate, Admission};
use crate::models::booking::Booking;

/// Persistence seam for confirmed bookings.
pub trait BookingStore: Send + Sync {
    /// Unconditional insert. Pairs with a prior `try_admit` check, which
    /// leaves a window for concurrent callers to overshoot the limit.
    fn insert(&self, booking: Booking) -> usize;

    /// Counts and inserts as one step: the booking is stored only when the
    /// date still has room under `limit`. Returns the admission decision
    /// and the count for the date afterwards.
    fn insert_within_limit(&self, booking: Booking, limit: u32) -> (Admission, usize);

    fn count_on(&self, date: NaiveDate) -> usize;

    fn counts(&self) -> BTreeMap<NaiveDate, usize>;

    /// All bookings, newest first.
    fn list(&self) -> Vec<Booking>;

    /// Removes a booking, returning it with the count left on its date.
    fn delete(&self, id: Uuid) -> Option<(Booking, usize)>;

    fn len(&self) -> usize;
}

#[derive(Default)]
pub struct InMemoryBookingStore {
    by_date: DashMap<NaiveDate, Vec<Booking>>,
    dates_by_id: DashMap<Uuid, NaiveDate>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookingStore for InMemoryBookingStore {
    fn insert(&self, booking: Booking) -> usize {
        let mut day = self.by_date.entry(booking.date).or_default();
        self.dates_by_id.insert(booking.id, booking.date);
        day.push(booking);
        day.len()
    }

    fn insert_within_limit(&self, booking: Booking, limit: u32) -> (Admission, usize) {
        // The entry guard holds the shard lock for this date until it drops,
        // so no other insert for the same date can run between count and push.
        let mut day = self.by_date.entry(booking.date).or_default();

        match evaluate(day.len(), limit) {
            Admission::Admitted => {
                self.dates_by_id.insert(booking.id, booking.date);
                day.push(booking);
                (Admission::Admitted, day.len())
            }
            rejected => (rejected, day.len()),
        }
    }

    fn count_on(&self, date: NaiveDate) -> usize {
        self.by_date.get(&date).map_or(0, |day| day.len())
    }

    fn counts(&self) -> BTreeMap<NaiveDate, usize> {
        self.by_date
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| (*entry.key(), entry.value().len()))
            .collect()
    }

    fn list(&self) -> Vec<Booking> {
        let mut bookings: Vec<Booking> = self
            .by_date
            .iter()
            .flat_map(|entry| entry.value().clone())
            .collect();

        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        bookings
    }

    fn delete(&self, id: Uuid) -> Option<(Booking, usize)> {
        let (_, date) = self.dates_by_id.remove(&id)?;
        let mut day = self.by_date.get_mut(&date)?;

        let position = day.iter().position(|booking| booking.id == id)?;
        let removed = day.remove(position);
        Some((removed, day.len()))
    }

    fn len(&self) -> usize {
        self.dates_by_id.len()
    }
}
