//! In-memory reservation book enforcing at-most-once booking per slot.
//!
//! Slot lists are computed from a snapshot, so two callers can pick the same
//! free slot. Whatever stores bookings must reject the second insert; this
//! book is that check for a single process. Callers sharing one book across
//! threads wrap it in a `Mutex`.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::error::{Result, SlotError};
use crate::slots::BookedInterval;

/// A confirmed booking for one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub provider_id: String,
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub duration_minutes: u32,
}

impl Reservation {
    fn interval(&self) -> BookedInterval {
        BookedInterval::new(self.start_time, self.duration_minutes)
    }
}

#[derive(Debug, Default)]
pub struct ReservationBook {
    by_day: HashMap<(String, NaiveDate), Vec<BookedInterval>>,
}

impl ReservationBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reservation unless it overlaps one already held by the same
    /// provider on the same date.
    ///
    /// # Errors
    /// `InvalidDuration` for a zero-length reservation; `Conflict` when the
    /// slot was taken since the caller's snapshot. The caller should recompute
    /// slots and let the user choose again.
    pub fn reserve(&mut self, reservation: &Reservation) -> Result<()> {
        let wanted = reservation.interval();
        if wanted.is_empty() {
            return Err(SlotError::InvalidDuration(0));
        }

        let key = (reservation.provider_id.clone(), reservation.date);

        let clash = self
            .by_day
            .get(&key)
            .and_then(|held| held.iter().find(|b| b.overlaps(&wanted)));
        if let Some(existing) = clash {
            tracing::warn!(
                provider_id = %reservation.provider_id,
                date = %reservation.date,
                requested = %reservation.start_time,
                held = %existing.start_time,
                "reservation rejected, slot already taken"
            );
            return Err(SlotError::Conflict(format!(
                "provider {} already booked at {} ({} min) on {}",
                reservation.provider_id, existing.start_time, existing.duration_minutes, reservation.date
            )));
        }

        self.by_day.entry(key).or_default().push(wanted);
        tracing::info!(
            provider_id = %reservation.provider_id,
            date = %reservation.date,
            start_time = %reservation.start_time,
            duration_minutes = reservation.duration_minutes,
            "slot reserved"
        );
        Ok(())
    }

    /// Remove a reservation (e.g. on cancellation). Returns whether it existed.
    pub fn release(&mut self, reservation: &Reservation) -> bool {
        let key = (reservation.provider_id.clone(), reservation.date);
        let Some(held) = self.by_day.get_mut(&key) else {
            return false;
        };
        let wanted = reservation.interval();
        let Some(pos) = held.iter().position(|b| *b == wanted) else {
            return false;
        };
        held.remove(pos);
        if held.is_empty() {
            self.by_day.remove(&key);
        }
        true
    }

    /// Snapshot of a provider's bookings on a date, sorted by start time.
    pub fn bookings_for(&self, provider_id: &str, date: NaiveDate) -> Vec<BookedInterval> {
        let mut bookings = self
            .by_day
            .get(&(provider_id.to_string(), date))
            .cloned()
            .unwrap_or_default();
        bookings.sort_by_key(|b| b.start_time);
        bookings
    }

    pub fn len(&self) -> usize {
        self.by_day.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_day.is_empty()
    }
}
