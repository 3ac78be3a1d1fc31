//! Detect double-booked appointments within one provider's day.
//!
//! Slot reservation is not atomic upstream, so two bookers can both claim the
//! same slot. This compares every pair of bookings and reports the overlaps.
//! Adjacent bookings (one ends exactly when the next starts) are NOT conflicts.

use serde::{Deserialize, Serialize};

use crate::slots::BookedInterval;

/// Two bookings that share at least one minute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConflict {
    pub booking_a: BookedInterval,
    pub booking_b: BookedInterval,
    pub overlap_minutes: u32,
}

/// Find all pairwise conflicts among a day's bookings.
///
/// Pairs are reported once, `booking_a` being the earlier entry in the input.
/// Overlap duration is `min(a.end, b.end) - max(a.start, b.start)`.
pub fn find_booking_conflicts(bookings: &[BookedInterval]) -> Vec<BookingConflict> {
    let mut conflicts = Vec::new();

    for (i, a) in bookings.iter().enumerate() {
        for b in &bookings[i + 1..] {
            let overlap_minutes = a.overlap_minutes(b);
            if overlap_minutes > 0 {
                conflicts.push(BookingConflict {
                    booking_a: *a,
                    booking_b: *b,
                    overlap_minutes,
                });
            }
        }
    }

    conflicts
}

/// Bookings that a proposed appointment would collide with.
pub fn conflicts_with(
    proposed: &BookedInterval,
    bookings: &[BookedInterval],
) -> Vec<BookedInterval> {
    bookings
        .iter()
        .filter(|b| proposed.overlap_minutes(b) > 0)
        .copied()
        .collect()
}
