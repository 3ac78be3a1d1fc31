//! Appointment-slot computation for a single provider on a single date.
//!
//! Walks the working window on a fixed grid and keeps every start time whose
//! appointment interval stays inside working hours, misses the break, and
//! overlaps no existing booking. All intervals are half-open, `[start, end)`,
//! in minutes since midnight.

use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::error::{Result, SlotError};
use crate::freebusy::merge_busy_periods;
use crate::schedule::WorkingHoursTemplate;

/// Step between candidate start times when none is configured.
pub const DEFAULT_GRANULARITY_MINUTES: u32 = 30;

/// Appointment length when none is configured.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// An existing, non-cancelled appointment on the target date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedInterval {
    pub start_time: ClockTime,
    pub duration_minutes: u32,
}

impl BookedInterval {
    pub fn new(start_time: ClockTime, duration_minutes: u32) -> Self {
        Self {
            start_time,
            duration_minutes,
        }
    }

    pub fn start_minute(&self) -> u32 {
        self.start_time.minutes()
    }

    /// End in minutes since midnight. May run past `24:00`.
    pub fn end_minute(&self) -> u32 {
        self.start_minute().saturating_add(self.duration_minutes)
    }

    /// `true` when the two intervals share at least one minute.
    ///
    /// A zero-length booking covers no minutes, so it overlaps nothing.
    pub fn overlaps(&self, other: &BookedInterval) -> bool {
        self.overlap_minutes(other) > 0
    }

    pub fn is_empty(&self) -> bool {
        self.duration_minutes == 0
    }

    /// Minutes shared by both intervals (0 when they do not overlap).
    pub fn overlap_minutes(&self, other: &BookedInterval) -> u32 {
        let start = self.start_minute().max(other.start_minute());
        let end = self.end_minute().min(other.end_minute());
        end.saturating_sub(start)
    }
}

/// Grid step and appointment length for one computation.
///
/// A single explicit duration is applied to every conflict check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotOptions {
    pub granularity_minutes: u32,
    pub duration_minutes: u32,
}

impl Default for SlotOptions {
    fn default() -> Self {
        Self {
            granularity_minutes: DEFAULT_GRANULARITY_MINUTES,
            duration_minutes: DEFAULT_DURATION_MINUTES,
        }
    }
}

impl SlotOptions {
    pub fn new(granularity_minutes: u32, duration_minutes: u32) -> Self {
        Self {
            granularity_minutes,
            duration_minutes,
        }
    }

    /// # Errors
    /// `InvalidGranularity` or `InvalidDuration` for a zero value.
    pub fn validate(&self) -> Result<()> {
        if self.granularity_minutes == 0 {
            return Err(SlotError::InvalidGranularity(self.granularity_minutes));
        }
        if self.duration_minutes == 0 {
            return Err(SlotError::InvalidDuration(self.duration_minutes));
        }
        Ok(())
    }
}

/// Compute the free appointment start times for one provider on one date.
///
/// # Arguments
/// - `template` -- working hours for the date's weekday
/// - `booked` -- existing bookings on the date, in any order
/// - `date_is_available` -- `false` when the provider is blocked out for the date
/// - `granularity_minutes` -- step between candidate start times
/// - `duration_minutes` -- length of the appointment being booked
///
/// A start time `m` is kept only when the whole appointment `[m, m + duration)`
/// fits inside working hours and intersects neither the break nor any
/// booking. When `duration_minutes` exceeds the grid step this excludes starts
/// that run into the break: with a 12:00-13:00 break and a 60-minute
/// appointment, 11:30 is not offered even though 11:30 itself is outside the
/// break. Zero-length bookings cover no time and never block a start.
///
/// Returns start times in ascending order. An empty result means the provider
/// is off or fully booked; it is not an error.
///
/// # Errors
/// `InvalidGranularity` / `InvalidDuration` for a zero grid step or
/// appointment length, `InvalidBreak` when the template's break does not end
/// after it starts. A break that merely overlaps candidate appointments is not
/// an error; those starts are left out.
pub fn compute_available_slots(
    template: &WorkingHoursTemplate,
    booked: &[BookedInterval],
    date_is_available: bool,
    granularity_minutes: u32,
    duration_minutes: u32,
) -> Result<Vec<ClockTime>> {
    if !template.is_available || !date_is_available {
        return Ok(Vec::new());
    }

    SlotOptions::new(granularity_minutes, duration_minutes).validate()?;
    let break_window = template.break_window()?;

    let start = template.start_time.minutes();
    let end = template.end_time.minutes();
    if end <= start {
        return Ok(Vec::new());
    }

    // Sorted and disjoint, so one forward cursor covers the whole grid.
    let busy = merge_busy_periods(booked, break_window, template.start_time, template.end_time);
    let mut next_busy = 0;

    let mut slots = Vec::new();
    let mut m = start;
    while m.saturating_add(granularity_minutes) <= end {
        let candidate_end = m.saturating_add(duration_minutes);
        if candidate_end > end {
            break;
        }

        while next_busy < busy.len() && busy[next_busy].end.minutes() <= m {
            next_busy += 1;
        }
        let blocked = busy
            .get(next_busy)
            .is_some_and(|b| m < b.end.minutes() && candidate_end > b.start.minutes());

        if !blocked {
            slots.push(ClockTime::saturating(m));
        }
        m += granularity_minutes;
    }

    Ok(slots)
}

/// [`compute_available_slots`] with grid and duration taken from `options`.
pub fn compute_with_options(
    template: &WorkingHoursTemplate,
    booked: &[BookedInterval],
    date_is_available: bool,
    options: &SlotOptions,
) -> Result<Vec<ClockTime>> {
    compute_available_slots(
        template,
        booked,
        date_is_available,
        options.granularity_minutes,
        options.duration_minutes,
    )
}
