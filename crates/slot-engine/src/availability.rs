//! Multi-day availability from a provider's weekly schedule.
//!
//! Applies the weekday template to each date in a range, marks blacked-out
//! dates unavailable, and runs the slot calculator against that date's
//! bookings. This is what a booking UI lists when the patient browses a week.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::error::{Result, SlotError};
use crate::schedule::{weekday_index, WeeklySchedule};
use crate::slots::{compute_with_options, BookedInterval, SlotOptions};

/// Longest range accepted by [`find_available_days`], in days.
pub const MAX_RANGE_DAYS: i64 = 366;

/// Bookings keyed by date.
pub type BookingsByDate = BTreeMap<NaiveDate, Vec<BookedInterval>>;

/// Free slots for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    /// Sunday-based weekday index (0-6).
    pub weekday: u8,
    pub slots: Vec<ClockTime>,
}

/// The earliest bookable slot in a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstAvailable {
    pub date: NaiveDate,
    pub start_time: ClockTime,
}

/// Slots for every date in `[from, to]` that has a working-hours template.
///
/// Dates without a template are omitted. Dates in `blackout_dates` are
/// included with no slots, as are fully booked dates.
///
/// # Errors
/// `InvalidRange` when `to` precedes `from` or the range exceeds
/// [`MAX_RANGE_DAYS`]; any error from the slot calculator.
pub fn find_available_days(
    schedule: &WeeklySchedule,
    bookings: &BookingsByDate,
    blackout_dates: &BTreeSet<NaiveDate>,
    from: NaiveDate,
    to: NaiveDate,
    options: &SlotOptions,
) -> Result<Vec<DayAvailability>> {
    validate_range(from, to)?;
    options.validate()?;

    let mut days = Vec::new();
    for date in from.iter_days().take_while(|d| *d <= to) {
        let Some(template) = schedule.get(date.weekday()) else {
            continue;
        };
        let booked = bookings.get(&date).map(Vec::as_slice).unwrap_or(&[]);
        let date_is_available = !blackout_dates.contains(&date);
        let slots = compute_with_options(template, booked, date_is_available, options)?;

        days.push(DayAvailability {
            date,
            weekday: weekday_index(date.weekday()),
            slots,
        });
    }

    tracing::debug!(%from, %to, days = days.len(), "computed availability range");
    Ok(days)
}

/// First slot in `[from, to]` that starts at or after `not_before`.
///
/// `not_before` lets a caller hide slots that have already started today.
pub fn find_first_available(
    schedule: &WeeklySchedule,
    bookings: &BookingsByDate,
    blackout_dates: &BTreeSet<NaiveDate>,
    from: NaiveDate,
    to: NaiveDate,
    options: &SlotOptions,
    not_before: Option<NaiveDateTime>,
) -> Result<Option<FirstAvailable>> {
    let days = find_available_days(schedule, bookings, blackout_dates, from, to, options)?;

    Ok(days.into_iter().find_map(|day| {
        day.slots
            .into_iter()
            .find(|slot| match not_before {
                Some(cutoff) => starts_at_or_after(day.date, *slot, cutoff),
                None => true,
            })
            .map(|start_time| FirstAvailable {
                date: day.date,
                start_time,
            })
    }))
}

fn starts_at_or_after(date: NaiveDate, slot: ClockTime, cutoff: NaiveDateTime) -> bool {
    match date.cmp(&cutoff.date()) {
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Equal => {
            slot.to_naive_time().is_none_or(|t| t >= cutoff.time())
        }
    }
}

fn validate_range(from: NaiveDate, to: NaiveDate) -> Result<()> {
    if to < from {
        return Err(SlotError::InvalidRange(format!(
            "end {} is before start {}",
            to, from
        )));
    }
    let days = (to - from).num_days() + 1;
    if days > MAX_RANGE_DAYS {
        return Err(SlotError::InvalidRange(format!(
            "{} days exceeds the {} day limit",
            days, MAX_RANGE_DAYS
        )));
    }
    Ok(())
}
