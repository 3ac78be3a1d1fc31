//! Merge bookings and breaks into busy periods and compute free windows.
//!
//! Sorts busy intervals by start time, merges overlapping or adjacent ones,
//! then computes the gaps between merged periods within working hours.

use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::error::Result;
use crate::schedule::WorkingHoursTemplate;
use crate::slots::BookedInterval;

/// A merged busy period `[start, end)`, clipped to the working window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyPeriod {
    pub start: ClockTime,
    pub end: ClockTime,
}

/// A free window inside working hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeWindow {
    pub start: ClockTime,
    pub end: ClockTime,
    pub duration_minutes: u32,
}

/// Merge bookings and an optional break into sorted, non-overlapping busy
/// periods clipped to `[window_start, window_end)`.
///
/// Zero-length bookings and intervals entirely outside the window are
/// discarded. Adjacent intervals are merged into one period.
pub fn merge_busy_periods(
    bookings: &[BookedInterval],
    break_window: Option<(ClockTime, ClockTime)>,
    window_start: ClockTime,
    window_end: ClockTime,
) -> Vec<BusyPeriod> {
    let (ws, we) = (window_start.minutes(), window_end.minutes());

    let mut intervals: Vec<(u32, u32)> = bookings
        .iter()
        .map(|b| (b.start_minute(), b.end_minute()))
        .chain(break_window.map(|(s, e)| (s.minutes(), e.minutes())))
        .filter(|&(start, end)| start < end && start < we && end > ws)
        .map(|(start, end)| (start.max(ws), end.min(we)))
        .collect();

    if intervals.is_empty() {
        return Vec::new();
    }

    intervals.sort_unstable();

    let mut merged: Vec<(u32, u32)> = Vec::with_capacity(intervals.len());
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    merged
        .into_iter()
        .map(|(start, end)| BusyPeriod {
            start: ClockTime::saturating(start),
            end: ClockTime::saturating(end),
        })
        .collect()
}

/// Free windows inside the template's working hours, given the day's bookings.
///
/// The break counts as busy. An unavailable template has no free windows.
///
/// # Errors
/// `InvalidBreak` if the template's break does not end after it starts.
pub fn find_free_windows(
    template: &WorkingHoursTemplate,
    bookings: &[BookedInterval],
) -> Result<Vec<FreeWindow>> {
    if !template.is_available || template.end_time <= template.start_time {
        return Ok(Vec::new());
    }
    let break_window = template.break_window()?;
    let busy = merge_busy_periods(bookings, break_window, template.start_time, template.end_time);

    let mut free = Vec::new();
    let mut cursor = template.start_time;

    for period in &busy {
        if cursor < period.start {
            free.push(window(cursor, period.start));
        }
        cursor = cursor.max(period.end);
    }

    if cursor < template.end_time {
        free.push(window(cursor, template.end_time));
    }

    Ok(free)
}

/// First free window of at least `min_duration_minutes`.
pub fn find_first_free_window(
    template: &WorkingHoursTemplate,
    bookings: &[BookedInterval],
    min_duration_minutes: u32,
) -> Result<Option<FreeWindow>> {
    Ok(find_free_windows(template, bookings)?
        .into_iter()
        .find(|w| w.duration_minutes >= min_duration_minutes))
}

fn window(start: ClockTime, end: ClockTime) -> FreeWindow {
    FreeWindow {
        start,
        end,
        duration_minutes: end.minutes() - start.minutes(),
    }
}
