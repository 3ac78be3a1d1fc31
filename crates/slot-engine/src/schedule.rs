//! Provider working-hours templates.
//!
//! A template describes when a provider nominally works on one weekday,
//! with an optional break. A [`WeeklySchedule`] holds at most one template
//! per weekday and is what multi-day availability is computed from.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::error::{Result, SlotError};

/// Recurring availability window for one weekday.
///
/// Weekdays are numbered 0-6 starting at Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHoursTemplate {
    #[serde(alias = "day_of_week")]
    pub weekday: u8,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_start: Option<ClockTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_end: Option<ClockTime>,
    pub is_available: bool,
}

impl WorkingHoursTemplate {
    /// A template without a break.
    pub fn new(weekday: u8, start_time: ClockTime, end_time: ClockTime) -> Self {
        Self {
            weekday,
            start_time,
            end_time,
            break_start: None,
            break_end: None,
            is_available: true,
        }
    }

    pub fn with_break(mut self, start: ClockTime, end: ClockTime) -> Self {
        self.break_start = Some(start);
        self.break_end = Some(end);
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.is_available = false;
        self
    }

    /// The break as a `[start, end)` pair.
    ///
    /// Only applies when both bounds are present. A break that does not end
    /// after it starts is a malformed record.
    pub fn break_window(&self) -> Result<Option<(ClockTime, ClockTime)>> {
        match (self.break_start, self.break_end) {
            (Some(start), Some(end)) if end <= start => Err(SlotError::InvalidBreak {
                start: start.to_string(),
                end: end.to_string(),
            }),
            (Some(start), Some(end)) => Ok(Some((start, end))),
            _ => Ok(None),
        }
    }

    pub fn chrono_weekday(&self) -> Result<Weekday> {
        weekday_from_index(self.weekday)
    }
}

/// Map a Sunday-based index (0-6) to a `chrono::Weekday`.
pub fn weekday_from_index(index: u8) -> Result<Weekday> {
    Ok(match index {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        6 => Weekday::Sat,
        other => return Err(SlotError::InvalidWeekday(other)),
    })
}

/// Sunday-based index (0-6) of a `chrono::Weekday`.
pub fn weekday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

/// A provider's templates, indexed by weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySchedule {
    days: [Option<WorkingHoursTemplate>; 7],
}

impl WeeklySchedule {
    /// Build a schedule from up to seven templates.
    ///
    /// # Errors
    /// `InvalidWeekday` for an index outside 0-6, `DuplicateWeekday` when two
    /// templates claim the same day.
    pub fn new(templates: impl IntoIterator<Item = WorkingHoursTemplate>) -> Result<Self> {
        let mut days: [Option<WorkingHoursTemplate>; 7] = Default::default();
        for template in templates {
            let index = weekday_index(template.chrono_weekday()?) as usize;
            if days[index].is_some() {
                return Err(SlotError::DuplicateWeekday(template.weekday));
            }
            days[index] = Some(template);
        }
        Ok(Self { days })
    }

    pub fn get(&self, weekday: Weekday) -> Option<&WorkingHoursTemplate> {
        self.days[weekday_index(weekday) as usize].as_ref()
    }

    /// Templates in weekday order, Sunday first.
    pub fn templates(&self) -> impl Iterator<Item = &WorkingHoursTemplate> {
        self.days.iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Option::is_none)
    }
}
