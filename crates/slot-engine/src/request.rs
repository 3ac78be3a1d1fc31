//! JSON request documents shared by the CLI and WASM front ends.
//!
//! Time strings are parsed while deserializing, so a malformed `"9am"`
//! fails the whole request instead of producing a partial slot list.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::availability::{find_available_days, BookingsByDate, DayAvailability};
use crate::clock::ClockTime;
use crate::error::Result;
use crate::freebusy::{find_free_windows, FreeWindow};
use crate::schedule::{WeeklySchedule, WorkingHoursTemplate};
use crate::slots::{compute_with_options, BookedInterval, SlotOptions};

fn default_true() -> bool {
    true
}

/// One provider, one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayRequest {
    pub template: WorkingHoursTemplate,
    #[serde(default)]
    pub bookings: Vec<BookedInterval>,
    #[serde(default = "default_true")]
    pub date_is_available: bool,
    #[serde(default)]
    pub options: SlotOptions,
}

impl DayRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn available_slots(&self) -> Result<Vec<ClockTime>> {
        compute_with_options(
            &self.template,
            &self.bookings,
            self.date_is_available,
            &self.options,
        )
    }

    pub fn free_windows(&self) -> Result<Vec<FreeWindow>> {
        if !self.date_is_available {
            return Ok(Vec::new());
        }
        find_free_windows(&self.template, &self.bookings)
    }
}

/// One provider across a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeRequest {
    pub schedule: Vec<WorkingHoursTemplate>,
    #[serde(default)]
    pub bookings: BookingsByDate,
    #[serde(default)]
    pub blackout_dates: BTreeSet<NaiveDate>,
    pub from: NaiveDate,
    pub to: NaiveDate,
    #[serde(default)]
    pub options: SlotOptions,
}

impl RangeRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn available_days(&self) -> Result<Vec<DayAvailability>> {
        let schedule = WeeklySchedule::new(self.schedule.iter().cloned())?;
        find_available_days(
            &schedule,
            &self.bookings,
            &self.blackout_dates,
            self.from,
            self.to,
            &self.options,
        )
    }
}
