//! Wall-clock times of day, stored as minutes since midnight.
//!
//! Schedule data arrives as strings: `"09:00"` from forms, `"09:00:00"` from
//! SQL `time` columns. Both parse into a [`ClockTime`]; anything else is a
//! [`SlotError::Format`]. Display is always `HH:MM`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Minutes in a day. `24:00` is the only accepted time with this value.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day with minute precision, in `[00:00, 24:00]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u32);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);
    pub const END_OF_DAY: ClockTime = ClockTime(MINUTES_PER_DAY);

    /// Build a time from hours and minutes. `24:00` is allowed, nothing later.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self> {
        if minute >= 60 || hour > 24 || (hour == 24 && minute != 0) {
            return Err(SlotError::Format(format!("{:02}:{:02}", hour, minute)));
        }
        Ok(ClockTime(hour * 60 + minute))
    }

    /// Build a time from minutes since midnight.
    pub fn from_minutes(minutes: u32) -> Result<Self> {
        if minutes > MINUTES_PER_DAY {
            return Err(SlotError::Format(format!("{} minutes", minutes)));
        }
        Ok(ClockTime(minutes))
    }

    /// Parse `HH:MM` or `HH:MM:SS`. Seconds must be `00`.
    pub fn parse(s: &str) -> Result<Self> {
        let malformed = || SlotError::Format(s.to_string());

        let mut parts = s.split(':');
        let hour = parts.next().ok_or_else(malformed)?;
        let minute = parts.next().ok_or_else(malformed)?;
        let second = parts.next();
        if parts.next().is_some() {
            return Err(malformed());
        }

        let hour = parse_two_digits(hour).ok_or_else(malformed)?;
        let minute = parse_two_digits(minute).ok_or_else(malformed)?;
        if let Some(second) = second {
            if parse_two_digits(second).ok_or_else(malformed)? != 0 {
                return Err(malformed());
            }
        }

        Self::from_hm(hour, minute).map_err(|_| malformed())
    }

    /// Clamp minutes into `[00:00, 24:00]`.
    pub(crate) fn saturating(minutes: u32) -> Self {
        ClockTime(minutes.min(MINUTES_PER_DAY))
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    pub fn minute(self) -> u32 {
        self.0 % 60
    }

    /// Convert to a `chrono::NaiveTime`. `24:00` has no `NaiveTime` and returns `None`.
    pub fn to_naive_time(self) -> Option<chrono::NaiveTime> {
        chrono::NaiveTime::from_hms_opt(self.hour(), self.minute(), 0)
    }
}

fn parse_two_digits(s: &str) -> Option<u32> {
    if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = SlotError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}

