//! Anchor wall-clock slots to real instants in a clinic's timezone.
//!
//! Slots are computed in local minutes-since-midnight. Booking systems store
//! UTC, so each slot on a concrete date is resolved through `chrono-tz`,
//! with [`DstPolicy`] deciding what happens on clock-change days.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::dst::DstPolicy;
use crate::error::{Result, SlotError};

/// Longest DST gap searched when shifting forward (no zone exceeds this).
const MAX_GAP_MINUTES: i64 = 180;

/// A slot resolved to UTC instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonedSlot {
    /// The slot as shown to the user.
    pub local_start: ClockTime,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Resolve `slots` on `date` in `timezone` to UTC start/end instants.
///
/// `end` is `start + duration_minutes` of elapsed time, so an appointment
/// spanning a transition keeps its real length.
///
/// # Errors
/// `InvalidTimezone` if `timezone` is not an IANA identifier.
pub fn to_utc_instants(
    date: NaiveDate,
    slots: &[ClockTime],
    duration_minutes: u32,
    timezone: &str,
    policy: DstPolicy,
) -> Result<Vec<ZonedSlot>> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| SlotError::InvalidTimezone(timezone.to_string()))?;
    let duration = Duration::minutes(i64::from(duration_minutes));

    let mut zoned = Vec::with_capacity(slots.len());
    for &slot in slots {
        let local = local_datetime(date, slot);
        let Some(start) = resolve(&tz, local, policy) else {
            tracing::debug!(%date, slot = %slot, timezone, "slot falls in DST gap, skipped");
            continue;
        };
        zoned.push(ZonedSlot {
            local_start: slot,
            start,
            end: start + duration,
        });
    }

    Ok(zoned)
}

fn local_datetime(date: NaiveDate, slot: ClockTime) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::minutes(i64::from(slot.minutes()))
}

fn resolve(tz: &Tz, local: NaiveDateTime, policy: DstPolicy) -> Option<DateTime<Utc>> {
    if let Some(dt) = tz.from_local_datetime(&local).earliest() {
        return Some(dt.with_timezone(&Utc));
    }

    // `local` does not exist: it sits inside a spring-forward gap.
    match policy {
        DstPolicy::Skip => None,
        DstPolicy::ShiftForward => (1..=MAX_GAP_MINUTES).find_map(|step| {
            tz.from_local_datetime(&(local + Duration::minutes(step)))
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
        }),
        DstPolicy::WallClock => {
            let before = tz
                .from_local_datetime(&(local - Duration::minutes(MAX_GAP_MINUTES)))
                .earliest()?;
            let offset_seconds = before.offset().fix().local_minus_utc();
            let utc = local - Duration::seconds(i64::from(offset_seconds));
            Some(Utc.from_utc_datetime(&utc))
        }
    }
}
