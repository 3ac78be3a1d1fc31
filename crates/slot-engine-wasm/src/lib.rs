//! WASM bindings for slot-engine.
//!
//! Exposes slot computation, free windows, booking-conflict detection, and
//! date-range availability to JavaScript via `wasm-bindgen`, so a booking page
//! can compute slots client-side from rows it already fetched. All complex
//! types are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```
//!
//! Each export is a thin wrapper over a function in [`bridge`], which returns
//! `Result<String, String>` and can be exercised without a JS host.

use wasm_bindgen::prelude::*;

pub mod bridge {
    //! JSON-in/JSON-out entry points behind the WASM exports.

    use chrono::NaiveDate;
    use slot_engine::dst::DstPolicy;
    use slot_engine::request::RangeRequest;
    use slot_engine::slots::BookedInterval;
    use slot_engine::{ClockTime, WorkingHoursTemplate};

    fn parse<T: serde::de::DeserializeOwned>(what: &str, json: &str) -> Result<T, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
    }

    fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
        serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
    }

    /// See [`crate::compute_available_slots`].
    pub fn compute_available_slots(
        template_json: &str,
        bookings_json: &str,
        date_is_available: bool,
        granularity_minutes: u32,
        duration_minutes: u32,
    ) -> Result<String, String> {
        let template: WorkingHoursTemplate = parse("template", template_json)?;
        let bookings: Vec<BookedInterval> = parse("bookings", bookings_json)?;

        let slots = slot_engine::compute_available_slots(
            &template,
            &bookings,
            date_is_available,
            granularity_minutes,
            duration_minutes,
        )
        .map_err(|e| e.to_string())?;

        to_json(&slots)
    }

    /// See [`crate::find_free_windows`].
    pub fn find_free_windows(template_json: &str, bookings_json: &str) -> Result<String, String> {
        let template: WorkingHoursTemplate = parse("template", template_json)?;
        let bookings: Vec<BookedInterval> = parse("bookings", bookings_json)?;

        let windows =
            slot_engine::find_free_windows(&template, &bookings).map_err(|e| e.to_string())?;
        to_json(&windows)
    }

    /// See [`crate::find_booking_conflicts`].
    pub fn find_booking_conflicts(bookings_json: &str) -> Result<String, String> {
        let bookings: Vec<BookedInterval> = parse("bookings", bookings_json)?;
        to_json(&slot_engine::find_booking_conflicts(&bookings))
    }

    /// See [`crate::find_available_days`].
    pub fn find_available_days(request_json: &str) -> Result<String, String> {
        let request: RangeRequest = parse("range request", request_json)?;
        let days = request.available_days().map_err(|e| e.to_string())?;
        to_json(&days)
    }

    /// See [`crate::resolve_slots_utc`].
    pub fn resolve_slots_utc(
        date: &str,
        slots_json: &str,
        duration_minutes: u32,
        timezone: &str,
        dst_policy: Option<String>,
    ) -> Result<String, String> {
        let date: NaiveDate = date
            .parse()
            .map_err(|e| format!("Invalid date '{}': {}", date, e))?;
        let slots: Vec<ClockTime> = parse("slots", slots_json)?;
        let policy: DstPolicy = match dst_policy {
            Some(p) => serde_json::from_value(serde_json::Value::String(p.clone()))
                .map_err(|_| format!("Invalid DST policy: '{}'", p))?,
            None => DstPolicy::default(),
        };

        let zoned = slot_engine::zoned::to_utc_instants(date, &slots, duration_minutes, timezone, policy)
            .map_err(|e| e.to_string())?;
        to_json(&zoned)
    }
}

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute free appointment start times for one provider on one date.
///
/// `template_json` is a working-hours object (`weekday`, `start_time`,
/// `end_time`, optional `break_start`/`break_end`, `is_available`).
/// `bookings_json` is an array of `{start_time, duration_minutes}`. Returns a
/// JSON array of `"HH:MM"` strings.
#[wasm_bindgen(js_name = "computeAvailableSlots")]
pub fn compute_available_slots(
    template_json: &str,
    bookings_json: &str,
    date_is_available: bool,
    granularity_minutes: u32,
    duration_minutes: u32,
) -> Result<String, JsValue> {
    bridge::compute_available_slots(
        template_json,
        bookings_json,
        date_is_available,
        granularity_minutes,
        duration_minutes,
    )
    .map_err(js_err)
}

/// Free windows inside working hours. Returns a JSON array of
/// `{start, end, duration_minutes}` objects.
#[wasm_bindgen(js_name = "findFreeWindows")]
pub fn find_free_windows(template_json: &str, bookings_json: &str) -> Result<String, JsValue> {
    bridge::find_free_windows(template_json, bookings_json).map_err(js_err)
}

/// Pairs of bookings that overlap. Returns a JSON array of
/// `{booking_a, booking_b, overlap_minutes}` objects.
#[wasm_bindgen(js_name = "findBookingConflicts")]
pub fn find_booking_conflicts(bookings_json: &str) -> Result<String, JsValue> {
    bridge::find_booking_conflicts(bookings_json).map_err(js_err)
}

/// Slots for every working day in a range. `request_json` carries `schedule`,
/// `bookings` (keyed by `YYYY-MM-DD`), `blackout_dates`, `from`, `to`, and
/// optional `options`.
#[wasm_bindgen(js_name = "findAvailableDays")]
pub fn find_available_days(request_json: &str) -> Result<String, JsValue> {
    bridge::find_available_days(request_json).map_err(js_err)
}

/// Resolve `"HH:MM"` slots on `date` to UTC instants in an IANA timezone.
///
/// `dst_policy` is `"skip"`, `"shift_forward"`, or `"wall_clock"` (default).
#[wasm_bindgen(js_name = "resolveSlotsUtc")]
pub fn resolve_slots_utc(
    date: &str,
    slots_json: &str,
    duration_minutes: u32,
    timezone: &str,
    dst_policy: Option<String>,
) -> Result<String, JsValue> {
    bridge::resolve_slots_utc(date, slots_json, duration_minutes, timezone, dst_policy)
        .map_err(js_err)
}
