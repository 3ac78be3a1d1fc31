//! # slot-engine
//!
//! Deterministic appointment-slot availability for practice-management systems.
//!
//! Given a provider's working hours for a weekday, an optional break, and the
//! bookings already on a date, the engine lists the start times still free on
//! a fixed grid. Everything is pure interval arithmetic over minutes since
//! midnight; the caller fetches the data and owns persistence.
//!
//! ## Modules
//!
//! - [`slots`] -- the slot calculator (`compute_available_slots`)
//! - [`clock`] -- `HH:MM` time-of-day parsing and formatting
//! - [`schedule`] -- working-hours templates and weekly schedules
//! - [`freebusy`] -- merged busy periods and free windows
//! - [`conflict`] -- double-booking detection
//! - [`availability`] -- slots across a date range
//! - [`zoned`] / [`dst`] -- resolve slots to UTC in an IANA timezone
//! - [`reservation`] -- at-most-once reservation book
//! - [`request`] -- JSON request documents
//! - [`error`] -- Error types

pub mod availability;
pub mod clock;
pub mod conflict;
pub mod dst;
pub mod error;
pub mod freebusy;
pub mod request;
pub mod reservation;
pub mod schedule;
pub mod slots;
pub mod zoned;

pub use availability::{find_available_days, find_first_available, DayAvailability};
pub use clock::ClockTime;
pub use conflict::find_booking_conflicts;
pub use error::SlotError;
pub use freebusy::find_free_windows;
pub use schedule::{WeeklySchedule, WorkingHoursTemplate};
pub use slots::{compute_available_slots, compute_with_options, BookedInterval, SlotOptions};
