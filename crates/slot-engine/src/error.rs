//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    /// A time string did not match `HH:MM` (or `HH:MM:SS` with zero seconds).
    #[error("Invalid time format: '{0}' (expected HH:MM)")]
    Format(String),

    #[error("Invalid slot granularity: {0} minutes (must be greater than zero)")]
    InvalidGranularity(u32),

    #[error("Invalid slot duration: {0} minutes (must be greater than zero)")]
    InvalidDuration(u32),

    #[error("Invalid break window: {start}-{end} (break must end after it starts)")]
    InvalidBreak { start: String, end: String },

    #[error("Invalid weekday: {0} (expected 0-6, Sunday = 0)")]
    InvalidWeekday(u8),

    #[error("Duplicate working-hours template for weekday {0}")]
    DuplicateWeekday(u8),

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// The requested slot overlaps a reservation that already exists.
    #[error("Slot conflict: {0}")]
    Conflict(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
