//! DST transition policies for slots on clock-change days.

use serde::{Deserialize, Serialize};

/// Policy for slots whose local start time falls in a spring-forward gap.
///
/// Ambiguous fall-back times always resolve to the earlier instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Drop slots that fall in the DST gap (e.g., 2:30 AM during spring forward)
    Skip,
    /// Move to the first valid local time after the gap
    ShiftForward,
    /// Read the wall-clock time with the offset in force before the gap
    #[default]
    WallClock,
}
