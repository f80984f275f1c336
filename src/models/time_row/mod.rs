// TimeRow module
// One addressable slot on the grid's vertical time axis

use serde::{Deserialize, Serialize};

/// Minutes in one 24h cycle.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// What a row represents within the timeline.
///
/// Anchor rows mark the configured start/end boundaries; hour rows fill the
/// span between them; trailing rows cover the rest of the cycle at the
/// configured increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowKind {
    AnchorStart,
    Hour,
    AnchorEnd,
    Trailing,
}

/// A single time slot in the grid.
///
/// `duration_minutes` is the row's weight in duration totals: 60 for
/// AnchorStart/Hour rows, the timeline increment for AnchorEnd/Trailing
/// rows. Downstream totals depend on this weighting exactly as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRow {
    /// Stable id, the zero-padded `HHMM` of the row's time of day.
    pub id: String,
    /// Ordinal position within the current row set.
    pub index: usize,
    /// Minute of day in `0..1440`.
    pub minute_of_day: u32,
    /// Weight this row contributes to duration totals.
    pub duration_minutes: u32,
    pub kind: RowKind,
}

impl TimeRow {
    pub fn new(index: usize, minute_of_day: u32, duration_minutes: u32, kind: RowKind) -> Self {
        let minute_of_day = minute_of_day % MINUTES_PER_DAY;
        Self {
            id: row_id_for_minute(minute_of_day),
            index,
            minute_of_day,
            duration_minutes,
            kind,
        }
    }

    /// True for the boundary rows that delimit the anchored span.
    pub fn is_anchor(&self) -> bool {
        matches!(self.kind, RowKind::AnchorStart | RowKind::AnchorEnd)
    }

    /// Display label, e.g. "22:00".
    pub fn label(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.minute_of_day / 60,
            self.minute_of_day % 60
        )
    }
}

/// Deterministic row id for a minute of day, e.g. 1350 → "2230".
pub fn row_id_for_minute(minute_of_day: u32) -> String {
    let m = minute_of_day % MINUTES_PER_DAY;
    format!("{:02}{:02}", m / 60, m % 60)
}

/// Parse a `HHMM` row id back to its minute of day.
pub fn minute_for_row_id(id: &str) -> Option<u32> {
    if id.len() != 4 || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: u32 = id[..2].parse().ok()?;
    let minutes: u32 = id[2..].parse().ok()?;
    if hours >= 24 || minutes >= 60 {
        return None;
    }
    Some(hours * 60 + minutes)
}
