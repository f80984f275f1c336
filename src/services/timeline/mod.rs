//! Timeline row computation.
//!
//! Builds the ordered set of time rows from the configured start/end
//! boundaries and increment, and provides the weighted span arithmetic
//! every duration total in the planner is derived from.

use chrono::{NaiveTime, Timelike};

use crate::models::settings::PlannerSettings;
use crate::models::time_row::{minute_for_row_id, RowKind, TimeRow, MINUTES_PER_DAY};

/// Compute the ordered row set for the given boundaries and increment.
///
/// Layout: the anchor-start row, hour rows walking hour-by-hour from the
/// start (wrapping past midnight) toward the end boundary, the anchor-end
/// row, then trailing rows stepping from the end boundary back toward the
/// start at `increment_minutes` granularity.
///
/// When the end boundary falls on an exact hour that hour is left out of
/// the hour-row list; it belongs to the anchor-end row instead.
///
/// Returns an empty set when either boundary is unset, when both fall in
/// the same clock hour, or when the increment is zero. Identical inputs
/// always yield identical row ids and order.
pub fn compute_rows(
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
    increment_minutes: u32,
) -> Vec<TimeRow> {
    let (Some(start), Some(end)) = (start, end) else {
        return Vec::new();
    };
    if increment_minutes == 0 || increment_minutes >= MINUTES_PER_DAY {
        log::warn!(
            "Refusing to build timeline with increment {} minutes",
            increment_minutes
        );
        return Vec::new();
    }

    let start_minute = start.hour() * 60 + start.minute();
    let end_minute = end.hour() * 60 + end.minute();
    if start.hour() == end.hour() {
        // Degenerate: the hour walk would wrap the full cycle and the
        // trailing rows would collide with it. Treated like an unset
        // boundary.
        return Vec::new();
    }

    let mut rows = Vec::new();
    rows.push(TimeRow::new(0, start_minute, 60, RowKind::AnchorStart));

    // Hour rows between the anchors, wrapping past midnight.
    let end_hour = end.hour();
    let mut hour = (start.hour() + 1) % 24;
    while hour != end_hour {
        rows.push(TimeRow::new(rows.len(), hour * 60, 60, RowKind::Hour));
        hour = (hour + 1) % 24;
    }
    if end.minute() != 0 {
        // The end hour itself is still a full hour row; only exact-hour
        // ends fold it into the anchor-end row.
        rows.push(TimeRow::new(rows.len(), end_hour * 60, 60, RowKind::Hour));
    }

    rows.push(TimeRow::new(
        rows.len(),
        end_minute,
        increment_minutes,
        RowKind::AnchorEnd,
    ));

    // Trailing rows cover the remainder of the cycle, from the end boundary
    // back toward the start, strictly between the two anchors.
    let remainder = (start_minute + MINUTES_PER_DAY - end_minute) % MINUTES_PER_DAY;
    let mut offset = increment_minutes;
    while offset < remainder {
        rows.push(TimeRow::new(
            rows.len(),
            (end_minute + offset) % MINUTES_PER_DAY,
            increment_minutes,
            RowKind::Trailing,
        ));
        offset += increment_minutes;
    }

    rows
}

/// Row set for the given settings; empty until both boundaries are set.
pub fn rows_for_settings(settings: &PlannerSettings) -> Vec<TimeRow> {
    compute_rows(
        settings.start_boundary,
        settings.end_boundary,
        settings.increment_minutes,
    )
}

/// Ordinal index of a row id in the current row set.
pub fn index_of(rows: &[TimeRow], row_id: &str) -> Option<usize> {
    rows.iter().position(|row| row.id == row_id)
}

/// Weighted minutes covered by the normalized ordinal span `[a, b)`.
///
/// Each row's weight is its distance to the next row, so the half-open sum
/// equals the elapsed time between the two rows' positions. A span whose
/// endpoints coincide covers zero minutes.
pub fn span_minutes(rows: &[TimeRow], a: usize, b: usize) -> u32 {
    let lo = a.min(b).min(rows.len());
    let hi = a.max(b).min(rows.len());
    rows[lo..hi].iter().map(|row| row.duration_minutes).sum()
}

/// Weighted minutes over a block's row-id range, normalized via ordinals.
/// Unknown row ids contribute nothing.
pub fn span_minutes_by_id(rows: &[TimeRow], start_row_id: &str, end_row_id: &str) -> u32 {
    match (index_of(rows, start_row_id), index_of(rows, end_row_id)) {
        (Some(a), Some(b)) => span_minutes(rows, a, b),
        _ => 0,
    }
}

/// Inclusive weight of every row; covers one full cycle modulo the
/// exact-hour end tie-break.
pub fn total_minutes(rows: &[TimeRow]) -> u32 {
    rows.iter().map(|row| row.duration_minutes).sum()
}

/// Row closest to a minute of day by circular distance; earlier grid order
/// wins ties. Used to clamp block endpoints after the row set is rebuilt.
pub fn nearest_row<'a>(rows: &'a [TimeRow], minute_of_day: u32) -> Option<&'a TimeRow> {
    let target = minute_of_day % MINUTES_PER_DAY;
    rows.iter().min_by_key(|row| {
        let forward = (row.minute_of_day + MINUTES_PER_DAY - target) % MINUTES_PER_DAY;
        forward.min(MINUTES_PER_DAY - forward)
    })
}

/// Nearest surviving row for a row id from a previous row set.
pub fn nearest_row_for_id<'a>(rows: &'a [TimeRow], row_id: &str) -> Option<&'a TimeRow> {
    match minute_for_row_id(row_id) {
        Some(minute) => nearest_row(rows, minute),
        None => {
            log::debug!("Unparsable row id {:?}; clamping to the first row", row_id);
            rows.first()
        }
    }
}
