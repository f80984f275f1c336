// Property-based tests for timeline construction and span arithmetic.

use chrono::NaiveTime;
use proptest::prelude::*;

use time_grid_planner::services::timeline::{
    compute_rows, index_of, span_minutes, total_minutes,
};
use time_grid_planner::RowKind;

fn time(minute_of_day: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minute_of_day / 60, minute_of_day % 60, 0).unwrap()
}

/// Boundary pair in distinct clock hours, plus an increment.
fn boundaries() -> impl Strategy<Value = (u32, u32, u32)> {
    (0u32..24, 0u32..24, 1u32..180)
        .prop_filter("distinct hours", |(sh, eh, _)| sh != eh)
        .prop_flat_map(|(sh, eh, inc)| {
            (Just(sh), 0u32..60, Just(eh), 0u32..60, Just(inc))
        })
        .prop_map(|(sh, sm, eh, em, inc)| (sh * 60 + sm, eh * 60 + em, inc))
}

proptest! {
    /// Identical inputs always produce identical rows.
    #[test]
    fn prop_compute_rows_deterministic((start, end, inc) in boundaries()) {
        let a = compute_rows(Some(time(start)), Some(time(end)), inc);
        let b = compute_rows(Some(time(start)), Some(time(end)), inc);
        prop_assert_eq!(a, b);
    }

    /// Row ids never collide, whatever the boundaries.
    #[test]
    fn prop_row_ids_unique((start, end, inc) in boundaries()) {
        let rows = compute_rows(Some(time(start)), Some(time(end)), inc);
        let mut ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        let before = ids.len();
        ids.dedup();
        prop_assert_eq!(ids.len(), before);
    }

    /// Exactly one anchor of each kind, in first and post-hour position.
    #[test]
    fn prop_anchor_rows_bracket_the_hours((start, end, inc) in boundaries()) {
        let rows = compute_rows(Some(time(start)), Some(time(end)), inc);
        prop_assert!(!rows.is_empty());
        prop_assert_eq!(rows[0].kind, RowKind::AnchorStart);
        let starts = rows.iter().filter(|r| r.kind == RowKind::AnchorStart).count();
        let ends = rows.iter().filter(|r| r.kind == RowKind::AnchorEnd).count();
        prop_assert_eq!((starts, ends), (1, 1));

        let end_index = index_of(&rows, &rows.iter().find(|r| r.kind == RowKind::AnchorEnd).unwrap().id).unwrap();
        prop_assert!(rows[1..end_index].iter().all(|r| r.kind == RowKind::Hour));
        prop_assert!(rows[end_index + 1..].iter().all(|r| r.kind == RowKind::Trailing));
    }

    /// Hour and anchor-start rows weigh 60; the rest weigh the increment.
    #[test]
    fn prop_row_weights_follow_kind((start, end, inc) in boundaries()) {
        let rows = compute_rows(Some(time(start)), Some(time(end)), inc);
        for row in &rows {
            let expected = match row.kind {
                RowKind::AnchorStart | RowKind::Hour => 60,
                RowKind::AnchorEnd | RowKind::Trailing => inc,
            };
            prop_assert_eq!(row.duration_minutes, expected);
        }
    }

    /// On-the-hour boundaries with an increment dividing 60 cover exactly
    /// one full cycle.
    #[test]
    fn prop_full_cycle_for_aligned_boundaries(
        sh in 0u32..24,
        eh in 0u32..24,
        inc in prop::sample::select(vec![5u32, 10, 15, 20, 30, 60]),
    ) {
        prop_assume!(sh != eh);
        let rows = compute_rows(Some(time(sh * 60)), Some(time(eh * 60)), inc);
        prop_assert_eq!(total_minutes(&rows), 24 * 60);
    }

    /// Span arithmetic is order-independent and additive over a cut point.
    #[test]
    fn prop_span_additive((start, end, inc) in boundaries(), cuts in prop::collection::vec(0usize..200, 3)) {
        let rows = compute_rows(Some(time(start)), Some(time(end)), inc);
        let clamp = |i: usize| i % rows.len();
        let (a, b, c) = (clamp(cuts[0]), clamp(cuts[1]), clamp(cuts[2]));
        let (lo, hi) = (a.min(b), a.max(b));
        prop_assert_eq!(span_minutes(&rows, a, b), span_minutes(&rows, b, a));
        if lo <= c && c <= hi {
            prop_assert_eq!(
                span_minutes(&rows, lo, c) + span_minutes(&rows, c, hi),
                span_minutes(&rows, lo, hi)
            );
        }
    }

    /// A span between two rows equals the clock time between them along
    /// the grid for the canonical aligned layout.
    #[test]
    fn prop_span_matches_elapsed_time_when_aligned(
        a in 0usize..40,
        b in 0usize..40,
    ) {
        // 22:00 → 06:00 at 30 minutes: 40 rows.
        let rows = compute_rows(Some(time(22 * 60)), Some(time(6 * 60)), 30);
        prop_assert_eq!(rows.len(), 40);
        let (lo, hi) = (a.min(b), a.max(b));
        let elapsed = (rows[hi].minute_of_day + 24 * 60 - rows[lo].minute_of_day) % (24 * 60);
        prop_assert_eq!(span_minutes(&rows, a, b), elapsed);
    }
}
