//! Block resize handling.
//!
//! A deliberately flat mechanism next to the drag state machine: one global
//! "resizing target" slot, mutated live through the store so intermediate
//! sizes are visible immediately, no preview and no commit step.

use crate::models::block::BlockId;
use crate::models::time_row::TimeRow;
use crate::services::block_store::BlockStore;
use crate::services::geometry::{GeometryProvider, PointerPos};
use crate::services::timeline::index_of;

/// Extends or shrinks a block's span via its bottom handle.
#[derive(Debug, Default)]
pub struct ResizeController {
    target: Option<BlockId>,
}

impl ResizeController {
    pub fn new() -> Self {
        Self { target: None }
    }

    pub fn is_resizing(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&BlockId> {
        self.target.as_ref()
    }

    /// Mark `block_id` as the resizing target. A previous target, if any,
    /// is simply replaced.
    pub fn start(&mut self, block_id: &BlockId) {
        self.target = Some(block_id.clone());
    }

    /// Resolve the row under the pointer and move the target's end row
    /// there, clamped so the block never resizes above its own start.
    ///
    /// The store is mutated live. A target that has disappeared clears the
    /// slot implicitly; a missed hit-test leaves the block as it was.
    pub fn update(
        &mut self,
        pointer: PointerPos,
        store: &mut BlockStore,
        rows: &[TimeRow],
        geometry: &dyn GeometryProvider,
    ) {
        let Some(target) = self.target.clone() else {
            return;
        };
        let Some(block) = store.get_by_id(&target) else {
            log::debug!("Resize target {} vanished; stopping", target);
            self.stop();
            return;
        };
        let Some(start_index) = index_of(rows, &block.start_row_id) else {
            return;
        };
        let Some(row_index) = geometry.row_at(pointer.y) else {
            return;
        };
        let Some(end_row) = rows.get(row_index.max(start_index)) else {
            return;
        };
        store.set_end_row(&target, &end_row.id);
    }

    /// Clear the resizing slot; the store already holds the final span.
    pub fn stop(&mut self) {
        self.target = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use pretty_assertions::assert_eq;

    use crate::models::block::Block;
    use crate::services::geometry::GridGeometry;
    use crate::services::timeline::compute_rows;

    const ROW_H: f32 = 20.0;

    fn night_rows() -> Vec<TimeRow> {
        compute_rows(
            NaiveTime::from_hms_opt(22, 0, 0),
            NaiveTime::from_hms_opt(6, 0, 0),
            30,
        )
    }

    fn store_with_block() -> (BlockStore, BlockId) {
        let block = Block {
            id: BlockId::from("block-1"),
            column_id: "day-0".to_string(),
            start_row_id: "2300".to_string(),
            end_row_id: "0100".to_string(),
            entity_id: "sleep".to_string(),
            label_override: None,
        };
        (BlockStore::from_blocks(vec![block]), BlockId::from("block-1"))
    }

    fn geometry(rows: &[TimeRow]) -> GridGeometry {
        GridGeometry::uniform(ROW_H, rows.len(), 100.0, 1)
    }

    fn pointer_at_row(row: usize) -> PointerPos {
        PointerPos::new(10.0, row as f32 * ROW_H + ROW_H / 2.0)
    }

    #[test]
    fn test_update_moves_end_row_live() {
        let rows = night_rows();
        let (mut store, id) = store_with_block();
        let mut resize = ResizeController::new();
        resize.start(&id);

        resize.update(pointer_at_row(8), &mut store, &rows, &geometry(&rows));
        assert_eq!(store.get_by_id(&id).unwrap().end_row_id, rows[8].id);
        assert!(resize.is_resizing());

        resize.stop();
        assert!(!resize.is_resizing());
        assert_eq!(store.get_by_id(&id).unwrap().end_row_id, rows[8].id);
    }

    #[test]
    fn test_update_never_resizes_above_start() {
        let rows = night_rows();
        let (mut store, id) = store_with_block();
        let mut resize = ResizeController::new();
        resize.start(&id);

        // Pointer above the block's start row (index 1) clamps to the start.
        resize.update(pointer_at_row(0), &mut store, &rows, &geometry(&rows));
        assert_eq!(store.get_by_id(&id).unwrap().end_row_id, "2300");
    }

    #[test]
    fn test_update_with_missed_hit_test_keeps_span() {
        let rows = night_rows();
        let (mut store, id) = store_with_block();
        let mut resize = ResizeController::new();
        resize.start(&id);

        resize.update(
            PointerPos::new(10.0, -999.0),
            &mut store,
            &rows,
            &geometry(&rows),
        );
        assert_eq!(store.get_by_id(&id).unwrap().end_row_id, "0100");
        assert!(resize.is_resizing());
    }

    #[test]
    fn test_vanished_target_stops_implicitly() {
        let rows = night_rows();
        let (mut store, id) = store_with_block();
        let mut resize = ResizeController::new();
        resize.start(&id);
        store.delete_by_id(&id);

        resize.update(pointer_at_row(5), &mut store, &rows, &geometry(&rows));
        assert!(!resize.is_resizing());
    }

    #[test]
    fn test_starting_new_target_replaces_previous() {
        let (_, id) = store_with_block();
        let other = BlockId::from("block-2");
        let mut resize = ResizeController::new();
        resize.start(&id);
        resize.start(&other);
        assert_eq!(resize.target(), Some(&other));
    }
}
