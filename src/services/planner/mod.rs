//! Planner facade.
//!
//! Owns the timeline, column set, block store, and the interaction
//! controllers, and keeps them consistent: a settings change rebuilds the
//! rows and re-validates every block, a column change drops orphans and
//! re-fills the base track. Hosts drive it with discrete input events and
//! a `GeometryProvider`; every entry point is a synchronous reaction to
//! one event (no threads, no timers).

use anyhow::Result;

use crate::models::block::{Block, BlockId, BlockPatch};
use crate::models::column::Column;
use crate::models::selection::{CellRef, Modifiers};
use crate::models::settings::PlannerSettings;
use crate::models::time_row::TimeRow;
use crate::services::aggregation::{totals_matrix, AggregateBand, TotalsMatrix};
use crate::services::block_store::BlockStore;
use crate::services::clipboard::{CellValues, ClipboardController, SystemClipboard};
use crate::services::drag::{DragController, DragPreview};
use crate::services::entity::EntityDirectory;
use crate::services::geometry::{GeometryProvider, PointerPos};
use crate::services::persistence::{
    load_planner_snapshot, save_planner_snapshot, PlannerSnapshot, SnapshotStore,
};
use crate::services::resize::ResizeController;
use crate::services::selection::SelectionController;
use crate::services::timeline::rows_for_settings;

/// The whole interaction engine behind one grid surface.
pub struct Planner {
    settings: PlannerSettings,
    rows: Vec<TimeRow>,
    columns: Vec<Column>,
    store: BlockStore,
    drag: DragController,
    resize: ResizeController,
    selection: SelectionController,
    clipboard: ClipboardController,
    entities: EntityDirectory,
}

impl Planner {
    pub fn new(settings: PlannerSettings) -> Self {
        let rows = rows_for_settings(&settings);
        Self {
            settings,
            rows,
            columns: Vec::new(),
            store: BlockStore::new(),
            drag: DragController::new(),
            resize: ResizeController::new(),
            selection: SelectionController::new(),
            clipboard: ClipboardController::new(),
            entities: EntityDirectory::new(),
        }
    }

    /// Rebuild from a persisted snapshot: duplicate block ids are dropped
    /// (first wins) and every block is clamped to the rebuilt row set.
    pub fn from_snapshot(snapshot: PlannerSnapshot) -> Self {
        let mut planner = Self::new(snapshot.settings);
        planner.store = BlockStore::from_blocks(snapshot.blocks);
        planner.store.revalidate(&planner.rows);
        planner
    }

    // --- timeline & columns -------------------------------------------------

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    pub fn rows(&self) -> &[TimeRow] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Columns inside the current display window.
    pub fn visible_columns(&self) -> &[Column] {
        let end = self.settings.visible_columns.min(self.columns.len());
        &self.columns[..end]
    }

    /// Apply new settings: rebuild the row set, re-validate every block
    /// against it, and re-fill the base track. In-flight gestures are
    /// cancelled since their row ordinals no longer mean anything.
    pub fn apply_settings(&mut self, settings: PlannerSettings) -> Result<(), String> {
        settings.validate()?;
        self.settings = settings;
        self.rows = rows_for_settings(&self.settings);
        log::info!("Rebuilt timeline with {} row(s)", self.rows.len());
        self.drag.cancel();
        self.resize.stop();
        self.store.revalidate(&self.rows);
        self.fill_base_track();
        Ok(())
    }

    /// Replace the column set. Ordinals are reassigned in list order;
    /// blocks referencing removed columns are dropped and empty Day
    /// columns re-filled.
    pub fn set_columns(&mut self, mut columns: Vec<Column>) {
        for (index, column) in columns.iter_mut().enumerate() {
            column.index = index;
        }
        self.columns = columns;
        self.store.retain_columns(&self.columns);
        self.fill_base_track();
    }

    fn fill_base_track(&mut self) {
        if let Some(first_row) = self.rows.first() {
            let first_row_id = first_row.id.clone();
            self.store.fill_base_track(&self.columns, &first_row_id);
        }
    }

    // --- blocks -------------------------------------------------------------

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.store.iter()
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.store.get_by_id(id)
    }

    pub fn blocks_in_column<'a>(&'a self, column_id: &'a str) -> impl Iterator<Item = &'a Block> {
        self.store.blocks_in_column(column_id)
    }

    pub fn upsert_block(&mut self, column_id: &str, start_row_id: &str, patch: BlockPatch) -> BlockId {
        self.store.upsert_by_cell(column_id, start_row_id, patch)
    }

    pub fn delete_block(&mut self, id: &BlockId) -> bool {
        self.store.delete_by_id(id)
    }

    // --- drag ---------------------------------------------------------------

    pub fn drag_start(
        &mut self,
        block_id: &BlockId,
        pointer: PointerPos,
        geometry: &dyn GeometryProvider,
    ) -> bool {
        self.drag
            .start(block_id, pointer, &self.store, &self.rows, geometry)
    }

    pub fn drag_over(&mut self, pointer: PointerPos, geometry: &dyn GeometryProvider) {
        self.drag.over(pointer, &self.rows, &self.columns, geometry);
    }

    pub fn drag_drop(&mut self) -> Option<DragPreview> {
        self.drag.drop(&mut self.store)
    }

    pub fn drag_cancel(&mut self) {
        self.drag.cancel();
    }

    pub fn drag_preview(&self) -> Option<&DragPreview> {
        self.drag.preview()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    // --- resize -------------------------------------------------------------

    pub fn resize_start(&mut self, block_id: &BlockId) {
        self.resize.start(block_id);
    }

    pub fn resize_update(&mut self, pointer: PointerPos, geometry: &dyn GeometryProvider) {
        self.resize
            .update(pointer, &mut self.store, &self.rows, geometry);
    }

    pub fn resize_stop(&mut self) {
        self.resize.stop();
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_resizing()
    }

    // --- selection ----------------------------------------------------------

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// Cell reference at the given ordinals, if both resolve.
    pub fn cell_at(&self, row_index: usize, column_index: usize) -> Option<CellRef> {
        let row = self.rows.get(row_index)?;
        let column = self.columns.get(column_index)?;
        Some(CellRef::new(
            row.id.clone(),
            column.id.clone(),
            row_index,
            column_index,
        ))
    }

    pub fn activate_cell(&mut self, row_index: usize, column_index: usize, preserve: bool) {
        if let Some(cell) = self.cell_at(row_index, column_index) {
            self.selection.activate(cell, preserve);
        }
    }

    pub fn cell_mouse_down(&mut self, row_index: usize, column_index: usize, modifiers: Modifiers) {
        if let Some(cell) = self.cell_at(row_index, column_index) {
            self.selection
                .mouse_down(cell, modifiers, &self.rows, &self.columns);
        }
    }

    pub fn row_mouse_down(&mut self, row_index: usize, modifiers: Modifiers) {
        if row_index < self.rows.len() {
            self.selection.row_mouse_down(row_index, modifiers);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn clear_row_selection(&mut self) {
        self.selection.clear_rows();
    }

    // --- clipboard ----------------------------------------------------------

    pub fn copy(
        &mut self,
        fallback: Option<&CellRef>,
        values: &dyn CellValues,
        system: &mut dyn SystemClipboard,
    ) -> bool {
        self.clipboard.copy(&self.selection, fallback, values, system)
    }

    pub fn paste(&self, fallback: Option<&CellRef>, values: &mut dyn CellValues) -> usize {
        self.clipboard.paste(&self.selection, fallback, values)
    }

    pub fn clear_cell_values(
        &self,
        fallback: Option<&CellRef>,
        values: &mut dyn CellValues,
    ) -> usize {
        self.clipboard.clear_value(&self.selection, fallback, values)
    }

    // --- entities & totals --------------------------------------------------

    pub fn entities(&self) -> &EntityDirectory {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut EntityDirectory {
        &mut self.entities
    }

    /// Totals over the current display window.
    pub fn totals(&self) -> TotalsMatrix {
        totals_matrix(&self.store, &self.rows, self.visible_columns())
    }

    /// Band excluding every entity of the given class, e.g. "reserved".
    pub fn band_excluding_class(&self, label: &str, class: &str) -> AggregateBand {
        AggregateBand::new(label, self.entities.ids_in_class(class))
    }

    // --- persistence --------------------------------------------------------

    pub fn snapshot(&self) -> PlannerSnapshot {
        PlannerSnapshot {
            settings: self.settings.clone(),
            blocks: self.blocks().cloned().collect(),
        }
    }

    pub fn load(store: &dyn SnapshotStore, namespace: &str) -> Self {
        Self::from_snapshot(load_planner_snapshot(store, namespace))
    }

    pub fn save(&self, store: &mut dyn SnapshotStore, namespace: &str) -> Result<()> {
        save_planner_snapshot(store, namespace, &self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use pretty_assertions::assert_eq;

    use crate::services::geometry::GridGeometry;

    fn night_settings() -> PlannerSettings {
        PlannerSettings::new(
            NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            30,
        )
    }

    fn day_columns(n: usize) -> Vec<Column> {
        (0..n).map(|i| Column::day(format!("day-{}", i), i)).collect()
    }

    fn planner_with_columns(n: usize) -> Planner {
        let mut planner = Planner::new(night_settings());
        planner.set_columns(day_columns(n));
        planner
    }

    #[test]
    fn test_set_columns_fills_base_track() {
        let planner = planner_with_columns(3);
        for column in planner.columns() {
            let fillers: Vec<&Block> = planner.blocks_in_column(&column.id).collect();
            assert_eq!(fillers.len(), 1);
            assert_eq!(fillers[0].start_row_id, "2200");
            assert_eq!(fillers[0].end_row_id, "2200");
        }
    }

    #[test]
    fn test_shrinking_columns_drops_orphans() {
        let mut planner = planner_with_columns(3);
        planner.upsert_block("day-2", "2300", BlockPatch::entity("work"));
        planner.set_columns(day_columns(2));
        assert!(planner.blocks().all(|b| b.column_id != "day-2"));
    }

    #[test]
    fn test_apply_settings_revalidates_blocks() {
        let mut planner = planner_with_columns(1);
        planner.upsert_block(
            "day-0",
            "2200",
            BlockPatch {
                end_row_id: Some("0630".to_string()),
                entity_id: Some("sleep".to_string()),
                ..BlockPatch::default()
            },
        );

        let mut coarse = night_settings();
        coarse.increment_minutes = 60;
        planner.apply_settings(coarse).unwrap();

        // "0630" no longer exists at the coarser increment; it is
        // equidistant from 06:00 and 07:00 and the earlier row wins.
        let block = planner
            .blocks()
            .find(|b| b.entity_id == "sleep")
            .unwrap();
        assert_eq!(block.end_row_id, "0600");
    }

    #[test]
    fn test_apply_settings_rejects_invalid() {
        let mut planner = planner_with_columns(1);
        let mut bad = night_settings();
        bad.increment_minutes = 0;
        assert!(planner.apply_settings(bad).is_err());
        assert_eq!(planner.settings().increment_minutes, 30);
    }

    #[test]
    fn test_apply_settings_cancels_gestures() {
        let mut planner = planner_with_columns(2);
        let geometry = GridGeometry::uniform(20.0, planner.rows().len(), 100.0, 2);
        let id = planner.blocks().next().unwrap().id.clone();
        planner.drag_start(&id, PointerPos::new(10.0, 10.0), &geometry);
        planner.resize_start(&id);
        assert!(planner.is_dragging());

        planner.apply_settings(night_settings()).unwrap();
        assert!(!planner.is_dragging());
        assert!(!planner.is_resizing());
    }

    #[test]
    fn test_visible_columns_window() {
        let mut planner = planner_with_columns(10);
        assert_eq!(planner.visible_columns().len(), 7);
        let mut settings = night_settings();
        settings.visible_columns = 3;
        planner.apply_settings(settings).unwrap();
        assert_eq!(planner.visible_columns().len(), 3);
    }

    #[test]
    fn test_totals_reflect_drag_and_resize() {
        let mut planner = planner_with_columns(2);
        let geometry = GridGeometry::uniform(20.0, planner.rows().len(), 100.0, 2);
        planner.upsert_block(
            "day-0",
            "2200",
            BlockPatch {
                end_row_id: Some("0600".to_string()),
                entity_id: Some("sleep".to_string()),
                ..BlockPatch::default()
            },
        );
        assert_eq!(planner.totals().minutes("sleep", 0), 480);

        // Drag the sleep block one column to the right.
        let id = planner
            .blocks()
            .find(|b| b.entity_id == "sleep")
            .unwrap()
            .id
            .clone();
        planner.drag_start(&id, PointerPos::new(50.0, 10.0), &geometry);
        planner.drag_over(PointerPos::new(150.0, 10.0), &geometry);
        planner.drag_drop().unwrap();

        let totals = planner.totals();
        assert_eq!(totals.minutes("sleep", 0), 0);
        assert_eq!(totals.minutes("sleep", 1), 480);
    }

    #[test]
    fn test_snapshot_round_trip_preserves_blocks() {
        let mut planner = planner_with_columns(2);
        planner.upsert_block("day-1", "2300", BlockPatch::entity("work"));
        let snapshot = planner.snapshot();

        let restored = Planner::from_snapshot(snapshot.clone());
        assert_eq!(restored.snapshot(), snapshot);
    }

    #[test]
    fn test_cell_at_out_of_range() {
        let planner = planner_with_columns(1);
        assert!(planner.cell_at(0, 5).is_none());
        assert!(planner.cell_at(999, 0).is_none());
    }
}
