//! Block drag state machine.
//!
//! Turns pointer events into a tentative placement (`DragPreview`) and
//! commits it on drop. The preview preserves the block's original span
//! length and the grab point within its start row, so the block tracks the
//! pointer the way it was picked up.

use crate::models::block::BlockId;
use crate::models::column::Column;
use crate::models::time_row::TimeRow;
use crate::services::block_store::BlockStore;
use crate::services::geometry::{GeometryProvider, PointerPos};
use crate::services::timeline::index_of;

/// Tentative, uncommitted placement shown while a drag is in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct DragPreview {
    pub source_block_id: BlockId,
    pub target_column_id: String,
    pub start_row_id: String,
    pub end_row_id: String,
}

#[derive(Debug)]
struct DragSession {
    block_id: BlockId,
    /// Row-span length (end ordinal minus start ordinal) at pick-up.
    span: usize,
    /// Pointer offset from the top of the start row, modulo row height.
    anchor_offset: f32,
    preview: Option<DragPreview>,
}

/// Drag state machine: Idle → Dragging → Idle.
///
/// Only one drag session may be active; starting a new one silently
/// discards any in-flight preview. Cancellation is idempotent, so any
/// out-of-band drag termination (a global pointer-up, focus loss) can be
/// routed through `cancel` unconditionally.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self { session: None }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn preview(&self) -> Option<&DragPreview> {
        self.session.as_ref().and_then(|s| s.preview.as_ref())
    }

    /// Begin dragging `block_id` from `pointer`.
    ///
    /// Records the grab offset relative to the top of the block's current
    /// start row (normalized modulo row height) and seeds the preview from
    /// the current placement. No-op when the block or its start row cannot
    /// be resolved.
    pub fn start(
        &mut self,
        block_id: &BlockId,
        pointer: PointerPos,
        store: &BlockStore,
        rows: &[TimeRow],
        geometry: &dyn GeometryProvider,
    ) -> bool {
        if self.session.is_some() {
            log::debug!("Discarding in-flight drag in favour of block {}", block_id);
            self.session = None;
        }

        let Some(block) = store.get_by_id(block_id) else {
            log::debug!("Ignoring drag start for unknown block {}", block_id);
            return false;
        };
        let Some(start_index) = index_of(rows, &block.start_row_id) else {
            log::debug!(
                "Ignoring drag start for block {} with stale start row {}",
                block_id,
                block.start_row_id
            );
            return false;
        };
        let end_index = index_of(rows, &block.end_row_id).unwrap_or(start_index);
        let span = start_index.max(end_index) - start_index.min(end_index);

        let row_height = geometry.row_height();
        let anchor_offset = match geometry.row_top(start_index) {
            Some(top) if row_height > 0.0 => (pointer.y - top).rem_euclid(row_height),
            _ => 0.0,
        };

        self.session = Some(DragSession {
            block_id: block_id.clone(),
            span,
            anchor_offset,
            preview: Some(DragPreview {
                source_block_id: block_id.clone(),
                target_column_id: block.column_id.clone(),
                start_row_id: block.start_row_id.clone(),
                end_row_id: block.end_row_id.clone(),
            }),
        });
        true
    }

    /// Update the preview for a pointer move. Valid only while dragging.
    ///
    /// Both the column and the row under the (offset-adjusted) pointer must
    /// resolve; otherwise the previous preview stands. The span never
    /// grows: the end clamps at the last row rather than wrapping.
    pub fn over(
        &mut self,
        pointer: PointerPos,
        rows: &[TimeRow],
        columns: &[Column],
        geometry: &dyn GeometryProvider,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if rows.is_empty() {
            return;
        }

        let column_index = geometry.column_at(pointer.x);
        let row_index = geometry.row_at(pointer.y - session.anchor_offset);
        let (Some(column_index), Some(row_index)) = (column_index, row_index) else {
            return;
        };
        let (Some(column), Some(target_row)) = (columns.get(column_index), rows.get(row_index))
        else {
            return;
        };

        let last_index = rows.len() - 1;
        let end_index = (row_index + session.span).min(last_index);
        session.preview = Some(DragPreview {
            source_block_id: session.block_id.clone(),
            target_column_id: column.id.clone(),
            start_row_id: target_row.id.clone(),
            end_row_id: rows[end_index].id.clone(),
        });
    }

    /// Commit the preview into the store and return to idle.
    ///
    /// With no active preview this is a no-op and the original placement
    /// stands. Returns the committed preview, if any.
    pub fn drop(&mut self, store: &mut BlockStore) -> Option<DragPreview> {
        let session = self.session.take()?;
        let preview = session.preview?;
        store.apply_placement(
            &preview.source_block_id,
            &preview.target_column_id,
            &preview.start_row_id,
            &preview.end_row_id,
        );
        Some(preview)
    }

    /// Discard any in-flight preview without touching the store. Idempotent.
    pub fn cancel(&mut self) {
        self.session = None;
    }
}
