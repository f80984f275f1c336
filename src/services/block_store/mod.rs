//! Block storage and lifecycle.
//!
//! Owns the collection of placed blocks, mints collision-free ids, and
//! keeps every block consistent with the current column set and timeline
//! row set.

use std::collections::HashSet;

use crate::models::block::{Block, BlockId, BlockPatch};
use crate::models::column::{Column, ColumnKind};
use crate::models::time_row::TimeRow;
use crate::services::timeline::{index_of, nearest_row_for_id};

/// Monotonic block-id source, reconciled against ids recovered from
/// persisted state so fresh ids never collide with loaded ones.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Advance past the largest numeric suffix seen in `ids`.
    pub fn reconcile<'a>(&mut self, ids: impl IntoIterator<Item = &'a BlockId>) {
        for id in ids {
            if let Some(suffix) = id.numeric_suffix() {
                self.next = self.next.max(suffix + 1);
            }
        }
    }

    pub fn mint(&mut self) -> BlockId {
        let id = BlockId(format!("block-{}", self.next));
        self.next += 1;
        id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns all placed blocks.
#[derive(Debug, Default)]
pub struct BlockStore {
    blocks: Vec<Block>,
    ids: IdGenerator,
}

impl BlockStore {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            ids: IdGenerator::new(),
        }
    }

    /// Build a store from loaded state.
    ///
    /// Duplicate ids are deduplicated, first occurrence in list order wins;
    /// the id generator is seeded past every recovered suffix.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(blocks.len());
        for block in blocks {
            if seen.insert(block.id.clone()) {
                kept.push(block);
            } else {
                log::warn!("Discarding duplicate block id {} from loaded state", block.id);
            }
        }
        let mut ids = IdGenerator::new();
        ids.reconcile(kept.iter().map(|b| &b.id));
        Self { blocks: kept, ids }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn get_by_id(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn blocks_in_column<'a>(&'a self, column_id: &'a str) -> impl Iterator<Item = &'a Block> {
        self.blocks.iter().filter(move |b| b.column_id == column_id)
    }

    /// Merge `patch` into the block at `(column_id, start_row_id)`, creating
    /// one with a fresh id when the cell is empty. Always merges, never
    /// duplicates the cell.
    pub fn upsert_by_cell(
        &mut self,
        column_id: &str,
        start_row_id: &str,
        patch: BlockPatch,
    ) -> BlockId {
        if let Some(block) = self
            .blocks
            .iter_mut()
            .find(|b| b.column_id == column_id && b.start_row_id == start_row_id)
        {
            patch.apply_to(block);
            return block.id.clone();
        }

        let mut block = Block::filler(self.ids.mint(), column_id, start_row_id);
        patch.apply_to(&mut block);
        let id = block.id.clone();
        log::debug!("Created block {} at ({}, {})", id, column_id, start_row_id);
        self.blocks.push(block);
        id
    }

    /// Remove a block; unknown ids are a no-op.
    pub fn delete_by_id(&mut self, id: &BlockId) -> bool {
        let before = self.blocks.len();
        self.blocks.retain(|b| &b.id != id);
        before != self.blocks.len()
    }

    /// Move a block to a new placement (drag commit).
    ///
    /// Any other block already holding the target `(column, start_row)` is
    /// evicted to preserve cell uniqueness. No-op when `id` is unknown.
    pub fn apply_placement(
        &mut self,
        id: &BlockId,
        column_id: &str,
        start_row_id: &str,
        end_row_id: &str,
    ) -> bool {
        if self.get_by_id(id).is_none() {
            log::debug!("Ignoring placement for unknown block {}", id);
            return false;
        }

        let displaced: Vec<BlockId> = self
            .blocks
            .iter()
            .filter(|b| {
                &b.id != id && b.column_id == column_id && b.start_row_id == start_row_id
            })
            .map(|b| b.id.clone())
            .collect();
        for other in displaced {
            log::debug!(
                "Evicting block {} displaced from ({}, {})",
                other,
                column_id,
                start_row_id
            );
            self.delete_by_id(&other);
        }

        if let Some(block) = self.blocks.iter_mut().find(|b| &b.id == id) {
            block.column_id = column_id.to_string();
            block.start_row_id = start_row_id.to_string();
            block.end_row_id = end_row_id.to_string();
            true
        } else {
            false
        }
    }

    /// Live end-row mutation used while resizing. No-op for unknown ids.
    pub fn set_end_row(&mut self, id: &BlockId, end_row_id: &str) -> bool {
        match self.blocks.iter_mut().find(|b| &b.id == id) {
            Some(block) => {
                block.end_row_id = end_row_id.to_string();
                true
            }
            None => false,
        }
    }

    /// Drop every block whose column is no longer in `columns`.
    pub fn retain_columns(&mut self, columns: &[Column]) {
        let live: HashSet<&str> = columns.iter().map(|c| c.id.as_str()).collect();
        let before = self.blocks.len();
        self.blocks.retain(|b| live.contains(b.column_id.as_str()));
        let dropped = before - self.blocks.len();
        if dropped > 0 {
            log::info!("Dropped {} block(s) referencing removed columns", dropped);
        }
    }

    /// Give each empty Day column a default filler block spanning only the
    /// first row. Entity/Placeholder columns are never auto-filled.
    pub fn fill_base_track(&mut self, columns: &[Column], first_row_id: &str) {
        for column in columns.iter().filter(|c| c.kind == ColumnKind::Day) {
            if self.blocks_in_column(&column.id).next().is_none() {
                let block = Block::filler(self.ids.mint(), column.id.clone(), first_row_id);
                log::debug!("Filled empty column {} with block {}", column.id, block.id);
                self.blocks.push(block);
            }
        }
    }

    /// Re-validate every block against a rebuilt row set.
    ///
    /// Endpoints referencing vanished rows clamp to the nearest surviving
    /// row by time of day; ranges are re-normalized so the start ordinal is
    /// never past the end ordinal. With no rows at all, blocks are left
    /// untouched (nothing to clamp against).
    pub fn revalidate(&mut self, rows: &[TimeRow]) {
        if rows.is_empty() {
            return;
        }
        for block in &mut self.blocks {
            let start = resolve_or_clamp(rows, &block.start_row_id);
            let end = resolve_or_clamp(rows, &block.end_row_id);
            let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
            let (start_id, end_id) = (rows[lo].id.clone(), rows[hi].id.clone());
            if start_id != block.start_row_id || end_id != block.end_row_id {
                log::debug!(
                    "Re-validated block {}: ({}, {}) -> ({}, {})",
                    block.id,
                    block.start_row_id,
                    block.end_row_id,
                    start_id,
                    end_id
                );
                block.start_row_id = start_id;
                block.end_row_id = end_id;
            }
        }
    }
}

fn resolve_or_clamp(rows: &[TimeRow], row_id: &str) -> usize {
    index_of(rows, row_id)
        .or_else(|| nearest_row_for_id(rows, row_id).map(|row| row.index))
        .unwrap_or(0)
}
