//! Duration aggregation.
//!
//! A pure read-model over the block store and timeline: per-entity ×
//! per-visible-column minute totals, with aggregate bands that can exclude
//! named entities (a "sleep" or "buffer" band). Owns no timers; callers
//! decide when to recompute.

use std::ops::Range;

use crate::models::column::Column;
use crate::models::time_row::TimeRow;
use crate::services::block_store::BlockStore;
use crate::services::timeline::span_minutes_by_id;

/// An aggregate band: a labelled column-total that leaves out the listed
/// entities.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateBand {
    pub label: String,
    pub excluded_entities: Vec<String>,
}

impl AggregateBand {
    pub fn new(label: impl Into<String>, excluded_entities: Vec<String>) -> Self {
        Self {
            label: label.into(),
            excluded_entities,
        }
    }
}

/// Per-entity × per-visible-column minute totals.
///
/// Sized to the display window handed in at build time, independent of how
/// many columns have ever existed.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalsMatrix {
    entity_ids: Vec<String>,
    column_ids: Vec<String>,
    /// Entity-major: `minutes[entity][column]`.
    minutes: Vec<Vec<u32>>,
}

impl TotalsMatrix {
    /// Entities with at least one block, in first-seen order.
    pub fn entity_ids(&self) -> &[String] {
        &self.entity_ids
    }

    pub fn column_ids(&self) -> &[String] {
        &self.column_ids
    }

    pub fn minutes(&self, entity_id: &str, column_index: usize) -> u32 {
        self.entity_row(entity_id)
            .and_then(|row| row.get(column_index))
            .copied()
            .unwrap_or(0)
    }

    /// Row sum: the entity's total minutes across the visible window.
    pub fn entity_total(&self, entity_id: &str) -> u32 {
        self.entity_row(entity_id)
            .map(|row| row.iter().sum())
            .unwrap_or(0)
    }

    /// Column sums over every entity.
    pub fn column_totals(&self) -> Vec<u32> {
        self.column_totals_excluding(&[])
    }

    /// Column sums for a band, leaving out its excluded entities.
    pub fn band_totals(&self, band: &AggregateBand) -> Vec<u32> {
        let excluded: Vec<&str> = band.excluded_entities.iter().map(|s| s.as_str()).collect();
        self.column_totals_excluding(&excluded)
    }

    /// Per-column totals over `column_range`, for one entity or for all.
    pub fn totals(&self, entity_id: Option<&str>, column_range: Range<usize>) -> Vec<u32> {
        let range = clamp_range(column_range, self.column_ids.len());
        match entity_id {
            Some(entity_id) => match self.entity_row(entity_id) {
                Some(row) => row[range].to_vec(),
                None => vec![0; range.len()],
            },
            None => self.column_totals()[range].to_vec(),
        }
    }

    fn column_totals_excluding(&self, excluded: &[&str]) -> Vec<u32> {
        let mut totals = vec![0u32; self.column_ids.len()];
        for (entity_id, row) in self.entity_ids.iter().zip(&self.minutes) {
            if excluded.contains(&entity_id.as_str()) {
                continue;
            }
            for (total, minutes) in totals.iter_mut().zip(row) {
                *total += minutes;
            }
        }
        totals
    }

    fn entity_row(&self, entity_id: &str) -> Option<&Vec<u32>> {
        self.entity_ids
            .iter()
            .position(|id| id == entity_id)
            .map(|index| &self.minutes[index])
    }
}

/// Build the totals matrix for the visible columns.
///
/// Block duration is the timeline's weighted span over the block's
/// normalized row range; blocks in columns outside the window, and blocks
/// whose rows no longer resolve, contribute nothing.
pub fn totals_matrix(
    store: &BlockStore,
    rows: &[TimeRow],
    visible_columns: &[Column],
) -> TotalsMatrix {
    let column_ids: Vec<String> = visible_columns.iter().map(|c| c.id.clone()).collect();
    let mut entity_ids: Vec<String> = Vec::new();
    let mut minutes: Vec<Vec<u32>> = Vec::new();

    for block in store.iter() {
        let Some(column_index) = column_ids.iter().position(|id| *id == block.column_id) else {
            continue;
        };
        let duration = span_minutes_by_id(rows, &block.start_row_id, &block.end_row_id);
        if duration == 0 {
            continue;
        }
        let entity_index = match entity_ids.iter().position(|id| *id == block.entity_id) {
            Some(index) => index,
            None => {
                entity_ids.push(block.entity_id.clone());
                minutes.push(vec![0; column_ids.len()]);
                entity_ids.len() - 1
            }
        };
        minutes[entity_index][column_index] += duration;
    }

    TotalsMatrix {
        entity_ids,
        column_ids,
        minutes,
    }
}

fn clamp_range(range: Range<usize>, len: usize) -> Range<usize> {
    let start = range.start.min(len);
    let end = range.end.min(len).max(start);
    start..end
}
