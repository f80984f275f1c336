//! Cell and row selection.
//!
//! Cell selection is keyed by the deterministic `(row id, column id)` key;
//! rectangles are computed over ordinal indices so a shift-selection stays
//! well-defined when rows or columns are inserted or removed. Row selection
//! is an independent set over row ordinals with the same plain/ctrl/shift
//! rules.

use crate::models::column::Column;
use crate::models::selection::{CellRef, Modifiers};
use crate::models::time_row::TimeRow;

/// Single/multi/range cell selection plus independent row selection.
#[derive(Debug, Default)]
pub struct SelectionController {
    active: Option<CellRef>,
    anchor: Option<CellRef>,
    /// Ordered: rectangle selections are emitted row-major, ctrl-click
    /// toggles append, so "first selected" is well-defined.
    selected: Vec<CellRef>,
    selected_rows: Vec<usize>,
    anchor_row: Option<usize>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&CellRef> {
        self.active.as_ref()
    }

    pub fn anchor(&self) -> Option<&CellRef> {
        self.anchor.as_ref()
    }

    pub fn selected(&self) -> &[CellRef] {
        &self.selected
    }

    pub fn selected_keys(&self) -> Vec<String> {
        self.selected.iter().map(|c| c.key()).collect()
    }

    pub fn is_selected(&self, row_id: &str, column_id: &str) -> bool {
        self.selected.iter().any(|c| c.same_cell(row_id, column_id))
    }

    pub fn selected_rows(&self) -> &[usize] {
        &self.selected_rows
    }

    pub fn is_row_selected(&self, row_index: usize) -> bool {
        self.selected_rows.contains(&row_index)
    }

    /// Set the sole active cell. Unless `preserve_selection` is requested
    /// (e.g. while a context menu acts on the current multi-selection),
    /// any multi-cell and row selection is cleared.
    pub fn activate(&mut self, cell: CellRef, preserve_selection: bool) {
        if !preserve_selection {
            self.selected.clear();
            self.anchor = None;
            self.clear_rows();
        }
        self.active = Some(cell);
    }

    /// Pointer-down on a cell with the given modifiers.
    ///
    /// Plain: anchor = focus = cell, selection = {cell}.
    /// Ctrl: toggle the cell's membership; the anchor stays put (and only
    /// becomes the cell when there was none).
    /// Shift: rectangle between the anchor (defaulting to the cell) and the
    /// cell, by ordinal index, emitted row-major.
    pub fn mouse_down(
        &mut self,
        cell: CellRef,
        modifiers: Modifiers,
        rows: &[TimeRow],
        columns: &[Column],
    ) {
        if modifiers.ctrl {
            self.toggle(&cell);
            if self.anchor.is_none() {
                self.anchor = Some(cell.clone());
            }
            self.active = Some(cell);
        } else if modifiers.shift {
            if self.anchor.is_none() {
                self.anchor = Some(cell.clone());
            }
            let anchor = self.anchor.clone().unwrap_or_else(|| cell.clone());
            self.selected = rectangle(&anchor, &cell, rows, columns);
            self.active = Some(cell);
        } else {
            self.anchor = Some(cell.clone());
            self.selected = vec![cell.clone()];
            self.active = Some(cell);
        }
    }

    /// Pointer-down on a row header; independent of cell selection, with
    /// the same plain/ctrl/shift rules. Shift replaces the selection with
    /// the contiguous range between the anchor row (the last plain or ctrl
    /// click) and the clicked row; the anchor stays put.
    pub fn row_mouse_down(&mut self, row_index: usize, modifiers: Modifiers) {
        if modifiers.ctrl {
            if let Some(pos) = self.selected_rows.iter().position(|r| *r == row_index) {
                self.selected_rows.remove(pos);
            } else {
                self.selected_rows.push(row_index);
            }
            self.anchor_row = Some(row_index);
        } else if modifiers.shift {
            let from = self.anchor_row.unwrap_or(row_index);
            let (lo, hi) = (from.min(row_index), from.max(row_index));
            self.selected_rows = (lo..=hi).collect();
            if self.anchor_row.is_none() {
                self.anchor_row = Some(row_index);
            }
        } else {
            self.selected_rows = vec![row_index];
            self.anchor_row = Some(row_index);
        }
    }

    /// Empty the active cell and cell selection. Row selection is cleared
    /// separately by the caller when appropriate.
    pub fn clear(&mut self) {
        self.active = None;
        self.anchor = None;
        self.selected.clear();
    }

    pub fn clear_rows(&mut self) {
        self.selected_rows.clear();
        self.anchor_row = None;
    }

    fn toggle(&mut self, cell: &CellRef) {
        if let Some(pos) = self
            .selected
            .iter()
            .position(|c| c.same_cell(&cell.row_id, &cell.column_id))
        {
            self.selected.remove(pos);
        } else {
            self.selected.push(cell.clone());
        }
    }
}

/// Axis-aligned rectangle of cells between two corners, by ordinal index,
/// row-major. Ids come from the current row/column sets so the rectangle
/// tracks insertions and removals.
fn rectangle(a: &CellRef, b: &CellRef, rows: &[TimeRow], columns: &[Column]) -> Vec<CellRef> {
    let (row_lo, row_hi) = (a.row_index.min(b.row_index), a.row_index.max(b.row_index));
    let (col_lo, col_hi) = (
        a.column_index.min(b.column_index),
        a.column_index.max(b.column_index),
    );

    let mut cells = Vec::new();
    for row_index in row_lo..=row_hi {
        let Some(row) = rows.get(row_index) else {
            continue;
        };
        for column_index in col_lo..=col_hi {
            let Some(column) = columns.get(column_index) else {
                continue;
            };
            cells.push(CellRef::new(
                row.id.clone(),
                column.id.clone(),
                row_index,
                column_index,
            ));
        }
    }
    cells
}
