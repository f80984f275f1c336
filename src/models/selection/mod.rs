// Selection module
// Cell descriptors, deterministic cell keys, and modifier flags

/// Modifier keys in effect for a click, as resolved by the host
/// (cmd on macOS maps to `ctrl` here).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
    };

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            shift: false,
        }
    }

    pub fn shift() -> Self {
        Self {
            ctrl: false,
            shift: true,
        }
    }
}

/// A cell addressed both by id (stable across rebuilds while the row/column
/// survives) and by ordinal index (what rectangle selection operates on).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRef {
    pub row_id: String,
    pub column_id: String,
    pub row_index: usize,
    pub column_index: usize,
}

impl CellRef {
    pub fn new(
        row_id: impl Into<String>,
        column_id: impl Into<String>,
        row_index: usize,
        column_index: usize,
    ) -> Self {
        Self {
            row_id: row_id.into(),
            column_id: column_id.into(),
            row_index,
            column_index,
        }
    }

    pub fn key(&self) -> String {
        cell_key(&self.row_id, &self.column_id)
    }

    /// True when the cell names the same `(row, column)` pair.
    pub fn same_cell(&self, row_id: &str, column_id: &str) -> bool {
        self.row_id == row_id && self.column_id == column_id
    }
}

/// Deterministic selection key for a `(row, column)` pair.
pub fn cell_key(row_id: &str, column_id: &str) -> String {
    format!("{}|{}", row_id, column_id)
}
