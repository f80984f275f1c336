// Column module
// Descriptors for the grid's horizontal axis

use serde::{Deserialize, Serialize};

/// What a column represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// A calendar day; the base track that receives default filler blocks.
    Day,
    /// A per-entity lane.
    Entity,
    /// Spacer/summary column with no placements of its own.
    Placeholder,
}

/// One column of the planning grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    /// Ordinal position within the current column set.
    pub index: usize,
    pub kind: ColumnKind,
    /// Associated entity for `Entity` columns; display-only.
    pub entity_id: Option<String>,
}

impl Column {
    pub fn day(id: impl Into<String>, index: usize) -> Self {
        Self {
            id: id.into(),
            index,
            kind: ColumnKind::Day,
            entity_id: None,
        }
    }

    pub fn entity(id: impl Into<String>, index: usize, entity_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            index,
            kind: ColumnKind::Entity,
            entity_id: Some(entity_id.into()),
        }
    }

    pub fn placeholder(id: impl Into<String>, index: usize) -> Self {
        Self {
            id: id.into(),
            index,
            kind: ColumnKind::Placeholder,
            entity_id: None,
        }
    }
}
