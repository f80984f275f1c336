// Block module
// A placed assignment spanning a contiguous row range within one column

use serde::{Deserialize, Serialize};

/// Sentinel entity for blocks that have not been assigned yet.
pub const DEFAULT_ENTITY_ID: &str = "unassigned";

/// Block identifier, e.g. "block-17".
///
/// The numeric suffix is what the id generator reconciles against when
/// state is loaded, so fresh ids never collide with persisted ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub String);

impl BlockId {
    /// Trailing decimal digits of the id, if any ("block-17" → 17).
    pub fn numeric_suffix(&self) -> Option<u64> {
        let digits: String = self
            .0
            .chars()
            .rev()
            .take_while(|c| c.is_ascii_digit())
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        if digits.is_empty() {
            return None;
        }
        digits.parse().ok()
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// An entity assignment over a contiguous row range within one column.
///
/// The row range is order-independent; consumers normalize via min/max of
/// the row ordinals. At most one block may occupy a given
/// `(column_id, start_row_id)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub column_id: String,
    pub start_row_id: String,
    pub end_row_id: String,
    #[serde(default = "default_entity_id")]
    pub entity_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_override: Option<String>,
}

fn default_entity_id() -> String {
    DEFAULT_ENTITY_ID.to_string()
}

impl Block {
    /// Create a block spanning a single row, assigned to the sentinel entity.
    pub fn filler(id: BlockId, column_id: impl Into<String>, row_id: impl Into<String>) -> Self {
        let row_id = row_id.into();
        Self {
            id,
            column_id: column_id.into(),
            start_row_id: row_id.clone(),
            end_row_id: row_id,
            entity_id: default_entity_id(),
            label_override: None,
        }
    }

    /// Validate the block's own fields (row membership is the store's job).
    pub fn validate(&self) -> Result<(), String> {
        if self.id.0.trim().is_empty() {
            return Err("Block id cannot be empty".to_string());
        }
        if self.column_id.trim().is_empty() {
            return Err("Block column id cannot be empty".to_string());
        }
        if self.start_row_id.trim().is_empty() || self.end_row_id.trim().is_empty() {
            return Err("Block row range cannot be empty".to_string());
        }
        Ok(())
    }

    /// Label shown on the block, when overridden.
    pub fn display_label(&self) -> Option<&str> {
        self.label_override.as_deref()
    }
}

/// Field-wise patch merged into a block by `BlockStore::upsert_by_cell`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockPatch {
    pub column_id: Option<String>,
    pub start_row_id: Option<String>,
    pub end_row_id: Option<String>,
    pub entity_id: Option<String>,
    pub label_override: Option<Option<String>>,
}

impl BlockPatch {
    pub fn entity(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: Some(entity_id.into()),
            ..Self::default()
        }
    }

    pub fn span(end_row_id: impl Into<String>) -> Self {
        Self {
            end_row_id: Some(end_row_id.into()),
            ..Self::default()
        }
    }

    /// Apply every present field onto `block`.
    pub fn apply_to(&self, block: &mut Block) {
        if let Some(column_id) = &self.column_id {
            block.column_id = column_id.clone();
        }
        if let Some(start_row_id) = &self.start_row_id {
            block.start_row_id = start_row_id.clone();
        }
        if let Some(end_row_id) = &self.end_row_id {
            block.end_row_id = end_row_id.clone();
        }
        if let Some(entity_id) = &self.entity_id {
            block.entity_id = entity_id.clone();
        }
        if let Some(label_override) = &self.label_override {
            block.label_override = label_override.clone();
        }
    }
}
