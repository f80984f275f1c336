//! Entity directory.
//!
//! Display-only lookup from entity id to label and colour. Placement logic
//! never consults this; it exists so hosts can render and group blocks.

use serde::{Deserialize, Serialize};

use crate::models::block::DEFAULT_ENTITY_ID;

/// Display metadata for one entity (a project, resource, or reserved
/// category such as "sleep" or "buffer").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityInfo {
    pub id: String,
    pub label: String,
    /// Hex colour, e.g. "#4A90D9".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Free-form class used to group entities into aggregate bands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl EntityInfo {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            color: None,
            class: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

/// Id → display info directory, seeded with the sentinel default entry.
#[derive(Debug, Clone)]
pub struct EntityDirectory {
    entries: Vec<EntityInfo>,
}

impl EntityDirectory {
    pub fn new() -> Self {
        Self {
            entries: vec![EntityInfo::new(DEFAULT_ENTITY_ID, "Unassigned")],
        }
    }

    pub fn from_entries(entries: Vec<EntityInfo>) -> Self {
        let mut directory = Self::new();
        for entry in entries {
            directory.upsert(entry);
        }
        directory
    }

    pub fn entries(&self) -> &[EntityInfo] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&EntityInfo> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Label for an id; unknown ids fall back to the id itself.
    pub fn label<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|e| e.label.as_str()).unwrap_or(id)
    }

    /// Ids of every entity carrying the given class.
    pub fn ids_in_class(&self, class: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.class.as_deref() == Some(class))
            .map(|e| e.id.clone())
            .collect()
    }

    pub fn upsert(&mut self, info: EntityInfo) {
        match self.entries.iter_mut().find(|e| e.id == info.id) {
            Some(existing) => *existing = info,
            None => self.entries.push(info),
        }
    }
}

impl Default for EntityDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_seeds_default_entity() {
        let directory = EntityDirectory::new();
        assert_eq!(directory.label(DEFAULT_ENTITY_ID), "Unassigned");
    }

    #[test]
    fn test_unknown_ids_fall_back_to_id() {
        let directory = EntityDirectory::new();
        assert_eq!(directory.label("mystery"), "mystery");
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let mut directory = EntityDirectory::new();
        directory.upsert(EntityInfo::new("sleep", "Sleep").with_color("#223355"));
        directory.upsert(EntityInfo::new("sleep", "Night sleep"));
        assert_eq!(directory.label("sleep"), "Night sleep");
        assert_eq!(directory.entries().len(), 2);
    }

    #[test]
    fn test_ids_in_class() {
        let directory = EntityDirectory::from_entries(vec![
            EntityInfo::new("sleep", "Sleep").with_class("reserved"),
            EntityInfo::new("buffer", "Buffer").with_class("reserved"),
            EntityInfo::new("work", "Work"),
        ]);
        assert_eq!(directory.ids_in_class("reserved"), vec!["sleep", "buffer"]);
    }
}
