//! Snapshot persistence.
//!
//! The engine persists one opaque JSON blob per caller-chosen namespace:
//! the placed blocks plus the planner settings. The storage schema beyond
//! that blob is not the engine's to own; hosts plug in whatever backend
//! they like through `SnapshotStore`. Malformed payloads load as defaults
//! rather than failing.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use thiserror::Error;

use serde::{Deserialize, Serialize};

use crate::models::block::Block;
use crate::models::settings::PlannerSettings;

/// Why a snapshot payload could not be used.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot payload is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("failed to access snapshot storage: {0}")]
    Storage(String),
}

/// Namespaced blob storage supplied by the host.
pub trait SnapshotStore {
    /// The payload stored under `namespace`, if any.
    fn load(&self, namespace: &str) -> Result<Option<String>>;
    fn save(&mut self, namespace: &str, payload: &str) -> Result<()>;
}

/// File-backed store: one `<root>/<namespace>.json` per namespace.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    root: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, namespace: &str) -> PathBuf {
        self.root.join(format!("{}.json", namespace))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self, namespace: &str) -> Result<Option<String>> {
        let path = self.path_for(namespace);
        if !path.exists() {
            return Ok(None);
        }
        let payload = fs::read_to_string(&path)
            .with_context(|| format!("failed to read snapshot from {}", path.display()))?;
        Ok(Some(payload))
    }

    fn save(&mut self, namespace: &str, payload: &str) -> Result<()> {
        let path = self.path_for(namespace);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }
        fs::write(&path, payload)
            .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
        Ok(())
    }
}

/// Everything the planner persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSnapshot {
    pub settings: PlannerSettings,
    pub blocks: Vec<Block>,
}

/// Load the snapshot for `namespace`, replacing anything unreadable or
/// malformed with defaults.
pub fn load_planner_snapshot(store: &dyn SnapshotStore, namespace: &str) -> PlannerSnapshot {
    let loaded = store
        .load(namespace)
        .map_err(|err| SnapshotError::Storage(err.to_string()))
        .and_then(|payload| payload.map(|p| parse_snapshot(&p)).transpose());

    match loaded {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => PlannerSnapshot::default(),
        Err(err) => {
            log::warn!("Discarding snapshot for {:?}: {}", namespace, err);
            PlannerSnapshot::default()
        }
    }
}

/// Serialize and store the snapshot under `namespace`.
pub fn save_planner_snapshot(
    store: &mut dyn SnapshotStore,
    namespace: &str,
    snapshot: &PlannerSnapshot,
) -> Result<()> {
    let payload = serde_json::to_string_pretty(snapshot)
        .with_context(|| format!("failed to serialize snapshot for {:?}", namespace))?;
    store.save(namespace, &payload)
}

fn parse_snapshot(payload: &str) -> std::result::Result<PlannerSnapshot, SnapshotError> {
    Ok(serde_json::from_str(payload)?)
}
