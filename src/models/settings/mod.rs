// Settings module
// Planner configuration persisted alongside the blocks

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::time_row::MINUTES_PER_DAY;

/// Planner configuration.
///
/// Every field has a serde default so partially persisted or malformed
/// settings degrade to usable values instead of failing the load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    /// Start of the anchored span within the 24h cycle.
    pub start_boundary: Option<NaiveTime>,
    /// End of the anchored span within the 24h cycle.
    pub end_boundary: Option<NaiveTime>,
    /// Granularity of the anchor-end and trailing rows, in minutes.
    pub increment_minutes: u32,
    /// Width of the display window the totals matrix is sized to.
    pub visible_columns: usize,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            start_boundary: None,
            end_boundary: None,
            increment_minutes: 30,
            visible_columns: 7,
        }
    }
}

impl PlannerSettings {
    pub fn new(start: NaiveTime, end: NaiveTime, increment_minutes: u32) -> Self {
        Self {
            start_boundary: Some(start),
            end_boundary: Some(end),
            increment_minutes,
            ..Self::default()
        }
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        if self.increment_minutes == 0 {
            return Err("Increment must be at least one minute".to_string());
        }
        if self.increment_minutes >= MINUTES_PER_DAY {
            return Err("Increment must be shorter than one day".to_string());
        }
        if self.visible_columns == 0 {
            return Err("At least one visible column is required".to_string());
        }
        Ok(())
    }

    /// True once both boundaries are configured.
    pub fn has_boundaries(&self) -> bool {
        self.start_boundary.is_some() && self.end_boundary.is_some()
    }
}
