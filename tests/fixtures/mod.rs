// Test fixtures - reusable test data
// Provides consistent grids, columns, and blocks across test files

use chrono::NaiveTime;

use time_grid_planner::models::block::{Block, BlockId};
use time_grid_planner::models::settings::PlannerSettings;
use time_grid_planner::{Column, GridGeometry, PointerPos};

pub const ROW_HEIGHT: f32 = 20.0;
pub const COLUMN_WIDTH: f32 = 100.0;

/// Route log output through the test harness when `RUST_LOG` is set.
/// Safe to call from every test; repeat initialization is ignored.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Boundaries and settings for the canonical overnight planner
/// (22:00 → 06:00 at a 30 minute increment).
pub mod night {
    use super::*;

    pub fn start() -> NaiveTime {
        NaiveTime::from_hms_opt(22, 0, 0).unwrap()
    }

    pub fn end() -> NaiveTime {
        NaiveTime::from_hms_opt(6, 0, 0).unwrap()
    }

    pub fn settings() -> PlannerSettings {
        PlannerSettings::new(start(), end(), 30)
    }
}

/// A week of day columns: "day-0" .. "day-6".
pub fn week_columns() -> Vec<Column> {
    (0..7)
        .map(|i| Column::day(format!("day-{}", i), i))
        .collect()
}

/// Uniform grid geometry sized to the given row count and column count.
pub fn grid(rows: usize, columns: usize) -> GridGeometry {
    GridGeometry::uniform(ROW_HEIGHT, rows, COLUMN_WIDTH, columns)
}

/// Pointer position centred in a grid cell.
pub fn pointer_in_cell(row: usize, column: usize) -> PointerPos {
    PointerPos::new(
        column as f32 * COLUMN_WIDTH + COLUMN_WIDTH / 2.0,
        row as f32 * ROW_HEIGHT + ROW_HEIGHT / 2.0,
    )
}

/// A block assignment for tests that bypass the store's id generator.
pub fn block(id: &str, column: &str, entity: &str, start: &str, end: &str) -> Block {
    Block {
        id: BlockId::from(id),
        column_id: column.to_string(),
        start_row_id: start.to_string(),
        end_row_id: end.to_string(),
        entity_id: entity.to_string(),
        label_override: None,
    }
}
