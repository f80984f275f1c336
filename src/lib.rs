// Time Grid Planner Library
// Interaction engine for a 2-D time-grid planning surface

pub mod models;
pub mod services;

pub use models::block::{Block, BlockId, BlockPatch, DEFAULT_ENTITY_ID};
pub use models::column::{Column, ColumnKind};
pub use models::selection::{cell_key, CellRef, Modifiers};
pub use models::settings::PlannerSettings;
pub use models::time_row::{RowKind, TimeRow};
pub use services::geometry::{GeometryProvider, GridGeometry, PointerPos};
pub use services::planner::Planner;
