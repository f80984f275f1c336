// Module exports for models

pub mod block;
pub mod column;
pub mod selection;
pub mod settings;
pub mod time_row;
