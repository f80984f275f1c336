// Service module exports

pub mod aggregation;
pub mod block_store;
pub mod clipboard;
pub mod drag;
pub mod entity;
pub mod geometry;
pub mod persistence;
pub mod planner;
pub mod resize;
pub mod selection;
pub mod timeline;
