//! **jpsplus-core**: grid encoding for JPS+ pathfinding.
//!
//! This crate provides the leaf types shared by the precomputation and the
//! search: packed cell coordinates, the eight compass directions with their
//! constant lookup tables, and a validated free/blocked occupancy grid.

pub mod geom;
pub mod grid;

pub use geom::{Cell, Direction};
pub use grid::{GridError, OccupancyGrid};
