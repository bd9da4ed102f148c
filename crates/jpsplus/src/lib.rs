//! JPS+ pathfinding on uniform 8-connected grids.
//!
//! Pathfinding runs in two phases:
//!
//! 1. **Precomputation** ([`JumpMatrix::new`]) classifies every free cell as
//!    a primary jump point per straight approach direction, then records for
//!    each of the 8 directions how far one can jump before reaching a jump
//!    point (positive) or an obstacle (zero or negative).
//! 2. **Search** ([`JumpMatrix::find_path`]) is an A* that expands by
//!    jumping the precomputed distance instead of stepping cell by cell.
//!
//! A built matrix is immutable, so any number of threads may search the same
//! matrix at once; each search owns its own frontier.
//!
//! The crate also carries the plain step-by-step [`astar_path`] and the
//! [`Components`] labelling, both used to cross-check the jumping search.

mod astar;
mod cc;
mod classify;
mod distance;
mod error;
mod matrix;
mod path;
mod queue;
mod search;

pub use astar::astar_path;
pub use cc::Components;
pub use classify::{JumpPointFlags, JumpPoints};
pub use distance::{euclidean, octile};
pub use error::PathError;
pub use matrix::{AnnotatedCell, JumpDistances, JumpMatrix};
pub use path::{expand_path, path_cost};
pub use search::SearchStats;

pub use jpsplus_core::{Cell, Direction, GridError, OccupancyGrid};
