//! Primary jump point classification.
//!
//! A free cell is a primary jump point for a straight direction when
//! entering it in that direction reveals a forced neighbour: one side of the
//! cell is open while the same side of the cell just behind it is blocked.
//! A path travelling straight must stop there to consider turning.

use jpsplus_core::{Cell, Direction, OccupancyGrid};

/// Per-cell set of straight approach directions that make it a primary jump
/// point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JumpPointFlags(u8);

impl JumpPointFlags {
    pub const EMPTY: Self = Self(0);

    const fn bit(dir: Direction) -> u8 {
        match dir {
            Direction::Up => 1,
            Direction::Right => 1 << 1,
            Direction::Down => 1 << 2,
            Direction::Left => 1 << 3,
            _ => 0,
        }
    }

    /// Whether the cell is a jump point when approached moving in `dir`.
    /// Always `false` for diagonals.
    #[inline]
    pub const fn contains(self, dir: Direction) -> bool {
        self.0 & Self::bit(dir) != 0
    }

    #[inline]
    pub fn insert(&mut self, dir: Direction) {
        self.0 |= Self::bit(dir);
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// Primary jump point flags for a whole grid, row-major.
#[derive(Debug, Clone)]
pub struct JumpPoints {
    flags: Vec<JumpPointFlags>,
    cols: usize,
}

impl JumpPoints {
    /// Classify every free cell of `grid`. Blocked cells get no flags.
    pub fn classify(grid: &OccupancyGrid) -> Self {
        let flags = grid
            .iter()
            .map(|(cell, v)| {
                let mut f = JumpPointFlags::EMPTY;
                if v == OccupancyGrid::FREE {
                    for dir in Direction::STRAIGHT {
                        if is_primary_jump_point(grid, cell, dir) {
                            f.insert(dir);
                        }
                    }
                }
                f
            })
            .collect();
        Self {
            flags,
            cols: grid.cols(),
        }
    }

    /// Flags of the cell at a row-major index.
    #[inline]
    pub fn at(&self, idx: usize) -> JumpPointFlags {
        self.flags[idx]
    }

    /// Flags of `c`; empty outside the grid.
    pub fn get(&self, c: Cell) -> JumpPointFlags {
        if c.row < 0 || c.col < 0 || c.col as usize >= self.cols {
            return JumpPointFlags::EMPTY;
        }
        self.flags
            .get(c.row as usize * self.cols + c.col as usize)
            .copied()
            .unwrap_or_default()
    }

    /// Number of cells that are a jump point for at least one direction.
    pub fn count(&self) -> usize {
        self.flags.iter().filter(|f| !f.is_empty()).count()
    }
}

/// Forced-neighbour test for entering `cell` moving in straight `dir`.
fn is_primary_jump_point(grid: &OccupancyGrid, cell: Cell, dir: Direction) -> bool {
    let (dr, dc) = dir.delta();
    let (r, c) = (cell.row, cell.col);
    // Not reachable by straight movement in this direction.
    if grid.is_blocked(r - dr, c - dc) {
        return false;
    }
    // (dc, dr) is one perpendicular, (-dc, -dr) the other.
    (!grid.is_blocked(r + dc, c + dr) && grid.is_blocked(r - dr + dc, c - dc + dr))
        || (!grid.is_blocked(r - dc, c - dr) && grid.is_blocked(r - dr - dc, c - dc - dr))
}
