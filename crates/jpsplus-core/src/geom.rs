//! Geometry primitives: [`Cell`] and [`Direction`].
//!
//! Rows grow downward and columns grow to the right, so `Up` is `(-1, 0)`
//! and `Right` is `(0, 1)`.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A grid coordinate as a `(row, col)` pair.
///
/// Ordering is row-major, which keeps iteration over sets of cells
/// deterministic.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new cell.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Pack into a single integer: row in the high 32 bits, column in the
    /// low 32 bits (two's complement).
    #[inline]
    pub const fn pack(self) -> i64 {
        ((self.row as i64) << 32) | (self.col as u32 as i64)
    }

    /// Exact inverse of [`pack`](Self::pack).
    #[inline]
    pub const fn unpack(packed: i64) -> Self {
        Self {
            row: (packed >> 32) as i32,
            col: packed as i32,
        }
    }

    /// The cell `n` steps away in direction `dir`.
    #[inline]
    pub const fn step(self, dir: Direction, n: i32) -> Self {
        let (dr, dc) = dir.delta();
        Self {
            row: self.row + dr * n,
            col: self.col + dc * n,
        }
    }

    /// The adjacent cell in direction `dir`.
    #[inline]
    pub const fn neighbor(self, dir: Direction) -> Self {
        self.step(dir, 1)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Cell {
    #[inline]
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Cell {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Cell {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the eight compass directions, plus the [`All`](Direction::All)
/// sentinel used as the entry direction of a search origin.
///
/// The discriminant is the slot used in per-cell distance arrays.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Direction {
    UpLeft = 0,
    Up = 1,
    UpRight = 2,
    Right = 3,
    DownRight = 4,
    Down = 5,
    DownLeft = 6,
    Left = 7,
    All = 8,
}

use Direction::*;

/// Directions worth exploring after arriving in a given direction, indexed
/// by the arrival direction's discriminant.
const SUCCESSORS: [&[Direction]; 9] = [
    &[Left, UpLeft, Up],
    &[Left, UpLeft, Up, UpRight, Right],
    &[UpRight, Up, Right],
    &[Right, DownRight, Down, UpRight, Up],
    &[Right, DownRight, Down],
    &[Left, DownLeft, Down, DownRight, Right],
    &[Left, DownLeft, Down],
    &[Left, DownLeft, Down, UpLeft, Up],
    &[Up, Down, Left, Right, UpLeft, UpRight, DownLeft, DownRight],
];

impl Direction {
    /// The eight real directions in slot order.
    pub const ALL: [Direction; 8] = [UpLeft, Up, UpRight, Right, DownRight, Down, DownLeft, Left];

    /// The four straight directions.
    pub const STRAIGHT: [Direction; 4] = [Up, Right, Down, Left];

    /// The four diagonal directions.
    pub const DIAGONAL: [Direction; 4] = [UpLeft, UpRight, DownRight, DownLeft];

    /// Slot index in `0..8` (the sentinel maps to 8).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Unit `(Δrow, Δcol)` vector. The sentinel has none.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            UpLeft => (-1, -1),
            Up => (-1, 0),
            UpRight => (-1, 1),
            Right => (0, 1),
            DownRight => (1, 1),
            Down => (1, 0),
            DownLeft => (1, -1),
            Left => (0, -1),
            All => (0, 0),
        }
    }

    /// Inverse of [`delta`](Self::delta) for unit vectors.
    pub const fn from_delta(dr: i32, dc: i32) -> Option<Self> {
        match (dr, dc) {
            (-1, -1) => Some(UpLeft),
            (-1, 0) => Some(Up),
            (-1, 1) => Some(UpRight),
            (0, 1) => Some(Right),
            (1, 1) => Some(DownRight),
            (1, 0) => Some(Down),
            (1, -1) => Some(DownLeft),
            (0, -1) => Some(Left),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(self, UpLeft | UpRight | DownRight | DownLeft)
    }

    #[inline]
    pub const fn is_straight(self) -> bool {
        matches!(self, Up | Right | Down | Left)
    }

    /// The `(vertical, horizontal)` straight components of a diagonal.
    pub const fn components(self) -> Option<(Direction, Direction)> {
        match self {
            UpLeft => Some((Up, Left)),
            UpRight => Some((Up, Right)),
            DownRight => Some((Down, Right)),
            DownLeft => Some((Down, Left)),
            _ => None,
        }
    }

    /// Directions a search explores from a cell entered in this direction.
    ///
    /// Arriving straight allows continuing, both perpendiculars and the two
    /// forward diagonals; arriving diagonally allows only the diagonal and
    /// its components. `All` allows everything.
    #[inline]
    pub fn successors(self) -> &'static [Direction] {
        SUCCESSORS[self.index()]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UpLeft => "up-left",
            Up => "up",
            UpRight => "up-right",
            Right => "right",
            DownRight => "down-right",
            Down => "down",
            DownLeft => "down-left",
            Left => "left",
            All => "all",
        };
        f.write_str(name)
    }
}
