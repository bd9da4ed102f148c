//! The [`OccupancyGrid`] type: a rectangular free/blocked grid.
//!
//! Cells hold `0` (free) or `1` (blocked). Every lookup outside the grid is
//! treated as blocked, so callers can probe neighbours of border cells
//! without bounds checks of their own.

use std::fmt;

use crate::geom::{Cell, Direction};

/// A validated rectangular occupancy grid, stored row-major.
///
/// Deserialization runs the same checks as [`from_rows`](Self::from_rows).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawGrid")
)]
pub struct OccupancyGrid {
    cells: Vec<u8>,
    rows: usize,
    cols: usize,
}

impl OccupancyGrid {
    /// Occupancy value of a free cell.
    pub const FREE: u8 = 0;
    /// Occupancy value of a blocked cell.
    pub const BLOCKED: u8 = 1;

    /// Largest row or column count. Coordinates are `i32`, so every cell
    /// must be addressable by one.
    pub const MAX_DIM: usize = i32::MAX as usize;

    /// Create a grid of the given dimensions with every cell free.
    ///
    /// # Panics
    ///
    /// If a dimension exceeds [`MAX_DIM`](Self::MAX_DIM) or the cell count
    /// overflows `usize`. Use [`try_new`](Self::try_new) to get an error
    /// instead.
    pub fn new(rows: usize, cols: usize) -> Self {
        match Self::try_new(rows, cols) {
            Ok(grid) => grid,
            Err(e) => panic!("{e}"),
        }
    }

    /// Create an all-free grid, rejecting dimensions that cannot be
    /// addressed.
    pub fn try_new(rows: usize, cols: usize) -> Result<Self, GridError> {
        let len = checked_len(rows, cols)?;
        Ok(Self {
            cells: vec![Self::FREE; len],
            rows,
            cols,
        })
    }

    /// Build a grid from rows of occupancy values.
    ///
    /// Every row must have the same, non-zero length and every value must be
    /// [`FREE`](Self::FREE) or [`BLOCKED`](Self::BLOCKED).
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        let Some(first) = rows.first() else {
            return Err(GridError::Empty);
        };
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(checked_len(rows.len(), cols)?);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(GridError::Ragged {
                    row: r,
                    expected: cols,
                    found: row.len(),
                });
            }
            if let Some(c) = row.iter().position(|&v| v > Self::BLOCKED) {
                return Err(GridError::InvalidValue {
                    row: r,
                    col: c,
                    value: row[c],
                });
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            cells,
            rows: rows.len(),
            cols,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major index of `(row, col)`, or `None` if outside the grid.
    #[inline]
    pub fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols {
            Some(row as usize * self.cols + col as usize)
        } else {
            None
        }
    }

    /// Cell at a row-major index.
    #[inline]
    pub fn cell_at(&self, idx: usize) -> Cell {
        Cell::new((idx / self.cols) as i32, (idx % self.cols) as i32)
    }

    /// Whether the cell lies inside the grid.
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        self.index(c.row, c.col).is_some()
    }

    /// Occupancy value at `c`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, c: Cell) -> Option<u8> {
        self.index(c.row, c.col).map(|i| self.cells[i])
    }

    /// Set a cell's occupancy. Out-of-bounds writes are ignored.
    pub fn set(&mut self, c: Cell, blocked: bool) {
        if let Some(i) = self.index(c.row, c.col) {
            self.cells[i] = if blocked { Self::BLOCKED } else { Self::FREE };
        }
    }

    /// Whether `(row, col)` is blocked. Anything outside the grid is.
    #[inline]
    pub fn is_blocked(&self, row: i32, col: i32) -> bool {
        match self.index(row, col) {
            Some(i) => self.cells[i] != Self::FREE,
            None => true,
        }
    }

    #[inline]
    pub fn is_free(&self, c: Cell) -> bool {
        !self.is_blocked(c.row, c.col)
    }

    /// Whether a single step from `from` in `dir` is legal.
    ///
    /// The destination must be free, and a diagonal step additionally needs
    /// both orthogonal cells it passes between to be free (no corner-cutting).
    pub fn can_step(&self, from: Cell, dir: Direction) -> bool {
        if dir == Direction::All || !self.is_free(from.neighbor(dir)) {
            return false;
        }
        if dir.is_diagonal() {
            let (dr, dc) = dir.delta();
            return !self.is_blocked(from.row + dr, from.col) && !self.is_blocked(from.row, from.col + dc);
        }
        true
    }

    /// Number of free cells.
    pub fn free_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == Self::FREE).count()
    }

    /// Iterate over all cells in row-major order with their occupancy.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, u8)> + '_ {
        self.cells.iter().enumerate().map(|(i, &v)| (self.cell_at(i), v))
    }
}

/// Cell count of a `rows` × `cols` grid, if both fit [`OccupancyGrid::MAX_DIM`].
fn checked_len(rows: usize, cols: usize) -> Result<usize, GridError> {
    if rows > OccupancyGrid::MAX_DIM || cols > OccupancyGrid::MAX_DIM {
        return Err(GridError::TooLarge { rows, cols });
    }
    rows.checked_mul(cols).ok_or(GridError::TooLarge { rows, cols })
}

/// Wire form of an [`OccupancyGrid`], validated before use.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid {
    cells: Vec<u8>,
    rows: usize,
    cols: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for OccupancyGrid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, GridError> {
        let len = checked_len(raw.rows, raw.cols)?;
        if len == 0 {
            return Err(GridError::Empty);
        }
        if raw.cells.len() != len {
            return Err(GridError::LengthMismatch {
                expected: len,
                found: raw.cells.len(),
            });
        }
        let rows: Vec<&[u8]> = raw.cells.chunks(raw.cols).collect();
        Self::from_rows(&rows)
    }
}

/// Errors that can occur when building an [`OccupancyGrid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No rows, or rows of zero width.
    Empty,
    /// A row's length differs from the first row's.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// An occupancy value other than 0 or 1.
    InvalidValue { row: usize, col: usize, value: u8 },
    /// Flat cell storage whose length is not `rows * cols`.
    LengthMismatch { expected: usize, found: usize },
    /// A dimension beyond [`OccupancyGrid::MAX_DIM`], or too many cells.
    TooLarge { rows: usize, cols: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid: no cells"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(f, "grid: row {row} has {found} cells, expected {expected}"),
            Self::InvalidValue { row, col, value } => {
                write!(f, "grid: invalid occupancy {value} at ({row}, {col})")
            }
            Self::LengthMismatch { expected, found } => {
                write!(f, "grid: {found} cells stored, expected {expected}")
            }
            Self::TooLarge { rows, cols } => {
                write!(f, "grid: {rows}x{cols} exceeds the addressable size")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_and_lookup() {
        let g = OccupancyGrid::from_rows(&[[0u8, 1, 0], [0, 0, 0]]).unwrap();
        assert_eq!((g.rows(), g.cols(), g.len()), (2, 3, 6));
        assert_eq!(g.get(Cell::new(0, 1)), Some(OccupancyGrid::BLOCKED));
        assert_eq!(g.get(Cell::new(1, 2)), Some(OccupancyGrid::FREE));
        assert_eq!(g.get(Cell::new(2, 0)), None);
        assert_eq!(g.free_count(), 5);
    }

    #[test]
    fn out_of_range_is_blocked() {
        let g = OccupancyGrid::new(2, 2);
        assert!(!g.is_blocked(1, 1));
        assert!(g.is_blocked(-1, 0));
        assert!(g.is_blocked(0, 2));
        assert!(g.is_blocked(2, 0));
    }

    #[test]
    fn ragged_rows_rejected() {
        let rows: Vec<Vec<u8>> = vec![vec![0, 0, 0], vec![0, 0]];
        assert_eq!(
            OccupancyGrid::from_rows(&rows),
            Err(GridError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn empty_and_invalid_rejected() {
        let none: [[u8; 0]; 0] = [];
        assert_eq!(OccupancyGrid::from_rows(&none), Err(GridError::Empty));
        assert_eq!(OccupancyGrid::from_rows(&[[0u8; 0]]), Err(GridError::Empty));
        assert_eq!(
            OccupancyGrid::from_rows(&[[0u8, 2]]),
            Err(GridError::InvalidValue {
                row: 0,
                col: 1,
                value: 2
            })
        );
    }

    #[test]
    fn diagonal_step_needs_both_corners() {
        // . X
        // . .
        let g = OccupancyGrid::from_rows(&[[0u8, 1], [0, 0]]).unwrap();
        let origin = Cell::new(1, 0);
        assert!(g.can_step(origin, Direction::Right));
        assert!(g.can_step(origin, Direction::Up));
        assert!(!g.can_step(origin, Direction::UpRight));
        assert!(!g.can_step(origin, Direction::Left));
        assert!(!g.can_step(origin, Direction::All));
        assert!(g.can_step(Cell::new(0, 0), Direction::Down));
        assert!(!g.can_step(Cell::new(0, 0), Direction::DownRight));
    }

    #[test]
    fn set_and_iter() {
        let mut g = OccupancyGrid::new(2, 2);
        g.set(Cell::new(1, 0), true);
        g.set(Cell::new(9, 9), true);
        let blocked: Vec<Cell> = g
            .iter()
            .filter(|&(_, v)| v == OccupancyGrid::BLOCKED)
            .map(|(c, _)| c)
            .collect();
        assert_eq!(blocked, vec![Cell::new(1, 0)]);
        assert_eq!(g.cell_at(3), Cell::new(1, 1));
    }

    #[test]
    fn oversize_dimensions_rejected() {
        let wide = OccupancyGrid::MAX_DIM + 1;
        assert_eq!(
            OccupancyGrid::try_new(1, wide),
            Err(GridError::TooLarge { rows: 1, cols: wide })
        );
        let tall = OccupancyGrid::MAX_DIM + 7;
        assert_eq!(
            OccupancyGrid::try_new(tall, 0),
            Err(GridError::TooLarge { rows: tall, cols: 0 })
        );
        assert_eq!(OccupancyGrid::try_new(3, 4).map(|g| g.len()), Ok(12));
    }

    #[test]
    #[should_panic(expected = "exceeds the addressable size")]
    fn new_panics_on_oversize() {
        OccupancyGrid::new(OccupancyGrid::MAX_DIM + 1, 1);
    }

    #[test]
    fn error_messages() {
        let e = GridError::Ragged {
            row: 2,
            expected: 5,
            found: 4,
        };
        assert_eq!(e.to_string(), "grid: row 2 has 4 cells, expected 5");
    }
}
