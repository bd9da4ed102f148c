//! The precomputed jump distance matrix.
//!
//! Construction runs in two strict phases over the whole grid. Phase one
//! fills the four straight distances of every free cell; phase two derives
//! the four diagonal distances, and reads the straight distances of the
//! cells along each diagonal ray. No diagonal entry is computed until every
//! straight entry exists.

use log::debug;

use jpsplus_core::{Cell, Direction, GridError, OccupancyGrid};

use crate::classify::{JumpPointFlags, JumpPoints};

/// Signed jump distances of one cell, one slot per direction.
///
/// A positive value is the number of steps to the next jump point in that
/// direction. A value `<= 0` is the negated number of free steps before an
/// obstacle, the grid border or, for diagonals, a corner that may not be
/// cut. Zero means no step is possible at all.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JumpDistances([i32; 8]);

impl JumpDistances {
    /// Distance in `dir`; zero for the `All` sentinel.
    #[inline]
    pub fn get(&self, dir: Direction) -> i32 {
        self.0.get(dir.index()).copied().unwrap_or(0)
    }

    #[inline]
    fn set(&mut self, dir: Direction, value: i32) {
        if let Some(slot) = self.0.get_mut(dir.index()) {
            *slot = value;
        }
    }

    /// Whether the ray in `dir` ends at a jump point rather than a wall.
    #[inline]
    pub fn reaches_jump_point(&self, dir: Direction) -> bool {
        self.get(dir) > 0
    }

    /// The raw slots in [`Direction::ALL`] order.
    #[inline]
    pub fn as_array(&self) -> [i32; 8] {
        self.0
    }
}

/// A grid cell together with its occupancy, jump point flags and jump
/// distances. Immutable once the matrix is built.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnotatedCell {
    cell: Cell,
    occupancy: u8,
    flags: JumpPointFlags,
    distances: JumpDistances,
}

impl AnnotatedCell {
    #[inline]
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// The source occupancy value (0 free, 1 blocked).
    #[inline]
    pub fn occupancy(&self) -> u8 {
        self.occupancy
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.occupancy == OccupancyGrid::FREE
    }

    #[inline]
    pub fn flags(&self) -> JumpPointFlags {
        self.flags
    }

    #[inline]
    pub fn distances(&self) -> &JumpDistances {
        &self.distances
    }

    #[inline]
    pub fn distance(&self, dir: Direction) -> i32 {
        self.distances.get(dir)
    }
}

/// Precomputed JPS+ matrix for a static grid.
///
/// Build it once with [`new`](Self::new) and share it freely: searches only
/// read from it.
///
/// With the `serde` feature a matrix is stored as its source grid and
/// rebuilt on load, so a loaded matrix is always consistent with its grid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "OccupancyGrid", from = "OccupancyGrid")
)]
pub struct JumpMatrix {
    grid: OccupancyGrid,
    cells: Vec<AnnotatedCell>,
    jump_points: usize,
}

impl JumpMatrix {
    /// Precompute jump distances for every free cell of `grid`.
    pub fn new(grid: OccupancyGrid) -> Self {
        let jps = JumpPoints::classify(&grid);
        let mut distances = vec![JumpDistances::default(); grid.len()];

        for (idx, (cell, v)) in grid.iter().enumerate() {
            if v != OccupancyGrid::FREE {
                continue;
            }
            for dir in Direction::STRAIGHT {
                distances[idx].set(dir, straight_distance(&grid, &jps, cell, dir));
            }
        }

        for idx in 0..grid.len() {
            let cell = grid.cell_at(idx);
            if !grid.is_free(cell) {
                continue;
            }
            for dir in Direction::DIAGONAL {
                let d = diagonal_distance(&grid, &jps, &distances, cell, dir);
                distances[idx].set(dir, d);
            }
        }

        let cells: Vec<AnnotatedCell> = grid
            .iter()
            .zip(distances)
            .enumerate()
            .map(|(idx, ((cell, occupancy), distances))| AnnotatedCell {
                cell,
                occupancy,
                flags: jps.at(idx),
                distances,
            })
            .collect();

        let jump_points = jps.count();
        debug!(
            "jump matrix built: {}x{}, {} free cells, {} primary jump points",
            grid.rows(),
            grid.cols(),
            grid.free_count(),
            jump_points
        );

        Self {
            grid,
            cells,
            jump_points,
        }
    }

    /// Validate raw occupancy rows and precompute their matrix.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        Ok(Self::new(OccupancyGrid::from_rows(rows)?))
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// The occupancy grid this matrix was built from.
    #[inline]
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// The annotated cell at `c`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, c: Cell) -> Option<&AnnotatedCell> {
        self.grid.index(c.row, c.col).map(|i| &self.cells[i])
    }

    /// Number of cells that are a primary jump point for some direction.
    #[inline]
    pub fn jump_point_count(&self) -> usize {
        self.jump_points
    }

    /// Iterate over all annotated cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &AnnotatedCell> {
        self.cells.iter()
    }
}

impl From<OccupancyGrid> for JumpMatrix {
    fn from(grid: OccupancyGrid) -> Self {
        Self::new(grid)
    }
}

impl From<JumpMatrix> for OccupancyGrid {
    fn from(matrix: JumpMatrix) -> Self {
        matrix.grid
    }
}

/// Walk from `from` in straight `dir` until a jump point or a wall.
fn straight_distance(grid: &OccupancyGrid, jps: &JumpPoints, from: Cell, dir: Direction) -> i32 {
    let mut steps = 0;
    let mut cur = from;
    loop {
        let next = cur.neighbor(dir);
        if !grid.is_free(next) {
            return -steps;
        }
        steps += 1;
        if jps.get(next).contains(dir) {
            return steps;
        }
        cur = next;
    }
}

/// Walk from `from` in diagonal `dir` until a cell that is, or leads
/// straight to, a jump point along one of the diagonal's components.
fn diagonal_distance(
    grid: &OccupancyGrid,
    jps: &JumpPoints,
    straight: &[JumpDistances],
    from: Cell,
    dir: Direction,
) -> i32 {
    let Some((vertical, horizontal)) = dir.components() else {
        return 0;
    };
    let mut steps = 0;
    let mut cur = from;
    loop {
        // Blocked cells and cut corners end the ray alike.
        if !grid.can_step(cur, dir) {
            return -steps;
        }
        cur = cur.neighbor(dir);
        steps += 1;
        let Some(idx) = grid.index(cur.row, cur.col) else {
            return -steps;
        };
        let flags = jps.at(idx);
        let d = &straight[idx];
        if flags.contains(vertical)
            || flags.contains(horizontal)
            || d.reaches_jump_point(vertical)
            || d.reaches_jump_point(horizontal)
        {
            return steps;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    fn matrix(rows: &[&str]) -> JumpMatrix {
        let rows: Vec<Vec<u8>> = rows
            .iter()
            .map(|r| r.bytes().map(|b| u8::from(b == b'X')).collect())
            .collect();
        JumpMatrix::from_rows(&rows).unwrap()
    }

    fn dist(m: &JumpMatrix, r: i32, c: i32, dir: Direction) -> i32 {
        m.get(Cell::new(r, c)).unwrap().distance(dir)
    }

    #[test]
    fn open_grid_distances_run_to_the_border() {
        let m = matrix(&["....", "....", "...."]);
        assert_eq!(m.jump_point_count(), 0);
        assert_eq!(dist(&m, 0, 0, Right), -3);
        assert_eq!(dist(&m, 0, 0, Down), -2);
        assert_eq!(dist(&m, 0, 0, Left), 0);
        assert_eq!(dist(&m, 0, 0, Up), 0);
        assert_eq!(dist(&m, 0, 0, DownRight), -2);
        assert_eq!(dist(&m, 2, 3, UpLeft), -2);
        assert_eq!(dist(&m, 1, 1, UpRight), -1);
        assert_eq!(dist(&m, 1, 1, All), 0);
    }

    #[test]
    fn straight_distance_stops_at_jump_point() {
        // . . X . .
        // . . . . .
        let m = matrix(&["..X..", "....."]);
        // (1,3) is a jump point moving right (opens up past (0,2)).
        assert!(m.get(Cell::new(1, 3)).unwrap().flags().contains(Right));
        assert_eq!(dist(&m, 1, 0, Right), 3);
        assert_eq!(dist(&m, 1, 3, Right), -1);
        // (1,1) is a jump point moving left.
        assert_eq!(dist(&m, 1, 4, Left), 3);
        // Walls in front give zero.
        assert_eq!(dist(&m, 0, 1, Right), 0);
        assert_eq!(dist(&m, 0, 0, Right), -1);
    }

    #[test]
    fn diagonal_stops_where_a_straight_turn_reaches_a_jump_point() {
        // . . . . .
        // . . . . .
        // . . X . .
        // . . . . .
        let m = matrix(&[".....", ".....", "..X..", "....."]);
        // (3,3) is a jump point moving right; (3,1) moving left.
        assert_eq!(dist(&m, 3, 0, Right), 3);
        // (3,1) is a jump point moving down, so from (1,1) a straight turn
        // down reaches it and the down-right ray from (0,0) stops at (1,1).
        assert_eq!(dist(&m, 1, 1, Down), 2);
        assert_eq!(dist(&m, 0, 0, DownRight), 1);
        // Likewise (3,3) moving down makes (2,3) a stop for the ray from (1,4).
        assert_eq!(dist(&m, 2, 3, Down), 1);
        assert_eq!(dist(&m, 1, 4, DownLeft), 1);
    }

    #[test]
    fn diagonal_never_cuts_corners() {
        // . X
        // . .
        let m = matrix(&[".X", ".."]);
        assert_eq!(dist(&m, 1, 0, UpRight), 0);
        assert_eq!(dist(&m, 0, 0, DownRight), 0);
        // A squeeze between two blocked corners further along ends it too.
        // . . .
        // . . X
        // . X .
        let m = matrix(&["...", "..X", ".X."]);
        assert_eq!(dist(&m, 0, 0, DownRight), -1);
        assert_eq!(dist(&m, 2, 2, UpLeft), 0);
    }

    #[test]
    fn blocked_cells_have_no_distances() {
        let m = matrix(&[".X.", "..."]);
        let wall = m.get(Cell::new(0, 1)).unwrap();
        assert!(!wall.is_free());
        assert_eq!(wall.occupancy(), OccupancyGrid::BLOCKED);
        assert_eq!(wall.distances().as_array(), [0; 8]);
        assert!(m.get(Cell::new(2, 0)).is_none());
    }

    #[test]
    fn every_jump_lands_on_a_free_cell() {
        let m = matrix(&["..X..", "....X", "X....", "..X.."]);
        for a in m.iter().filter(|a| a.is_free()) {
            for dir in Direction::ALL {
                let d = a.distance(dir);
                if d != 0 {
                    let landing = a.cell().step(dir, d.abs());
                    assert!(m.get(landing).is_some_and(AnnotatedCell::is_free), "{} {dir}", a.cell());
                }
            }
        }
    }

    #[test]
    fn ragged_rows_rejected() {
        let rows = vec![vec![0u8, 0], vec![0u8]];
        assert!(matches!(JumpMatrix::from_rows(&rows), Err(GridError::Ragged { .. })));
    }

    #[test]
    fn matrix_is_shareable_across_threads() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<JumpMatrix>();
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn matrix_round_trip() {
        let m = JumpMatrix::from_rows(&[[0u8, 1, 0], [0, 0, 0]]).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        let back: JumpMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }

    #[test]
    fn stored_as_its_grid() {
        let m = JumpMatrix::from_rows(&[[0u8, 1, 0], [0, 0, 0]]).unwrap();
        assert_eq!(
            serde_json::to_value(&m).unwrap(),
            serde_json::to_value(m.grid()).unwrap()
        );
    }

    #[test]
    fn malformed_matrix_rejected() {
        assert!(serde_json::from_str::<JumpMatrix>(r#"{"cells":[0],"rows":5,"cols":5}"#).is_err());
        assert!(serde_json::from_str::<JumpMatrix>(r#"{"cells":[0,3],"rows":1,"cols":2}"#).is_err());
        let m: JumpMatrix =
            serde_json::from_str(r#"{"cells":[0,0,0,0],"rows":2,"cols":2}"#).unwrap();
        assert_eq!(m.find_path(Cell::new(0, 0), Cell::new(1, 1)).map(|p| p.len()), Ok(2));
    }
}
