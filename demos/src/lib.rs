//! Text-art I/O around the jpsplus crates.
//!
//! Grids are written one row per line: `.` is free, `X` or `#` is blocked.

use jpsplus::{Cell, GridError, OccupancyGrid, expand_path};

/// A small 5×9 world with two broken walls.
pub const WORLD_SMALL: &str = include_str!("../../crates/jpsplus/testdata/world_5x9.txt");

/// A 50×50 world of rooms and corridors.
pub const WORLD_50X50: &str = include_str!("../../crates/jpsplus/testdata/world_50x50.txt");

/// Parse text art into an occupancy grid.
///
/// Blank lines and trailing whitespace are ignored. Any other character
/// than `.`, `X` or `#` is reported as [`GridError::InvalidValue`] with the
/// offending byte as its value.
pub fn parse_grid(text: &str) -> Result<OccupancyGrid, GridError> {
    let rows: Vec<Vec<u8>> = text
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .map(|l| l.bytes().map(tile_value).collect())
        .collect();
    OccupancyGrid::from_rows(&rows)
}

fn tile_value(b: u8) -> u8 {
    match b {
        b'.' => OccupancyGrid::FREE,
        b'X' | b'#' => OccupancyGrid::BLOCKED,
        // Anything else is not 0/1 and fails validation.
        other => other.max(OccupancyGrid::BLOCKED + 1),
    }
}

/// Render `grid` with a jump path drawn over it.
///
/// Jump endpoints are drawn as `o` and the cells between them as `*`.
pub fn render_path(grid: &OccupancyGrid, path: &[Cell]) -> String {
    let mut canvas: Vec<Vec<u8>> = (0..grid.rows())
        .map(|r| {
            (0..grid.cols())
                .map(|c| {
                    if grid.is_blocked(r as i32, c as i32) {
                        b'X'
                    } else {
                        b'.'
                    }
                })
                .collect()
        })
        .collect();

    let mut mark = |c: Cell, tile: u8| {
        if grid.contains(c) {
            canvas[c.row as usize][c.col as usize] = tile;
        }
    };
    for c in expand_path(path) {
        mark(c, b'*');
    }
    for &c in path {
        mark(c, b'o');
    }

    let mut out = String::with_capacity(grid.rows() * (grid.cols() + 1));
    for row in canvas {
        out.extend(row.into_iter().map(char::from));
        out.push('\n');
    }
    out
}

/// Parse a `row,col` pair.
pub fn parse_cell(s: &str) -> Option<Cell> {
    let (r, c) = s.split_once(',')?;
    Some(Cell::new(r.trim().parse().ok()?, c.trim().parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jpsplus::JumpMatrix;

    #[test]
    fn parse_builtin_worlds() {
        let small = parse_grid(WORLD_SMALL).unwrap();
        assert_eq!((small.rows(), small.cols()), (5, 9));
        assert!(small.is_blocked(0, 2));
        let large = parse_grid(WORLD_50X50).unwrap();
        assert_eq!((large.rows(), large.cols()), (50, 50));
    }

    #[test]
    fn parse_accepts_hash_and_skips_blank_lines() {
        let g = parse_grid("\n.#.\n...  \n\n").unwrap();
        assert_eq!((g.rows(), g.cols()), (2, 3));
        assert!(g.is_blocked(0, 1));
    }

    #[test]
    fn parse_rejects_bad_art() {
        assert_eq!(
            parse_grid("..\n.?"),
            Err(GridError::InvalidValue {
                row: 1,
                col: 1,
                value: b'?'
            })
        );
        assert!(matches!(parse_grid("...\n.."), Err(GridError::Ragged { .. })));
        assert_eq!(parse_grid(""), Err(GridError::Empty));
    }

    #[test]
    fn render_marks_endpoints_and_steps() {
        let g = parse_grid("....\n.X..\n....").unwrap();
        let path = [Cell::new(0, 0), Cell::new(0, 3), Cell::new(2, 3)];
        assert_eq!(render_path(&g, &path), "o**o\n.X.*\n...o\n");
    }

    #[test]
    fn render_found_path() {
        let g = parse_grid(WORLD_SMALL).unwrap();
        let m = JumpMatrix::new(g.clone());
        let path = m.find_path(Cell::new(0, 0), Cell::new(0, 7)).unwrap();
        let art = render_path(&g, &path);
        assert_eq!(art.lines().count(), 5);
        assert!(art.starts_with('o'));
        // Walls are never painted over.
        assert_eq!(art.matches('X').count(), g.len() - g.free_count());
    }

    #[test]
    fn cell_arguments() {
        assert_eq!(parse_cell("3,4"), Some(Cell::new(3, 4)));
        assert_eq!(parse_cell(" 10 , 0"), Some(Cell::new(10, 0)));
        assert_eq!(parse_cell("3"), None);
        assert_eq!(parse_cell("a,b"), None);
    }
}
