//! Plain step-by-step A* on an [`OccupancyGrid`].
//!
//! No precomputation and no jumping: every expansion looks at the eight
//! neighbours, with straight steps costing 1 and diagonal ones √2. It finds
//! the same optimal cost as the jump search and serves as its reference.

use std::collections::BinaryHeap;

use jpsplus_core::{Cell, Direction, OccupancyGrid};

use crate::distance::euclidean;

#[derive(Clone, Copy)]
struct Node {
    g: f64,
    parent: usize,
    seen: bool,
    open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            parent: usize::MAX,
            seen: false,
            open: false,
        }
    }
}

/// Reference into the node array, ordered by `f` for use in `BinaryHeap`.
#[derive(Clone, Copy, PartialEq)]
struct NodeRef {
    idx: usize,
    f: f64,
}

impl Eq for NodeRef {}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first.
        other.f.total_cmp(&self.f)
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest 8-connected path from `from` to `to` and its cost.
///
/// Diagonal steps may not cut corners. Returns `None` when either endpoint
/// is outside the grid or blocked, or when no path exists. The returned path
/// lists every cell, both endpoints included.
pub fn astar_path(grid: &OccupancyGrid, from: Cell, to: Cell) -> Option<(Vec<Cell>, f64)> {
    let start_idx = grid.index(from.row, from.col)?;
    let goal_idx = grid.index(to.row, to.col)?;
    if !grid.is_free(from) || !grid.is_free(to) {
        return None;
    }
    if start_idx == goal_idx {
        return Some((vec![from], 0.0));
    }

    let mut nodes = vec![Node::default(); grid.len()];
    nodes[start_idx] = Node {
        g: 0.0,
        parent: usize::MAX,
        seen: true,
        open: true,
    };
    let mut open = BinaryHeap::new();
    open.push(NodeRef {
        idx: start_idx,
        f: euclidean(from, to),
    });

    let found = loop {
        let Some(current) = open.pop() else {
            break false;
        };
        let ci = current.idx;
        // Skip stale entries.
        if !nodes[ci].open {
            continue;
        }
        if ci == goal_idx {
            break true;
        }
        nodes[ci].open = false;
        let current_g = nodes[ci].g;
        let cp = grid.cell_at(ci);

        for dir in Direction::ALL {
            if !grid.can_step(cp, dir) {
                continue;
            }
            let np = cp.neighbor(dir);
            let Some(ni) = grid.index(np.row, np.col) else {
                continue;
            };
            let tentative_g = current_g + euclidean(cp, np);
            let n = &mut nodes[ni];
            if n.seen && tentative_g >= n.g {
                continue;
            }
            n.seen = true;
            n.g = tentative_g;
            n.parent = ci;
            n.open = true;
            open.push(NodeRef {
                idx: ni,
                f: tentative_g + euclidean(np, to),
            });
        }
    };

    if !found {
        return None;
    }

    let mut path = Vec::new();
    let mut ci = goal_idx;
    while ci != usize::MAX {
        path.push(grid.cell_at(ci));
        ci = nodes[ci].parent;
    }
    path.reverse();
    Some((path, nodes[goal_idx].g))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;

    fn grid(rows: &[&str]) -> OccupancyGrid {
        let rows: Vec<Vec<u8>> = rows
            .iter()
            .map(|r| r.bytes().map(|b| u8::from(b == b'X')).collect())
            .collect();
        OccupancyGrid::from_rows(&rows).unwrap()
    }

    #[test]
    fn open_grid_costs_octile() {
        let g = OccupancyGrid::new(6, 6);
        let (path, cost) = astar_path(&g, Cell::new(0, 0), Cell::new(5, 2)).unwrap();
        assert_eq!(path.len(), 6);
        assert!((cost - (3.0 + 2.0 * SQRT_2)).abs() < 1e-9);
    }

    #[test]
    fn detours_around_a_wall() {
        // . X .
        // . X .
        // . . .
        let g = grid(&[".X.", ".X.", "..."]);
        let (path, cost) = astar_path(&g, Cell::new(0, 0), Cell::new(0, 2)).unwrap();
        assert_eq!(path.first(), Some(&Cell::new(0, 0)));
        assert_eq!(path.last(), Some(&Cell::new(0, 2)));
        // Every diagonal around the wall's foot cuts a corner, so the path
        // walks straight along the bottom row.
        assert_eq!(
            &path[1..6],
            &[
                Cell::new(1, 0),
                Cell::new(2, 0),
                Cell::new(2, 1),
                Cell::new(2, 2),
                Cell::new(1, 2)
            ]
        );
        assert!((cost - 6.0).abs() < 1e-9);
    }

    #[test]
    fn no_corner_cutting() {
        let g = grid(&[".X", "X."]);
        assert!(astar_path(&g, Cell::new(0, 0), Cell::new(1, 1)).is_none());
    }

    #[test]
    fn invalid_endpoints() {
        let g = grid(&[".X", ".."]);
        assert!(astar_path(&g, Cell::new(0, 0), Cell::new(0, 1)).is_none());
        assert!(astar_path(&g, Cell::new(0, 0), Cell::new(3, 3)).is_none());
        assert_eq!(
            astar_path(&g, Cell::new(1, 1), Cell::new(1, 1)),
            Some((vec![Cell::new(1, 1)], 0.0))
        );
    }
}
