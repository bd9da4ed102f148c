//! Jump-point search over a precomputed [`JumpMatrix`].
//!
//! The search is A* with two differences. Successors are the cells reached
//! by jumping the precomputed distance in each direction the arrival
//! direction permits, rather than adjacent cells. And every jump is checked
//! for the goal lying on the ray it just covered, in which case the search
//! stops right there.

use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use jpsplus_core::{Cell, Direction};

use crate::JumpMatrix;
use crate::distance::euclidean;
use crate::error::PathError;
use crate::queue::{Frontier, FrontierEntry};

/// Counters describing one search.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchStats {
    /// Cells taken off the frontier and expanded.
    pub expanded: usize,
    /// Cells inserted into the frontier.
    pub pushed: usize,
    /// Largest frontier size observed.
    pub max_frontier: usize,
    /// Cost from start to goal of the returned path.
    pub cost: f64,
}

impl JumpMatrix {
    /// Find a shortest path from `start` to `goal`.
    ///
    /// The path holds only jump endpoints: the start, each cell where the
    /// path changes direction, and the goal. Consecutive cells always lie on
    /// a common row, column or diagonal; use [`expand_path`](crate::expand_path)
    /// for every intermediate cell.
    ///
    /// `start == goal` yields `[start]`.
    pub fn find_path(&self, start: Cell, goal: Cell) -> Result<Vec<Cell>, PathError> {
        self.find_path_with_stats(start, goal).map(|(path, _)| path)
    }

    /// Like [`find_path`](Self::find_path), also returning search counters.
    pub fn find_path_with_stats(
        &self,
        start: Cell,
        goal: Cell,
    ) -> Result<(Vec<Cell>, SearchStats), PathError> {
        self.check_endpoint(start)?;
        self.check_endpoint(goal)?;
        if start == goal {
            return Ok((vec![start], SearchStats::default()));
        }

        let mut search = Search::new(self, goal);
        if !search.run(start) {
            debug!(
                "no path from {start} to {goal} after {} expansions",
                search.stats.expanded
            );
        }
        let path = search.reconstruct(start)?;
        debug!(
            "path from {start} to {goal}: {} endpoints, cost {:.3}, {} expansions",
            path.len(),
            search.stats.cost,
            search.stats.expanded
        );
        Ok((path, search.stats))
    }

    fn check_endpoint(&self, c: Cell) -> Result<(), PathError> {
        match self.get(c) {
            None => Err(PathError::OutOfBounds(c)),
            Some(a) if !a.is_free() => Err(PathError::Blocked(c)),
            Some(_) => Ok(()),
        }
    }
}

/// State owned by a single search invocation.
struct Search<'a> {
    matrix: &'a JumpMatrix,
    goal: Cell,
    open: Frontier,
    visited: HashSet<Cell>,
    came_from: HashMap<Cell, Cell>,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    fn new(matrix: &'a JumpMatrix, goal: Cell) -> Self {
        Self {
            matrix,
            goal,
            open: Frontier::new(),
            visited: HashSet::new(),
            came_from: HashMap::new(),
            stats: SearchStats::default(),
        }
    }

    /// Run until the goal is reached (`true`) or the frontier runs dry.
    fn run(&mut self, start: Cell) -> bool {
        self.open.push(FrontierEntry {
            cell: start,
            direction: Direction::All,
            g: 0.0,
            f: euclidean(start, self.goal),
        });
        self.stats.pushed = 1;
        self.stats.max_frontier = 1;

        while let Some(current) = self.open.pop() {
            if current.cell == self.goal {
                self.stats.cost = current.g;
                return true;
            }
            trace!(
                "expand {} entered {} f={:.3}",
                current.cell, current.direction, current.f
            );
            self.visited.insert(current.cell);
            self.stats.expanded += 1;

            // Endpoints are validated and every jump stays on free cells, so
            // frontier cells are always inside the grid.
            let Some(annotated) = self.matrix.get(current.cell) else {
                continue;
            };
            let distances = *annotated.distances();

            for &dir in current.direction.successors() {
                let distance = distances.get(dir);
                if distance == 0 {
                    continue;
                }
                let reach = distance.abs();
                let landing = current.cell.step(dir, reach);

                // The whole ray is free, whether it ends at a jump point or
                // a wall, so a goal anywhere on it is reached directly.
                if lies_on_ray(current.cell, landing, self.goal) {
                    self.came_from.insert(self.goal, current.cell);
                    self.stats.cost = current.g + euclidean(current.cell, self.goal);
                    return true;
                }

                if let Some(crossing) = goal_crossing(current.cell, dir, reach, self.goal) {
                    self.relax(&current, crossing, dir);
                }
                self.relax(&current, landing, dir);
            }
            self.stats.max_frontier = self.stats.max_frontier.max(self.open.len());
        }
        false
    }

    /// Offer `to`, reached from `from` by a jump in `dir`, to the frontier.
    fn relax(&mut self, from: &FrontierEntry, to: Cell, dir: Direction) {
        if self.visited.contains(&to) {
            return;
        }
        let g = from.g + euclidean(from.cell, to);
        let f = g + euclidean(to, self.goal);
        match self.open.get(to).map(|queued| queued.g) {
            None => {
                self.open.push(FrontierEntry {
                    cell: to,
                    direction: dir,
                    g,
                    f,
                });
                self.came_from.insert(to, from.cell);
                self.stats.pushed += 1;
            }
            Some(queued_g) if g < queued_g => {
                self.open.update(to, g, f, dir);
                self.came_from.insert(to, from.cell);
            }
            Some(_) => {}
        }
    }

    /// Follow predecessor links back from the goal.
    fn reconstruct(&self, start: Cell) -> Result<Vec<Cell>, PathError> {
        if !self.came_from.contains_key(&self.goal) {
            return Err(PathError::Unreachable);
        }
        let mut path = vec![self.goal];
        let mut cur = self.goal;
        while cur != start {
            let Some(&prev) = self.came_from.get(&cur) else {
                return Err(PathError::Unreachable);
            };
            path.push(prev);
            cur = prev;
        }
        path.reverse();
        Ok(path)
    }
}

/// Whether `goal` lies on the straight or diagonal segment `from..=to`.
fn lies_on_ray(from: Cell, to: Cell, goal: Cell) -> bool {
    let ray = to - from;
    let off = goal - from;
    let colinear = i64::from(ray.row) * i64::from(off.col) == i64::from(ray.col) * i64::from(off.row);
    colinear && between(from.row, goal.row, to.row) && between(from.col, goal.col, to.col)
}

#[inline]
fn between(a: i32, b: i32, c: i32) -> bool {
    (a >= b && b >= c) || (a <= b && b <= c)
}

/// Where a diagonal ray of length `reach` crosses the goal's row or column,
/// if the goal lies ahead in that diagonal's quadrant.
fn goal_crossing(from: Cell, dir: Direction, reach: i32, goal: Cell) -> Option<Cell> {
    if !dir.is_diagonal() {
        return None;
    }
    let (dr, dc) = dir.delta();
    let off = goal - from;
    if off.row.signum() != dr || off.col.signum() != dc {
        return None;
    }
    let steps = off.row.abs().min(off.col.abs());
    (steps <= reach).then(|| from.step(dir, steps))
}
