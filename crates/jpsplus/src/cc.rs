//! Connected-component labelling.

use jpsplus_core::{Cell, Direction, OccupancyGrid};

/// Component labels for every free cell of a grid.
///
/// Two free cells share a component when a chain of legal 8-connected steps
/// (no corner-cutting) joins them, which is exactly when a path exists.
#[derive(Debug, Clone)]
pub struct Components {
    labels: Vec<i32>,
    rows: usize,
    cols: usize,
    count: usize,
}

impl Components {
    /// Label every free cell of `grid`. Blocked cells get no label.
    pub fn label(grid: &OccupancyGrid) -> Self {
        let mut labels = vec![-1; grid.len()];
        let mut stack = Vec::new();
        let mut label: i32 = 0;

        for start in 0..grid.len() {
            if labels[start] >= 0 || !grid.is_free(grid.cell_at(start)) {
                continue;
            }

            // Iterative DFS from `start`.
            stack.clear();
            stack.push(start);
            labels[start] = label;

            while let Some(ci) = stack.pop() {
                let cp = grid.cell_at(ci);
                for dir in Direction::ALL {
                    if !grid.can_step(cp, dir) {
                        continue;
                    }
                    let np = cp.neighbor(dir);
                    if let Some(ni) = grid.index(np.row, np.col) {
                        if labels[ni] < 0 {
                            labels[ni] = label;
                            stack.push(ni);
                        }
                    }
                }
            }

            label += 1;
        }

        Self {
            labels,
            rows: grid.rows(),
            cols: grid.cols(),
            count: label as usize,
        }
    }

    /// Component label of `c`, or `None` for blocked or out-of-range cells.
    pub fn component(&self, c: Cell) -> Option<usize> {
        if c.row < 0 || c.col < 0 || c.row as usize >= self.rows || c.col as usize >= self.cols {
            return None;
        }
        let label = self.labels[c.row as usize * self.cols + c.col as usize];
        if label < 0 { None } else { Some(label as usize) }
    }

    /// Whether a path exists between `a` and `b`.
    pub fn same_component(&self, a: Cell, b: Cell) -> bool {
        match (self.component(a), self.component(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Number of components.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }
}
