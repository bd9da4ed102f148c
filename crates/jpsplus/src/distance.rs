use jpsplus_core::Cell;

/// Euclidean (L2) distance between two cells.
///
/// This is both the search heuristic and the cost of a jump: every jump runs
/// along a straight or diagonal line, so its length is exactly this value.
#[inline]
pub fn euclidean(a: Cell, b: Cell) -> f64 {
    let dr = f64::from(a.row - b.row);
    let dc = f64::from(a.col - b.col);
    dr.hypot(dc)
}

/// Octile distance: the shortest 8-connected path length on an empty grid.
#[inline]
pub fn octile(a: Cell, b: Cell) -> f64 {
    let dr = (a.row - b.row).abs();
    let dc = (a.col - b.col).abs();
    let diag = dr.min(dc);
    f64::from(dr.max(dc) - diag) + f64::from(diag) * std::f64::consts::SQRT_2
}
