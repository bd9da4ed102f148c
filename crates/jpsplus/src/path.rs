//! Helpers for jump paths.

use jpsplus_core::Cell;

use crate::distance::euclidean;

/// Total length of a path, summing the Euclidean length of every segment.
///
/// Works on both jump paths and expanded step paths; an empty or single-cell
/// path costs nothing.
pub fn path_cost(path: &[Cell]) -> f64 {
    path.windows(2).map(|w| euclidean(w[0], w[1])).sum()
}

/// Expand a jump path into every cell it passes through.
///
/// Each segment is walked one step at a time, moving diagonally while both
/// coordinates still differ and straight afterwards. Segments produced by
/// [`JumpMatrix::find_path`](crate::JumpMatrix::find_path) are always
/// straight or diagonal, so this yields a chain of single 8-connected steps.
pub fn expand_path(path: &[Cell]) -> Vec<Cell> {
    let Some(&first) = path.first() else {
        return Vec::new();
    };
    let mut result = vec![first];
    for w in path.windows(2) {
        let (mut c, b) = (w[0], w[1]);
        while c != b {
            let d = b - c;
            c = c + Cell::new(d.row.signum(), d.col.signum());
            result.push(c);
        }
    }
    result
}
