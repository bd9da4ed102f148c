use std::fmt;

use jpsplus_core::Cell;

/// Errors returned by [`JumpMatrix::find_path`](crate::JumpMatrix::find_path).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// No chain of jumps connects the start to the goal.
    Unreachable,
    /// An endpoint lies outside the grid.
    OutOfBounds(Cell),
    /// An endpoint is a blocked cell.
    Blocked(Cell),
}

impl PathError {
    /// Whether the error stems from bad endpoints rather than the grid.
    pub fn is_invalid_input(self) -> bool {
        matches!(self, Self::OutOfBounds(_) | Self::Blocked(_))
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable => write!(f, "destination not reachable from source"),
            Self::OutOfBounds(c) => write!(f, "cell {c} is outside the grid"),
            Self::Blocked(c) => write!(f, "cell {c} is blocked"),
        }
    }
}

impl std::error::Error for PathError {}
