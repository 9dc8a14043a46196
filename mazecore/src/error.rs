use thiserror::Error;

use crate::{cell::CellWall, dims::Dims};

/// Precondition violations reported by the core. None of them are recoverable by retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("invalid maze size {rows}x{cols}, both dimensions must be at least 1")]
    InvalidSize { rows: usize, cols: usize },

    #[error("a cell needs exactly 4 wall flags, got {0}")]
    WallCount(usize),

    #[error("a cell needs exactly 2 corner points, got {0}")]
    CornerCount(usize),

    #[error("position {0} is outside of the maze")]
    OutOfBounds(Dims),

    #[error("cells {0} and {1} are not adjacent")]
    NotAdjacent(Dims, Dims),

    #[error("{1:?} wall of cell {0} is not on the maze boundary")]
    NotBoundary(Dims, CellWall),
}
