//! Mapping from grid positions to drawing space.
//!
//! None of this takes part in generation or solving, it only gives renderers the coordinates to
//! draw at.

use crate::{
    cell::CellWall,
    dims::{Dims, Point},
    error::MazeError,
};

/// Axis aligned rectangle of a single cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    sw: Point,
    ne: Point,
}

impl CellRect {
    /// Builds the rectangle spanned by two opposite corners, in any order.
    pub fn from_corners(corners: &[Point]) -> Result<Self, MazeError> {
        match corners {
            &[a, b] => Ok(CellRect {
                sw: a.min(b),
                ne: a.max(b),
            }),
            _ => Err(MazeError::CornerCount(corners.len())),
        }
    }

    pub fn sw(&self) -> Point {
        self.sw
    }

    pub fn ne(&self) -> Point {
        self.ne
    }

    pub fn nw(&self) -> Point {
        Point::new(self.sw.x, self.ne.y)
    }

    pub fn se(&self) -> Point {
        Point::new(self.ne.x, self.sw.y)
    }

    pub fn center(&self) -> Point {
        (self.sw + self.ne) / 2.0
    }

    /// End points of the segment drawn for `wall`.
    pub fn edge(&self, wall: CellWall) -> (Point, Point) {
        match wall {
            CellWall::Left => (self.sw, self.nw()),
            CellWall::Right => (self.se(), self.ne),
            CellWall::Up => (self.ne, self.nw()),
            CellWall::Down => (self.se(), self.sw),
        }
    }
}

/// Grid origin and cell dimensions in drawing units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub origin: Point,
    pub cell_size: Point,
}

impl Layout {
    pub fn new(origin: Point, cell_size: Point) -> Self {
        Layout { origin, cell_size }
    }

    pub fn cell_rect(&self, pos: Dims) -> CellRect {
        let corner = |row: i32, col: i32| {
            self.origin + Point::new(col as f64 * self.cell_size.x, row as f64 * self.cell_size.y)
        };

        let (a, b) = (corner(pos.0, pos.1), corner(pos.0 + 1, pos.1 + 1));
        CellRect {
            sw: a.min(b),
            ne: a.max(b),
        }
    }

    pub fn cell_center(&self, pos: Dims) -> Point {
        self.cell_rect(pos).center()
    }

    /// Far corner of a `rows` x `cols` grid.
    pub fn extent(&self, rows: usize, cols: usize) -> Point {
        self.origin + Point::new(cols as f64 * self.cell_size.x, rows as f64 * self.cell_size.y)
    }
}
