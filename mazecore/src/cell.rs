use crate::{dims::Dims, error::MazeError};

/// One of the four walls of a cell, in the order the wall flags are stored.
///
/// Rows grow along the y axis of drawing space, so `Up` is the wall shared with the cell in the
/// next row (`row + 1`) and `Down` the one shared with the previous row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellWall {
    Left,
    Right,
    Up,
    Down,
}

impl CellWall {
    pub const ALL: [CellWall; 4] = [CellWall::Left, CellWall::Right, CellWall::Up, CellWall::Down];

    pub fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Up => 2,
            Self::Down => 3,
        }
    }

    pub fn to_coord(self) -> Dims {
        match self {
            Self::Left => Dims(0, -1),
            Self::Right => Dims(0, 1),
            Self::Up => Dims(1, 0),
            Self::Down => Dims(-1, 0),
        }
    }

    pub fn reverse_wall(self) -> CellWall {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Order in which neighbours are tried by both the generator and the solver:
    /// next row, previous row, next column, previous column.
    ///
    /// Seeded generation is only reproducible while this order stays the same.
    pub fn get_in_order() -> [CellWall; 4] {
        [Self::Up, Self::Down, Self::Right, Self::Left]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    walls: [bool; 4],
    visited: bool,
}

impl Cell {
    /// Fully enclosed, unvisited cell.
    pub fn new() -> Cell {
        Cell {
            walls: [true; 4],
            visited: false,
        }
    }

    /// Builds a cell from wall flags in `Left, Right, Up, Down` order.
    pub fn from_walls(walls: &[bool]) -> Result<Cell, MazeError> {
        let walls: [bool; 4] = walls
            .try_into()
            .map_err(|_| MazeError::WallCount(walls.len()))?;

        Ok(Cell {
            walls,
            visited: false,
        })
    }

    pub fn walls(&self) -> [bool; 4] {
        self.walls
    }

    pub fn has_wall(&self, wall: CellWall) -> bool {
        self.walls[wall.index()]
    }

    pub fn is_open(&self, wall: CellWall) -> bool {
        !self.has_wall(wall)
    }

    pub fn remove_wall(&mut self, wall: CellWall) {
        self.walls[wall.index()] = false;
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}
