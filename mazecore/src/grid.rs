use std::ops;

use smallvec::SmallVec;

use crate::{
    array::Array2D,
    cell::{Cell, CellWall},
    dims::Dims,
    error::MazeError,
};

/// Rectangular grid of cells, row 0 being the entrance side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub(crate) cells: Array2D<Cell>,
}

impl Grid {
    /// Fully walled grid, no cell visited.
    ///
    /// Both dimensions must fit into the `i32` components of [`Dims`].
    pub fn new(rows: usize, cols: usize) -> Result<Self, MazeError> {
        let fits = |n: usize| n > 0 && i32::try_from(n).is_ok();
        if !fits(rows) || !fits(cols) {
            return Err(MazeError::InvalidSize { rows, cols });
        }

        Ok(Grid {
            cells: Array2D::new(Cell::new(), rows, cols),
        })
    }

    pub fn rows(&self) -> usize {
        self.cells.rows()
    }

    pub fn cols(&self) -> usize {
        self.cells.cols()
    }

    pub fn size(&self) -> Dims {
        self.cells.size()
    }

    pub fn entrance(&self) -> Dims {
        Dims::ZERO
    }

    pub fn exit(&self) -> Dims {
        self.size() - Dims::ONE
    }

    /// Default carving start, integer division of both dimensions.
    pub fn center(&self) -> Dims {
        self.size() / 2
    }

    pub fn is_in_bounds(&self, pos: Dims) -> bool {
        self.cells.dim_to_idx(pos).is_some()
    }

    pub fn get_cell(&self, pos: Dims) -> Option<&Cell> {
        self.cells.get(pos)
    }

    pub fn get_cell_mut(&mut self, pos: Dims) -> Option<&mut Cell> {
        self.cells.get_mut(pos)
    }

    pub fn cells(&self) -> &Array2D<Cell> {
        &self.cells
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Dims> + '_ {
        self.cells.iter_pos()
    }

    /// Neighbour behind `wall`, `None` if it would be outside of the grid.
    pub fn neighbor(&self, pos: Dims, wall: CellWall) -> Option<Dims> {
        let next = pos + wall.to_coord();
        (self.is_in_bounds(pos) && self.is_in_bounds(next)).then_some(next)
    }

    /// In-bounds neighbours in [`CellWall::get_in_order`] order.
    pub fn get_neighbors(&self, pos: Dims) -> SmallVec<[(CellWall, Dims); 4]> {
        CellWall::get_in_order()
            .into_iter()
            .filter_map(|wall| self.neighbor(pos, wall).map(|next| (wall, next)))
            .collect()
    }

    /// Returns the wall of `cell` shared with `cell2`, if they are adjacent.
    pub fn which_wall_between(cell: Dims, cell2: Dims) -> Option<CellWall> {
        match (cell2.0 - cell.0, cell2.1 - cell.1) {
            (1, 0) => Some(CellWall::Up),
            (-1, 0) => Some(CellWall::Down),
            (0, 1) => Some(CellWall::Right),
            (0, -1) => Some(CellWall::Left),
            _ => None,
        }
    }

    /// Carves a passage between two adjacent cells, clearing the wall on both sides.
    pub fn open_passage(&mut self, from: Dims, to: Dims) -> Result<(), MazeError> {
        for pos in [from, to] {
            if !self.is_in_bounds(pos) {
                return Err(MazeError::OutOfBounds(pos));
            }
        }

        let wall = Self::which_wall_between(from, to).ok_or(MazeError::NotAdjacent(from, to))?;
        self.cells[from].remove_wall(wall);
        self.cells[to].remove_wall(wall.reverse_wall());

        Ok(())
    }

    /// Clears a single wall facing out of the grid, as done for the entrance and the exit.
    pub fn open_boundary(&mut self, pos: Dims, wall: CellWall) -> Result<(), MazeError> {
        if !self.is_in_bounds(pos) {
            return Err(MazeError::OutOfBounds(pos));
        }
        if self.neighbor(pos, wall).is_some() {
            return Err(MazeError::NotBoundary(pos, wall));
        }

        self.cells[pos].remove_wall(wall);
        Ok(())
    }

    /// Whether both cells agree that the wall between them is open.
    pub fn is_passage_open(&self, from: Dims, to: Dims) -> bool {
        match (
            Self::which_wall_between(from, to),
            self.get_cell(from),
            self.get_cell(to),
        ) {
            (Some(wall), Some(a), Some(b)) => a.is_open(wall) && b.is_open(wall.reverse_wall()),
            _ => false,
        }
    }

    pub fn is_visited(&self, pos: Dims) -> bool {
        self.get_cell(pos).is_some_and(Cell::is_visited)
    }

    pub(crate) fn visit(&mut self, pos: Dims) {
        self.cells[pos].set_visited(true);
    }

    pub fn reset_visited(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.set_visited(false);
        }
    }

    /// Number of open interior passages, each counted once.
    pub fn passage_count(&self) -> usize {
        self.iter_pos()
            .map(|pos| {
                [CellWall::Right, CellWall::Up]
                    .into_iter()
                    .filter_map(|wall| self.neighbor(pos, wall))
                    .filter(|&next| self.is_passage_open(pos, next))
                    .count()
            })
            .sum()
    }

    /// Whether every interior wall looks the same from both of its sides.
    pub fn is_wall_symmetric(&self) -> bool {
        self.iter_pos().all(|pos| {
            self.get_neighbors(pos).into_iter().all(|(wall, next)| {
                self.cells[pos].has_wall(wall) == self.cells[next].has_wall(wall.reverse_wall())
            })
        })
    }

    /// Number of cells reachable from `start` through open passages, `start` included.
    pub fn reachable_from(&self, start: Dims) -> usize {
        if !self.is_in_bounds(start) {
            return 0;
        }

        let mut seen = Array2D::new(false, self.rows(), self.cols());
        let mut stack = vec![start];
        seen[start] = true;
        let mut count = 0;

        while let Some(pos) = stack.pop() {
            count += 1;
            for (_, next) in self.get_neighbors(pos) {
                if !seen[next] && self.is_passage_open(pos, next) {
                    seen[next] = true;
                    stack.push(next);
                }
            }
        }

        count
    }

    /// Spanning tree check: connected and exactly `rows * cols - 1` passages.
    pub fn is_perfect(&self) -> bool {
        let cell_count = self.rows() * self.cols();
        self.passage_count() == cell_count - 1 && self.reachable_from(self.entrance()) == cell_count
    }
}

impl ops::Index<Dims> for Grid {
    type Output = Cell;

    fn index(&self, index: Dims) -> &Self::Output {
        &self.cells[index]
    }
}
