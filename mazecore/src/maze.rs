use log::{info, warn};

use crate::{
    dims::{Dims, Point},
    error::MazeError,
    generator::Generator,
    geometry::Layout,
    grid::Grid,
    render::Renderer,
    solver::{Solution, Solver},
};

/// Construction parameters of a [`Maze`].
///
/// `origin` and `cell_size` only matter for drawing, they are handed to the renderer through
/// [`Maze::layout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MazeParams {
    pub origin: Point,
    pub rows: usize,
    pub cols: usize,
    pub cell_size: Point,
    pub seed: Option<u64>,
}

impl Default for MazeParams {
    fn default() -> Self {
        MazeParams {
            origin: Point::new(10.0, 10.0),
            rows: 20,
            cols: 20,
            cell_size: Point::new(30.0, 30.0),
            seed: None,
        }
    }
}

impl MazeParams {
    pub fn layout(&self) -> Layout {
        Layout::new(self.origin, self.cell_size)
    }
}

/// Generated maze bundled with the renderer that draws it.
#[derive(Debug)]
pub struct Maze<R: Renderer> {
    grid: Grid,
    layout: Layout,
    seed: u64,
    renderer: R,
}

impl<R: Renderer> Maze<R> {
    /// Builds the grid, draws it fully walled and carves the maze into it.
    pub fn new(params: MazeParams, mut renderer: R) -> Result<Self, MazeError> {
        let mut grid = Grid::new(params.rows, params.cols)?;
        draw_all(&grid, &mut renderer);

        let seed = Generator::new()
            .with_seed(params.seed)
            .generate(&mut grid, &mut renderer)?;
        draw_all(&grid, &mut renderer);

        Ok(Maze {
            grid,
            layout: params.layout(),
            seed,
            renderer,
        })
    }

    /// Searches a path from the entrance to the exit, drawing every move.
    ///
    /// Visited flags are reset first, so solving twice gives the same result.
    pub fn solve(&mut self) -> Solution {
        self.grid.reset_visited();
        let solution = Solver::solve(&mut self.grid, &mut self.renderer);

        if solution.found {
            info!(
                "solved in {} moves, {} of them backtracking",
                solution.moves.len(),
                solution.backtrack_moves().count()
            );
        } else {
            warn!("exit {} is not reachable", self.grid.exit());
        }

        solution
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Seed the maze was generated with, pass it back in [`MazeParams::seed`] to get it again.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn size(&self) -> Dims {
        self.grid.size()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

fn draw_all(grid: &Grid, renderer: &mut impl Renderer) {
    for pos in grid.iter_pos() {
        renderer.draw_cell(pos, grid[pos].walls());
    }
    renderer.present();
}
