use log::{debug, trace};
use rand::{thread_rng, Rng, SeedableRng as _};
use smallvec::SmallVec;

use crate::{cell::CellWall, dims::Dims, error::MazeError, grid::Grid, render::Renderer};

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Randomized recursive backtracker.
///
/// Turns a fully walled [`Grid`] into a perfect maze: the open passages form a spanning tree,
/// so there is exactly one simple path between any two cells. The entrance is the left wall of
/// the first cell and the exit the right wall of the last one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Generator {
    seed: Option<u64>,
    start: Option<Dims>,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed for the random source, `None` picks a fresh one on every run.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Cell the carving starts from, defaults to [`Grid::center`].
    pub fn with_start(mut self, start: Dims) -> Self {
        self.start = Some(start);
        self
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| thread_rng().gen())
    }

    /// Generates the maze into `grid` and returns the seed that was used.
    pub fn generate(
        &self,
        grid: &mut Grid,
        renderer: &mut impl Renderer,
    ) -> Result<u64, MazeError> {
        let seed = self.resolve_seed();
        debug!(
            "generating {}x{} maze with seed {}",
            grid.rows(),
            grid.cols(),
            seed
        );

        let mut rng = Random::seed_from_u64(seed);
        self.generate_with_rng(grid, &mut rng, renderer)?;
        Ok(seed)
    }

    /// Same as [`Generator::generate`], but draws from the given random source and ignores the
    /// configured seed.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        rng: &mut R,
        renderer: &mut impl Renderer,
    ) -> Result<(), MazeError> {
        let start = self.start.unwrap_or_else(|| grid.center());
        if !grid.is_in_bounds(start) {
            return Err(MazeError::OutOfBounds(start));
        }

        break_entrance_and_exit(grid, renderer)?;
        carve(grid, start, rng, renderer)?;
        grid.reset_visited();

        Ok(())
    }
}

/// Opens the outward facing walls of the entrance and exit cells.
pub fn break_entrance_and_exit(
    grid: &mut Grid,
    renderer: &mut impl Renderer,
) -> Result<(), MazeError> {
    for (pos, wall) in [
        (grid.entrance(), CellWall::Left),
        (grid.exit(), CellWall::Right),
    ] {
        grid.open_boundary(pos, wall)?;
        renderer.draw_cell(pos, grid[pos].walls());
        renderer.present();
    }

    Ok(())
}

/// Carves passages depth first from `start` until every reachable cell is visited.
///
/// Equivalent to the recursive formulation (visit a cell, then keep picking a random unvisited
/// neighbour, open the wall and recurse into it until none is left), but keeps the frontier on
/// an explicit stack so large grids don't overflow the call stack. One `gen_range` is drawn per
/// carved passage, also when there is a single candidate.
pub fn carve<R: Rng + ?Sized>(
    grid: &mut Grid,
    start: Dims,
    rng: &mut R,
    renderer: &mut impl Renderer,
) -> Result<(), MazeError> {
    if !grid.is_in_bounds(start) {
        return Err(MazeError::OutOfBounds(start));
    }

    let mut stack = Vec::with_capacity(grid.rows() * grid.cols());
    grid.visit(start);
    stack.push(start);

    while let Some(&current) = stack.last() {
        let unvisited = grid
            .get_neighbors(current)
            .into_iter()
            .map(|(_, pos)| pos)
            .filter(|&pos| !grid.is_visited(pos))
            .collect::<SmallVec<[_; 4]>>();

        if unvisited.is_empty() {
            // nothing can carve into this cell anymore, its walls are final
            stack.pop();
            renderer.draw_cell(current, grid[current].walls());
            renderer.present();
            continue;
        }

        let chosen = unvisited[rng.gen_range(0..unvisited.len())];
        trace!("carving {} -> {}", current, chosen);

        grid.open_passage(current, chosen)?;
        grid.visit(chosen);
        stack.push(chosen);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;

    use super::*;
    use crate::render::Recorder;

    fn generated(rows: usize, cols: usize, seed: u64) -> Grid {
        let mut grid = Grid::new(rows, cols).unwrap();
        Generator::new()
            .with_seed(Some(seed))
            .generate(&mut grid, &mut ())
            .unwrap();
        grid
    }

    fn wall_bits(grid: &Grid) -> Vec<[u8; 4]> {
        grid.cells()
            .iter()
            .map(|cell| cell.walls().map(u8::from))
            .collect()
    }

    #[test]
    fn golden_2x2_seed_1() {
        let grid = generated(2, 2, 1);

        #[rustfmt::skip]
        let expected: Vec<[u8; 4]> = vec![
            [0, 0, 0, 1], [0, 1, 1, 1],
            [1, 0, 1, 0], [0, 0, 1, 1],
        ];
        assert_eq!(wall_bits(&grid), expected);
    }

    #[test]
    fn golden_3x4_seed_7() {
        let grid = generated(3, 4, 7);

        #[rustfmt::skip]
        let expected: Vec<[u8; 4]> = vec![
            [0, 0, 0, 1], [0, 1, 0, 1], [1, 0, 0, 1], [0, 1, 0, 1],
            [1, 1, 0, 0], [1, 1, 1, 0], [1, 1, 1, 0], [1, 1, 0, 0],
            [1, 0, 1, 0], [0, 0, 1, 1], [0, 0, 1, 1], [0, 0, 1, 0],
        ];
        assert_eq!(wall_bits(&grid), expected);
    }

    #[test]
    fn generated_mazes_are_perfect() {
        let sizes = [(1, 1), (1, 5), (5, 1), (2, 2), (3, 7), (10, 10), (17, 23)];

        for (rows, cols) in sizes {
            for seed in 0..20 {
                let grid = generated(rows, cols, seed);
                let ctx = format!("{rows}x{cols} seed {seed}");

                assert_eq!(grid.passage_count(), rows * cols - 1, "{ctx}");
                assert_eq!(grid.reachable_from(grid.entrance()), rows * cols, "{ctx}");
                assert!(grid.is_perfect(), "{ctx}");
                assert!(grid.is_wall_symmetric(), "{ctx}");
                assert!(grid[grid.entrance()].is_open(CellWall::Left), "{ctx}");
                assert!(grid[grid.exit()].is_open(CellWall::Right), "{ctx}");
                assert!(grid.iter_pos().all(|pos| !grid.is_visited(pos)), "{ctx}");
            }
        }
    }

    #[test]
    fn single_cell_keeps_both_openings() {
        let grid = generated(1, 1, 3);
        assert_eq!(grid[Dims::ZERO].walls(), [false, false, true, true]);
    }

    #[test]
    fn same_seed_same_maze() {
        assert_eq!(generated(12, 9, 1234), generated(12, 9, 1234));
        assert_ne!(generated(12, 9, 1234), generated(12, 9, 1235));
    }

    #[test]
    fn unseeded_runs_still_make_perfect_mazes() {
        let generator = Generator::new();
        assert_eq!(generator.seed(), None);

        let mut grid = Grid::new(6, 8).unwrap();
        let seed = generator.generate(&mut grid, &mut ()).unwrap();

        assert!(grid.is_perfect());
        assert_eq!(grid, generated(6, 8, seed));
    }

    #[test]
    fn always_first_candidate() {
        // StepRng(0, 0) always yields index 0, so the carving follows the neighbour order
        let mut grid = Grid::new(3, 3).unwrap();
        Generator::new()
            .generate_with_rng(&mut grid, &mut StepRng::new(0, 0), &mut ())
            .unwrap();

        let mut expected = Grid::new(3, 3).unwrap();
        expected.open_boundary(Dims(0, 0), CellWall::Left).unwrap();
        expected.open_boundary(Dims(2, 2), CellWall::Right).unwrap();
        let snake = [
            Dims(1, 1),
            Dims(2, 1),
            Dims(2, 2),
            Dims(1, 2),
            Dims(0, 2),
            Dims(0, 1),
            Dims(0, 0),
            Dims(1, 0),
            Dims(2, 0),
        ];
        for pair in snake.windows(2) {
            expected.open_passage(pair[0], pair[1]).unwrap();
        }

        assert_eq!(grid, expected);
    }

    #[test]
    fn custom_start() {
        let mut grid = Grid::new(4, 4).unwrap();
        Generator::new()
            .with_seed(Some(9))
            .with_start(Dims(3, 0))
            .generate(&mut grid, &mut ())
            .unwrap();
        assert!(grid.is_perfect());

        let mut grid = Grid::new(4, 4).unwrap();
        let result = Generator::new()
            .with_seed(Some(9))
            .with_start(Dims(4, 0))
            .generate(&mut grid, &mut ());
        assert_eq!(result, Err(MazeError::OutOfBounds(Dims(4, 0))));
        // nothing was touched
        assert_eq!(grid, Grid::new(4, 4).unwrap());
    }

    #[test]
    fn cells_are_redrawn_when_exhausted() {
        let mut grid = Grid::new(2, 2).unwrap();
        let mut recorder = Recorder::new();
        Generator::new()
            .with_seed(Some(1))
            .generate(&mut grid, &mut recorder)
            .unwrap();

        let drawn: Vec<_> = recorder.cells().map(|(pos, _)| pos).collect();
        assert_eq!(
            drawn,
            vec![
                // entrance and exit
                Dims(0, 0),
                Dims(1, 1),
                // exhausted cells, the start comes last
                Dims(0, 1),
                Dims(0, 0),
                Dims(1, 0),
                Dims(1, 1),
            ]
        );
        assert_eq!(recorder.frames, 6);

        // the last drawing of each cell shows its final walls
        for pos in grid.iter_pos() {
            let last = recorder.cells().filter(|(p, _)| *p == pos).last().unwrap();
            assert_eq!(last.1, grid[pos].walls());
        }
    }

    #[test]
    fn large_grid_does_not_overflow() {
        let grid = generated(200, 300, 5);
        assert!(grid.is_perfect());
    }
}
