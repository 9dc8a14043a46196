use log::{debug, trace};
use smallvec::SmallVec;

use crate::{dims::Dims, grid::Grid, render::Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// The branch leads to the exit.
    Forward,
    /// The branch was a dead end.
    Backtrack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Dims,
    pub to: Dims,
    pub kind: MoveKind,
}

impl Move {
    pub fn is_backtrack(&self) -> bool {
        self.kind == MoveKind::Backtrack
    }
}

/// Result of a search.
///
/// Moves are stored in the order the search finished exploring them, so a branch always comes
/// after every move made deeper inside of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    pub found: bool,
    pub moves: Vec<Move>,
}

impl Solution {
    pub fn forward_moves(&self) -> impl DoubleEndedIterator<Item = &Move> {
        self.moves.iter().filter(|m| m.kind == MoveKind::Forward)
    }

    pub fn backtrack_moves(&self) -> impl DoubleEndedIterator<Item = &Move> {
        self.moves.iter().filter(|m| m.kind == MoveKind::Backtrack)
    }

    /// Cells from the start to the goal, both included.
    ///
    /// Returns `None` when the goal was not reached or the forward moves don't chain up.
    pub fn path(&self) -> Option<Vec<Dims>> {
        if !self.found {
            return None;
        }

        // forward moves are recorded from the goal back to the start
        let mut forward = self.forward_moves().rev();
        let Some(first) = forward.next() else {
            // start is the goal
            return Some(Vec::new());
        };

        let mut path = vec![first.from, first.to];
        for m in forward {
            if path.last() != Some(&m.from) {
                return None;
            }
            path.push(m.to);
        }

        Some(path)
    }
}

struct Frame {
    pos: Dims,
    candidates: SmallVec<[Dims; 4]>,
    next: usize,
    found: bool,
}

/// Depth first search with backtracking, from the entrance to the exit of a [`Grid`].
///
/// Finds *a* path, not necessarily the shortest one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solver;

impl Solver {
    /// Searches from [`Grid::entrance`] to [`Grid::exit`].
    pub fn solve(grid: &mut Grid, renderer: &mut impl Renderer) -> Solution {
        let (start, goal) = (grid.entrance(), grid.exit());
        Self::solve_from(grid, start, goal, renderer)
    }

    /// Searches from `start` to `goal` through open passages, marking cells as visited.
    ///
    /// Every branch taken from a cell is reported to the renderer once it returns, flagged with
    /// that branch's own outcome. Reaching the goal does not stop the remaining siblings from
    /// being explored, so dead ends next to the solution still get drawn. This is intentional.
    ///
    /// Visited flags are left set, reset the grid before searching it again.
    pub fn solve_from(
        grid: &mut Grid,
        start: Dims,
        goal: Dims,
        renderer: &mut impl Renderer,
    ) -> Solution {
        let mut solution = Solution::default();
        if !grid.is_in_bounds(start) || grid.is_visited(start) {
            return solution;
        }

        grid.visit(start);
        if start == goal {
            solution.found = true;
            return solution;
        }

        let mut stack = vec![Self::enter(grid, start)];
        // outcome of the branch that just returned to the top frame
        let mut returned: Option<bool> = None;

        while let Some(frame) = stack.last_mut() {
            if let Some(answer) = returned.take() {
                let to = frame.candidates[frame.next - 1];
                frame.found |= answer;

                let kind = if answer {
                    MoveKind::Forward
                } else {
                    MoveKind::Backtrack
                };
                trace!("{:?} {} -> {}", kind, frame.pos, to);
                solution.moves.push(Move {
                    from: frame.pos,
                    to,
                    kind,
                });
                renderer.draw_move(frame.pos, to, !answer);
                renderer.present();
            }

            // a candidate may have been reached through another branch since it was collected
            while frame.next < frame.candidates.len()
                && grid.is_visited(frame.candidates[frame.next])
            {
                frame.next += 1;
            }

            if frame.next == frame.candidates.len() {
                returned = stack.pop().map(|frame| frame.found);
                continue;
            }

            let next = frame.candidates[frame.next];
            frame.next += 1;

            grid.visit(next);
            if next == goal {
                returned = Some(true);
            } else {
                stack.push(Self::enter(grid, next));
            }
        }

        solution.found = returned.unwrap_or(false);
        debug!(
            "search from {} to {} finished, found: {}, {} moves",
            start,
            goal,
            solution.found,
            solution.moves.len()
        );

        solution
    }

    /// Collects the open, unvisited neighbours of an already visited cell.
    fn enter(grid: &Grid, pos: Dims) -> Frame {
        let candidates = grid
            .get_neighbors(pos)
            .into_iter()
            .map(|(_, next)| next)
            .filter(|&next| !grid.is_visited(next) && grid.is_passage_open(pos, next))
            .collect();

        Frame {
            pos,
            candidates,
            next: 0,
            found: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cell::CellWall,
        generator::Generator,
        render::{Recorder, RenderEvent},
    };

    fn generated(rows: usize, cols: usize, seed: u64) -> Grid {
        let mut grid = Grid::new(rows, cols).unwrap();
        Generator::new()
            .with_seed(Some(seed))
            .generate(&mut grid, &mut ())
            .unwrap();
        grid
    }

    fn mv(from: (i32, i32), to: (i32, i32), kind: MoveKind) -> Move {
        Move {
            from: from.into(),
            to: to.into(),
            kind,
        }
    }

    #[test]
    fn golden_2x2_seed_1() {
        let mut grid = generated(2, 2, 1);
        let solution = Solver::solve(&mut grid, &mut ());

        assert!(solution.found);
        assert_eq!(
            solution.moves,
            vec![
                mv((1, 0), (1, 1), MoveKind::Forward),
                mv((0, 0), (1, 0), MoveKind::Forward),
                mv((0, 0), (0, 1), MoveKind::Backtrack),
            ]
        );
        assert_eq!(
            solution.path(),
            Some(vec![Dims(0, 0), Dims(1, 0), Dims(1, 1)])
        );
    }

    #[test]
    fn golden_3x4_seed_7() {
        let mut grid = generated(3, 4, 7);
        let solution = Solver::solve(&mut grid, &mut ());

        assert!(solution.found);
        assert_eq!(
            solution.moves,
            vec![
                mv((2, 2), (2, 3), MoveKind::Forward),
                mv((2, 1), (2, 2), MoveKind::Forward),
                mv((2, 0), (2, 1), MoveKind::Forward),
                mv((1, 0), (2, 0), MoveKind::Forward),
                mv((0, 0), (1, 0), MoveKind::Forward),
                mv((0, 1), (1, 1), MoveKind::Backtrack),
                mv((0, 0), (0, 1), MoveKind::Backtrack),
            ]
        );
        assert_eq!(
            solution.path(),
            Some(vec![
                Dims(0, 0),
                Dims(1, 0),
                Dims(2, 0),
                Dims(2, 1),
                Dims(2, 2),
                Dims(2, 3)
            ])
        );
    }

    #[test]
    fn path_is_rebuilt_from_last_forward_move() {
        let solution = Solution {
            found: true,
            moves: vec![
                mv((1, 1), (1, 2), MoveKind::Forward),
                mv((0, 1), (0, 2), MoveKind::Backtrack),
                mv((0, 1), (1, 1), MoveKind::Forward),
                mv((0, 0), (0, 1), MoveKind::Forward),
            ],
        };
        assert_eq!(
            solution.path(),
            Some(vec![Dims(0, 0), Dims(0, 1), Dims(1, 1), Dims(1, 2)])
        );
        assert_eq!(
            solution.forward_moves().next_back(),
            Some(&mv((0, 0), (0, 1), MoveKind::Forward))
        );
        assert_eq!(solution.backtrack_moves().rev().count(), 1);

        // forward moves that don't chain up
        let broken = Solution {
            found: true,
            moves: vec![
                mv((2, 2), (2, 3), MoveKind::Forward),
                mv((0, 0), (0, 1), MoveKind::Forward),
            ],
        };
        assert_eq!(broken.path(), None);

        let start_is_goal = Solution {
            found: true,
            moves: Vec::new(),
        };
        assert_eq!(start_is_goal.path(), Some(Vec::new()));
    }

    #[test]
    fn siblings_are_explored_after_success() {
        let mut grid = generated(4, 4, 42);
        let solution = Solver::solve(&mut grid, &mut ());

        assert!(solution.found);
        // (0, 0) first goes down a dead end, then finds the exit through (0, 1)
        assert_eq!(
            solution.moves.first(),
            Some(&mv((0, 0), (1, 0), MoveKind::Backtrack))
        );
        assert_eq!(
            solution.moves.last(),
            Some(&mv((0, 0), (0, 1), MoveKind::Forward))
        );
        // (1, 3) tries (1, 2) after the exit was already found through (2, 3)
        let after_exit = solution
            .moves
            .iter()
            .position(|m| *m == mv((1, 3), (1, 2), MoveKind::Backtrack))
            .unwrap();
        let to_exit = solution
            .moves
            .iter()
            .position(|m| *m == mv((1, 3), (2, 3), MoveKind::Forward))
            .unwrap();
        assert!(to_exit < after_exit);
        assert_eq!(solution.moves.len(), 15);
        assert_eq!(solution.backtrack_moves().count(), 9);
    }

    #[test]
    fn solves_every_generated_maze() {
        for (rows, cols) in [(1, 1), (1, 6), (6, 1), (3, 3), (8, 13), (25, 25)] {
            for seed in 0..15 {
                let mut grid = generated(rows, cols, seed);
                let solution = Solver::solve(&mut grid, &mut ());
                let ctx = format!("{rows}x{cols} seed {seed}");

                assert!(solution.found, "{ctx}");
                let path = solution.path().unwrap();
                if rows * cols == 1 {
                    assert!(path.is_empty(), "{ctx}");
                    continue;
                }

                assert_eq!(path.first(), Some(&grid.entrance()), "{ctx}");
                assert_eq!(path.last(), Some(&grid.exit()), "{ctx}");
                for pair in path.windows(2) {
                    assert_eq!((pair[1] - pair[0]).abs_sum(), 1, "{ctx}");
                    assert!(grid.is_passage_open(pair[0], pair[1]), "{ctx}");
                }
            }
        }
    }

    #[test]
    fn no_cell_is_entered_twice() {
        let mut grid = generated(15, 15, 77);
        let solution = Solver::solve(&mut grid, &mut ());

        let mut targets: Vec<_> = solution.moves.iter().map(|m| m.to).collect();
        let total = targets.len();
        targets.sort_by_key(|d| (d.0, d.1));
        targets.dedup();
        assert_eq!(targets.len(), total);
        assert!(!targets.contains(&grid.entrance()));
    }

    #[test]
    fn loops_do_not_revisit() {
        // fully open 2x2 block has a cycle
        let mut grid = Grid::new(2, 2).unwrap();
        for (a, b) in [
            (Dims(0, 0), Dims(0, 1)),
            (Dims(0, 1), Dims(1, 1)),
            (Dims(1, 1), Dims(1, 0)),
            (Dims(1, 0), Dims(0, 0)),
        ] {
            grid.open_passage(a, b).unwrap();
        }

        let solution = Solver::solve(&mut grid, &mut ());
        assert!(solution.found);
        assert_eq!(
            solution.moves,
            vec![
                mv((1, 0), (1, 1), MoveKind::Forward),
                mv((0, 0), (1, 0), MoveKind::Forward),
                // (0, 1) only leads to cells that are already visited
                mv((0, 0), (0, 1), MoveKind::Backtrack),
            ]
        );
    }

    #[test]
    fn unreachable_exit() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.open_passage(Dims(0, 0), Dims(0, 1)).unwrap();
        grid.open_passage(Dims(0, 1), Dims(1, 1)).unwrap();

        let solution = Solver::solve(&mut grid, &mut ());
        assert!(!solution.found);
        assert_eq!(solution.path(), None);
        assert!(solution.moves.iter().all(Move::is_backtrack));
        assert_eq!(solution.moves.len(), 2);
    }

    #[test]
    fn walled_grid_has_no_moves() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.open_boundary(Dims(0, 0), CellWall::Left).unwrap();

        let solution = Solver::solve(&mut grid, &mut ());
        assert!(!solution.found);
        assert!(solution.moves.is_empty());
    }

    #[test]
    fn one_sided_wall_is_not_a_passage() {
        let mut grid = Grid::new(1, 2).unwrap();
        grid.get_cell_mut(Dims(0, 0)).unwrap().remove_wall(CellWall::Right);

        assert!(!Solver::solve(&mut grid, &mut ()).found);
    }

    #[test]
    fn moves_are_drawn() {
        let mut grid = generated(2, 2, 1);
        let mut recorder = Recorder::new();
        let solution = Solver::solve(&mut grid, &mut recorder);

        let drawn: Vec<_> = recorder.moves().collect();
        let expected: Vec<_> = solution
            .moves
            .iter()
            .map(|m| (m.from, m.to, m.is_backtrack()))
            .collect();
        assert_eq!(drawn, expected);
        assert_eq!(recorder.frames, solution.moves.len());
        assert!(recorder
            .events
            .iter()
            .all(|e| matches!(e, RenderEvent::Move { .. })));
    }

    #[test]
    fn visited_flags_stay_until_reset() {
        let mut grid = generated(5, 5, 3);
        assert!(Solver::solve(&mut grid, &mut ()).found);
        assert!(grid.is_visited(grid.entrance()));

        // start already visited, nothing to do
        assert_eq!(Solver::solve(&mut grid, &mut ()), Solution::default());

        grid.reset_visited();
        assert!(Solver::solve(&mut grid, &mut ()).found);
    }

    #[test]
    fn custom_endpoints() {
        let mut grid = generated(6, 6, 11);
        let solution = Solver::solve_from(&mut grid, Dims(5, 5), Dims(0, 0), &mut ());
        let path = solution.path().unwrap();

        assert_eq!(path.first(), Some(&Dims(5, 5)));
        assert_eq!(path.last(), Some(&Dims(0, 0)));

        grid.reset_visited();
        let outside = Solver::solve_from(&mut grid, Dims(6, 0), Dims(0, 0), &mut ());
        assert!(!outside.found);
    }
}
