//! Perfect maze generation with a randomized recursive backtracker and depth first solving.
//!
//! Drawing is left to the caller through the [`Renderer`] trait, everything works headless with
//! `&mut ()` as the renderer.

pub mod array;
pub mod cell;
pub mod dims;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod grid;
pub mod maze;
pub mod render;
pub mod solver;

pub use cell::{Cell, CellWall};
pub use dims::{Dims, Point};
pub use error::MazeError;
pub use generator::{Generator, Random};
pub use geometry::{CellRect, Layout};
pub use grid::Grid;
pub use maze::{Maze, MazeParams};
pub use render::{Recorder, RenderEvent, Renderer};
pub use solver::{Move, MoveKind, Solution, Solver};
