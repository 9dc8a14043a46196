use std::io;

use mazecore::MazeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid settings file: {0}")]
    Config(#[from] ron::error::SpannedError),
    #[error("Cannot serialize settings: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Maze error: {0}")]
    Maze(#[from] MazeError),
}
