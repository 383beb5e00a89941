use alloc::string::String;
use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {mines} mines do not fit a {size}x{size} board")]
    InvalidConfiguration { size: Coord, mines: CellCount },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),
    #[error("Storage write failed: {0}")]
    StorageError(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
