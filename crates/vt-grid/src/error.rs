//! Grid-subsystem error type.

use thiserror::Error;

use vt_core::CoreError;

/// Errors produced while constructing a `TileCollisionGrid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("expected {expected} tiles for the grid, got {got}")]
    TileCountMismatch { expected: usize, got: usize },

    #[error("unknown tile character {0:?}")]
    UnknownTile(char),

    #[error("ragged grid: row {row} has {got} tiles, expected {expected}")]
    RaggedRow { row: usize, expected: usize, got: usize },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type GridResult<T> = Result<T, GridError>;
