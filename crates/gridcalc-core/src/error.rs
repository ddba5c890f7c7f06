//! Error types for gridcalc core.

use thiserror::Error;

/// Errors that can occur while editing or persisting a grid.
///
/// Formula problems are not errors at this level: they end up as display
/// markers in the affected cell.
#[derive(Error, Debug)]
pub enum GridError {
    #[error("Cell at row {row}, column {col} is outside the grid")]
    OutOfBounds { row: usize, col: usize },

    #[error("No such cell: {0}")]
    UnknownCell(String),

    #[error("Invalid grid dimensions {rows}x{cols} (need rows >= 1 and 1 <= cols <= 26)")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Invalid storage slot name: {0:?}")]
    InvalidSlot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GridError>;
