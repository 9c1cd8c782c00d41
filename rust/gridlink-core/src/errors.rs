use thiserror::Error;

/// Structural problems with a decoded matrix. A rejected matrix never
/// replaces the current grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidGrid {
    #[error("invalid grid: zero-size matrix ({rows}x{cols})")]
    ZeroSize { rows: usize, cols: usize },
    #[error("invalid grid: row {row} has {len} cells, expected {expected}")]
    Ragged { row: usize, len: usize, expected: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    #[error("asset set is empty")]
    NoAssets,
    #[error("cell size must be positive and finite, got {0}")]
    BadCellSize(f32),
}
