//! Error types for finite-fault model operations.

use thiserror::Error;

/// Result type alias using FaultError.
pub type FaultResult<T> = Result<T, FaultError>;

/// Errors raised while building or querying a fault model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FaultError {
    #[error("Segment index {index} out of range for {count} segment(s)")]
    SegmentIndex { index: usize, count: usize },

    #[error("Grid shape mismatch for '{field}': expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        field: String,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Grid data length {len} does not fill a {rows}x{cols} grid")]
    GridLength { rows: usize, cols: usize, len: usize },

    #[error("Missing required grid: {0}")]
    MissingGrid(String),

    #[error("Invalid patch geometry: {0}")]
    InvalidGeometry(String),

    #[error("No slip above threshold {threshold} m")]
    EmptySlip { threshold: f64 },

    #[error("Invalid color scale: {0}")]
    InvalidColorScale(String),
}
