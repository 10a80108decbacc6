//! Error types for finite-source file parsing.

use fault_common::FaultError;
use thiserror::Error;

/// Result type for FSP parser operations.
pub type FspResult<T> = Result<T, FspError>;

/// Errors that can occur while reading a finite-source file.
///
/// Line numbers are 1-based.
#[derive(Error, Debug)]
pub enum FspError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required header field never appeared before the data block
    #[error("Missing required header field '{field}' before data at line {line}")]
    MissingField { field: &'static str, line: usize },

    /// A recognized header line does not have the expected token layout
    #[error("Malformed '{label}' header at line {line}: {reason}")]
    MalformedHeader {
        line: usize,
        label: &'static str,
        reason: String,
    },

    /// Extent divided by spacing is not a whole number of cells
    #[error("{axis} extent {extent} km is not a multiple of spacing {spacing} km (ratio {ratio:.4})")]
    GridSize {
        axis: &'static str,
        extent: f64,
        spacing: f64,
        ratio: f64,
    },

    /// nx * nz does not fit in memory addressing
    #[error("Grid of {nx} x {nz} cells is too large")]
    GridOverflow { nx: usize, nz: usize },

    /// Computed grid size disagrees with the size asserted in the header
    #[error("Header declares {axis} = {declared}, but extent/spacing gives {computed}")]
    GridCountMismatch {
        axis: &'static str,
        declared: usize,
        computed: usize,
    },

    /// Multi-segment file holds a different number of segments than `Nsg` declares
    #[error("Header declares {declared} segment(s), file contains {found}")]
    SegmentCountMismatch { declared: usize, found: usize },

    /// A data row has the wrong number of columns for the layout
    #[error("Data row at line {line} has {found} column(s), layout declares {expected}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// The data block is shorter or longer than nx*nz
    #[error("Expected {expected} data rows for segment {segment}, found {found}")]
    RowCount {
        segment: usize,
        expected: usize,
        found: usize,
    },

    /// A data token is not a number
    #[error("Invalid number '{token}' at line {line}")]
    InvalidNumber { line: usize, token: String },

    /// Column layout cannot describe a segment
    #[error("Invalid column layout: {0}")]
    InvalidLayout(String),

    #[error(transparent)]
    Fault(#[from] FaultError),
}
