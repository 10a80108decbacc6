//! Dense 2D grids of subfault values.
//!
//! Rows run along dip (top edge first), columns run along strike. Data is
//! stored row-major, the same order the finite-source body lists its cells.

use serde::{Deserialize, Serialize};

use crate::{FaultError, FaultResult};

/// A row-major 2D grid of `f64` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Grid {
    /// Create a grid from row-major data.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> FaultResult<Self> {
        if rows * cols != data.len() {
            return Err(FaultError::GridLength {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Create a grid filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Create a grid by evaluating `f(row, col)` for every cell.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self { rows, cols, data }
    }

    /// Grid shape as `(rows, cols)`, i.e. `(nz, nx)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col).copied()
    }

    /// Row-major view of all values.
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Maximum value, or `None` for an empty grid.
    pub fn max(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::max)
    }

    /// Apply `f` to every value, producing a new grid of the same shape.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Sum down each column (one value per along-strike cell).
    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.cols];
        for row in self.data.chunks(self.cols.max(1)) {
            for (sum, value) in sums.iter_mut().zip(row) {
                *sum += value;
            }
        }
        sums
    }

    /// Sum across each row (one value per along-dip cell).
    pub fn row_sums(&self) -> Vec<f64> {
        if self.cols == 0 {
            return vec![0.0; self.rows];
        }
        self.data.chunks(self.cols).map(|row| row.iter().sum()).collect()
    }

    /// Sum of the half-open window `rows.start..rows.end` x `cols.start..cols.end`.
    ///
    /// Bounds are clamped to the grid, so a window running past the edge only
    /// sums the cells that exist.
    pub fn window_sum(&self, rows: std::ops::Range<usize>, cols: std::ops::Range<usize>) -> f64 {
        let row_end = rows.end.min(self.rows);
        let col_end = cols.end.min(self.cols);
        let mut total = 0.0;
        for row in rows.start.min(row_end)..row_end {
            let base = row * self.cols;
            total += self.data[base + cols.start.min(col_end)..base + col_end]
                .iter()
                .sum::<f64>();
        }
        total
    }
}
