//! Rupture extent analysis for finite-fault slip models.
//!
//! The pipeline for one segment:
//!
//! 1. [`threshold_slip`] zeroes cells below an adaptive slip threshold.
//! 2. [`RuptureSizer`] estimates a characteristic rupture length and width
//!    from the autocorrelated axis sums of the thresholded slip.
//! 3. [`WindowFinder`] slides a window of that size over the segment and
//!    keeps the position covering the most slip.
//!
//! [`RuptureSummary`] runs all three steps.
//!
//! # Example
//!
//! ```
//! use fault_common::Grid;
//! use rupture::{threshold_slip, RuptureSizer, WindowFinder};
//!
//! let slip = Grid::from_fn(5, 5, |r, c| if r == 2 && c == 2 { 6.0 } else { 0.5 });
//! let thresholded = threshold_slip(&slip);
//! let size = RuptureSizer::new(2.0, 2.0)?.size(&thresholded)?;
//! let window = WindowFinder::new(2.0, 2.0)?.find(&thresholded.grid, size, 10.0, 10.0);
//! assert!(window.is_some());
//! # Ok::<(), fault_common::FaultError>(())
//! ```

pub mod sizer;
pub mod summary;
pub mod threshold;
pub mod window;

pub use sizer::{autocorrelate, autocorrelate_sums, sum_slip, trapezoid, RuptureSize, RuptureSizer, SlipSums};
pub use summary::{corner_coordinates, RuptureCorners, RuptureSummary};
pub use threshold::{slip_threshold, threshold_slip, ThresholdedSlip};
pub use window::{rupture_corners, RuptureWindow, WindowFinder};
