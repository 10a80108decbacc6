//! Search for the strongest rupture window.
//!
//! A window of the estimated rupture size slides across the segment one cell
//! at a time. Its cell bounds are `floor(position / spacing)` at each step,
//! and the window covering the most thresholded slip wins; on ties the first
//! position found is kept.

use fault_common::{FaultError, FaultResult, Grid};
use serde::Serialize;
use tracing::{debug, warn};

use crate::sizer::{trapezoid, RuptureSize};

/// Half-open cell bounds of the strongest rupture window.
///
/// Rows `top..bottom` run down-dip, columns `left..right` along strike.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RuptureWindow {
    pub left: usize,
    pub right: usize,
    pub top: usize,
    pub bottom: usize,
    /// Thresholded slip summed over the window
    pub slip_sum: f64,
}

/// Exhaustive window search on a grid with spacing `dx`, `dz` (km).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowFinder {
    dx: f64,
    dz: f64,
}

impl WindowFinder {
    pub fn new(dx: f64, dz: f64) -> FaultResult<Self> {
        if !(dx.is_finite() && dx > 0.0 && dz.is_finite() && dz > 0.0) {
            return Err(FaultError::InvalidGeometry(format!(
                "window step must be positive, got dx = {}, dz = {}",
                dx, dz
            )));
        }
        Ok(Self { dx, dz })
    }

    /// Find the window of `size` holding the most slip within a segment of
    /// `fault_length` x `fault_width` km.
    ///
    /// Returns `None` when the window never fits inside the segment; the
    /// caller decides whether an undetermined window is fatal.
    pub fn find(
        &self,
        thresholded: &Grid,
        size: RuptureSize,
        fault_length: f64,
        fault_width: f64,
    ) -> Option<RuptureWindow> {
        let mut best: Option<RuptureWindow> = None;

        for left_step in 0.. {
            let left_location = left_step as f64 * self.dx;
            let right_location = left_location + size.length;
            if !(right_location < fault_length) {
                break;
            }
            let left = cell_index(left_location, self.dx);
            let right = cell_index(right_location, self.dx);

            for top_step in 0.. {
                let top_location = top_step as f64 * self.dz;
                let bottom_location = top_location + size.width;
                if !(bottom_location < fault_width) {
                    break;
                }
                let top = cell_index(top_location, self.dz);
                let bottom = cell_index(bottom_location, self.dz);

                let slip_sum = thresholded.window_sum(top..bottom, left..right);
                if best.map_or(true, |b| slip_sum > b.slip_sum) {
                    best = Some(RuptureWindow {
                        left,
                        right,
                        top,
                        bottom,
                        slip_sum,
                    });
                }
            }
        }

        match best {
            Some(window) => debug!(
                left = window.left,
                right = window.right,
                top = window.top,
                bottom = window.bottom,
                slip_sum = window.slip_sum,
                "Found rupture window"
            ),
            None => warn!(
                length = size.length,
                width = size.width,
                fault_length,
                fault_width,
                "Rupture window does not fit inside the segment"
            ),
        }
        best
    }
}

fn cell_index(location: f64, spacing: f64) -> usize {
    (location / spacing).floor().max(0.0) as usize
}

/// Strongest 1-D window of extent `window` over a summed slip `profile`
/// sampled every `spacing` km along a segment of extent `extent`.
///
/// Windows are compared by trapezoidal area. Returns half-open
/// `(first, last)` indices, or `None` when the window never fits.
pub fn rupture_corners(
    window: f64,
    spacing: f64,
    extent: f64,
    profile: &[f64],
) -> Option<(usize, usize)> {
    if !(spacing.is_finite() && spacing > 0.0) {
        return None;
    }

    let mut best: Option<(usize, usize, f64)> = None;
    for step in 0.. {
        let first_location = step as f64 * spacing;
        let last_location = first_location + window;
        if !(last_location < extent) {
            break;
        }
        let first = cell_index(first_location, spacing);
        let last = cell_index(last_location, spacing);
        let end = last.min(profile.len());
        let area = trapezoid(&profile[first.min(end)..end], spacing);
        if best.map_or(true, |(_, _, best_area)| area > best_area) {
            best = Some((first, last, area));
        }
    }
    best.map(|(first, last, _)| (first, last))
}
