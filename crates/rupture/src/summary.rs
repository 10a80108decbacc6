//! Per-segment rupture summary.

use fault_common::{Event, FaultResult, Grid, Segment};
use serde::Serialize;
use tracing::debug;

use crate::sizer::{RuptureSize, RuptureSizer};
use crate::threshold::threshold_slip;
use crate::window::{RuptureWindow, WindowFinder};

/// Geographic corners of a rupture window, as `(lon, lat)`.
///
/// P1 and P2 lie on the top edge (P1 up-strike), P3 and P4 on the bottom
/// edge (P3 under P2).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RuptureCorners {
    pub p1: (f64, f64),
    pub p2: (f64, f64),
    pub p3: (f64, f64),
    pub p4: (f64, f64),
}

/// Look up the cell-center coordinates at the corners of `window`.
///
/// Indices past the last row or column are clamped to the grid edge.
pub fn corner_coordinates(window: &RuptureWindow, lon: &Grid, lat: &Grid) -> Option<RuptureCorners> {
    let (rows, cols) = lon.shape();
    if rows == 0 || cols == 0 || lat.shape() != (rows, cols) {
        return None;
    }
    let left = window.left.min(cols - 1);
    let right = window.right.min(cols - 1);
    let top = window.top.min(rows - 1);
    let bottom = window.bottom.min(rows - 1);
    let at = |row: usize, col: usize| Some((lon.get(row, col)?, lat.get(row, col)?));

    Some(RuptureCorners {
        p1: at(top, left)?,
        p2: at(top, right)?,
        p3: at(bottom, right)?,
        p4: at(bottom, left)?,
    })
}

/// Threshold, estimated size and strongest window of one segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuptureSummary {
    pub segment: usize,
    /// Slip threshold applied (m)
    pub threshold: f64,
    pub size: RuptureSize,
    /// `None` when the estimated window does not fit inside the segment
    pub window: Option<RuptureWindow>,
    pub corners: Option<RuptureCorners>,
}

impl RuptureSummary {
    /// Run the full rupture analysis on one segment.
    pub fn for_segment(event: &Event, index: usize, segment: &Segment) -> FaultResult<Self> {
        let sizer = RuptureSizer::from_event(event)?;
        let finder = WindowFinder::new(event.dx, event.dz)?;

        let thresholded = threshold_slip(&segment.slip);
        let size = sizer.size(&thresholded)?;
        let window = finder.find(&thresholded.grid, size, segment.length(), segment.width());
        let corners = window
            .as_ref()
            .and_then(|w| corner_coordinates(w, &segment.lon, &segment.lat));

        debug!(
            segment = index,
            threshold = thresholded.threshold,
            length = size.length,
            width = size.width,
            window_found = window.is_some(),
            "Summarized segment rupture"
        );
        Ok(Self {
            segment: index,
            threshold: thresholded.threshold,
            size,
            window,
            corners,
        })
    }

    /// Summaries for every segment, in file order.
    pub fn for_segments(event: &Event, segments: &[Segment]) -> FaultResult<Vec<Self>> {
        segments
            .iter()
            .enumerate()
            .map(|(index, segment)| Self::for_segment(event, index, segment))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_coordinates() {
        let lon = Grid::from_fn(3, 4, |_, c| c as f64);
        let lat = Grid::from_fn(3, 4, |r, _| -(r as f64));
        let window = RuptureWindow {
            left: 1,
            right: 3,
            top: 0,
            bottom: 2,
            slip_sum: 1.0,
        };
        let corners = corner_coordinates(&window, &lon, &lat).unwrap();
        assert_eq!(corners.p1, (1.0, 0.0));
        assert_eq!(corners.p2, (3.0, 0.0));
        assert_eq!(corners.p3, (3.0, -2.0));
        assert_eq!(corners.p4, (1.0, -2.0));
    }

    #[test]
    fn test_corner_coordinates_clamped() {
        let lon = Grid::from_fn(2, 2, |_, c| c as f64);
        let lat = Grid::from_fn(2, 2, |r, _| r as f64);
        let window = RuptureWindow {
            left: 0,
            right: 2,
            top: 0,
            bottom: 2,
            slip_sum: 0.0,
        };
        let corners = corner_coordinates(&window, &lon, &lat).unwrap();
        assert_eq!(corners.p3, (1.0, 1.0));
    }
}
