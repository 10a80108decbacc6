//! Adaptive slip threshold.

use fault_common::Grid;

/// Fraction of the peak slip used as the nominal threshold.
pub const THRESHOLD_FRACTION: f64 = 0.1;

/// Floor applied to the nominal threshold (m).
pub const BASELINE_THRESHOLD: f64 = 1.0;

/// Threshold for events whose peak slip is below 1 m.
pub const SMALL_EVENT_THRESHOLD: f64 = 0.2;

/// Threshold for events whose peak slip is below 3 m.
pub const MODERATE_EVENT_THRESHOLD: f64 = 0.5;

/// Threshold (m) for a slip field with peak `max_slip`.
///
/// | peak          | threshold              |
/// |---------------|------------------------|
/// | `< 1`         | 0.2                    |
/// | `1 ..< 3`     | 0.5                    |
/// | `>= 3`        | `max(0.1 * peak, 1.0)` |
pub fn slip_threshold(max_slip: f64) -> f64 {
    if max_slip < 1.0 {
        SMALL_EVENT_THRESHOLD
    } else if max_slip < 3.0 {
        MODERATE_EVENT_THRESHOLD
    } else {
        (max_slip * THRESHOLD_FRACTION).max(BASELINE_THRESHOLD)
    }
}

/// Slip field with every cell below the adaptive threshold zeroed.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdedSlip {
    pub grid: Grid,
    pub threshold: f64,
}

/// Zero every cell of `slip` below its adaptive threshold.
pub fn threshold_slip(slip: &Grid) -> ThresholdedSlip {
    let threshold = slip_threshold(slip.max().unwrap_or(0.0));
    let grid = slip.map(|v| if v < threshold { 0.0 } else { v });
    ThresholdedSlip { grid, threshold }
}
