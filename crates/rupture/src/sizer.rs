//! Characteristic rupture length and width from slip autocorrelation.
//!
//! The thresholded slip is summed into an along-strike and an along-dip
//! profile. Each profile's one-sided autocorrelation is integrated over its
//! cell spacing and normalized by the zero-lag value, giving a coherence
//! length in km that tolerates patchy slip.

use fault_common::{Event, FaultError, FaultResult, Grid};
use serde::Serialize;
use tracing::debug;

use crate::threshold::ThresholdedSlip;

/// Slip summed along each grid axis.
#[derive(Debug, Clone, PartialEq)]
pub struct SlipSums {
    /// One value per along-strike cell (column sums)
    pub along_strike: Vec<f64>,
    /// One value per along-dip cell (row sums)
    pub along_dip: Vec<f64>,
}

/// Sum slip down each column and across each row.
pub fn sum_slip(slip: &Grid) -> SlipSums {
    SlipSums {
        along_strike: slip.column_sums(),
        along_dip: slip.row_sums(),
    }
}

/// One-sided autocorrelation of `profile`.
///
/// Keeps lags `0 .. n - n/2`; index 0 is the zero-lag value and therefore
/// the maximum of the full autocorrelation.
pub fn autocorrelate(profile: &[f64]) -> Vec<f64> {
    let n = profile.len();
    (0..n - n / 2)
        .map(|lag| {
            profile[..n - lag]
                .iter()
                .zip(&profile[lag..])
                .map(|(a, b)| a * b)
                .sum()
        })
        .collect()
}

/// Autocorrelate both profiles of `sums`.
pub fn autocorrelate_sums(sums: &SlipSums) -> SlipSums {
    SlipSums {
        along_strike: autocorrelate(&sums.along_strike),
        along_dip: autocorrelate(&sums.along_dip),
    }
}

/// Trapezoidal integral of evenly spaced samples.
pub fn trapezoid(values: &[f64], spacing: f64) -> f64 {
    values
        .windows(2)
        .map(|pair| (pair[0] + pair[1]) * 0.5)
        .sum::<f64>()
        * spacing
}

/// Estimated rupture extent (km).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RuptureSize {
    pub length: f64,
    pub width: f64,
}

/// Estimates rupture size on a grid with spacing `dx`, `dz` (km).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuptureSizer {
    dx: f64,
    dz: f64,
}

impl RuptureSizer {
    pub fn new(dx: f64, dz: f64) -> FaultResult<Self> {
        for (name, value) in [("dx", dx), ("dz", dz)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(FaultError::InvalidGeometry(format!(
                    "grid spacing {} must be positive, got {}",
                    name, value
                )));
            }
        }
        Ok(Self { dx, dz })
    }

    /// Sizer using the grid spacing recorded on `event`.
    pub fn from_event(event: &Event) -> FaultResult<Self> {
        Self::new(event.dx, event.dz)
    }

    pub fn spacing(&self) -> (f64, f64) {
        (self.dx, self.dz)
    }

    /// Rupture length and width of a thresholded slip grid.
    ///
    /// Fails with [`FaultError::EmptySlip`] when no cell survived the
    /// threshold.
    pub fn size(&self, slip: &ThresholdedSlip) -> FaultResult<RuptureSize> {
        let sums = autocorrelate_sums(&sum_slip(&slip.grid));
        let length = coherence_length(&sums.along_strike, self.dx);
        let width = coherence_length(&sums.along_dip, self.dz);

        match (length, width) {
            (Some(length), Some(width)) => {
                debug!(length, width, "Estimated rupture size");
                Ok(RuptureSize { length, width })
            }
            _ => Err(FaultError::EmptySlip {
                threshold: slip.threshold,
            }),
        }
    }
}

/// Integrated autocorrelation normalized by its zero-lag value.
///
/// A profile with a single lag spans exactly one cell.
fn coherence_length(autocorrelation: &[f64], spacing: f64) -> Option<f64> {
    let zero_lag = *autocorrelation.first()?;
    if !(zero_lag > 0.0) {
        return None;
    }
    if autocorrelation.len() < 2 {
        return Some(spacing);
    }
    Some(trapezoid(autocorrelation, spacing) / zero_lag)
}
