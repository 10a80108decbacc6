//! Strike-aligned planar frame.
//!
//! Rotating projected coordinates by the strike angle turns the fault trace
//! into a vertical line, so the down-dip direction is `+x` in the rotated
//! frame.

use nalgebra::{Point2, Rotation2, Vector2};

/// Rotation between projected km and a strike-aligned frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikeFrame {
    rotation: Rotation2<f64>,
}

impl StrikeFrame {
    /// Frame for a fault striking `strike` degrees clockwise from north.
    pub fn new(strike: f64) -> Self {
        Self {
            rotation: Rotation2::new(strike.to_radians()),
        }
    }

    /// Projected point into the strike-aligned frame.
    pub fn to_frame(&self, point: Point2<f64>) -> Point2<f64> {
        self.rotation * point
    }

    /// Strike-aligned point back into projected coordinates.
    pub fn from_frame(&self, point: Point2<f64>) -> Point2<f64> {
        self.rotation.inverse() * point
    }

    /// Move `point` horizontally down-dip by `distance` km.
    pub fn offset_down_dip(&self, point: Point2<f64>, distance: f64) -> Point2<f64> {
        self.from_frame(self.to_frame(point) + Vector2::new(distance, 0.0))
    }
}
