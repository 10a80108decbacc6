//! Local orthographic projection.
//!
//! Maps geographic coordinates onto a plane tangent to the sphere at a center
//! point. Planar coordinates are kilometers east (`x`) and north (`y`) of the
//! center. Only the hemisphere facing the center is representable.

use fault_common::BoundingBox;
use nalgebra::Point2;

use crate::geodetic::{normalize_lon, EARTH_RADIUS_KM};
use crate::{ProjectionError, ProjectionResult};

/// Orthographic projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthographicProjection {
    /// Center longitude (radians)
    lambda0: f64,
    /// Center latitude (radians)
    phi0: f64,
    sin_phi0: f64,
    cos_phi0: f64,
}

impl OrthographicProjection {
    /// Create a projection centered on `(lon0, lat0)` in degrees.
    pub fn new(lon0: f64, lat0: f64) -> Self {
        let phi0 = lat0.to_radians();
        Self {
            lambda0: lon0.to_radians(),
            phi0,
            sin_phi0: phi0.sin(),
            cos_phi0: phi0.cos(),
        }
    }

    /// Create a projection centered on a geographic bounding box.
    pub fn from_bbox(bbox: &BoundingBox) -> Self {
        let (lon0, lat0) = bbox.center();
        Self::new(lon0, lat0)
    }

    /// Center `(lon, lat)` in degrees.
    pub fn center(&self) -> (f64, f64) {
        (self.lambda0.to_degrees(), self.phi0.to_degrees())
    }

    /// Geographic `(lon, lat)` to planar km.
    pub fn project(&self, lon: f64, lat: f64) -> ProjectionResult<Point2<f64>> {
        let phi = lat.to_radians();
        let dlambda = lon.to_radians() - self.lambda0;
        let (sin_phi, cos_phi) = phi.sin_cos();

        // Angular distance from the center must stay within 90 degrees
        let cos_c = self.sin_phi0 * sin_phi + self.cos_phi0 * cos_phi * dlambda.cos();
        if cos_c < 0.0 {
            return Err(ProjectionError::BeyondHorizon { lon, lat });
        }

        let x = EARTH_RADIUS_KM * cos_phi * dlambda.sin();
        let y = EARTH_RADIUS_KM * (self.cos_phi0 * sin_phi - self.sin_phi0 * cos_phi * dlambda.cos());
        Ok(Point2::new(x, y))
    }

    /// Planar km back to geographic `(lon, lat)`.
    pub fn unproject(&self, point: Point2<f64>) -> ProjectionResult<(f64, f64)> {
        let x = point.x / EARTH_RADIUS_KM;
        let y = point.y / EARTH_RADIUS_KM;
        let rho2 = x * x + y * y;
        if !rho2.is_finite() || rho2 > 1.0 {
            return Err(ProjectionError::OffDisk {
                x: point.x,
                y: point.y,
            });
        }

        let cos_c = (1.0 - rho2).sqrt();
        let phi = (cos_c * self.sin_phi0 + y * self.cos_phi0).clamp(-1.0, 1.0).asin();
        let dlambda = x.atan2(self.cos_phi0 * cos_c - y * self.sin_phi0);

        Ok((normalize_lon((self.lambda0 + dlambda).to_degrees()), phi.to_degrees()))
    }
}
