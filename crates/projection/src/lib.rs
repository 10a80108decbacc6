//! Geodetic navigation and local planar projections for fault geometry.
//!
//! Everything assumes a spherical earth of radius
//! [`geodetic::EARTH_RADIUS_KM`]; planar coordinates are kilometers.

pub mod geodetic;
pub mod orthographic;
pub mod rotation;

pub use geodetic::{azimuth, distance, normalize_lon, point_at, EARTH_RADIUS_KM};
pub use orthographic::OrthographicProjection;
pub use rotation::StrikeFrame;

use thiserror::Error;

/// Result type alias using ProjectionError.
pub type ProjectionResult<T> = Result<T, ProjectionError>;

/// Points that a projection cannot represent.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("Point ({lon}, {lat}) is on the far side of the projection center")]
    BeyondHorizon { lon: f64, lat: f64 },

    #[error("Planar point ({x}, {y}) km lies outside the projected disk")]
    OffDisk { x: f64, y: f64 },
}
