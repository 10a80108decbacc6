//! Subfault corner polygons.
//!
//! Each cell is a planar rectangle described by its center, its along-strike
//! and along-dip offsets from the up-strike top corner, and the patch
//! dimensions. The top edge is found by great-circle navigation; the bottom
//! edge is offset horizontally down-dip in a local orthographic frame rotated
//! to the strike.

use fault_common::{BoundingBox, Event, FaultError, Segment};
use projection::{point_at, OrthographicProjection, StrikeFrame};

use crate::GeoJsonResult;

/// Decimal places kept for longitude and latitude.
pub const LONLAT_DECIMALS: i32 = 4;

/// Decimal places kept for depth (m).
pub const DEPTH_DECIMALS: i32 = 5;

/// Orientation and size of a rectangular patch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchGeometry {
    /// Along-strike extent (km)
    pub length: f64,
    /// Down-dip extent (km)
    pub width: f64,
    /// Degrees clockwise from north
    pub strike: f64,
    /// Degrees from horizontal
    pub dip: f64,
}

/// Reference point of one patch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellReference {
    pub lon: f64,
    pub lat: f64,
    /// Depth (km)
    pub depth: f64,
    /// Along-strike distance from the up-strike edge (km)
    pub dx: f64,
    /// Down-dip distance from the top edge (km)
    pub dy: f64,
}

/// Closed ring of `(lon, lat, depth_m)` vertices.
///
/// Order: top up-strike (P1), top down-strike (P2), bottom under P2,
/// bottom under P1, back to P1.
pub type CornerRing = [[f64; 3]; 5];

/// Computes corner rings for patches of one geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerProjector {
    geometry: PatchGeometry,
}

impl CornerProjector {
    /// Reject patches that would produce a degenerate ring.
    pub fn new(geometry: PatchGeometry) -> Result<Self, FaultError> {
        let PatchGeometry {
            length,
            width,
            strike,
            dip,
        } = geometry;
        if !(length.is_finite() && length > 0.0) {
            return Err(FaultError::InvalidGeometry(format!(
                "patch length must be positive, got {}",
                length
            )));
        }
        if !(width.is_finite() && width > 0.0) {
            return Err(FaultError::InvalidGeometry(format!(
                "patch width must be positive, got {}",
                width
            )));
        }
        if !(strike.is_finite() && dip.is_finite()) {
            return Err(FaultError::InvalidGeometry(format!(
                "strike {} and dip {} must be finite",
                strike, dip
            )));
        }
        Ok(Self { geometry })
    }

    /// Projector for the subfault cells of `segment`, sized by the event's
    /// grid spacing.
    pub fn for_cells(event: &Event, segment: &Segment) -> Result<Self, FaultError> {
        Self::new(PatchGeometry {
            length: event.dx,
            width: event.dz,
            strike: segment.strike(),
            dip: segment.dip(),
        })
    }

    pub fn geometry(&self) -> PatchGeometry {
        self.geometry
    }

    /// Corner ring of the patch located by `cell`.
    pub fn project(&self, cell: CellReference) -> GeoJsonResult<CornerRing> {
        let PatchGeometry {
            length,
            width,
            strike,
            dip,
        } = self.geometry;
        let (sin_dip, cos_dip) = dip.to_radians().sin_cos();

        // Top edge by navigation from the reference point
        let horizontal_dy = cell.dy * cos_dip;
        let theta = if cell.dx == 0.0 {
            0.0
        } else {
            (horizontal_dy / cell.dx).atan().to_degrees()
        };
        let to_corner = cell.dx.hypot(horizontal_dy);
        let p1 = point_at(cell.lon, cell.lat, strike + 180.0 + theta, to_corner);
        let p2 = point_at(p1.0, p1.1, strike, length);
        let top_depth = cell.depth * 1000.0 - 1000.0 * (cell.dy * sin_dip).abs();

        // Bottom edge in a strike-aligned local frame
        let bbox = BoundingBox::from_points([p1, p2]).ok_or_else(|| {
            FaultError::InvalidGeometry("top edge has no vertices".to_string())
        })?;
        let proj = OrthographicProjection::from_bbox(&bbox);
        let frame = StrikeFrame::new(strike);
        let down_dip = cos_dip * width;

        let p4 = proj.unproject(frame.offset_down_dip(proj.project(p1.0, p1.1)?, down_dip))?;
        let p3 = proj.unproject(frame.offset_down_dip(proj.project(p2.0, p2.1)?, down_dip))?;
        let bottom_depth = top_depth + sin_dip * width * 1000.0;

        let top1 = vertex(p1, top_depth);
        Ok([
            top1,
            vertex(p2, top_depth),
            vertex(p3, bottom_depth),
            vertex(p4, bottom_depth),
            top1,
        ])
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

fn vertex((lon, lat): (f64, f64), depth_m: f64) -> [f64; 3] {
    [
        round_to(lon, LONLAT_DECIMALS),
        round_to(lat, LONLAT_DECIMALS),
        round_to(depth_m, DEPTH_DECIMALS),
    ]
}
