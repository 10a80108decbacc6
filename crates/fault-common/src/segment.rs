//! Fault segments: one planar patch discretized into subfault cells.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::{FaultError, FaultResult, Grid};

/// Field names that define cell geometry and are never passed through as
/// per-cell properties.
pub const GEOMETRY_FIELDS: [&str; 8] = [
    "strike", "dip", "length", "width", "lat", "lon", "depth", "slip",
];

/// Orientation and extent of one segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentGeometry {
    /// Strike (degrees clockwise from north)
    pub strike: f64,
    /// Dip (degrees from horizontal)
    pub dip: f64,
    /// Along-strike extent (km)
    pub length: f64,
    /// Down-dip extent (km)
    pub width: f64,
}

/// A fault segment with its subfault grids.
///
/// Every grid shares the shape `(nz, nx)`. The four core grids are typed
/// fields; any other declared column lives in [`Segment::extra`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub geometry: SegmentGeometry,
    pub lat: Grid,
    pub lon: Grid,
    /// Cell-center depth (km)
    pub depth: Grid,
    /// Slip (m)
    pub slip: Grid,
    /// Additional per-cell fields keyed by lower-case column name
    pub extra: BTreeMap<String, Grid>,
}

impl Segment {
    /// Build a segment from named grids.
    ///
    /// `lat`, `lon`, `depth` and `slip` are required; all grids must share
    /// one shape.
    pub fn from_grids(
        geometry: SegmentGeometry,
        mut grids: BTreeMap<String, Grid>,
    ) -> FaultResult<Self> {
        let mut take = |name: &str| {
            grids
                .remove(name)
                .ok_or_else(|| FaultError::MissingGrid(name.to_string()))
        };
        let lat = take("lat")?;
        let lon = take("lon")?;
        let depth = take("depth")?;
        let slip = take("slip")?;

        let expected = slip.shape();
        let core = [("lat", &lat), ("lon", &lon), ("depth", &depth)];
        for (name, grid) in core.into_iter().chain(grids.iter().map(|(k, g)| (k.as_str(), g))) {
            if grid.shape() != expected {
                return Err(FaultError::ShapeMismatch {
                    field: name.to_string(),
                    expected,
                    found: grid.shape(),
                });
            }
        }

        Ok(Self {
            geometry,
            lat,
            lon,
            depth,
            slip,
            extra: grids,
        })
    }

    /// Grid shape `(nz, nx)`.
    pub fn shape(&self) -> (usize, usize) {
        self.slip.shape()
    }

    pub fn cell_count(&self) -> usize {
        self.slip.len()
    }

    pub fn strike(&self) -> f64 {
        self.geometry.strike
    }

    pub fn dip(&self) -> f64 {
        self.geometry.dip
    }

    pub fn length(&self) -> f64 {
        self.geometry.length
    }

    pub fn width(&self) -> f64 {
        self.geometry.width
    }

    /// Look up any grid by name, core or extra.
    pub fn field(&self, name: &str) -> Option<&Grid> {
        match name {
            "lat" => Some(&self.lat),
            "lon" => Some(&self.lon),
            "depth" => Some(&self.depth),
            "slip" => Some(&self.slip),
            other => self.extra.get(other),
        }
    }

    /// Extra grids that are passed through as per-cell properties.
    pub fn passthrough_fields(&self) -> impl Iterator<Item = (&str, &Grid)> {
        self.extra
            .iter()
            .filter(|(name, _)| !GEOMETRY_FIELDS.contains(&name.as_str()))
            .map(|(name, grid)| (name.as_str(), grid))
    }
}
