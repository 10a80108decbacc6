//! Feature collection assembly.

use fault_common::{ColorScale, Event, Grid, Segment};
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, info};

use crate::colors::{default_slip_scale, slip_color_bound};
use crate::corners::{CellReference, CornerProjector};
use crate::geojson::{FaultFeature, FaultFeatureCollection, FaultGeometry, Properties};
use crate::GeoJsonResult;

/// Outline stroke width written on every feature.
pub const STROKE_WIDTH: f64 = 1.5;

/// Fill opacity written on every feature.
pub const FILL_OPACITY: i64 = 1;

/// Builds one polygon feature per subfault cell.
#[derive(Debug, Clone)]
pub struct GeoJsonAssembler {
    palette: ColorScale,
}

impl GeoJsonAssembler {
    /// Assembler using the default slip palette.
    pub fn new() -> GeoJsonResult<Self> {
        Ok(Self::with_palette(default_slip_scale()?))
    }

    /// Assembler with a custom palette over `0..=1`; it is stretched to
    /// `0..=ceil(max slip)` on every call.
    pub fn with_palette(palette: ColorScale) -> Self {
        Self { palette }
    }

    /// Features for every cell of every segment, in segment order and then
    /// row-major cell order.
    ///
    /// Neither `event` nor `segments` are modified.
    pub fn assemble(
        &self,
        event: &Event,
        segments: &[Segment],
    ) -> GeoJsonResult<FaultFeatureCollection> {
        let vmax = slip_color_bound(segments);
        let scale = self.palette.clone().with_range(0.0, vmax);

        let mut features = Vec::with_capacity(segments.iter().map(Segment::cell_count).sum());
        for (index, segment) in segments.iter().enumerate() {
            let cells = segment_features(event, segment, &scale)?;
            debug!(segment = index, cells = cells.len(), "Projected segment cells");
            features.extend(cells);
        }

        info!(
            segments = segments.len(),
            features = features.len(),
            max_slip = vmax,
            "Assembled fault GeoJSON"
        );
        Ok(FaultFeatureCollection::new(event, features))
    }
}

/// Build the feature collection with the default palette.
pub fn create_geojson(event: &Event, segments: &[Segment]) -> GeoJsonResult<FaultFeatureCollection> {
    GeoJsonAssembler::new()?.assemble(event, segments)
}

fn segment_features(
    event: &Event,
    segment: &Segment,
    scale: &ColorScale,
) -> GeoJsonResult<Vec<FaultFeature>> {
    let projector = CornerProjector::for_cells(event, segment)?;
    let passthrough: Vec<(&str, &Grid)> = segment.passthrough_fields().collect();
    let (half_dx, half_dz) = (event.dx / 2.0, event.dz / 2.0);

    let lon = segment.lon.values();
    let lat = segment.lat.values();
    let depth = segment.depth.values();
    let slip = segment.slip.values();

    (0..segment.cell_count())
        .into_par_iter()
        .map(|cell| {
            let ring = projector.project(CellReference {
                lon: lon[cell],
                lat: lat[cell],
                depth: depth[cell],
                dx: half_dx,
                dy: half_dz,
            })?;

            let mut properties = Properties::new();
            for (name, grid) in &passthrough {
                properties.insert(name.to_string(), Value::from(grid.values()[cell]));
            }
            properties.insert("slip".to_string(), Value::from(slip[cell]));
            properties.insert(
                "fill".to_string(),
                Value::from(scale.color_for(slip[cell]).to_hex()),
            );
            properties.insert("stroke-width".to_string(), Value::from(STROKE_WIDTH));
            properties.insert("fill-opacity".to_string(), Value::from(FILL_OPACITY));

            Ok(FaultFeature::new(FaultGeometry::polygon(ring), properties))
        })
        .collect()
}
