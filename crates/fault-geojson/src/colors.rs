//! Slip color scale.

use fault_common::{Color, ColorScale, ColorStop, FaultResult, Segment};

/// Default slip palette: white through yellow and orange to dark red.
pub const DEFAULT_SLIP_STOPS: [(f64, &str); 6] = [
    (0.0, "#ffffff"),
    (0.2, "#ffffb2"),
    (0.4, "#fecc5c"),
    (0.6, "#fd8d3c"),
    (0.8, "#e31a1c"),
    (1.0, "#800026"),
];

/// Scale over `0..=1` built from [`DEFAULT_SLIP_STOPS`].
pub fn default_slip_scale() -> FaultResult<ColorScale> {
    let stops = DEFAULT_SLIP_STOPS
        .iter()
        .map(|(value, hex)| Ok(ColorStop::new(*value, Color::from_hex(hex)?)))
        .collect::<FaultResult<Vec<_>>>()?;
    ColorScale::new(stops)
}

/// Upper bound of the slip color scale: `ceil` of the largest slip over all
/// segments, so colors compare across a multi-segment fault.
pub fn slip_color_bound(segments: &[Segment]) -> f64 {
    segments
        .iter()
        .filter_map(|segment| segment.slip.max())
        .fold(f64::NEG_INFINITY, f64::max)
        .ceil()
        .max(0.0)
}
