//! Subfault corner polygons and GeoJSON output.
//!
//! Every subfault cell of a parsed fault becomes one GeoJSON `Polygon`
//! feature whose ring carries `[lon, lat, depth_m]` vertices. Features are
//! colored by slip on a scale bounded by the largest slip of the whole fault.
//!
//! ```ignore
//! use fault_geojson::create_geojson;
//! use fsp_parser::FspFile;
//!
//! let fsp = FspFile::from_path("s2007PISCOP01.fsp")?;
//! let collection = create_geojson(fsp.event(), fsp.segments())?;
//! println!("{}", collection.to_json(true)?);
//! ```

pub mod assemble;
pub mod colors;
pub mod corners;
pub mod error;
pub mod geojson;

pub use assemble::{create_geojson, GeoJsonAssembler, FILL_OPACITY, STROKE_WIDTH};
pub use colors::{default_slip_scale, slip_color_bound, DEFAULT_SLIP_STOPS};
pub use corners::{CellReference, CornerProjector, CornerRing, PatchGeometry};
pub use error::{GeoJsonError, GeoJsonResult};
pub use geojson::{Epicenter, FaultFeature, FaultFeatureCollection, FaultGeometry, Metadata, Properties};
