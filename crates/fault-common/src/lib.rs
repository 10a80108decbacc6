//! Common types shared across the finite-fault crates.
//!
//! The parser produces an [`Event`] and a list of [`Segment`]s; every other
//! crate in the workspace consumes them read-only.

pub mod bbox;
pub mod error;
pub mod event;
pub mod grid;
pub mod segment;
pub mod style;

pub use bbox::BoundingBox;
pub use error::{FaultError, FaultResult};
pub use event::{Event, EventDate};
pub use grid::Grid;
pub use segment::{Segment, SegmentGeometry, GEOMETRY_FIELDS};
pub use style::{Color, ColorScale, ColorStop};
