//! Finite-source (FSP) slip model reader.
//!
//! Reads the ascii finite-source convention used to distribute slip
//! inversion results: a `%`-commented header carrying event metadata,
//! followed by one `nx * nz` row numeric block per fault segment.
//!
//! # Example
//!
//! ```ignore
//! use fsp_parser::{ColumnLayout, FspFile};
//!
//! let fsp = FspFile::from_path_with_layout("s2011TOHOKU01AMMO.fsp", &ColumnLayout::default())?;
//! for segment in fsp.segments() {
//!     println!("{:?} cells, strike {}", segment.shape(), segment.strike());
//! }
//! ```

pub mod cursor;
pub mod error;
pub mod header;
pub mod layout;
pub mod reader;

pub use cursor::{Line, LineCursor};
pub use error::{FspError, FspResult};
pub use layout::{ColumnLayout, DEFAULT_COLUMNS};
pub use reader::{grid_dimension, read_from_file, read_from_reader, FspFile};
