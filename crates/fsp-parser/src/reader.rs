//! Whole-file reader producing an [`Event`] and its [`Segment`]s.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use fault_common::{Event, FaultError, Grid, Segment, SegmentGeometry};
use tracing::{debug, info};

use crate::cursor::LineCursor;
use crate::error::{FspError, FspResult};
use crate::header::{EventHeader, HeaderLine, SegmentHeader};
use crate::layout::ColumnLayout;

/// Allowed distance of extent/spacing from a whole number of cells.
pub const GRID_TOLERANCE: f64 = 0.01;

/// Number of cells along one axis: `round(extent / spacing)`.
///
/// Fails if the ratio is more than [`GRID_TOLERANCE`] away from a whole
/// number or does not give at least one cell.
pub fn grid_dimension(axis: &'static str, extent: f64, spacing: f64) -> FspResult<usize> {
    let ratio = extent / spacing;
    let cells = ratio.round();
    if !ratio.is_finite() || cells < 1.0 || (ratio - cells).abs() > GRID_TOLERANCE {
        return Err(FspError::GridSize {
            axis,
            extent,
            spacing,
            ratio,
        });
    }
    Ok(cells as usize)
}

/// A parsed finite-source file.
#[derive(Debug, Clone)]
pub struct FspFile {
    event: Event,
    segments: Vec<Segment>,
}

impl FspFile {
    /// Read a file from disk with the default column layout.
    pub fn from_path(path: impl AsRef<Path>) -> FspResult<Self> {
        Self::from_path_with_layout(path, &ColumnLayout::default())
    }

    /// Read a file from disk with an explicit column layout.
    pub fn from_path_with_layout(path: impl AsRef<Path>, layout: &ColumnLayout) -> FspResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        info!(path = %path.display(), "Reading finite-source file");
        Self::parse_str(&text, layout)
    }

    /// Read from any byte source.
    pub fn from_reader<R: Read>(mut reader: R, layout: &ColumnLayout) -> FspResult<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse_str(&text, layout)
    }

    /// Parse file contents already in memory.
    pub fn parse_str(text: &str, layout: &ColumnLayout) -> FspResult<Self> {
        let mut cursor = LineCursor::new(text);

        let mut header = EventHeader::default();
        let mut first_segment = SegmentHeader::default();
        for line in cursor.header_block() {
            let line = HeaderLine::from_line(line);
            header.apply(&line)?;
            first_segment.apply(&line)?;
        }

        let data_line = cursor.line_number();
        let global = header.geometry();
        let multi_segment = header.multi_segment;
        let asserted = header.nx.zip(header.nz);
        let declared_segments = header.segment_count;
        let event = header.into_event(data_line)?;

        // Segment blocks only override the global geometry in multi-segment files
        let geometry = if multi_segment {
            first_segment.resolve(global, data_line)?
        } else {
            SegmentHeader::default().resolve(global, data_line)?
        };

        let first = read_segment(&mut cursor, 0, geometry, &event, layout)?;
        if !multi_segment {
            if let Some((nx, nz)) = asserted {
                let (rows, cols) = first.shape();
                check_asserted("Nx", nx, cols)?;
                check_asserted("Nz", nz, rows)?;
            }
        }
        let mut segments = vec![first];

        if multi_segment {
            loop {
                let block = cursor.header_block();
                if !cursor.at_data() {
                    break;
                }
                let data_line = cursor.line_number();
                let mut segment_header = SegmentHeader::default();
                for line in block {
                    segment_header.apply(&HeaderLine::from_line(line))?;
                }
                // Values missing from a segment block carry over from the previous segment
                let previous = segments.last().map(|s| s.geometry);
                let geometry = segment_header.resolve(previous, data_line)?;
                let index = segments.len();
                segments.push(read_segment(&mut cursor, index, geometry, &event, layout)?);
            }
            if let Some(declared) = declared_segments {
                if declared != segments.len() {
                    return Err(FspError::SegmentCountMismatch {
                        declared,
                        found: segments.len(),
                    });
                }
            }
        }

        debug!(
            segments = segments.len(),
            location = %event.location,
            "Parsed finite-source file"
        );
        Ok(Self { event, segments })
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// Segment by 0-based index.
    pub fn segment(&self, index: usize) -> Result<&Segment, FaultError> {
        self.segments.get(index).ok_or(FaultError::SegmentIndex {
            index,
            count: self.segments.len(),
        })
    }

    /// Consume the file, returning its parts.
    pub fn into_parts(self) -> (Event, Vec<Segment>) {
        (self.event, self.segments)
    }
}

fn check_asserted(axis: &'static str, declared: usize, computed: usize) -> FspResult<()> {
    if declared != computed {
        return Err(FspError::GridCountMismatch {
            axis,
            declared,
            computed,
        });
    }
    Ok(())
}

/// Read one segment's data block and reshape its columns to `(nz, nx)` grids.
fn read_segment(
    cursor: &mut LineCursor<'_>,
    index: usize,
    geometry: SegmentGeometry,
    event: &Event,
    layout: &ColumnLayout,
) -> FspResult<Segment> {
    let nx = grid_dimension("length", geometry.length, event.dx)?;
    let nz = grid_dimension("width", geometry.width, event.dz)?;
    let cells = nx
        .checked_mul(nz)
        .ok_or(FspError::GridOverflow { nx, nz })?;
    let rows = cursor.data_rows(index, cells, layout.width())?;

    let mut grids = BTreeMap::new();
    for (column, name) in layout.names().iter().enumerate() {
        let values = rows.iter().map(|row| row[column]).collect();
        grids.insert(name.clone(), Grid::new(nz, nx, values)?);
    }

    debug!(
        segment = index,
        strike = geometry.strike,
        dip = geometry.dip,
        nx,
        nz,
        "Read segment block"
    );
    Ok(Segment::from_grids(geometry, grids)?)
}

/// Read a file with the default column layout.
pub fn read_from_file(path: impl AsRef<Path>) -> FspResult<(Event, Vec<Segment>)> {
    FspFile::from_path(path).map(FspFile::into_parts)
}

/// Read from a byte source with an explicit column layout.
pub fn read_from_reader<R: Read>(reader: R, layout: &ColumnLayout) -> FspResult<(Event, Vec<Segment>)> {
    FspFile::from_reader(reader, layout).map(FspFile::into_parts)
}
