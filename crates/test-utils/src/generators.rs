//! Generators for synthetic slip fields and finite-source files.
//!
//! Files produced here follow the header layout of real finite-source
//! models closely enough that every positional field the parser reads sits
//! at its usual token offset.

use crate::fixtures;

/// Creates a slip grid where each cell encodes its position.
///
/// Each cell value is `row * 100 + col + 1`, so no cell is zero and
/// `grid[row * cols + col]` can be checked directly.
pub fn create_indexed_slip(rows: usize, cols: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            data.push((row * 100 + col + 1) as f64);
        }
    }
    data
}

/// Creates a single Gaussian slip asperity.
///
/// # Arguments
///
/// * `rows`, `cols` - Grid shape `(nz, nx)`
/// * `center` - Asperity center `(row, col)` in fractional cells
/// * `radius` - e-folding radius in cells
/// * `peak` - Slip at the center (m)
pub fn create_asperity_slip(
    rows: usize,
    cols: usize,
    center: (f64, f64),
    radius: f64,
    peak: f64,
) -> Vec<f64> {
    let mut data = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let dr = row as f64 - center.0;
            let dc = col as f64 - center.1;
            let r2 = (dr * dr + dc * dc) / (radius * radius);
            data.push(peak * (-r2).exp());
        }
    }
    data
}

/// Creates a slip grid with one rectangular patch of constant slip.
///
/// Cells in `rows.0..rows.1` x `cols.0..cols.1` get `value`, all others 0.
pub fn create_patch_slip(
    shape: (usize, usize),
    rows: (usize, usize),
    cols: (usize, usize),
    value: f64,
) -> Vec<f64> {
    let mut data = vec![0.0; shape.0 * shape.1];
    for row in rows.0..rows.1.min(shape.0) {
        for col in cols.0..cols.1.min(shape.1) {
            data[row * shape.1 + col] = value;
        }
    }
    data
}

/// One segment block of a synthetic file.
#[derive(Debug, Clone)]
pub struct SegmentSpec {
    pub strike: f64,
    pub dip: f64,
    /// Along-strike extent (km)
    pub length: f64,
    /// Down-dip extent (km)
    pub width: f64,
    /// Row-major slip values; an empty vec means "use indexed slip"
    pub slip: Vec<f64>,
}

impl SegmentSpec {
    pub fn new(strike: f64, dip: f64, length: f64, width: f64) -> Self {
        Self {
            strike,
            dip,
            length,
            width,
            slip: Vec::new(),
        }
    }

    pub fn with_slip(mut self, slip: Vec<f64>) -> Self {
        self.slip = slip;
        self
    }
}

/// Builder for synthetic finite-source files.
///
/// ```
/// use test_utils::{FspFileBuilder, SegmentSpec};
///
/// let text = FspFileBuilder::new(2.0, 2.0)
///     .segment(SegmentSpec::new(240.0, 20.0, 20.0, 20.0))
///     .build();
/// assert!(text.contains("% Loc"));
/// assert_eq!(text.lines().filter(|l| !l.starts_with('%')).count(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct FspFileBuilder {
    dx: f64,
    dz: f64,
    segments: Vec<SegmentSpec>,
    event_line: Option<String>,
    include_loc: bool,
    include_dx: bool,
    declare_grid: bool,
    extra_rows: usize,
    columns: usize,
}

impl FspFileBuilder {
    /// Start a file with grid spacing `dx`, `dz` (km).
    pub fn new(dx: f64, dz: f64) -> Self {
        Self {
            dx,
            dz,
            segments: Vec::new(),
            event_line: Some(fixtures::EVENT_LINE.to_string()),
            include_loc: true,
            include_dx: true,
            declare_grid: false,
            extra_rows: 0,
            columns: 10,
        }
    }

    /// Append a segment block.
    pub fn segment(mut self, spec: SegmentSpec) -> Self {
        self.segments.push(spec);
        self
    }

    /// Replace the `Event` header line (`None` drops it).
    pub fn event_line(mut self, line: Option<&str>) -> Self {
        self.event_line = line.map(str::to_string);
        self
    }

    /// Drop the `Loc` header line.
    pub fn without_loc(mut self) -> Self {
        self.include_loc = false;
        self
    }

    /// Drop the `Dx` header line.
    pub fn without_dx(mut self) -> Self {
        self.include_dx = false;
        self
    }

    /// Emit an `Invs : Nx/Nz` line computed from the first segment.
    pub fn declare_grid(mut self) -> Self {
        self.declare_grid = true;
        self
    }

    /// Append `n` surplus data rows after the last block.
    pub fn extra_rows(mut self, n: usize) -> Self {
        self.extra_rows = n;
        self
    }

    /// Number of numeric columns written per row (default 10).
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    fn shape(&self, spec: &SegmentSpec) -> (usize, usize) {
        (
            (spec.width / self.dz).round() as usize,
            (spec.length / self.dx).round() as usize,
        )
    }

    /// Render the file text.
    pub fn build(&self) -> String {
        let mut out = String::new();
        let multi = self.segments.len() > 1;
        let first = self.segments.first();

        out.push_str(fixtures::BANNER_LINE);
        out.push('\n');
        out.push_str("%\n");
        if let Some(line) = &self.event_line {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("% EventTAG: s2000SYNTHE01TEST\n%\n");
        if self.include_loc {
            out.push_str(fixtures::LOC_LINE);
            out.push('\n');
        }
        let (length, width, strike, dip) = first
            .map(|s| (s.length, s.width, s.strike, s.dip))
            .unwrap_or((0.0, 0.0, 0.0, 0.0));
        out.push_str(&format!(
            "% Size : LEN = {} km  WID = {} km  Mw = 7.10  Mo = 5.62e+19 Nm\n",
            length, width
        ));
        out.push_str(&format!(
            "% Mech : STRK = {}   DIP = {}  RAKE = 90  Htop = 1.50 km\n",
            strike, dip
        ));
        out.push_str(fixtures::RUPT_LINE);
        out.push_str("\n%\n");
        if self.declare_grid {
            if let Some(spec) = first {
                let (nz, nx) = self.shape(spec);
                out.push_str(&format!(
                    "% Invs : Nx = {}  Nz = {}  Fmin = 0.00 Hz  Fmax = 1.00 Hz\n",
                    nx, nz
                ));
            }
        }
        if self.include_dx {
            out.push_str(&format!(
                "% Invs : Dx = {} km  Dz = {} km\n",
                self.dx, self.dz
            ));
        }
        out.push_str(&format!(
            "% Invs : Ntw = 1  Nsg = {}    (# of time-windows,# of fault segments)\n",
            self.segments.len().max(1)
        ));
        out.push_str(fixtures::SVF_LINE);
        out.push('\n');
        if multi {
            out.push_str("%\n% MULTISEGMENT MODEL\n");
        }

        for (index, spec) in self.segments.iter().enumerate() {
            if multi {
                if index > 0 {
                    out.push_str("%\n");
                }
                out.push_str(&format!(
                    "% SEGMENT # {}: STRIKE = {} deg    DIP = {} deg\n",
                    index + 1,
                    spec.strike,
                    spec.dip
                ));
                out.push_str(&format!(
                    "%              LEN = {} km     WID = {} km\n",
                    spec.length, spec.width
                ));
            }
            out.push_str(fixtures::COLUMN_HEADER);
            out.push('\n');
            self.write_block(&mut out, index, spec);
        }

        for _ in 0..self.extra_rows {
            out.push_str(&self.row(&[0.0; 10]));
        }
        out
    }

    fn row(&self, values: &[f64; 10]) -> String {
        let mut line = String::from(" ");
        for value in values.iter().take(self.columns) {
            line.push_str(&format!(" {:10.4}", value));
        }
        for _ in 10..self.columns {
            line.push_str("     0.0000");
        }
        line.push('\n');
        line
    }

    fn write_block(&self, out: &mut String, index: usize, spec: &SegmentSpec) {
        let (nz, nx) = self.shape(spec);
        let strike = spec.strike.to_radians();
        let dip = spec.dip.to_radians();
        let km_per_deg = 111.19;
        // Offset each segment so blocks do not overlap
        let origin_lat = fixtures::EPICENTER.1 + index as f64 * 0.5;
        let origin_lon = fixtures::EPICENTER.0;

        for row in 0..nz {
            for col in 0..nx {
                let along = (col as f64 + 0.5) * self.dx;
                let down = (row as f64 + 0.5) * self.dz;
                let horiz = down * dip.cos();
                let east = along * strike.sin() + horiz * strike.cos();
                let north = along * strike.cos() - horiz * strike.sin();
                let lat = origin_lat + north / km_per_deg;
                let lon = origin_lon + east / (km_per_deg * origin_lat.to_radians().cos());
                let depth = 1.5 + down * dip.sin();
                let cell = row * nx + col;
                let slip = if spec.slip.is_empty() {
                    (row * 100 + col + 1) as f64
                } else {
                    spec.slip.get(cell).copied().unwrap_or(0.0)
                };
                out.push_str(&self.row(&[
                    lat,
                    lon,
                    east,
                    north,
                    depth,
                    slip,
                    90.0,
                    along / 2.5,
                    1.2,
                    slip * 1.0e17,
                ]));
            }
        }
    }
}
