//! Integration tests for reading synthetic finite-source files.

use fault_common::{EventDate, FaultError};
use fsp_parser::{read_from_file, ColumnLayout, FspError, FspFile};
use test_utils::{
    assert_approx_eq, create_indexed_slip, write_temp_fsp, FspFileBuilder, SegmentSpec,
    EPICENTER, EPICENTER_DEPTH, EVENT_LOCATION,
};

fn parse(text: &str) -> Result<FspFile, FspError> {
    FspFile::parse_str(text, &ColumnLayout::default())
}

fn single_segment() -> String {
    FspFileBuilder::new(2.0, 2.0)
        .segment(SegmentSpec::new(240.0, 20.0, 20.0, 20.0))
        .build()
}

// ============================================================================
// Single-segment files
// ============================================================================

#[test]
fn test_single_segment_shape_and_values() {
    let fsp = parse(&single_segment()).unwrap();
    assert_eq!(fsp.num_segments(), 1);

    let segment = fsp.segment(0).unwrap();
    assert_eq!(segment.shape(), (10, 10));
    assert_eq!(segment.strike(), 240.0);
    assert_eq!(segment.dip(), 20.0);
    assert_eq!(segment.slip.values(), create_indexed_slip(10, 10).as_slice());
}

#[test]
fn test_shape_is_width_by_length() {
    let text = FspFileBuilder::new(2.0, 2.0)
        .segment(SegmentSpec::new(90.0, 45.0, 20.0, 10.0))
        .build();
    let fsp = parse(&text).unwrap();
    // (round(width/dz), round(length/dx))
    assert_eq!(fsp.segment(0).unwrap().shape(), (5, 10));
}

#[test]
fn test_event_fields() {
    let fsp = parse(&single_segment()).unwrap();
    let event = fsp.event();

    assert_eq!(event.location, EVENT_LOCATION);
    assert_eq!(event.date.to_string(), "2007-08-15T00:00:00.000000Z");
    assert_eq!(event.lon, EPICENTER.0);
    assert_eq!(event.lat, EPICENTER.1);
    assert_eq!(event.depth, EPICENTER_DEPTH);
    assert_eq!(event.magnitude, 7.1);
    assert_eq!(event.moment, 5.62e19);
    assert_eq!(event.strike, 240.0);
    assert_eq!(event.dip, 20.0);
    assert_eq!(event.rake, Some(90.0));
    assert_eq!(event.top_depth, Some(1.5));
    assert_eq!(event.rise_time, Some(6.6));
    assert_eq!(event.rupture_velocity, Some(1.5));
    assert_eq!(event.time_windows, Some(1));
    assert_eq!(event.velocity_function.as_deref(), Some("Boxcar"));
    assert_eq!((event.dx, event.dz), (2.0, 2.0));
}

#[test]
fn test_extra_columns_are_kept() {
    let fsp = parse(&single_segment()).unwrap();
    let segment = fsp.segment(0).unwrap();

    let names: Vec<&str> = segment.extra.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec!["rake", "rise", "sf_moment", "trup", "x_ew", "y_ns"]
    );
    assert_eq!(segment.field("rake").unwrap().get(3, 3), Some(90.0));
    assert_approx_eq!(segment.depth.get(0, 0).unwrap(), 1.5 + 1.0 * 20f64.to_radians().sin(), 1e-4);
}

#[test]
fn test_unparseable_date_falls_back() {
    let text = FspFileBuilder::new(2.0, 2.0)
        .event_line(Some("% Event : SOUTHERN ALASKA [1964] (s1964ALASKA01HOLD)"))
        .segment(SegmentSpec::new(240.0, 20.0, 4.0, 4.0))
        .build();
    let fsp = parse(&text).unwrap();
    assert_eq!(fsp.event().date, EventDate::Unknown);
    assert_eq!(fsp.event().location, "SOUTHERN ALASKA");
}

#[test]
fn test_declared_grid_matches() {
    let text = FspFileBuilder::new(2.0, 2.0)
        .segment(SegmentSpec::new(240.0, 20.0, 8.0, 4.0))
        .declare_grid()
        .build();
    assert!(parse(&text).is_ok());
}

// ============================================================================
// Multi-segment files
// ============================================================================

#[test]
fn test_two_segment_blocks() {
    let text = FspFileBuilder::new(2.0, 2.0)
        .segment(SegmentSpec::new(240.0, 20.0, 8.0, 4.0))
        .segment(SegmentSpec::new(210.0, 35.0, 6.0, 6.0))
        .build();
    let fsp = parse(&text).unwrap();

    assert_eq!(fsp.num_segments(), 2);
    let first = fsp.segment(0).unwrap();
    let second = fsp.segment(1).unwrap();
    assert_eq!((first.strike(), first.dip()), (240.0, 20.0));
    assert_eq!((second.strike(), second.dip()), (210.0, 35.0));
    assert_eq!(first.shape(), (2, 4));
    assert_eq!(second.shape(), (3, 3));
    assert_eq!(second.slip.get(0, 0), Some(1.0));
}

#[test]
fn test_segment_block_without_len_inherits_extent() {
    let mut text = FspFileBuilder::new(2.0, 2.0)
        .segment(SegmentSpec::new(240.0, 20.0, 8.0, 4.0))
        .segment(SegmentSpec::new(210.0, 35.0, 8.0, 4.0))
        .build();
    let start = text.rfind("%              LEN").unwrap();
    let end = start + text[start..].find('\n').unwrap() + 1;
    text.replace_range(start..end, "");

    let fsp = parse(&text).unwrap();
    let second = fsp.segment(1).unwrap();
    assert_eq!((second.strike(), second.dip()), (210.0, 35.0));
    assert_eq!((second.length(), second.width()), (8.0, 4.0));
    assert_eq!(second.shape(), (2, 4));
}

#[test]
fn test_declared_segment_count_mismatch() {
    let text = FspFileBuilder::new(2.0, 2.0)
        .segment(SegmentSpec::new(240.0, 20.0, 8.0, 4.0))
        .segment(SegmentSpec::new(210.0, 35.0, 6.0, 6.0))
        .build()
        .replace("Nsg = 2", "Nsg = 3");
    let err = parse(&text).unwrap_err();
    assert!(matches!(
        err,
        FspError::SegmentCountMismatch { declared: 3, found: 2 }
    ));
}

#[test]
fn test_segment_index_out_of_range() {
    let fsp = parse(&single_segment()).unwrap();
    let err = fsp.segment(1).unwrap_err();
    assert_eq!(err, FaultError::SegmentIndex { index: 1, count: 1 });
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_missing_loc_fails_before_data() {
    let text = FspFileBuilder::new(2.0, 2.0)
        .segment(SegmentSpec::new(240.0, 20.0, 4.0, 4.0))
        .without_loc()
        .build();
    let err = parse(&text).unwrap_err();
    assert!(matches!(err, FspError::MissingField { field: "Loc", .. }));
}

#[test]
fn test_missing_dx_fails() {
    let text = FspFileBuilder::new(2.0, 2.0)
        .segment(SegmentSpec::new(240.0, 20.0, 4.0, 4.0))
        .without_dx()
        .build();
    let err = parse(&text).unwrap_err();
    assert!(matches!(err, FspError::MissingField { field: "Dx", .. }));
}

#[test]
fn test_extent_not_multiple_of_spacing() {
    let text = FspFileBuilder::new(2.0, 2.0)
        .segment(SegmentSpec::new(240.0, 20.0, 5.0, 4.0))
        .build();
    let err = parse(&text).unwrap_err();
    assert!(matches!(err, FspError::GridSize { axis: "length", .. }));
}

#[test]
fn test_declared_grid_mismatch() {
    let text = FspFileBuilder::new(2.0, 2.0)
        .segment(SegmentSpec::new(240.0, 20.0, 8.0, 4.0))
        .declare_grid()
        .build()
        .replace("Nx = 4", "Nx = 5");
    let err = parse(&text).unwrap_err();
    assert!(matches!(
        err,
        FspError::GridCountMismatch { axis: "Nx", declared: 5, computed: 4 }
    ));
}

fn with_declared_extent(extent: &str) -> String {
    FspFileBuilder::new(2.0, 2.0)
        .segment(SegmentSpec::new(240.0, 20.0, 4.0, 4.0))
        .build()
        .replace(
            "LEN = 4 km  WID = 4 km",
            &format!("LEN = {} km  WID = {} km", extent, extent),
        )
}

#[test]
fn test_huge_declared_grid_reports_short_block() {
    let err = parse(&with_declared_extent("100000000")).unwrap_err();
    // 50_000_000 x 50_000_000 cells declared, 4 rows present
    assert!(matches!(
        err,
        FspError::RowCount { expected, found: 4, .. } if expected == 50_000_000 * 50_000_000
    ));
}

#[test]
fn test_overflowing_declared_grid() {
    let err = parse(&with_declared_extent("1000000000000")).unwrap_err();
    assert!(matches!(err, FspError::GridOverflow { .. }));
}

#[test]
fn test_surplus_rows_rejected() {
    let text = FspFileBuilder::new(2.0, 2.0)
        .segment(SegmentSpec::new(240.0, 20.0, 4.0, 4.0))
        .extra_rows(2)
        .build();
    let err = parse(&text).unwrap_err();
    assert!(matches!(err, FspError::RowCount { expected: 4, found: 6, .. }));
}

#[test]
fn test_column_count_mismatch() {
    let text = FspFileBuilder::new(2.0, 2.0)
        .segment(SegmentSpec::new(240.0, 20.0, 4.0, 4.0))
        .columns(9)
        .build();
    let err = parse(&text).unwrap_err();
    assert!(matches!(err, FspError::ColumnCount { expected: 10, found: 9, .. }));
}

#[test]
fn test_malformed_size_line() {
    let text = single_segment().replace("Mw = 7.10", "Mw 7.10");
    let err = parse(&text).unwrap_err();
    assert!(matches!(err, FspError::MalformedHeader { label: "Size", .. }));
}

// ============================================================================
// Layouts and sources
// ============================================================================

#[test]
fn test_custom_layout() {
    let text = FspFileBuilder::new(2.0, 2.0)
        .segment(SegmentSpec::new(240.0, 20.0, 4.0, 4.0))
        .columns(6)
        .build();
    let layout = ColumnLayout::new(["LAT", "LON", "X==EW", "Y==NS", "Z", "SLIP"]).unwrap();
    let fsp = FspFile::parse_str(&text, &layout).unwrap();
    let segment = fsp.segment(0).unwrap();
    assert_eq!(segment.extra.len(), 2);
    assert!(segment.field("rake").is_none());
}

#[test]
fn test_read_from_file() {
    let file = write_temp_fsp(&single_segment());
    let (event, segments) = read_from_file(file.path()).unwrap();
    assert_eq!(event.location, EVENT_LOCATION);
    assert_eq!(segments.len(), 1);
}

#[test]
fn test_read_from_reader() {
    let text = single_segment();
    let fsp = FspFile::from_reader(text.as_bytes(), &ColumnLayout::default()).unwrap();
    assert_eq!(fsp.segment(0).unwrap().cell_count(), 100);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = FspFile::from_path("/nonexistent/model.fsp").unwrap_err();
    assert!(matches!(err, FspError::Io(_)));
}
