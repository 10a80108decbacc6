//! Properties of the rupture sizing pipeline on synthetic slip fields.

use fault_common::{FaultError, Grid};
use fsp_parser::{ColumnLayout, FspFile};
use rupture::{
    autocorrelate, sum_slip, threshold_slip, RuptureSize, RuptureSizer, RuptureSummary,
    WindowFinder,
};
use test_utils::{
    create_asperity_slip, create_indexed_slip, create_patch_slip, FspFileBuilder, SegmentSpec,
};

fn grids() -> Vec<Grid> {
    vec![
        Grid::new(10, 10, create_asperity_slip(10, 10, (4.0, 6.0), 2.0, 8.0)).unwrap(),
        Grid::new(7, 18, create_asperity_slip(7, 18, (3.0, 9.0), 3.0, 2.5)).unwrap(),
        Grid::new(5, 8, create_asperity_slip(5, 8, (1.0, 1.0), 1.5, 0.8)).unwrap(),
        Grid::new(6, 9, create_patch_slip((6, 9), (2, 4), (1, 3), 3.0)).unwrap(),
        Grid::new(4, 4, create_indexed_slip(4, 4)).unwrap(),
        Grid::new(3, 12, create_patch_slip((3, 12), (0, 3), (0, 2), 5.0)).unwrap(),
    ]
}

// ============================================================================
// Threshold
// ============================================================================

#[test]
fn test_threshold_leaves_no_small_values() {
    for grid in grids() {
        let out = threshold_slip(&grid);
        for &v in out.grid.values() {
            assert!(
                v == 0.0 || v >= out.threshold,
                "value {} between 0 and threshold {}",
                v,
                out.threshold
            );
        }
    }
}

#[test]
fn test_threshold_keeps_values_at_or_above() {
    for grid in grids() {
        let out = threshold_slip(&grid);
        for (orig, kept) in grid.values().iter().zip(out.grid.values()) {
            if *orig >= out.threshold {
                assert_eq!(orig, kept);
            }
        }
    }
}

// ============================================================================
// Autocorrelation
// ============================================================================

#[test]
fn test_autocorrelation_of_axis_sums() {
    for grid in grids() {
        let sums = sum_slip(&threshold_slip(&grid).grid);
        for profile in [&sums.along_strike, &sums.along_dip] {
            let ac = autocorrelate(profile);
            let n = profile.len();
            assert_eq!(ac.len(), n - n / 2);
            let peak = ac.iter().cloned().fold(f64::MIN, f64::max);
            assert_eq!(ac[0], peak);
        }
    }
}

// ============================================================================
// Rupture size
// ============================================================================

#[test]
fn test_rupture_size_within_segment() {
    let (dx, dz) = (2.0, 2.0);
    let sizer = RuptureSizer::new(dx, dz).unwrap();
    for grid in grids() {
        let (rows, cols) = grid.shape();
        let (length, width) = (cols as f64 * dx, rows as f64 * dz);
        let size = sizer.size(&threshold_slip(&grid)).unwrap();
        assert!(size.length > 0.0 && size.length <= length, "length {} of {}", size.length, length);
        assert!(size.width > 0.0 && size.width <= width, "width {} of {}", size.width, width);
    }
}

#[test]
fn test_all_zero_grid_is_empty_slip() {
    let sizer = RuptureSizer::new(2.0, 2.0).unwrap();
    let err = sizer.size(&threshold_slip(&Grid::zeros(5, 5))).unwrap_err();
    assert!(matches!(err, FaultError::EmptySlip { .. }));
}

// ============================================================================
// Window search
// ============================================================================

#[test]
fn test_window_stays_on_grid() {
    let finder = WindowFinder::new(2.0, 2.0).unwrap();
    let sizer = RuptureSizer::new(2.0, 2.0).unwrap();
    for grid in grids() {
        let (rows, cols) = grid.shape();
        let thresholded = threshold_slip(&grid);
        let size = sizer.size(&thresholded).unwrap();
        if let Some(window) = finder.find(
            &thresholded.grid,
            size,
            cols as f64 * 2.0,
            rows as f64 * 2.0,
        ) {
            assert!(window.left <= window.right && window.right <= cols);
            assert!(window.top <= window.bottom && window.bottom <= rows);
            assert!(window.slip_sum >= 0.0);
        }
    }
}

#[test]
fn test_window_prefers_patch() {
    let grid = Grid::new(6, 9, create_patch_slip((6, 9), (2, 4), (5, 7), 3.0)).unwrap();
    let finder = WindowFinder::new(2.0, 2.0).unwrap();
    let window = finder
        .find(
            &threshold_slip(&grid).grid,
            RuptureSize {
                length: 4.0,
                width: 4.0,
            },
            18.0,
            12.0,
        )
        .unwrap();
    assert_eq!((window.left, window.right), (5, 7));
    assert_eq!((window.top, window.bottom), (2, 4));
}

#[test]
fn test_oversized_window_is_undetermined() {
    let grid = Grid::new(4, 4, create_indexed_slip(4, 4)).unwrap();
    let finder = WindowFinder::new(2.0, 2.0).unwrap();
    let size = RuptureSize {
        length: 20.0,
        width: 20.0,
    };
    assert!(finder.find(&grid, size, 8.0, 8.0).is_none());
}

// ============================================================================
// Parsed segments
// ============================================================================

#[test]
fn test_summaries_for_parsed_file() {
    let slip = create_asperity_slip(10, 10, (5.0, 5.0), 2.0, 6.0);
    let text = FspFileBuilder::new(2.0, 2.0)
        .segment(SegmentSpec::new(240.0, 20.0, 20.0, 20.0).with_slip(slip))
        .build();
    let fsp = FspFile::parse_str(&text, &ColumnLayout::default()).unwrap();

    let summaries = RuptureSummary::for_segments(fsp.event(), fsp.segments()).unwrap();
    assert_eq!(summaries.len(), 1);
    let summary = &summaries[0];
    assert_eq!(summary.threshold, 1.0);
    assert!(summary.size.length > 0.0 && summary.size.length <= 20.0);
    assert!(summary.window.is_some());
    assert!(summary.corners.is_some());
}
