//! Benchmarks for rupture sizing and the exhaustive window search.
//!
//! Run with: cargo bench --package rupture --bench window_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fault_common::Grid;
use rand::Rng;
use rupture::{threshold_slip, RuptureSize, RuptureSizer, WindowFinder};

const SPACING_KM: f64 = 2.0;

/// Smooth slip field with two asperities.
fn generate_asperity_field(rows: usize, cols: usize) -> Grid {
    Grid::from_fn(rows, cols, |r, c| {
        let fr = r as f64 / rows as f64;
        let fc = c as f64 / cols as f64;
        let a = (-((fr - 0.4).powi(2) + (fc - 0.3).powi(2)) * 40.0).exp() * 8.0;
        let b = (-((fr - 0.6).powi(2) + (fc - 0.75).powi(2)) * 60.0).exp() * 5.0;
        a + b
    })
}

/// Patchy slip field with random noise.
fn generate_noisy_field(rows: usize, cols: usize) -> Grid {
    let mut rng = rand::thread_rng();
    let base = generate_asperity_field(rows, cols);
    Grid::from_fn(rows, cols, |r, c| {
        let v = base.get(r, c).unwrap_or(0.0);
        (v + rng.gen_range(-0.5..0.5)).max(0.0)
    })
}

// =============================================================================
// RUPTURE SIZE BENCHMARKS
// =============================================================================

fn bench_rupture_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("rupture_size");
    let sizer = RuptureSizer::new(SPACING_KM, SPACING_KM).unwrap();

    for (rows, cols) in [(10, 10), (20, 40), (50, 100)] {
        let thresholded = threshold_slip(&generate_asperity_field(rows, cols));
        group.throughput(Throughput::Elements((rows * cols) as u64));
        group.bench_with_input(
            BenchmarkId::new("asperity", format!("{}x{}", rows, cols)),
            &thresholded,
            |b, thresholded| {
                b.iter(|| sizer.size(black_box(thresholded)));
            },
        );
    }

    group.finish();
}

// =============================================================================
// WINDOW SEARCH BENCHMARKS
// =============================================================================

fn bench_window_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_search");
    let finder = WindowFinder::new(SPACING_KM, SPACING_KM).unwrap();

    for (rows, cols) in [(10, 10), (20, 40), (50, 100)] {
        let fault_length = cols as f64 * SPACING_KM;
        let fault_width = rows as f64 * SPACING_KM;
        let size = RuptureSize {
            length: fault_length / 3.0,
            width: fault_width / 3.0,
        };

        for (name, grid) in [
            ("asperity", generate_asperity_field(rows, cols)),
            ("noisy", generate_noisy_field(rows, cols)),
        ] {
            let thresholded = threshold_slip(&grid).grid;
            group.throughput(Throughput::Elements((rows * cols) as u64));
            group.bench_with_input(
                BenchmarkId::new(name, format!("{}x{}", rows, cols)),
                &thresholded,
                |b, thresholded| {
                    b.iter(|| {
                        finder.find(
                            black_box(thresholded),
                            size,
                            fault_length,
                            fault_width,
                        )
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_rupture_size, bench_window_search);
criterion_main!(benches);
