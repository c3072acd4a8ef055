//! Benchmarks for the bend planner.
//!
//! Run with: cargo bench -p wirebend-camtools

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wirebend_camtools::{BendPlanner, CompensationModel, MinBendDistanceSolver};
use wirebend_core::{BendParameters, MachineProfile, PinPosition, Point3};

/// Square helix with `corners` vertices, 30 mm sides rising 10 mm per corner
fn square_helix(corners: usize) -> Vec<Point3> {
    let offsets = [(0.0, 0.0), (30.0, 0.0), (30.0, 30.0), (0.0, 30.0)];
    (0..corners)
        .map(|i| {
            let (x, y) = offsets[i % 4];
            Point3::new(x, y, i as f64 * 10.0)
        })
        .collect()
}

fn bench_plan(c: &mut Criterion) {
    let planner = BendPlanner::default();
    let params = BendParameters::new(None, 1.5, PinPosition::Pin12, "bench.csv");
    let model = CompensationModel::from_coefficients(vec![1e-5, -2e-3, 1.15, 1.5]);

    let mut group = c.benchmark_group("plan");
    for corners in [8, 32, 128] {
        let points = square_helix(corners);
        group.bench_with_input(BenchmarkId::from_parameter(corners), &points, |b, points| {
            b.iter(|| planner.plan(black_box(points), &params, &model));
        });
    }
    group.finish();
}

fn bench_min_bend(c: &mut Criterion) {
    let params = BendParameters::new(None, 1.0, PinPosition::Pin16_5, "bench.csv");
    let solver = MinBendDistanceSolver::new(MachineProfile::default(), &params);
    c.bench_function("minimum_distance_90deg", |b| {
        b.iter(|| solver.minimum_distance(black_box(std::f64::consts::FRAC_PI_2)));
    });
}

criterion_group!(benches, bench_plan, bench_min_bend);
criterion_main!(benches);
