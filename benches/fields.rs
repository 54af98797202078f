use criterion::{criterion_group, criterion_main, Criterion, black_box};

use voxfield::sdf::{classify, euclidean_sdf, manhattan_sdf, FieldPipeline};
use voxfield::voxel::source::sphere_shell;
use voxfield::voxel::VoxelGrid;

use glam::IVec3;

fn sphere_grid(size: i32) -> VoxelGrid {
    let source = sphere_shell(IVec3::splat(size), size as f32 * 0.35, 1.0).unwrap();
    VoxelGrid::from_source(&source).unwrap()
}

fn bench_classify_64(c: &mut Criterion) {
    let mut grid = sphere_grid(64);
    let boundary = grid.boundary().unwrap();

    c.bench_function("classify_64", |b| {
        b.iter(|| classify(black_box(&mut grid), &boundary, "labels").unwrap());
    });
}

fn bench_manhattan_64(c: &mut Criterion) {
    let mut grid = sphere_grid(64);
    let boundary = grid.boundary().unwrap();
    let labels = classify(&mut grid, &boundary, "labels").unwrap();

    c.bench_function("manhattan_sdf_64", |b| {
        b.iter(|| manhattan_sdf(black_box(&mut grid), &labels, "msdf").unwrap());
    });
}

fn bench_euclidean_64(c: &mut Criterion) {
    let mut grid = sphere_grid(64);
    let boundary = grid.boundary().unwrap();
    let labels = classify(&mut grid, &boundary, "labels").unwrap();

    c.bench_function("euclidean_sdf_64", |b| {
        b.iter(|| euclidean_sdf(black_box(&mut grid), &labels, "esdf", "closest").unwrap());
    });
}

fn bench_pipeline_32(c: &mut Criterion) {
    let pipeline = FieldPipeline::default();

    c.bench_function("field_pipeline_32", |b| {
        b.iter(|| {
            let mut grid = sphere_grid(32);
            pipeline.run(black_box(&mut grid)).unwrap()
        });
    });
}

fn bench_range_filter_64(c: &mut Criterion) {
    let mut grid = sphere_grid(64);
    grid.generate_manhattan_sdf(None).unwrap();

    c.bench_function("bool_from_int_range_64", |b| {
        b.iter(|| {
            grid.bool_grid_from_int_range("MSignedDistanceField", "band", black_box(-2), black_box(2))
                .unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_classify_64,
    bench_manhattan_64,
    bench_euclidean_64,
    bench_pipeline_32,
    bench_range_filter_64,
);
criterion_main!(benches);
