//! Benchmarks for quadric error simplification on generated grids

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use qemesh_core::{weld_primitive, MeshPrimitive, Point3d, Primitive};
use qemesh_simplification::{simplify_primitive, SimplifyOptions};

fn generate_grid_primitive(size: usize) -> Primitive {
    let mut positions = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let fx = x as f32 / (size - 1) as f32 * std::f32::consts::PI;
            let fy = y as f32 / (size - 1) as f32 * std::f32::consts::PI;
            positions.push([x as f32, y as f32, (fx.sin() * fy.sin()) * 2.0]);
        }
    }
    let mut indices = Vec::with_capacity((size - 1) * (size - 1) * 6);
    for y in 0..(size - 1) {
        for x in 0..(size - 1) {
            let tl = (y * size + x) as u32;
            let tr = tl + 1;
            let bl = ((y + 1) * size + x) as u32;
            let br = bl + 1;
            indices.extend_from_slice(&[tl, bl, tr, tr, bl, br]);
        }
    }
    Primitive::triangles(positions, indices)
}

/// Same grid with every triangle owning its own three vertices
fn generate_split_grid(size: usize) -> Primitive {
    let grid = generate_grid_primitive(size);
    let indices = grid.indices.clone().unwrap_or_default();
    let positions = indices
        .iter()
        .map(|&i| {
            let p = grid.position(i as usize).unwrap_or_else(Point3d::origin);
            [p.x as f32, p.y as f32, p.z as f32]
        })
        .collect();
    Primitive::triangles(positions, (0..indices.len() as u32).collect())
}

fn bench_simplification(c: &mut Criterion) {
    let sizes = [10, 20, 40];
    let targets = [0.3, 0.5, 0.7];

    let mut group = c.benchmark_group("simplification");

    for &size in &sizes {
        let prim = generate_grid_primitive(size);
        let face_count = prim.triangle_count();

        for &target in &targets {
            let options = SimplifyOptions::new().with_target(target);
            group.bench_with_input(
                BenchmarkId::new("qem", format!("{}f_t{}", face_count, (target * 100.0) as u32)),
                &options,
                |b, options| {
                    b.iter_batched(
                        || prim.clone(),
                        |mut prim| {
                            let report = simplify_primitive(&mut prim, black_box(options)).unwrap();
                            black_box(report);
                        },
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }

    group.finish();
}

fn bench_proximity(c: &mut Criterion) {
    let mut group = c.benchmark_group("proximity");
    group.sample_size(20);

    for &size in &[10, 20] {
        let prim = generate_grid_primitive(size);
        let options = SimplifyOptions::new().with_target(0.5).with_distance_threshold(1.5);
        group.bench_with_input(BenchmarkId::new("qem", prim.vertex_count()), &options, |b, options| {
            b.iter_batched(
                || prim.clone(),
                |mut prim| black_box(simplify_primitive(&mut prim, options).unwrap()),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_weld(c: &mut Criterion) {
    let mut group = c.benchmark_group("weld");

    for &size in &[20, 40] {
        let prim = generate_split_grid(size);
        group.bench_with_input(BenchmarkId::new("exact", size), &prim, |b, prim| {
            b.iter_batched(
                || prim.clone(),
                |mut prim| black_box(weld_primitive(&mut prim, 0.0).unwrap()),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_simplification, bench_proximity, bench_weld);
criterion_main!(benches);
