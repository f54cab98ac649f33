use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::time::Duration;

use verdant_world::config::GenConfig;
use verdant_world::{NoiseField, ScatterParams, TerrainGrid, VegetationScatterer};

fn bench_terrain_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("terrain_generate");
    let cfg = GenConfig::default();
    let field = NoiseField::new(&cfg.terrain.noise);
    group.bench_function("grid_100x100", |b| {
        b.iter(|| {
            let grid = TerrainGrid::generate(100, 100, &field);
            black_box(grid);
        })
    });
    group.finish();
}

fn bench_scatter_default(c: &mut Criterion) {
    let mut group = c.benchmark_group("scatter_default");
    let cfg = GenConfig::default();
    let grid = TerrainGrid::generate(100, 100, &NoiseField::new(&cfg.terrain.noise));
    let params = ScatterParams::from_config(&cfg.vegetation);
    let mut scatterer = VegetationScatterer::new(&cfg.vegetation);
    group.bench_function("hash_step2_100x100", |b| {
        b.iter(|| {
            let out = scatterer.scatter(grid.mesh(), grid.range(), &params);
            black_box(out);
        })
    });
    let dense = ScatterParams {
        sample_distance: 1.0,
        ..params.clone()
    };
    group.bench_function("hash_step1_100x100", |b| {
        b.iter(|| {
            let out = scatterer.scatter(grid.mesh(), grid.range(), &dense);
            black_box(out);
        })
    });
    group.finish();
}

fn bench_scatter_reference(c: &mut Criterion) {
    let mut group = c.benchmark_group("scatter_reference");
    let cfg = GenConfig::default();
    // Quadratic path: keep the grid small
    let grid = TerrainGrid::generate(32, 32, &NoiseField::new(&cfg.terrain.noise));
    let params = ScatterParams::from_config(&cfg.vegetation);
    let mut scatterer = VegetationScatterer::new(&cfg.vegetation);
    group.bench_function("all_pairs_32x32", |b| {
        b.iter(|| {
            let out = scatterer.scatter_reference(grid.mesh(), grid.range(), &params);
            black_box(out);
        })
    });
    group.finish();
}

fn configure() -> Criterion {
    Criterion::default()
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches;
    config = configure();
    targets = bench_terrain_generate, bench_scatter_default, bench_scatter_reference
}
criterion_main!(benches);
