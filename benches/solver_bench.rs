use criterion::{criterion_group, criterion_main, Criterion};
use grid_util::Point;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;
use terrain_pathfinding::{compute_path, Heuristic, PathRequest, Terrain, TerrainGrid};

fn random_grid(n: usize, rng: &mut StdRng) -> TerrainGrid {
    let mut grid = TerrainGrid::new(n, n, Terrain::Open);
    for x in 0..n as i32 {
        for y in 0..n as i32 {
            let terrain = match rng.gen_range(0..10) {
                0..=1 => Terrain::Obstacle,
                2..=3 => Terrain::Slow(3),
                _ => Terrain::Open,
            };
            grid.set(&Point::new(x, y), terrain);
        }
    }
    grid
}

fn random_bench(c: &mut Criterion) {
    const N: usize = 24;
    const N_GRIDS: usize = 16;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    let grids = (0..N_GRIDS)
        .map(|_| {
            let mut grid = random_grid(N, &mut rng);
            grid.set(&start, Terrain::Open);
            grid.set(&end, Terrain::Open);
            grid
        })
        .collect::<Vec<_>>();
    for heuristic in Heuristic::ALL {
        let request = PathRequest::new(start, end)
            .with_speed(0.7)
            .with_heuristic(heuristic);
        c.bench_function(format!("{N}x{N} random, {heuristic}").as_str(), |b| {
            b.iter(|| {
                for grid in &grids {
                    black_box(compute_path(grid, &request).ok());
                }
            })
        });
    }
}

criterion_group!(benches, random_bench);
criterion_main!(benches);
