/// Fuzzes the pathfinding system by checking for many random grids that a path is found exactly when
/// the goal is on the same connected component as the start, that every found path is a valid walk
/// through the grid, and that its cost is close to the optimum. All heuristics are tested.
use grid_util::*;
use rand::prelude::*;
use terrain_pathfinding::{
    compute_path, path_cost, Heuristic, NodeId, PathError, PathRequest, Terrain, TerrainGrid,
    WeightTable,
};

fn random_grid(w: usize, h: usize, rng: &mut StdRng, slow_cells: bool) -> TerrainGrid {
    let mut grid = TerrainGrid::new(w, h, Terrain::Open);
    for x in 0..w as i32 {
        for y in 0..h as i32 {
            let terrain = if rng.gen_bool(0.3) {
                Terrain::Obstacle
            } else if slow_cells && rng.gen_bool(0.3) {
                Terrain::Slow(3)
            } else {
                Terrain::Open
            };
            grid.set(&Point::new(x, y), terrain);
        }
    }
    grid
}

fn visualize_grid(grid: &TerrainGrid, start: &Point, end: &Point) {
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else {
                match grid.terrain(&p) {
                    Some(Terrain::Obstacle) => print!("#"),
                    Some(Terrain::Open) => print!("."),
                    _ => print!("~"),
                }
            }
        }
        println!();
    }
}

/// Cheapest cost from start to goal by repeated relaxation of every edge.
fn optimal_cost(table: &WeightTable, start: NodeId, goal: NodeId) -> f64 {
    let mut dist = vec![f64::INFINITY; table.node_count()];
    dist[start] = 0.0;
    let mut changed = true;
    while changed {
        changed = false;
        for node in 0..table.node_count() {
            if !dist[node].is_finite() {
                continue;
            }
            for &(n, w) in table.neighbours(node) {
                if dist[node] + w < dist[n] {
                    dist[n] = dist[node] + w;
                    changed = true;
                }
            }
        }
    }
    dist[goal]
}

fn assert_valid_walk(
    grid: &TerrainGrid,
    path: &[Point],
    start: &Point,
    end: &Point,
    diagonal: bool,
) {
    assert_eq!(path.first(), Some(end));
    assert_eq!(path.last(), Some(start));
    for pair in path.windows(2) {
        let dx = (pair[0].x - pair[1].x).abs();
        let dy = (pair[0].y - pair[1].y).abs();
        if diagonal {
            assert!(dx.max(dy) == 1);
        } else {
            assert!(dx + dy == 1);
        }
        assert!(grid.is_traversable(&pair[1]));
    }
}

#[test]
fn fuzz() {
    const N: usize = 8;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(0);
    for heuristic in Heuristic::ALL {
        let start = Point::new(0, 0);
        let end = Point::new(N as i32 - 1, N as i32 - 1);
        for _ in 0..N_GRIDS {
            let mut random_grid = random_grid(N, N, &mut rng, true);
            random_grid.set(&start, Terrain::Open);
            random_grid.set(&end, Terrain::Open);
            let speed = rng.gen_range(0.25..4.0);
            let reachable = random_grid.reachable(&start, &end, heuristic);
            let request = PathRequest::new(start, end)
                .with_speed(speed)
                .with_heuristic(heuristic);
            let result = compute_path(&random_grid, &request);
            // Show the grid if the outcome disagrees with the components
            if result.is_ok() != reachable {
                visualize_grid(&random_grid, &start, &end);
            }
            match result {
                Ok(response) => {
                    assert!(reachable);
                    assert_valid_walk(
                        &random_grid,
                        &response.path,
                        &start,
                        &end,
                        heuristic.allows_diagonal(),
                    );
                }
                Err(e) => {
                    assert!(!reachable);
                    assert_eq!(e, PathError::NoPathFound);
                }
            }
        }
    }
}

#[test]
fn fuzz_distance() {
    const N: usize = 6;
    const N_GRIDS: usize = 1000;
    const SPEED: f64 = 0.5;
    let mut rng = StdRng::seed_from_u64(0);

    for heuristic in Heuristic::ALL {
        for _ in 0..N_GRIDS {
            let mut random_grid = random_grid(N, N, &mut rng, true);
            let start = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
            let end = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
            random_grid.set(&start, Terrain::Open);
            random_grid.set(&end, Terrain::Open);
            if !random_grid.reachable(&start, &end, heuristic) {
                continue;
            }
            let request = PathRequest::new(start, end)
                .with_speed(SPEED)
                .with_heuristic(heuristic);
            let response = compute_path(&random_grid, &request).unwrap();
            let table = WeightTable::build(&random_grid, SPEED, heuristic);
            let optimum = optimal_cost(
                &table,
                random_grid.node_id(&start),
                random_grid.node_id(&end),
            );
            let found = response.total_cost;
            if heuristic == Heuristic::Euclidean {
                // The Euclidean estimate slightly exceeds the diagonal factor, so only near-optimal
                if optimum >= 0.01 {
                    let delta_dist = (found - optimum).abs() / optimum;
                    if delta_dist >= 0.01 {
                        println!("Optimal cost: {optimum}; found cost: {found}");
                        visualize_grid(&random_grid, &start, &end);
                    }
                    assert!(delta_dist < 0.01);
                }
            } else {
                if (found - optimum).abs() >= 1e-9 {
                    println!("{heuristic}: optimal cost {optimum}; found cost {found}");
                    visualize_grid(&random_grid, &start, &end);
                }
                assert!((found - optimum).abs() < 1e-9);
            }
        }
    }
}

/// Without slow terrain the cost recorded by the solver and the one recomputed from the path agree.
#[test]
fn fuzz_cost_cross_check() {
    const N: usize = 7;
    const N_GRIDS: usize = 500;
    let mut rng = StdRng::seed_from_u64(1);
    for heuristic in Heuristic::ALL {
        let start = Point::new(0, 0);
        let end = Point::new(N as i32 - 1, N as i32 - 1);
        for _ in 0..N_GRIDS {
            let mut random_grid = random_grid(N, N, &mut rng, false);
            random_grid.set(&start, Terrain::Open);
            random_grid.set(&end, Terrain::Open);
            let request = PathRequest::new(start, end).with_heuristic(heuristic);
            if let Ok(response) = compute_path(&random_grid, &request) {
                let nodes = response
                    .path
                    .iter()
                    .map(|p| random_grid.node_id(p))
                    .collect::<Vec<_>>();
                let evaluated = path_cost(&random_grid, &nodes, 1.0);
                assert!((evaluated - response.total_cost).abs() < 1e-9);
            }
        }
    }
}
