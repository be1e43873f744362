use grid_util::{Point, Rect};
use terrain_pathfinding::{compute_path, Heuristic, PathError, PathRequest, Terrain, TerrainGrid};

// A walled 24x17 map with a partial inner wall. Two rectangular slow zones can be stamped on top
// of it, one near the top and one near the bottom edge.
fn base_map() -> TerrainGrid {
    const W: usize = 24;
    const H: usize = 17;
    let mut grid = TerrainGrid::new(W, H, Terrain::Open);
    for x in 0..W as i32 {
        grid.set(&Point::new(x, 0), Terrain::Obstacle);
        grid.set(&Point::new(x, H as i32 - 1), Terrain::Obstacle);
    }
    for y in 0..H as i32 {
        grid.set(&Point::new(0, y), Terrain::Obstacle);
        grid.set(&Point::new(W as i32 - 1, y), Terrain::Obstacle);
    }
    for y in 5..12 {
        grid.set(&Point::new(11, y), Terrain::Obstacle);
    }
    grid
}

fn main() -> Result<(), PathError> {
    let start = Point::new(2, 2);
    let end = Point::new(20, 14);
    let speed = 0.7;

    let plain = base_map();
    let mut bottom = base_map();
    bottom.stamp_slow_zone(Rect::new(9, 12, 6, 4), 3)?;
    let mut both = bottom.clone();
    both.stamp_slow_zone(Rect::new(9, 1, 6, 3), 3)?;

    for (name, grid) in [
        ("No slow zones", &plain),
        ("Bottom zone only", &bottom),
        ("Both zones", &both),
    ] {
        for heuristic in Heuristic::ALL {
            let request = PathRequest::new(start, end)
                .with_speed(speed)
                .with_heuristic(heuristic);
            match compute_path(grid, &request) {
                Ok(response) => {
                    println!(
                        "{name}, {heuristic}: {} steps, path weight {:.2}",
                        response.path.len() - 1,
                        response.total_cost
                    );
                    println!("{}", response.grid);
                }
                Err(PathError::NoPathFound) => println!("{name}, {heuristic}: no path"),
                Err(e) => return Err(e),
            }
        }
    }
    Ok(())
}
