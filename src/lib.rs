//! # terrain_pathfinding
//!
//! Finds routes across a terrain grid in which cells are open, impassable obstacles, or slow
//! terrain whose traversal cost is scaled by a caller-supplied speed. The grid is converted into a
//! sparse weighted graph, which is searched by a Dijkstra-style relaxation that finalizes nodes in
//! best-first order using a [Manhattan](https://en.wikipedia.org/wiki/Taxicab_geometry),
//! [Chebyshev](https://en.wikipedia.org/wiki/Chebyshev_distance) or Euclidean distance estimate.
//! The choice of metric also selects the movement model: Manhattan only allows straight moves,
//! the other two allow diagonal moves as well.
//!
//! The solver keeps no parent pointers. Instead it records the full distance vector after every
//! round and the path is recovered afterwards by diffing consecutive rounds.
//!
//! ```no_run
//! use grid_util::Point;
//! use terrain_pathfinding::{compute_path, Heuristic, PathRequest, TerrainGrid};
//!
//! let grid = TerrainGrid::from_rows(&[vec![0, 0, 0], vec![0, 1, 0], vec![0, 0, 0]]).unwrap();
//! let request = PathRequest::new(Point::new(0, 0), Point::new(2, 2))
//!     .with_heuristic(Heuristic::Manhattan);
//! let response = compute_path(&grid, &request).unwrap();
//! println!("{}cost: {}", response.grid, response.total_cost);
//! ```
pub mod error;
pub mod heuristic;
pub mod solver;
pub mod terrain_grid;
pub mod weight_table;

use grid_util::Point;
use log::info;

pub use crate::error::{PathError, Result};
pub use crate::heuristic::Heuristic;
pub use crate::solver::reconstruct::{path_cost, reconstruct, Path};
pub use crate::solver::{PathSolver, SolverState};
pub use crate::terrain_grid::{Terrain, TerrainGrid};
pub use crate::weight_table::WeightTable;

/// Row-major index of a grid cell, `y * width + x`.
pub type NodeId = usize;

/// Cost multiplier of a diagonal move, a deliberately coarse stand-in for the square root of two.
pub const DIAGONAL_FACTOR: f64 = 1.41;
/// Value a node takes in a distance snapshot once it has been finalized.
pub const FINALIZED: f64 = 0.0;

/// Everything a single search needs besides the grid itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathRequest {
    pub start: Point,
    pub goal: Point,
    /// Traversal speed through slow terrain relative to open terrain. Values above 1 make slow
    /// terrain cheaper, values below 1 make it more expensive.
    pub speed: f64,
    pub heuristic: Heuristic,
}

impl PathRequest {
    /// A request with unit speed and the [Euclidean](Heuristic::Euclidean) heuristic.
    pub fn new(start: Point, goal: Point) -> PathRequest {
        PathRequest {
            start,
            goal,
            speed: 1.0,
            heuristic: Heuristic::default(),
        }
    }
    pub fn with_speed(mut self, speed: f64) -> PathRequest {
        self.speed = speed;
        self
    }
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> PathRequest {
        self.heuristic = heuristic;
        self
    }

    /// Checks the request against `grid` without doing any search.
    pub fn validate(&self, grid: &TerrainGrid) -> Result<()> {
        if !(self.speed > 0.0 && self.speed.is_finite()) {
            return Err(PathError::InvalidInput(format!(
                "speed must be positive and finite, got {}",
                self.speed
            )));
        }
        for (name, point) in [("start", &self.start), ("goal", &self.goal)] {
            match grid.terrain(point) {
                None => {
                    return Err(PathError::InvalidInput(format!(
                        "{} {} lies outside the {}x{} grid",
                        name,
                        point,
                        grid.width(),
                        grid.height()
                    )))
                }
                Some(Terrain::Obstacle) => {
                    return Err(PathError::InvalidInput(format!(
                        "{} {} is an obstacle",
                        name, point
                    )))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Result of a successful search.
#[derive(Clone, Debug)]
pub struct PathResponse {
    /// Copy of the input grid with the path marked by [Terrain::PathMarker].
    pub grid: TerrainGrid,
    /// The path from goal back to start.
    pub path: Vec<Point>,
    /// Cost recorded by the solver for reaching the goal.
    pub total_cost: f64,
}

/// Computes a path from `request.start` to `request.goal` and marks it on a copy of the grid.
///
/// Fails with [PathError::InvalidInput] if the request does not fit the grid and with
/// [PathError::NoPathFound] if the goal cannot be reached.
pub fn compute_path(grid: &TerrainGrid, request: &PathRequest) -> Result<PathResponse> {
    request.validate(grid)?;
    let start = grid.node_id(&request.start);
    let goal = grid.node_id(&request.goal);

    let table = WeightTable::build(grid, request.speed, request.heuristic);
    let estimates = request
        .heuristic
        .estimates_to(goal, grid.width(), grid.node_count());
    let history = PathSolver::new(&table, estimates, start, goal)
        .run()
        .map_err(|e| {
            info!("{} is not reachable from {}", request.goal, request.start);
            e
        })?;
    let path = reconstruct(&history, start, goal).ok_or(PathError::NoPathFound)?;
    info!(
        "Found path of {} steps from {} to {} with cost {:.2}",
        path.steps(),
        request.start,
        request.goal,
        path.cost
    );

    Ok(PathResponse {
        grid: grid.annotate(&path.nodes),
        path: path.nodes.iter().map(|&node| grid.point(node)).collect(),
        total_cost: path.cost,
    })
}
