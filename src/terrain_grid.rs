use core::fmt;

use grid_util::grid::{SimpleValueGrid, ValueGrid};
use grid_util::point::Point;
use grid_util::Rect;
use log::debug;
use petgraph::unionfind::UnionFind;

use crate::error::{PathError, Result};
use crate::heuristic::Heuristic;
use crate::NodeId;

/// Raw code of an open cell.
pub const OPEN_CODE: u8 = 0;
/// Raw code of an obstacle cell.
pub const OBSTACLE_CODE: u8 = 1;
/// Raw code written for cells on an annotated path.
pub const PATH_MARKER_CODE: u8 = 2;

/// Classification of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Terrain {
    /// Baseline cost.
    #[default]
    Open,
    /// Impassable.
    Obstacle,
    /// Any non-reserved code. Traversal cost is scaled by the resistance factor.
    Slow(u8),
    /// Output-only marker placed by [TerrainGrid::annotate].
    PathMarker,
}

impl Terrain {
    /// Classifies a raw code. Only [OPEN_CODE] and [OBSTACLE_CODE] are reserved, every other value
    /// (including [PATH_MARKER_CODE]) is slow terrain.
    pub fn from_code(code: u8) -> Terrain {
        match code {
            OPEN_CODE => Terrain::Open,
            OBSTACLE_CODE => Terrain::Obstacle,
            other => Terrain::Slow(other),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Terrain::Open => OPEN_CODE,
            Terrain::Obstacle => OBSTACLE_CODE,
            Terrain::Slow(code) => *code,
            Terrain::PathMarker => PATH_MARKER_CODE,
        }
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self, Terrain::Obstacle)
    }

    /// A marker cell keeps the cost of its raw code, so it counts as slow.
    pub fn is_slow(&self) -> bool {
        matches!(self, Terrain::Slow(_) | Terrain::PathMarker)
    }

    /// Cost multiplier of this cell: `1 / speed` for slow terrain, `1` otherwise.
    pub fn resistance(&self, speed: f64) -> f64 {
        if self.is_slow() {
            1.0 / speed
        } else {
            1.0
        }
    }

    fn symbol(&self) -> char {
        match self {
            Terrain::Open => '.',
            Terrain::Obstacle => '#',
            Terrain::Slow(_) => '~',
            Terrain::PathMarker => '*',
        }
    }
}

/// Rectangular terrain map addressed either by [Point] or by row-major [NodeId].
#[derive(Clone, Debug)]
pub struct TerrainGrid {
    pub grid: SimpleValueGrid<Terrain>,
}

impl TerrainGrid {
    pub fn new(width: usize, height: usize, terrain: Terrain) -> TerrainGrid {
        TerrainGrid {
            grid: SimpleValueGrid::new(width, height, terrain),
        }
    }

    /// Builds a grid from rows of raw codes. Rows must be non-empty and all of the same length.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<TerrainGrid> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        if height == 0 || width == 0 {
            return Err(PathError::InvalidInput("grid is empty".to_owned()));
        }
        if let Some(y) = rows.iter().position(|row| row.len() != width) {
            return Err(PathError::InvalidInput(format!(
                "row {} has {} cells, expected {}",
                y,
                rows[y].len(),
                width
            )));
        }
        let mut terrain_grid = TerrainGrid::new(width, height, Terrain::Open);
        for (y, row) in rows.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                terrain_grid
                    .grid
                    .set(x as i32, y as i32, Terrain::from_code(code));
            }
        }
        Ok(terrain_grid)
    }

    /// Exports the grid as rows of raw codes, the inverse of [from_rows](Self::from_rows).
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height() as i32)
            .map(|y| {
                (0..self.width() as i32)
                    .map(|x| self.grid.get(x, y).code())
                    .collect()
            })
            .collect()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }
    pub fn height(&self) -> usize {
        self.grid.height()
    }
    pub fn node_count(&self) -> usize {
        self.width() * self.height()
    }

    pub fn in_bounds(&self, point: &Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width()
            && (point.y as usize) < self.height()
    }

    /// Terrain at `point`, or [None] when it lies outside the grid.
    pub fn terrain(&self, point: &Point) -> Option<Terrain> {
        if self.in_bounds(point) {
            Some(self.grid.get(point.x, point.y))
        } else {
            None
        }
    }

    pub fn terrain_at(&self, node: NodeId) -> Terrain {
        let p = self.point(node);
        self.grid.get(p.x, p.y)
    }

    pub fn set(&mut self, point: &Point, terrain: Terrain) {
        self.grid.set(point.x, point.y, terrain);
    }

    pub fn is_traversable(&self, point: &Point) -> bool {
        self.terrain(point).is_some_and(|t| !t.is_obstacle())
    }

    /// Row-major node id of an in-bounds point.
    pub fn node_id(&self, point: &Point) -> NodeId {
        point.y as usize * self.width() + point.x as usize
    }

    pub fn point(&self, node: NodeId) -> Point {
        Point::new((node % self.width()) as i32, (node / self.width()) as i32)
    }

    /// Stamps a rectangle of slow terrain with the given raw code onto the grid. Reserved codes
    /// are rejected since they would not produce slow terrain.
    pub fn stamp_slow_zone(&mut self, rect: Rect, code: u8) -> Result<()> {
        let terrain = Terrain::from_code(code);
        if !terrain.is_slow() {
            return Err(PathError::InvalidInput(format!(
                "code {} is reserved and cannot mark a slow zone",
                code
            )));
        }
        self.grid.set_rect(rect, terrain);
        Ok(())
    }

    /// Copies the grid and marks every node of `path` with [Terrain::PathMarker].
    pub fn annotate(&self, path: &[NodeId]) -> TerrainGrid {
        let mut annotated = self.clone();
        for &node in path {
            let p = self.point(node);
            annotated.set(&p, Terrain::PathMarker);
        }
        annotated
    }

    /// Connected components of the traversable cells under the movement model of `heuristic`.
    pub fn components(&self, heuristic: Heuristic) -> UnionFind<usize> {
        debug!(
            "Generating connected components of a {}x{} grid",
            self.width(),
            self.height()
        );
        let mut components = UnionFind::new(self.node_count());
        // Linking forward neighbours only is enough since adjacency is symmetric.
        let forward: &[(i32, i32)] = if heuristic.allows_diagonal() {
            &[(1, 0), (0, 1), (1, 1), (-1, 1)]
        } else {
            &[(1, 0), (0, 1)]
        };
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                let point = Point::new(x, y);
                if !self.is_traversable(&point) {
                    continue;
                }
                let parent_ix = self.node_id(&point);
                for &(dx, dy) in forward {
                    let n = Point::new(x + dx, y + dy);
                    if self.is_traversable(&n) {
                        components.union(parent_ix, self.node_id(&n));
                    }
                }
            }
        }
        components
    }

    /// Checks if `goal` can be reached from `start` at all, ignoring costs.
    pub fn reachable(&self, start: &Point, goal: &Point, heuristic: Heuristic) -> bool {
        if !self.is_traversable(start) || !self.is_traversable(goal) {
            return false;
        }
        self.components(heuristic)
            .equiv(self.node_id(start), self.node_id(goal))
    }
}

impl fmt::Display for TerrainGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() as i32 {
            let row = (0..self.width() as i32)
                .map(|x| self.grid.get(x, y).symbol())
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
