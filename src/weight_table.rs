use fxhash::FxBuildHasher;
use grid_util::Point;
use indexmap::IndexMap;
use log::trace;
use smallvec::SmallVec;

use crate::heuristic::Heuristic;
use crate::terrain_grid::TerrainGrid;
use crate::{NodeId, DIAGONAL_FACTOR};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Outgoing edges of a single node; a grid cell has at most eight neighbours.
pub type Edges = SmallVec<[(NodeId, f64); 8]>;

const STRAIGHT: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Sparse cost relation between neighbouring nodes of a [TerrainGrid]. Only traversable nodes are
/// keys; any pair without an entry has infinite weight and every traversable node has weight 0 to
/// itself.
#[derive(Clone, Debug)]
pub struct WeightTable {
    edges: FxIndexMap<NodeId, Edges>,
    node_count: usize,
}

impl WeightTable {
    /// Converts the grid into a weighted graph. The weight of a move is the resistance of the
    /// source cell if the target cell is slow and 1 otherwise, scaled by [DIAGONAL_FACTOR] for
    /// diagonal moves. Diagonal moves only exist when `heuristic` allows them.
    ///
    /// Note that this makes weights asymmetric: entering slow terrain from an open cell costs 1,
    /// while moving between two slow cells costs `1 / speed`.
    pub fn build(grid: &TerrainGrid, speed: f64, heuristic: Heuristic) -> WeightTable {
        let mut edges = FxIndexMap::default();
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                let point = Point::new(x, y);
                let node = grid.node_id(&point);
                let terrain = grid.terrain_at(node);
                if terrain.is_obstacle() {
                    continue;
                }
                let resistance = terrain.resistance(speed);
                let mut node_edges = Edges::new();
                let straight = STRAIGHT.iter().map(|offset| (offset, 1.0));
                let diagonal = DIAGONAL
                    .iter()
                    .filter(|_| heuristic.allows_diagonal())
                    .map(|offset| (offset, DIAGONAL_FACTOR));
                for (&(dx, dy), factor) in straight.chain(diagonal) {
                    let neighbour = Point::new(x + dx, y + dy);
                    match grid.terrain(&neighbour) {
                        Some(t) if !t.is_obstacle() => {
                            let weight = if t.is_slow() { resistance } else { 1.0 };
                            node_edges.push((grid.node_id(&neighbour), weight * factor));
                        }
                        _ => {}
                    }
                }
                edges.insert(node, node_edges);
            }
        }
        trace!(
            "Built weight table with {} traversable nodes out of {}",
            edges.len(),
            grid.node_count()
        );
        WeightTable {
            edges,
            node_count: grid.node_count(),
        }
    }

    /// Number of nodes in the underlying grid, traversable or not.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn is_traversable(&self, node: NodeId) -> bool {
        self.edges.contains_key(&node)
    }

    /// Outgoing edges of `node`; empty for obstacles.
    pub fn neighbours(&self, node: NodeId) -> &[(NodeId, f64)] {
        self.edges.get(&node).map(|e| e.as_slice()).unwrap_or(&[])
    }

    /// Weight of the move from `from` to `to`: 0 to itself, [f64::INFINITY] without an edge.
    pub fn weight(&self, from: NodeId, to: NodeId) -> f64 {
        match self.edges.get(&from) {
            Some(_) if from == to => 0.0,
            Some(edges) => edges
                .iter()
                .find(|(n, _)| *n == to)
                .map_or(f64::INFINITY, |&(_, w)| w),
            None => f64::INFINITY,
        }
    }
}
