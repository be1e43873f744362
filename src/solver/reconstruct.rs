use itertools::Itertools;
use log::warn;

use crate::solver::history::DistanceHistory;
use crate::terrain_grid::TerrainGrid;
use crate::{NodeId, DIAGONAL_FACTOR};

/// A route through the grid, ordered from goal to start, with the cost recorded by the solver.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub nodes: Vec<NodeId>,
    pub cost: f64,
}

impl Path {
    /// Number of moves along the path.
    pub fn steps(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// Recovers the path to `goal` from the distance history alone.
///
/// Walking the rounds backwards, the distance of the current node changes exactly in the round
/// its best predecessor was relaxed. That predecessor is the node that turned finalized in that
/// round; its distance before finalization becomes the new length to follow.
pub fn reconstruct(history: &DistanceHistory, start: NodeId, goal: NodeId) -> Option<Path> {
    if start == goal {
        return Some(Path {
            nodes: vec![goal],
            cost: 0.0,
        });
    }
    let Some(last_round) = (0..history.len()).rev().find(|&k| !history[k].is_finalized(goal))
    else {
        warn!("Goal {} never appears open in a history of {} rounds", goal, history.len());
        return None;
    };
    let total_cost = history[last_round][goal];
    if !total_cost.is_finite() {
        warn!("Goal {} was never reached", goal);
        return None;
    }

    let mut nodes = vec![goal];
    let mut current = goal;
    let mut length = total_cost;
    for k in (0..=last_round).rev() {
        if history[k][current] != length {
            let Some(predecessor) = history.finalized_after(k) else {
                warn!("No node was finalized after round {}, history is inconsistent", k);
                return None;
            };
            length = history[k][predecessor];
            current = predecessor;
            nodes.push(current);
        }
    }
    nodes.push(start);
    Some(Path {
        nodes,
        cost: total_cost,
    })
}

/// Recomputes the cost of a path by walking it pairwise in the given order. Each move costs the
/// resistance of the cell it moves to, scaled by [DIAGONAL_FACTOR] when it is not a straight
/// move.
pub fn path_cost(grid: &TerrainGrid, nodes: &[NodeId], speed: f64) -> f64 {
    nodes
        .iter()
        .map(|&node| grid.point(node))
        .tuple_windows()
        .map(|(current, next)| {
            let resistance = grid.terrain_at(grid.node_id(&next)).resistance(speed);
            if current.manhattan_distance(&next) == 1 {
                resistance
            } else {
                resistance * DIAGONAL_FACTOR
            }
        })
        .sum()
}
