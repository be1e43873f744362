use core::fmt;
use std::str::FromStr;

use grid_util::Point;

use crate::error::PathError;
use crate::NodeId;

/// Distance metric used to bias node selection. The metric also decides the movement model:
/// [Manhattan](Heuristic::Manhattan) restricts movement to the four straight directions, the
/// other two enable diagonal moves as well.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Heuristic {
    Manhattan,
    Chebyshev,
    #[default]
    Euclidean,
}

impl Heuristic {
    pub const ALL: [Heuristic; 3] = [
        Heuristic::Manhattan,
        Heuristic::Chebyshev,
        Heuristic::Euclidean,
    ];

    pub fn allows_diagonal(&self) -> bool {
        !matches!(self, Heuristic::Manhattan)
    }

    /// Distance between two grid points under this metric.
    pub fn distance(&self, p1: &Point, p2: &Point) -> f64 {
        let dx = (p1.x - p2.x).abs() as f64;
        let dy = (p1.y - p2.y).abs() as f64;
        match self {
            Heuristic::Manhattan => dx + dy,
            Heuristic::Chebyshev => dx.max(dy),
            Heuristic::Euclidean => (dx * dx + dy * dy).sqrt(),
        }
    }

    /// Same as [distance](Self::distance), with both points given as node ids of a grid that is
    /// `width` cells wide.
    pub fn estimate(&self, a: NodeId, b: NodeId, width: usize) -> f64 {
        self.distance(&node_point(a, width), &node_point(b, width))
    }

    /// The estimate from every node of a `node_count` sized grid to `goal`, indexed by node id.
    pub fn estimates_to(&self, goal: NodeId, width: usize, node_count: usize) -> Vec<f64> {
        let goal_point = node_point(goal, width);
        (0..node_count)
            .map(|node| self.distance(&node_point(node, width), &goal_point))
            .collect()
    }
}

fn node_point(node: NodeId, width: usize) -> Point {
    Point::new((node % width) as i32, (node / width) as i32)
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Heuristic::Manhattan => "Manhattan",
            Heuristic::Chebyshev => "Chebyshev",
            Heuristic::Euclidean => "Euclidean",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Heuristic {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manhattan" => Ok(Heuristic::Manhattan),
            "chebyshev" => Ok(Heuristic::Chebyshev),
            "euclidean" => Ok(Heuristic::Euclidean),
            other => Err(PathError::InvalidInput(format!(
                "unknown heuristic '{}'",
                other
            ))),
        }
    }
}
