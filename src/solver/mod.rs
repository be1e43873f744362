//! The distance solver. Relaxes edges like Dijkstra's algorithm but picks the next node to
//! finalize in best-first order (distance plus heuristic estimate), recording the full distance
//! vector after every round so the path can later be recovered from the history alone.
use log::{debug, trace};

use crate::error::{PathError, Result};
use crate::weight_table::WeightTable;
use crate::{NodeId, FINALIZED};

pub mod history;
pub mod reconstruct;

use history::{DistanceHistory, DistanceSnapshot};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverState {
    Ready,
    Relaxing,
    Selecting,
    Found,
    Exhausted,
}

impl SolverState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SolverState::Found | SolverState::Exhausted)
    }
}

/// Search state of a single solve. Borrows the weight table, owns everything else.
#[derive(Clone, Debug)]
pub struct PathSolver<'a> {
    table: &'a WeightTable,
    estimates: Vec<f64>,
    goal: NodeId,
    distances: Vec<f64>,
    current: NodeId,
    state: SolverState,
    rounds: usize,
    history: DistanceHistory,
}

impl<'a> PathSolver<'a> {
    /// Prepares a solve from `start` to `goal`. `estimates` holds the heuristic estimate of every
    /// node to the goal, see [Heuristic::estimates_to](crate::heuristic::Heuristic::estimates_to).
    pub fn new(
        table: &'a WeightTable,
        estimates: Vec<f64>,
        start: NodeId,
        goal: NodeId,
    ) -> PathSolver<'a> {
        debug_assert_eq!(estimates.len(), table.node_count());
        let mut distances = vec![f64::INFINITY; table.node_count()];
        distances[start] = 0.0;
        PathSolver {
            table,
            estimates,
            goal,
            distances,
            current: start,
            state: SolverState::Ready,
            rounds: 0,
            history: DistanceHistory::new(),
        }
    }

    pub fn state(&self) -> SolverState {
        self.state
    }
    /// The node relaxed in the current (or last) round.
    pub fn current(&self) -> NodeId {
        self.current
    }
    pub fn rounds(&self) -> usize {
        self.rounds
    }
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }
    pub fn history(&self) -> &DistanceHistory {
        &self.history
    }

    /// Performs a single state transition and returns the new state. Terminal states are sticky.
    pub fn step(&mut self) -> SolverState {
        self.state = match self.state {
            SolverState::Ready => SolverState::Relaxing,
            SolverState::Relaxing => {
                self.relax();
                if self.current == self.goal {
                    SolverState::Found
                } else {
                    SolverState::Selecting
                }
            }
            SolverState::Selecting => match self.select() {
                // Every round finalizes a distinct node, so the bound is only a backstop.
                Some(node) if self.rounds < self.table.node_count() => {
                    self.current = node;
                    SolverState::Relaxing
                }
                _ => SolverState::Exhausted,
            },
            terminal => terminal,
        };
        self.state
    }

    /// Drives the solver to a terminal state and hands out the recorded history if the goal was
    /// reached.
    pub fn run(mut self) -> Result<DistanceHistory> {
        while !self.step().is_terminal() {}
        match self.state {
            SolverState::Found => {
                debug!("Goal {} finalized after {} rounds", self.goal, self.rounds);
                Ok(self.history)
            }
            _ => {
                debug!(
                    "Search exhausted after {} rounds without reaching {}",
                    self.rounds, self.goal
                );
                Err(PathError::NoPathFound)
            }
        }
    }

    fn relax(&mut self) {
        let last = self.distances[self.current];
        self.distances[self.current] = FINALIZED;
        // Nodes without an edge have infinite weight and can never improve.
        for &(node, weight) in self.table.neighbours(self.current) {
            let candidate = weight + last;
            if candidate < self.distances[node] {
                self.distances[node] = candidate;
            }
        }
        trace!("Round {}: relaxed node {}", self.rounds, self.current);
        self.history.push(DistanceSnapshot::new(self.distances.clone()));
        self.rounds += 1;
    }

    /// Linear scan for the open node with the smallest distance plus estimate. [Iterator::min_by]
    /// keeps the first of equal elements, so ties go to the smallest node id.
    fn select(&self) -> Option<NodeId> {
        self.distances
            .iter()
            .enumerate()
            .filter(|(_, d)| **d != FINALIZED && d.is_finite())
            .map(|(node, d)| (node, d + self.estimates[node]))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(node, _)| node)
    }
}
