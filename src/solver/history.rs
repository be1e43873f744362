use std::ops::Index;

use crate::{NodeId, FINALIZED};

/// Distances from the start after one solver round. Finalized nodes hold [FINALIZED].
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceSnapshot(Vec<f64>);

impl DistanceSnapshot {
    pub fn new(distances: Vec<f64>) -> DistanceSnapshot {
        DistanceSnapshot(distances)
    }
    pub fn is_finalized(&self, node: NodeId) -> bool {
        self.0[node] == FINALIZED
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Index<NodeId> for DistanceSnapshot {
    type Output = f64;

    fn index(&self, node: NodeId) -> &f64 {
        &self.0[node]
    }
}

/// One [DistanceSnapshot] per solver round, in round order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DistanceHistory {
    rounds: Vec<DistanceSnapshot>,
}

impl DistanceHistory {
    pub fn new() -> DistanceHistory {
        DistanceHistory::default()
    }
    pub fn push(&mut self, snapshot: DistanceSnapshot) {
        self.rounds.push(snapshot);
    }
    pub fn len(&self) -> usize {
        self.rounds.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
    pub fn last(&self) -> Option<&DistanceSnapshot> {
        self.rounds.last()
    }
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &DistanceSnapshot> {
        self.rounds.iter()
    }

    /// The node that was finalized when moving from round `round` to round `round + 1`. Picks the
    /// smallest node id should there be several.
    pub fn finalized_after(&self, round: usize) -> Option<NodeId> {
        let before = self.rounds.get(round)?;
        let after = self.rounds.get(round + 1)?;
        (0..after.len()).find(|&node| after.is_finalized(node) && !before.is_finalized(node))
    }
}

impl Index<usize> for DistanceHistory {
    type Output = DistanceSnapshot;

    fn index(&self, round: usize) -> &DistanceSnapshot {
        &self.rounds[round]
    }
}
