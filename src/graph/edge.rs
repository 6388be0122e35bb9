//! Weighted co-occurrence edges: aggregation and ranking

use crate::cooccurrence::EntityPair;
use serde::Serialize;
use std::collections::HashMap;

/// An undirected edge whose weight is the number of co-occurrences
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoOccurrenceEdge {
    pub pair: EntityPair,
    /// Count of pair emissions, always positive
    pub weight: u64,
}

impl CoOccurrenceEdge {
    pub fn new(pair: EntityPair, weight: u64) -> Self {
        Self { pair, weight }
    }

    /// Source endpoint (the smaller name)
    pub fn source(&self) -> &str {
        self.pair.first()
    }

    /// Target endpoint (the larger name)
    pub fn target(&self) -> &str {
        self.pair.second()
    }
}

/// Group pair emissions by canonical pair. Groups come out in the order their
/// pair was first emitted.
pub fn aggregate_pairs<'a>(pairs: impl IntoIterator<Item = &'a EntityPair>) -> Vec<CoOccurrenceEdge> {
    let mut positions: HashMap<&'a EntityPair, usize> = HashMap::new();
    let mut edges: Vec<CoOccurrenceEdge> = Vec::new();

    for pair in pairs {
        match positions.get(pair) {
            Some(&i) => edges[i].weight += 1,
            None => {
                positions.insert(pair, edges.len());
                edges.push(CoOccurrenceEdge::new(pair.clone(), 1));
            }
        }
    }

    edges
}

/// Order edges by weight descending and keep at most `cap`.
///
/// The sort is stable, so equal weights keep first-emitted order.
pub fn rank_edges(mut edges: Vec<CoOccurrenceEdge>, cap: usize) -> Vec<CoOccurrenceEdge> {
    edges.sort_by(|a, b| b.weight.cmp(&a.weight));
    edges.truncate(cap);
    edges
}
