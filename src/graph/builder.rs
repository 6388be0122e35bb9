//! Graph construction from pair emissions

use super::edge::{aggregate_pairs, rank_edges};
use super::network::RelationshipGraph;
use crate::cooccurrence::EntityPair;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum edges kept in a graph
pub const DEFAULT_MAX_EDGES: usize = 200;

/// Neighbors listed in each node's label
pub const DEFAULT_TOP_NEIGHBORS: usize = 5;

/// Graph construction limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphOptions {
    pub max_edges: usize,
    pub top_neighbors: usize,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            max_edges: DEFAULT_MAX_EDGES,
            top_neighbors: DEFAULT_TOP_NEIGHBORS,
        }
    }
}

/// Result of graph construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphOutcome {
    Graph(RelationshipGraph),
    /// No pairs were emitted; nothing should be rendered
    NoRelationships,
}

impl GraphOutcome {
    pub fn graph(&self) -> Option<&RelationshipGraph> {
        match self {
            GraphOutcome::Graph(graph) => Some(graph),
            GraphOutcome::NoRelationships => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, GraphOutcome::NoRelationships)
    }
}

/// Aggregate, rank, truncate and assemble the relationship graph.
pub fn build_graph(pairs: &[EntityPair], options: &GraphOptions) -> GraphOutcome {
    if pairs.is_empty() {
        return GraphOutcome::NoRelationships;
    }

    let aggregated = aggregate_pairs(pairs);
    let distinct = aggregated.len();
    let ranked = rank_edges(aggregated, options.max_edges);
    if ranked.is_empty() {
        return GraphOutcome::NoRelationships;
    }

    let graph = RelationshipGraph::from_edges(ranked, options.top_neighbors);
    debug!(
        distinct_pairs = distinct,
        edges = graph.edge_count(),
        nodes = graph.node_count(),
        "built relationship graph"
    );
    GraphOutcome::Graph(graph)
}
