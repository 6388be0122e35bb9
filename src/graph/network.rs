//! RelationshipGraph: undirected weighted entity graph

use super::edge::CoOccurrenceEdge;
use super::node::{GraphNode, Neighbor};
use serde::Serialize;
use std::collections::HashMap;

/// Undirected weighted graph over entity names.
///
/// Rebuilt from scratch on every recomputation. Nodes are ordered by first
/// appearance across the (ranked) edge list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<CoOccurrenceEdge>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl RelationshipGraph {
    /// Build the graph from already-ranked edges, labelling every node with
    /// its `top_neighbors` heaviest neighbors.
    pub fn from_edges(edges: Vec<CoOccurrenceEdge>, top_neighbors: usize) -> Self {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut names: Vec<String> = Vec::new();
        let mut adjacency: Vec<Vec<Neighbor>> = Vec::new();

        for edge in &edges {
            let source = intern(edge.source(), &mut index, &mut names, &mut adjacency);
            let target = intern(edge.target(), &mut index, &mut names, &mut adjacency);

            adjacency[source].push(Neighbor {
                name: edge.target().to_string(),
                weight: edge.weight,
            });
            adjacency[target].push(Neighbor {
                name: edge.source().to_string(),
                weight: edge.weight,
            });
        }

        let nodes = names
            .into_iter()
            .zip(adjacency)
            .map(|(name, mut neighbors)| {
                neighbors.sort_by(|a, b| b.weight.cmp(&a.weight));
                neighbors.truncate(top_neighbors);
                GraphNode::new(name, neighbors)
            })
            .collect();

        Self { nodes, edges, index }
    }

    /// All nodes in first-appearance order
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// All edges, heaviest first
    pub fn edges(&self) -> &[CoOccurrenceEdge] {
        &self.edges
    }

    /// Get a node by entity name
    pub fn node(&self, name: &str) -> Option<&GraphNode> {
        self.index.get(name).map(|&i| &self.nodes[i])
    }

    /// Weight of the edge between `a` and `b`, if any
    pub fn weight(&self, a: &str, b: &str) -> Option<u64> {
        self.edges
            .iter()
            .find(|e| e.pair.contains(a) && e.pair.contains(b) && a != b)
            .map(|e| e.weight)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

fn intern(
    name: &str,
    index: &mut HashMap<String, usize>,
    names: &mut Vec<String>,
    adjacency: &mut Vec<Vec<Neighbor>>,
) -> usize {
    if let Some(&i) = index.get(name) {
        return i;
    }
    let i = names.len();
    index.insert(name.to_string(), i);
    names.push(name.to_string());
    adjacency.push(Vec::new());
    i
}
