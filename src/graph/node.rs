//! Graph nodes and their neighbor summaries

use serde::Serialize;

/// A neighbor of a node with the weight of the connecting edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Neighbor {
    pub name: String,
    pub weight: u64,
}

/// An entity in the relationship graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    /// Entity name, unique in the graph
    pub name: String,
    /// Highest-weight neighbors, heaviest first
    pub top_neighbors: Vec<Neighbor>,
    /// Human-readable summary of `top_neighbors`
    pub label: String,
}

impl GraphNode {
    /// Create a node and derive its display label from `top_neighbors`
    pub fn new(name: impl Into<String>, top_neighbors: Vec<Neighbor>) -> Self {
        let label = neighbor_label(&top_neighbors);
        Self {
            name: name.into(),
            top_neighbors,
            label,
        }
    }
}

/// `"Top N Neighbors by Weight:"` followed by one `"name: weight"` line each.
pub fn neighbor_label(neighbors: &[Neighbor]) -> String {
    let mut label = format!("Top {} Neighbors by Weight:", neighbors.len());
    for neighbor in neighbors {
        label.push('\n');
        label.push_str(&format!("{}: {}", neighbor.name, neighbor.weight));
    }
    label
}
