//! Relationship graph: aggregation, ranking and neighbor summaries

mod builder;
mod edge;
mod network;
mod node;


pub use builder::{build_graph, GraphOptions, GraphOutcome, DEFAULT_MAX_EDGES, DEFAULT_TOP_NEIGHBORS};
pub use edge::{aggregate_pairs, rank_edges, CoOccurrenceEdge};
pub use network::RelationshipGraph;
pub use node::{neighbor_label, GraphNode, Neighbor};
