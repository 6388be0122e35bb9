//! Character Network: co-occurrence relationship graphs from episode transcripts
//!
//! Reads a table of episodes (number, arc, filler flag, per-sentence entity
//! mentions), pairs characters that appear within a sliding window of
//! sentences, and builds a weighted relationship graph for a chosen episode
//! range. A small dashboard recomputes the graph as the filters change.
//!
//! # Core Concepts
//!
//! - **Episodes**: Rows of the input table; each holds ordered sentences of entity names
//! - **Arcs**: Named story segments, summarized as contiguous ranges or episode lists
//! - **Pairs**: Canonical (alphabetical) character pairs emitted per co-occurrence
//! - **Graph**: Top weighted edges plus a neighbor summary for every node
//!
//! # Example
//!
//! ```
//! use character_network::{build_graph, extract_relationships, EpisodeRange, EpisodeRecord, ExtractionQuery, GraphOptions};
//!
//! let episodes = vec![
//!     EpisodeRecord::new(1, "Prologue", false).with_sentence(["Naruto", "Sasuke"]),
//! ];
//! let query = ExtractionQuery::new(EpisodeRange::new(1, 1), true);
//! let pairs = extract_relationships(&episodes, &query);
//!
//! let outcome = build_graph(&pairs, &GraphOptions::default());
//! assert_eq!(outcome.graph().map(|g| g.edge_count()), Some(1));
//! ```

pub mod arc;
pub mod config;
pub mod cooccurrence;
pub mod dashboard;
pub mod episode;
pub mod graph;
pub mod render;

pub use arc::{ArcError, ArcIndex, ArcRow, EpisodeDescriptor, RangeRebind};
pub use config::{Config, ConfigError, NetworkConfig, ServerConfig};
pub use cooccurrence::{extract_relationships, EntityPair, ExtractionQuery};
pub use dashboard::{Dashboard, DashboardError, DashboardView, FilterEvent, FilterState};
pub use episode::{EpisodeRange, EpisodeRecord, EpisodeTable, LoadError, Sentence};
pub use graph::{build_graph, GraphOptions, GraphOutcome, RelationshipGraph};
pub use render::{GraphPane, GraphRenderer, RenderError, SvgRenderer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
