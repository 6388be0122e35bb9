//! Story arcs: per-arc episode spans and the filler filter

mod index;
mod rebind;

pub use index::{ArcIndex, ArcRow, ArcSummary, EpisodeDescriptor, STANDALONE_ARC};
pub use rebind::{ArcError, RangeRebind};
