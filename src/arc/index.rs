//! ArcIndex: per-arc episode spans derived from the episode table

use crate::episode::{EpisodeRecord, EpisodeTable};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Arc label for unrelated one-off episodes. Its episodes are not contiguous,
/// so it is described by an explicit list rather than a range.
pub const STANDALONE_ARC: &str = "Standalone";

/// Which episodes an arc covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeDescriptor {
    /// Closed range `[min, max]`
    Range { min: u32, max: u32 },
    /// Explicit episode numbers in table order
    List(Vec<u32>),
}

impl EpisodeDescriptor {
    /// Largest episode number this descriptor names.
    ///
    /// For the list form this is the largest element, not the last one.
    pub fn max_episode(&self) -> Option<u32> {
        match self {
            EpisodeDescriptor::Range { max, .. } => Some(*max),
            EpisodeDescriptor::List(episodes) => episodes.iter().copied().max(),
        }
    }
}

impl std::fmt::Display for EpisodeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EpisodeDescriptor::Range { min, max } => write!(f, "{} - {}", min, max),
            EpisodeDescriptor::List(episodes) => {
                let joined: Vec<String> = episodes.iter().map(u32::to_string).collect();
                write!(f, "{}", joined.join(", "))
            }
        }
    }
}

/// Summary of one story arc
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArcSummary {
    /// Arc label, unique within the index
    pub arc_name: String,
    /// Episodes covered by the arc
    pub episodes: EpisodeDescriptor,
    /// True iff every episode in the arc is filler
    pub all_filler: bool,
}

/// Display projection of an arc, without the filler flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArcRow {
    pub arc_name: String,
    pub episodes: EpisodeDescriptor,
}

impl From<&ArcSummary> for ArcRow {
    fn from(summary: &ArcSummary) -> Self {
        Self {
            arc_name: summary.arc_name.clone(),
            episodes: summary.episodes.clone(),
        }
    }
}

/// All arcs of a table, in first-seen order.
///
/// Derived once per session. Every episode number of the source table appears
/// in exactly one summary's descriptor.
#[derive(Debug, Clone, Default)]
pub struct ArcIndex {
    arcs: Vec<ArcSummary>,
}

impl ArcIndex {
    /// Build the index from the episode table
    pub fn build(table: &EpisodeTable) -> Self {
        let mut order: Vec<&str> = Vec::new();
        let mut members: HashMap<&str, Vec<&EpisodeRecord>> = HashMap::new();

        for record in table.episodes() {
            let name = record.arc_name.as_str();
            members
                .entry(name)
                .or_insert_with(|| {
                    order.push(name);
                    Vec::new()
                })
                .push(record);
        }

        let arcs: Vec<ArcSummary> = order
            .into_iter()
            .filter_map(|name| {
                let records = members.get(name)?;
                summarize(name, records)
            })
            .collect();

        debug!(arcs = arcs.len(), "built arc index");
        Self { arcs }
    }

    /// All summaries in first-seen order
    pub fn arcs(&self) -> &[ArcSummary] {
        &self.arcs
    }

    /// Look up an arc by name
    pub fn get(&self, arc_name: &str) -> Option<&ArcSummary> {
        self.arcs.iter().find(|a| a.arc_name == arc_name)
    }

    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Largest episode number across every arc
    pub fn max_episode(&self) -> Option<u32> {
        self.arcs.iter().filter_map(|a| a.episodes.max_episode()).max()
    }
}

fn summarize(name: &str, records: &[&EpisodeRecord]) -> Option<ArcSummary> {
    let numbers: Vec<u32> = records.iter().map(|r| r.episode_number).collect();
    let episodes = if name == STANDALONE_ARC {
        EpisodeDescriptor::List(numbers)
    } else {
        EpisodeDescriptor::Range {
            min: *numbers.iter().min()?,
            max: *numbers.iter().max()?,
        }
    };

    Some(ArcSummary {
        arc_name: name.to_string(),
        episodes,
        all_filler: records.iter().all(|r| r.is_filler),
    })
}
