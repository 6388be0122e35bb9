//! Windowed co-occurrence extraction
//!
//! Each selected episode is scanned independently. A trailing buffer holds
//! the most recent `window` sentences (the current one included). Every
//! entity of the current sentence pairs with every mention in the flattened
//! buffer whose name differs from it. Pairs are canonicalized but not
//! deduplicated: multiplicity is the edge weight downstream.

use crate::episode::{EpisodeRange, EpisodeRecord, Sentence};
use serde::Serialize;
use std::collections::VecDeque;
use tracing::debug;

/// Default number of trailing sentences in the co-occurrence window
pub const DEFAULT_WINDOW: usize = 10;

/// Unordered pair of two distinct entity names.
///
/// Stored sorted, so `{A, B}` and `{B, A}` are the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityPair {
    first: String,
    second: String,
}

impl EntityPair {
    /// Canonical pair of `a` and `b`, or `None` when the names are equal
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Option<Self> {
        let (a, b) = (a.into(), b.into());
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { first: a, second: b }),
            std::cmp::Ordering::Greater => Some(Self { first: b, second: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The lexicographically smaller name
    pub fn first(&self) -> &str {
        &self.first
    }

    /// The lexicographically larger name
    pub fn second(&self) -> &str {
        &self.second
    }

    /// True if either side is `name`
    pub fn contains(&self, name: &str) -> bool {
        self.first == name || self.second == name
    }
}

impl std::fmt::Display for EntityPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.first, self.second)
    }
}

/// Which episodes to scan and how wide the window is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionQuery {
    /// Inclusive episode-number range
    pub range: EpisodeRange,
    /// Whether filler episodes are scanned
    pub include_filler: bool,
    /// Trailing sentences per window; 0 is treated as 1
    pub window: usize,
}

impl ExtractionQuery {
    pub fn new(range: EpisodeRange, include_filler: bool) -> Self {
        Self {
            range,
            include_filler,
            window: DEFAULT_WINDOW,
        }
    }

    /// Set the window size
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// True if `episode` is in range and passes the filler filter
    pub fn selects(&self, episode: &EpisodeRecord) -> bool {
        self.range.contains(episode.episode_number) && (self.include_filler || !episode.is_filler)
    }
}

/// Scan the selected episodes and emit every co-occurrence, in order:
/// episode, sentence, entity within the sentence, then buffer position.
pub fn extract_relationships(episodes: &[EpisodeRecord], query: &ExtractionQuery) -> Vec<EntityPair> {
    let window = query.window.max(1);
    let mut pairs = Vec::new();
    let mut scanned = 0usize;

    for episode in episodes.iter().filter(|e| query.selects(e)) {
        scan_episode(&episode.mentions, window, &mut pairs);
        scanned += 1;
    }

    debug!(
        episodes = scanned,
        window,
        emissions = pairs.len(),
        "extracted co-occurrences"
    );
    pairs
}

fn scan_episode(sentences: &[Sentence], window: usize, pairs: &mut Vec<EntityPair>) {
    let mut buffer: VecDeque<&Sentence> = VecDeque::with_capacity(window + 1);

    for sentence in sentences {
        buffer.push_back(sentence);
        if buffer.len() > window {
            buffer.pop_front();
        }

        for entity in sentence.entities() {
            for mention in buffer.iter().flat_map(|s| s.entities()) {
                if let Some(pair) = EntityPair::new(entity.as_str(), mention.as_str()) {
                    pairs.push(pair);
                }
            }
        }
    }
}
