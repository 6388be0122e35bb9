//! Closed episode-number range

use serde::{Deserialize, Serialize};

/// A closed, inclusive range of episode numbers.
///
/// `min > max` is representable and selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EpisodeRange {
    pub min: u32,
    pub max: u32,
}

impl EpisodeRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// True if `episode` lies within `[min, max]`
    pub fn contains(&self, episode: u32) -> bool {
        self.min <= episode && episode <= self.max
    }

    /// True if the range selects no episode numbers at all
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Clamp both ends into `bounds`, keeping their order as given
    pub fn clamp_to(&self, bounds: EpisodeRange) -> Self {
        Self {
            min: self.min.clamp(bounds.min, bounds.max.max(bounds.min)),
            max: self.max.clamp(bounds.min, bounds.max.max(bounds.min)),
        }
    }
}

impl std::fmt::Display for EpisodeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}
