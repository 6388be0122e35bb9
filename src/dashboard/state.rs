//! Filter state and the events that change it

use crate::episode::EpisodeRange;
use serde::{Deserialize, Serialize};

/// User-controlled filters. Every change triggers a full recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Inclusive episode window
    pub range: EpisodeRange,
    pub include_filler: bool,
}

/// A single user input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FilterEvent {
    /// The episode range control moved
    EpisodeRange { min: u32, max: u32 },
    /// The filler toggle flipped
    IncludeFiller { include: bool },
}

impl FilterEvent {
    pub fn range(min: u32, max: u32) -> Self {
        FilterEvent::EpisodeRange { min, max }
    }

    pub fn include_filler(include: bool) -> Self {
        FilterEvent::IncludeFiller { include }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_deserialize_from_tagged_json() {
        let event: FilterEvent =
            serde_json::from_str(r#"{"event":"episode_range","min":3,"max":9}"#).unwrap();
        assert_eq!(event, FilterEvent::range(3, 9));

        let event: FilterEvent =
            serde_json::from_str(r#"{"event":"include_filler","include":false}"#).unwrap();
        assert_eq!(event, FilterEvent::include_filler(false));
    }
}
