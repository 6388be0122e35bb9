//! Filler filter and range rebinding
//!
//! Toggling filler inclusion changes which arcs are listed and how far the
//! episode range may reach. The upper bound only ever clamps downward: once
//! clamped, turning filler back on does not restore the previous value.

use super::index::{ArcIndex, ArcRow};
use crate::episode::EpisodeRange;
use serde::Serialize;
use thiserror::Error;

/// Errors from the filler filter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArcError {
    #[error("every arc is filler; excluding filler leaves no episodes")]
    EmptyFilterResult,

    #[error("arc index is empty")]
    EmptyIndex,
}

/// Outcome of a filler toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeRebind {
    /// Arcs visible under the toggle, for display
    pub arcs: Vec<ArcRow>,
    /// New upper bound for the episode range control
    pub valid_max: u32,
    /// The current range after clamping
    pub range: EpisodeRange,
}

impl ArcIndex {
    /// Filter arcs by filler inclusion and clamp `current` to the new bound.
    pub fn rebind(
        &self,
        include_filler: bool,
        current: EpisodeRange,
    ) -> Result<RangeRebind, ArcError> {
        if self.is_empty() {
            return Err(ArcError::EmptyIndex);
        }

        let visible: Vec<_> = self
            .arcs()
            .iter()
            .filter(|arc| include_filler || !arc.all_filler)
            .collect();

        let valid_max = visible
            .iter()
            .filter_map(|arc| arc.episodes.max_episode())
            .max()
            .ok_or(ArcError::EmptyFilterResult)?;

        let mut range = current;
        if range.max > valid_max {
            range.max = valid_max;
            if range.min > range.max {
                range.min = valid_max;
            }
        }

        Ok(RangeRebind {
            arcs: visible.into_iter().map(ArcRow::from).collect(),
            valid_max,
            range,
        })
    }
}
