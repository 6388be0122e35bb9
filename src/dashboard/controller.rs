//! Dashboard: the filter-driven recomputation loop
//!
//! Holds the read-only episode table and the current view. Each accepted
//! `FilterEvent` runs extraction, graph construction and rendering to
//! completion and replaces the view in one step; a failed pass leaves the
//! previous view and filter untouched.

use super::state::{FilterEvent, FilterState};
use crate::arc::{ArcError, ArcIndex, ArcRow};
use crate::config::{ConfigError, NetworkConfig};
use crate::cooccurrence::{extract_relationships, ExtractionQuery};
use crate::episode::{EpisodeRange, EpisodeTable};
use crate::graph::{build_graph, RelationshipGraph};
use crate::render::{render_pane, GraphPane, GraphRenderer, RenderError};
use serde::Serialize;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

/// Errors surfaced by the dashboard
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("episode table is empty")]
    EmptyTable,

    #[error(transparent)]
    Arc(#[from] ArcError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Counters for one recomputation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewStats {
    pub episodes_selected: usize,
    pub pair_emissions: usize,
    pub edges: usize,
    pub nodes: usize,
}

/// Everything the dashboard displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub filter: FilterState,
    /// Valid range for the episode control
    pub bounds: EpisodeRange,
    /// Arc table, filtered by filler inclusion
    pub arcs: Vec<ArcRow>,
    /// False when excluding filler would leave nothing to show
    pub filler_toggle_enabled: bool,
    /// The graph behind `pane`, absent for the placeholder
    pub network: Option<RelationshipGraph>,
    pub pane: GraphPane,
    pub stats: ViewStats,
}

/// Interactive relationship-network session
pub struct Dashboard {
    table: EpisodeTable,
    arcs: ArcIndex,
    config: NetworkConfig,
    renderer: Box<dyn GraphRenderer>,
    view: DashboardView,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("episodes", &self.table.len())
            .field("arcs", &self.arcs.len())
            .field("config", &self.config)
            .field("filter", &self.view.filter)
            .finish()
    }
}

impl Dashboard {
    /// Start a session over `table` with the full range selected and filler
    /// included, and compute the first view.
    pub fn new(
        table: EpisodeTable,
        config: NetworkConfig,
        renderer: Box<dyn GraphRenderer>,
    ) -> Result<Self, DashboardError> {
        config.validate()?;
        let (min, max) = match (table.min_episode(), table.max_episode()) {
            (Some(min), Some(max)) => (min, max),
            _ => return Err(DashboardError::EmptyTable),
        };

        let arcs = ArcIndex::build(&table);
        let full = EpisodeRange::new(min, max);
        let rebind = arcs.rebind(true, full)?;
        let filler_toggle_enabled = arcs.rebind(false, full).is_ok();

        info!(
            episodes = table.len(),
            arcs = arcs.len(),
            min_episode = min,
            max_episode = max,
            filler_toggle_enabled,
            "dashboard session started"
        );

        let filter = FilterState {
            range: rebind.range,
            include_filler: true,
        };
        let bounds = EpisodeRange::new(min, rebind.valid_max);

        let mut dashboard = Self {
            table,
            arcs,
            config,
            renderer,
            view: DashboardView {
                filter,
                bounds,
                arcs: rebind.arcs,
                filler_toggle_enabled,
                network: None,
                pane: GraphPane::Placeholder,
                stats: ViewStats::default(),
            },
        };
        dashboard.view = dashboard.compute(filter, bounds, dashboard.view.arcs.clone())?;
        Ok(dashboard)
    }

    /// Apply one input event and return the refreshed view.
    ///
    /// Events that leave the filter unchanged do not recompute.
    pub fn apply(&mut self, event: FilterEvent) -> Result<&DashboardView, DashboardError> {
        let current = self.view.filter;
        debug!(?event, "filter event");

        let next = match event {
            FilterEvent::EpisodeRange { min, max } => {
                let range = EpisodeRange::new(min, max).clamp_to(self.view.bounds);
                if range == current.range {
                    return Ok(&self.view);
                }
                self.compute(
                    FilterState { range, ..current },
                    self.view.bounds,
                    self.view.arcs.clone(),
                )?
            }
            FilterEvent::IncludeFiller { include } => {
                if include == current.include_filler {
                    return Ok(&self.view);
                }
                let rebind = self.arcs.rebind(include, current.range)?;
                let filter = FilterState {
                    range: rebind.range,
                    include_filler: include,
                };
                let bounds = EpisodeRange::new(self.view.bounds.min, rebind.valid_max);
                self.compute(filter, bounds, rebind.arcs)?
            }
        };

        self.view = next;
        Ok(&self.view)
    }

    /// Apply several events in order, stopping at the first failure
    pub fn apply_all(
        &mut self,
        events: impl IntoIterator<Item = FilterEvent>,
    ) -> Result<&DashboardView, DashboardError> {
        for event in events {
            self.apply(event)?;
        }
        Ok(&self.view)
    }

    /// The current view
    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    /// The current filter
    pub fn filter(&self) -> FilterState {
        self.view.filter
    }

    fn compute(
        &self,
        filter: FilterState,
        bounds: EpisodeRange,
        arcs: Vec<ArcRow>,
    ) -> Result<DashboardView, DashboardError> {
        let started = Instant::now();
        let query = ExtractionQuery::new(filter.range, filter.include_filler)
            .with_window(self.config.window);

        let episodes_selected = self
            .table
            .episodes()
            .iter()
            .filter(|e| query.selects(e))
            .count();
        let pairs = extract_relationships(self.table.episodes(), &query);
        let outcome = build_graph(&pairs, &self.config.graph_options());
        let pane = render_pane(&outcome, self.renderer.as_ref())?;

        let network = outcome.graph().cloned();
        let stats = ViewStats {
            episodes_selected,
            pair_emissions: pairs.len(),
            edges: network.as_ref().map_or(0, RelationshipGraph::edge_count),
            nodes: network.as_ref().map_or(0, RelationshipGraph::node_count),
        };

        info!(
            range = %filter.range,
            include_filler = filter.include_filler,
            episodes = stats.episodes_selected,
            emissions = stats.pair_emissions,
            edges = stats.edges,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "recomputed relationship graph"
        );

        Ok(DashboardView {
            filter,
            bounds,
            arcs,
            filler_toggle_enabled: self.view.filler_toggle_enabled,
            network,
            pane,
            stats,
        })
    }
}
