//! Rendering: graph documents, embedding, and the empty-graph placeholder

mod html;
mod layout;
mod svg;

pub use html::{embed_srcdoc, html_escape, is_css_value};
pub use layout::{force_layout, Point};
pub use svg::SvgRenderer;

use crate::graph::{GraphOutcome, RelationshipGraph};
use serde::Serialize;
use thiserror::Error;

/// Text shown instead of a graph when no pairs were found
pub const NO_RELATIONSHIPS: &str = "No relationships found.";

/// Errors from a graph renderer
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid {field} style value '{value}'")]
    InvalidStyle { field: &'static str, value: String },

    #[error("render error: {0}")]
    Internal(String),
}

/// Turns a relationship graph into a self-contained, embeddable document.
pub trait GraphRenderer: Send + Sync {
    fn render(&self, graph: &RelationshipGraph) -> Result<String, RenderError>;
}

/// What the visualization surface shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "html", rename_all = "snake_case")]
pub enum GraphPane {
    /// A rendered standalone document
    Document(String),
    /// Static placeholder; the renderer was not invoked
    Placeholder,
}

impl GraphPane {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, GraphPane::Placeholder)
    }

    /// HTML fragment for inlining into a page
    pub fn to_fragment(&self, height: &str) -> String {
        match self {
            GraphPane::Document(doc) => embed_srcdoc(doc, height),
            GraphPane::Placeholder => format!(r#"<p class="placeholder">{}</p>"#, NO_RELATIONSHIPS),
        }
    }
}

/// Render a graph outcome, short-circuiting the empty case.
pub fn render_pane(outcome: &GraphOutcome, renderer: &dyn GraphRenderer) -> Result<GraphPane, RenderError> {
    match outcome {
        GraphOutcome::Graph(graph) => renderer.render(graph).map(GraphPane::Document),
        GraphOutcome::NoRelationships => Ok(GraphPane::Placeholder),
    }
}
