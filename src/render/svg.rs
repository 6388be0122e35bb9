//! Standalone SVG document renderer
//!
//! The layout is computed here, so the document needs no external script or
//! stylesheet. A short inline script adds wheel zoom and drag panning; node
//! tooltips carry the neighbor summary.

use super::html::{html_escape, is_css_value};
use super::layout::force_layout;
use super::{GraphRenderer, RenderError};
use crate::graph::RelationshipGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write;

const MARGIN: f32 = 60.0;
const MIN_RADIUS: f32 = 6.0;
const MAX_RADIUS: f32 = 18.0;
const MIN_STROKE: f32 = 1.0;
const MAX_STROKE: f32 = 6.0;

const PAN_ZOOM: &str = r#"(function () {
  var svg = document.querySelector("svg");
  var box = svg.viewBox.baseVal;
  var drag = null;
  function toBox(e) {
    var r = svg.getBoundingClientRect();
    return { x: box.x + (e.clientX - r.left) / r.width * box.width,
             y: box.y + (e.clientY - r.top) / r.height * box.height };
  }
  svg.addEventListener("wheel", function (e) {
    e.preventDefault();
    var k = e.deltaY > 0 ? 1.1 : 1 / 1.1;
    var p = toBox(e);
    box.x = p.x - (p.x - box.x) * k;
    box.y = p.y - (p.y - box.y) * k;
    box.width *= k;
    box.height *= k;
  }, { passive: false });
  svg.addEventListener("mousedown", function (e) { drag = { x: e.clientX, y: e.clientY }; });
  window.addEventListener("mouseup", function () { drag = null; });
  svg.addEventListener("mousemove", function (e) {
    if (!drag) return;
    var r = svg.getBoundingClientRect();
    box.x -= (e.clientX - drag.x) / r.width * box.width;
    box.y -= (e.clientY - drag.y) / r.height * box.height;
    drag = { x: e.clientX, y: e.clientY };
  });
})();"#;

/// Renders a relationship graph as a self-contained HTML document holding
/// one inline SVG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgRenderer {
    /// Drawing width in px
    pub width: u32,
    /// Drawing height in px; also the height of the embedding frame
    pub height: u32,
    /// Canvas background colour
    pub background: String,
    /// Node label colour
    pub font_color: String,
    pub node_color: String,
    pub edge_color: String,
    /// Layout simulation steps
    pub iterations: usize,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            background: "#222222".to_string(),
            font_color: "white".to_string(),
            node_color: "#97c2fc".to_string(),
            edge_color: "#848484".to_string(),
            iterations: 300,
        }
    }
}

impl SvgRenderer {
    /// CSS height for the frame that embeds the document
    pub fn frame_height(&self) -> String {
        format!("{}px", self.height)
    }

    /// Reject sizes of 0 and colours that could escape their CSS or
    /// attribute context.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidStyle {
                field: "size",
                value: format!("{}x{}", self.width, self.height),
            });
        }
        for (field, value) in [
            ("background", &self.background),
            ("font_color", &self.font_color),
            ("node_color", &self.node_color),
            ("edge_color", &self.edge_color),
        ] {
            if !is_css_value(value) {
                return Err(RenderError::InvalidStyle {
                    field,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

impl GraphRenderer for SvgRenderer {
    fn render(&self, graph: &RelationshipGraph) -> Result<String, RenderError> {
        self.validate()?;

        let (width, height) = (self.width as f32, self.height as f32);
        let points = force_layout(graph, width, height, MARGIN, self.iterations);
        let position: HashMap<&str, usize> = graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, n)| (n.name.as_str(), i))
            .collect();

        // Node size follows the summed weight of its edges
        let mut strength = vec![0u64; graph.node_count()];
        for edge in graph.edges() {
            for name in [edge.source(), edge.target()] {
                if let Some(&i) = position.get(name) {
                    strength[i] += edge.weight;
                }
            }
        }
        let max_strength = strength.iter().copied().max().unwrap_or(1).max(1) as f32;
        let max_weight = graph.edges().iter().map(|e| e.weight).max().unwrap_or(1).max(1) as f32;

        let mut doc = String::with_capacity(512 + 256 * (graph.node_count() + graph.edge_count()));
        doc.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n");
        let _ = write!(
            doc,
            "html, body {{ margin: 0; background-color: {bg}; }}\n\
             svg {{ display: block; width: 100%; height: {h}px; cursor: grab; }}\n\
             text {{ fill: {fc}; font: 12px sans-serif; pointer-events: none; }}\n\
             .node:hover circle {{ stroke: {fc}; stroke-width: 2; }}\n",
            bg = self.background,
            fc = self.font_color,
            h = self.height
        );
        doc.push_str("</style>\n</head>\n<body>\n");
        let _ = writeln!(
            doc,
            r#"<svg viewBox="0 0 {} {}" preserveAspectRatio="xMidYMid meet">"#,
            self.width, self.height
        );

        doc.push_str("<g class=\"edges\">\n");
        for edge in graph.edges() {
            let (Some(&a), Some(&b)) = (position.get(edge.source()), position.get(edge.target())) else {
                continue;
            };
            let stroke = MIN_STROKE + (MAX_STROKE - MIN_STROKE) * edge.weight as f32 / max_weight;
            let _ = writeln!(
                doc,
                r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.2}"><title>{} - {}: {}</title></line>"#,
                points[a].x,
                points[a].y,
                points[b].x,
                points[b].y,
                self.edge_color,
                stroke,
                html_escape(edge.source()),
                html_escape(edge.target()),
                edge.weight
            );
        }
        doc.push_str("</g>\n<g class=\"nodes\">\n");

        for (i, node) in graph.nodes().iter().enumerate() {
            let p = points[i];
            let radius =
                MIN_RADIUS + (MAX_RADIUS - MIN_RADIUS) * (strength[i] as f32 / max_strength).sqrt();
            let name = html_escape(&node.name);
            let _ = writeln!(
                doc,
                r#"<g class="node"><circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"><title>{}</title></circle><text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text></g>"#,
                p.x,
                p.y,
                radius,
                self.node_color,
                html_escape(&node.label),
                p.x,
                p.y + radius + 14.0,
                name
            );
        }
        doc.push_str("</g>\n</svg>\n<script>\n");
        doc.push_str(PAN_ZOOM);
        doc.push_str("\n</script>\n</body>\n</html>\n");
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cooccurrence::EntityPair;
    use crate::graph::{build_graph, GraphOptions};

    fn graph(pairs: &[(&str, &str)]) -> RelationshipGraph {
        let pairs: Vec<EntityPair> = pairs
            .iter()
            .filter_map(|(a, b)| EntityPair::new(*a, *b))
            .collect();
        build_graph(&pairs, &GraphOptions::default())
            .graph()
            .cloned()
            .unwrap()
    }

    #[test]
    fn document_carries_nodes_edges_and_labels() {
        let doc = SvgRenderer::default()
            .render(&graph(&[("Naruto", "Sasuke"), ("Naruto", "Sasuke")]))
            .unwrap();

        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(r#"viewBox="0 0 1920 1080""#));
        assert_eq!(doc.matches("<g class=\"node\">").count(), 2);
        assert_eq!(doc.matches("<line ").count(), 1);
        assert!(doc.contains("<title>Naruto - Sasuke: 2</title>"));
        assert!(doc.contains("<title>Top 1 Neighbors by Weight:\nSasuke: 2</title>"));
        assert!(doc.contains(">Naruto</text>"));
        assert!(doc.contains("background-color: #222222"));
    }

    #[test]
    fn document_loads_nothing_external() {
        let doc = SvgRenderer::default().render(&graph(&[("A", "B")])).unwrap();

        for line in doc.lines() {
            assert!(!line.contains("src="), "external reference: {}", line);
            assert!(!line.contains("href="), "external reference: {}", line);
            assert!(!line.contains("@import"), "external reference: {}", line);
        }
        assert!(!doc.contains("http"));
    }

    #[test]
    fn markup_in_names_is_escaped() {
        let doc = SvgRenderer::default()
            .render(&graph(&[("</script><b>", "Kiba")]))
            .unwrap();
        assert_eq!(doc.matches("</script>").count(), 1);
        assert!(doc.contains("&lt;/script&gt;&lt;b&gt;"));
    }

    #[test]
    fn heavier_edges_are_thicker() {
        let doc = SvgRenderer::default()
            .render(&graph(&[("A", "B"), ("A", "B"), ("A", "B"), ("B", "C")]))
            .unwrap();
        assert!(doc.contains(r#"stroke-width="6.00""#));
        assert!(doc.contains(r#"stroke-width="2.67""#));
    }

    #[test]
    fn custom_appearance() {
        let renderer = SvgRenderer {
            width: 800,
            height: 600,
            background: "#ffffff".into(),
            font_color: "black".into(),
            ..SvgRenderer::default()
        };
        let doc = renderer.render(&graph(&[("A", "B")])).unwrap();
        assert!(doc.contains(r#"viewBox="0 0 800 600""#));
        assert!(doc.contains("fill: black"));
        assert_eq!(renderer.frame_height(), "600px");
    }

    #[test]
    fn style_injection_is_rejected() {
        let renderer = SvgRenderer {
            background: "red; } </style><script>alert(1)</script>".into(),
            ..SvgRenderer::default()
        };
        let err = renderer.render(&graph(&[("A", "B")])).unwrap_err();
        assert!(matches!(err, RenderError::InvalidStyle { field: "background", .. }));

        let renderer = SvgRenderer {
            edge_color: r#"red" onload="x"#.into(),
            ..SvgRenderer::default()
        };
        assert!(renderer.validate().is_err());

        let renderer = SvgRenderer {
            height: 0,
            ..SvgRenderer::default()
        };
        assert!(renderer.validate().is_err());
    }
}
