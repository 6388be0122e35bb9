//! Force-directed node placement

use crate::graph::RelationshipGraph;
use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use std::collections::HashMap;
use std::f32::consts::TAU;

/// Simulation time step per iteration
const STEP: f32 = 0.035;

/// Radius of the initial circle the nodes start on
const START_RADIUS: f32 = 100.0;

/// A node position in document coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Place every node of `graph` with a spring simulation and fit the result
/// into a `width` x `height` box, keeping `margin` clear on each side.
///
/// Positions are returned in node order. The simulation has no random
/// component, so equal graphs get equal layouts.
pub fn force_layout(
    graph: &RelationshipGraph,
    width: f32,
    height: f32,
    margin: f32,
    iterations: usize,
) -> Vec<Point> {
    let count = graph.node_count();
    if count == 0 {
        return Vec::new();
    }

    let mut sim: ForceGraph<usize, ()> = ForceGraph::new(SimulationParameters {
        force_charge: 150.0,
        force_spring: 0.05,
        force_max: 100.0,
        node_speed: 3000.0,
        damping_factor: 0.9,
    });

    let mut order: HashMap<&str, usize> = HashMap::with_capacity(count);
    let mut handles = Vec::with_capacity(count);
    for (i, node) in graph.nodes().iter().enumerate() {
        let angle = i as f32 * TAU / count as f32;
        handles.push(sim.add_node(NodeData {
            x: START_RADIUS * angle.cos(),
            y: START_RADIUS * angle.sin(),
            mass: 10.0,
            is_anchor: false,
            user_data: i,
        }));
        order.insert(node.name.as_str(), i);
    }

    for edge in graph.edges() {
        if let (Some(&a), Some(&b)) = (order.get(edge.source()), order.get(edge.target())) {
            sim.add_edge(handles[a], handles[b], EdgeData::default());
        }
    }

    for _ in 0..iterations {
        sim.update(STEP);
    }

    let mut raw = vec![Point { x: 0.0, y: 0.0 }; count];
    sim.visit_nodes(|node| {
        let (x, y) = (node.x(), node.y());
        raw[node.data.user_data] = Point {
            x: if x.is_finite() { x } else { 0.0 },
            y: if y.is_finite() { y } else { 0.0 },
        };
    });

    fit(&raw, width, height, margin)
}

/// Scale and translate `points` uniformly so they fill the box, centred.
fn fit(points: &[Point], width: f32, height: f32, margin: f32) -> Vec<Point> {
    let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
    let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let inner_w = (width - 2.0 * margin).max(1.0);
    let inner_h = (height - 2.0 * margin).max(1.0);
    let span_x = (max_x - min_x).max(f32::EPSILON);
    let span_y = (max_y - min_y).max(f32::EPSILON);
    let scale = (inner_w / span_x).min(inner_h / span_y);

    let mid_x = (min_x + max_x) / 2.0;
    let mid_y = (min_y + max_y) / 2.0;
    points
        .iter()
        .map(|p| Point {
            x: width / 2.0 + (p.x - mid_x) * scale,
            y: height / 2.0 + (p.y - mid_y) * scale,
        })
        .collect()
}
