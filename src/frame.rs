//! Serialisable snapshots of an analysis step for an external renderer.

use std::fmt::Debug;

use serde::Serialize;

use crate::{
    color::Rgba,
    graph::Graph,
    pipeline::{MetricValue, Step},
};

/// Everything needed to draw one analysis step: the graph, per-vertex values, colours and sizes,
/// and edge widths.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame<T> {
    pub title: String,
    pub directed: bool,
    /// The value of a scalar metric, drawn as a caption.
    pub scalar: Option<f64>,
    pub nodes: Vec<FrameNode<T>>,
    pub edges: Vec<FrameEdge<T>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameNode<T> {
    pub id: T,
    pub value: Option<f64>,
    pub color: Option<Rgba>,
    pub size: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameEdge<T> {
    pub source: T,
    pub target: T,
    pub width: f64,
}

impl<T> Frame<T>
where
    T: Clone + Ord + Debug,
{
    /// Assembles the frame of a step computed over the graph.
    pub fn new(graph: &Graph<T>, step: &Step<T>) -> Self {
        let values = step.value.per_node();

        let nodes = graph
            .vertices()
            .map(|id| FrameNode {
                id: id.clone(),
                value: values.and_then(|values| values.get(id).copied()),
                color: step.colors.get(id).copied(),
                size: step.sizes.get(id).copied().unwrap_or_default(),
            })
            .collect();

        let edges = graph
            .edges()
            .into_iter()
            .map(|edge| FrameEdge {
                source: edge.source().clone(),
                target: edge.target().clone(),
                width: edge.weight(),
            })
            .collect();

        let scalar = match step.value {
            MetricValue::Scalar(value) => Some(value),
            MetricValue::PerNode(_) => None,
        };

        Self {
            title: step.metric.title().to_string(),
            directed: graph.is_directed(),
            scalar,
            nodes,
            edges,
        }
    }
}
