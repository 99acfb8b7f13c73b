//! Analysis steps: compute one metric, then derive the colours and sizes a renderer needs.
//!
//! ```rust
//! use sociogram::ingest::Records;
//! use sociogram::pipeline::{analyse, Config, Metric, MetricValue};
//!
//! let graph = Records::new().edge(1, 2).edge(2, 3).edge(3, 1).undirected().unwrap();
//! let step = analyse(&graph, Metric::AverageClustering, &Config::default()).unwrap();
//!
//! assert_eq!(step.value, MetricValue::Scalar(1.0));
//! ```

use std::{collections::BTreeMap, fmt::Debug};

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::{
    color::{color_mapping, Normalization, Palette, Rgba},
    error::MetricError,
    graph::{DegreeMode, Graph},
};

/// The default multiplier applied to a vertex's degree to size it.
pub const DEFAULT_BASE_NODE_SIZE: f64 = 100.0;

/// A metric which can be computed over a graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Degree(DegreeMode),
    DegreeCentrality,
    EigenvectorCentrality,
    BetweennessCentrality,
    Clustering,
    AverageClustering,
    DegreeAssortativity,
    AverageShortestPathLength,
}

impl Metric {
    /// Every metric, in the order the tribes analysis reports them.
    pub const ALL: [Metric; 8] = [
        Metric::Degree(DegreeMode::Total),
        Metric::DegreeCentrality,
        Metric::DegreeAssortativity,
        Metric::EigenvectorCentrality,
        Metric::BetweennessCentrality,
        Metric::Clustering,
        Metric::AverageClustering,
        Metric::AverageShortestPathLength,
    ];

    /// A stable identifier, used to key configuration.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Degree(_) => "degree",
            Metric::DegreeCentrality => "degree_centrality",
            Metric::EigenvectorCentrality => "eigenvector_centrality",
            Metric::BetweennessCentrality => "betweenness_centrality",
            Metric::Clustering => "clustering",
            Metric::AverageClustering => "average_clustering",
            Metric::DegreeAssortativity => "degree_assortativity",
            Metric::AverageShortestPathLength => "average_shortest_path_length",
        }
    }

    /// A human readable caption.
    pub fn title(&self) -> &'static str {
        match self {
            Metric::Degree(_) => "Degree",
            Metric::DegreeCentrality => "Degree Centrality",
            Metric::EigenvectorCentrality => "Eigenvector Centrality",
            Metric::BetweennessCentrality => "Betweenness Centrality",
            Metric::Clustering => "Clustering Coefficient per Node",
            Metric::AverageClustering => "Average Clustering Coefficient",
            Metric::DegreeAssortativity => "Assortative Mixing by Degree",
            Metric::AverageShortestPathLength => "Average Shortest Path Length",
        }
    }

    /// The default palette of a per-vertex metric, `None` for scalar metrics.
    pub fn palette(&self) -> Option<Palette> {
        match self {
            Metric::Degree(_) | Metric::DegreeCentrality => Some(Palette::Blues),
            Metric::EigenvectorCentrality => Some(Palette::Reds),
            Metric::BetweennessCentrality => Some(Palette::Greens),
            Metric::Clustering => Some(Palette::Purples),
            Metric::AverageClustering
            | Metric::DegreeAssortativity
            | Metric::AverageShortestPathLength => None,
        }
    }

    /// Computes the metric over the graph.
    pub fn compute<T>(&self, graph: &Graph<T>, config: &Config) -> Result<MetricValue<T>, MetricError>
    where
        T: Clone + Ord + Debug,
    {
        let value = match self {
            Metric::Degree(mode) => MetricValue::PerNode(
                graph
                    .degrees(*mode)
                    .into_iter()
                    .map(|(id, degree)| (id, degree as f64))
                    .collect(),
            ),
            Metric::DegreeCentrality => MetricValue::PerNode(graph.degree_centrality()),
            Metric::EigenvectorCentrality => MetricValue::PerNode(graph.eigenvector_centrality(
                config.eigenvector.max_iter,
                config.eigenvector.tolerance,
            )?),
            Metric::BetweennessCentrality => MetricValue::PerNode(
                graph.betweenness_centrality(config.normalized_betweenness),
            ),
            Metric::Clustering => MetricValue::PerNode(graph.clustering()),
            Metric::AverageClustering => MetricValue::Scalar(graph.average_clustering()),
            Metric::DegreeAssortativity => MetricValue::Scalar(graph.degree_assortativity()?),
            Metric::AverageShortestPathLength => {
                MetricValue::Scalar(graph.average_shortest_path_length()?)
            }
        };

        Ok(value)
    }
}

/// The result of a metric: a value per vertex or a single value for the graph.
#[derive(Clone, Debug, PartialEq)]
pub enum MetricValue<T> {
    PerNode(BTreeMap<T, f64>),
    Scalar(f64),
}

impl<T> MetricValue<T> {
    pub fn per_node(&self) -> Option<&BTreeMap<T, f64>> {
        match self {
            MetricValue::PerNode(values) => Some(values),
            MetricValue::Scalar(_) => None,
        }
    }

    pub fn scalar(&self) -> Option<f64> {
        match self {
            MetricValue::Scalar(value) => Some(*value),
            MetricValue::PerNode(_) => None,
        }
    }
}

/// Power iteration limits for eigenvector centrality.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EigenvectorConfig {
    pub max_iter: usize,
    pub tolerance: f64,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iter: 100,
            tolerance: 1e-6,
        }
    }
}

/// Analysis settings. Every field has a default, so partial configuration files are fine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub eigenvector: EigenvectorConfig,
    pub normalization: Normalization,
    pub normalized_betweenness: bool,
    pub base_node_size: f64,
    /// A vertex attribute scaling node sizes, e.g. `population`.
    pub size_attribute: Option<String>,
    /// Palettes replacing a metric's default, keyed by [`Metric::key`].
    pub palettes: BTreeMap<String, Palette>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            eigenvector: EigenvectorConfig::default(),
            normalization: Normalization::default(),
            normalized_betweenness: true,
            base_node_size: DEFAULT_BASE_NODE_SIZE,
            size_attribute: None,
            palettes: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Returns the palette used to colour a metric.
    pub fn palette_for(&self, metric: Metric) -> Option<Palette> {
        self.palettes
            .get(metric.key())
            .copied()
            .or_else(|| metric.palette())
    }
}

/// Everything produced by one analysis step, handed to the renderer and the console report.
#[derive(Clone, Debug, PartialEq)]
pub struct Step<T> {
    pub metric: Metric,
    pub value: MetricValue<T>,
    /// Empty for scalar metrics.
    pub colors: BTreeMap<T, Rgba>,
    pub sizes: BTreeMap<T, f64>,
}

/// Computes a metric and derives its colour and size mappings.
#[instrument(skip(graph, config), fields(metric = metric.key()))]
pub fn analyse<T>(graph: &Graph<T>, metric: Metric, config: &Config) -> Result<Step<T>, MetricError>
where
    T: Clone + Ord + Debug,
{
    let value = metric.compute(graph, config)?;

    let colors = match (&value, config.palette_for(metric)) {
        (MetricValue::PerNode(values), Some(palette)) => {
            color_mapping(values, palette, config.normalization)
        }
        _ => BTreeMap::new(),
    };
    let sizes = node_sizes(
        graph,
        config.base_node_size,
        config.size_attribute.as_deref(),
    );

    Ok(Step {
        metric,
        value,
        colors,
        sizes,
    })
}

/// Runs every metric as an independent step. A failing step doesn't affect the others.
pub fn run<T>(
    graph: &Graph<T>,
    metrics: &[Metric],
    config: &Config,
) -> Vec<(Metric, Result<Step<T>, MetricError>)>
where
    T: Clone + Ord + Debug,
{
    metrics
        .iter()
        .map(|&metric| {
            let step = analyse(graph, metric, config);
            if let Err(err) = &step {
                warn!(metric = metric.key(), %err, "analysis step failed");
            }

            (metric, step)
        })
        .collect()
}

/// Returns the display size of every vertex: `base * degree`, further multiplied by the named
/// attribute for vertices carrying it.
///
/// # Examples
///
/// ```
/// use sociogram::ingest::{attributes, Records};
/// use sociogram::pipeline::node_sizes;
///
/// let graph = Records::new()
///     .node("a", attributes([("population", 3.0)]))
///     .edge("a", "b")
///     .undirected()
///     .unwrap();
///
/// let sizes = node_sizes(&graph, 100.0, Some("population"));
/// assert_eq!(sizes["a"], 300.0);
/// assert_eq!(sizes["b"], 100.0);
/// ```
pub fn node_sizes<T>(graph: &Graph<T>, base: f64, attribute: Option<&str>) -> BTreeMap<T, f64>
where
    T: Clone + Ord + Debug,
{
    let scales = attribute
        .map(|name| graph.attribute_values(name))
        .unwrap_or_default();

    graph
        .degrees(DegreeMode::Total)
        .into_iter()
        .map(|(id, degree)| {
            let scale = scales.get(&id).copied().unwrap_or(1.0);
            (id, base * degree as f64 * scale)
        })
        .collect()
}

/// Returns the display width of every edge, its weight.
pub fn edge_widths<T>(graph: &Graph<T>) -> BTreeMap<(T, T), f64>
where
    T: Clone + Ord + Debug,
{
    graph
        .edges()
        .into_iter()
        .map(|edge| {
            let width = edge.weight();
            ((edge.source().clone(), edge.target().clone()), width)
        })
        .collect()
}
