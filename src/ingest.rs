//! Building graphs from node and edge records or from edge-list files.
//!
//! The same [`Records`] can produce both an undirected and a directed graph, directed edges keep
//! their `source`→`target` orientation.
//!
//! Edge-list files hold one edge per line, the first two whitespace or comma separated columns
//! being integer vertex ids. Further columns are ignored, as are blank lines and lines starting
//! with `#` or `%`.

use std::{collections::BTreeSet, fmt::Debug, fs, path::Path};

use tracing::{info, instrument};

use crate::{
    edge::Edge,
    error::IngestError,
    graph::{Attributes, Graph, Kind},
};

/// Controls how records are turned into a graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IngestOptions {
    /// Create vertices, without attributes, for edge endpoints missing from the node records.
    /// When disabled such edges fail with [`IngestError::UnknownNode`].
    pub auto_create_endpoints: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            auto_create_endpoints: true,
        }
    }
}

/// Builds an attribute map from `(name, value)` pairs.
///
/// # Examples
///
/// ```
/// use sociogram::ingest::attributes;
///
/// let attrs = attributes([("age", 8.0), ("population", 3.0)]);
/// assert_eq!(attrs.get("age"), Some(&8.0));
/// ```
pub fn attributes<const N: usize>(pairs: [(&str, f64); N]) -> Attributes {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Node and edge records, in the order they were declared.
#[derive(Clone, Debug, PartialEq)]
pub struct Records<T> {
    nodes: Vec<(T, Attributes)>,
    edges: Vec<Edge<T>>,
}

impl<T> Default for Records<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl<T> Records<T> {
    /// Creates an empty set of records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node record.
    pub fn node(mut self, id: T, attributes: Attributes) -> Self {
        self.push_node(id, attributes);
        self
    }

    /// Adds an edge record with the default weight.
    pub fn edge(mut self, source: T, target: T) -> Self {
        self.push_edge(Edge::new(source, target));
        self
    }

    /// Adds a weighted edge record.
    pub fn weighted_edge(mut self, source: T, target: T, weight: f64) -> Self {
        self.push_edge(Edge::weighted(source, target, weight));
        self
    }

    pub fn push_node(&mut self, id: T, attributes: Attributes) {
        self.nodes.push((id, attributes));
    }

    pub fn push_edge(&mut self, edge: Edge<T>) {
        self.edges.push(edge);
    }

    pub fn nodes(&self) -> &[(T, Attributes)] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }
}

impl<T> Records<T>
where
    T: Clone + Ord + Debug,
{
    /// Builds a graph of the given kind from the records.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::graph::Kind;
    /// use sociogram::ingest::{IngestOptions, Records};
    ///
    /// let records = Records::new().edge(1, 2).edge(2, 3).edge(1, 3);
    /// let graph = records.build(Kind::Undirected, IngestOptions::default()).unwrap();
    ///
    /// assert_eq!(graph.vertex_count(), 3);
    /// assert_eq!(graph.edge_count(), 3);
    /// ```
    #[instrument(skip(self), fields(nodes = self.nodes.len(), edges = self.edges.len()))]
    pub fn build(&self, kind: Kind, options: IngestOptions) -> Result<Graph<T>, IngestError> {
        let mut graph = Graph::empty(kind);

        let mut declared = BTreeSet::new();
        for (id, attributes) in &self.nodes {
            if !declared.insert(id) {
                return Err(IngestError::DuplicateNode(format!("{id:?}")));
            }
            graph.insert_vertex(id.clone(), attributes.clone());
        }

        for edge in &self.edges {
            if !options.auto_create_endpoints {
                if let Some(unknown) = [edge.source(), edge.target()]
                    .into_iter()
                    .find(|id| !graph.contains_vertex(id))
                {
                    return Err(IngestError::UnknownNode(format!("{unknown:?}")));
                }
            }

            graph.insert(edge.clone());
        }

        info!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            ?kind,
            "built graph"
        );

        Ok(graph)
    }

    /// Builds an undirected graph, creating missing endpoints.
    pub fn undirected(&self) -> Result<Graph<T>, IngestError> {
        self.build(Kind::Undirected, IngestOptions::default())
    }

    /// Builds a directed graph, creating missing endpoints.
    pub fn directed(&self) -> Result<Graph<T>, IngestError> {
        self.build(Kind::Directed, IngestOptions::default())
    }
}

impl Records<u64> {
    /// Parses edge records from the text of an edge-list file.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::ingest::Records;
    ///
    /// let records = Records::parse_edge_list("% tribes\n1 2 1\n2 3 -1\n").unwrap();
    /// assert_eq!(records.edges().len(), 2);
    ///
    /// assert!(Records::parse_edge_list("1 two").is_err());
    /// ```
    pub fn parse_edge_list(text: &str) -> Result<Self, IngestError> {
        let mut records = Self::new();

        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('%') {
                continue;
            }

            let mut columns = line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|column| !column.is_empty());

            let (Some(source), Some(target)) = (columns.next(), columns.next()) else {
                return Err(IngestError::Format {
                    line: number + 1,
                    reason: format!("expected two columns, found `{line}`"),
                });
            };

            records.push_edge(Edge::new(
                parse_id(source, number + 1)?,
                parse_id(target, number + 1)?,
            ));
        }

        Ok(records)
    }

    /// Reads edge records from an edge-list file.
    #[instrument]
    pub fn read_edge_list<P: AsRef<Path> + Debug>(path: P) -> Result<Self, IngestError> {
        let text = fs::read_to_string(path)?;
        let records = Self::parse_edge_list(&text)?;

        info!(edges = records.edges.len(), "read edge list");

        Ok(records)
    }
}

fn parse_id(column: &str, line: usize) -> Result<u64, IngestError> {
    column.parse().map_err(|_| IngestError::Format {
        line,
        reason: format!("`{column}` is not an integer vertex id"),
    })
}
