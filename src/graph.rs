//! A module for working with graphs.

use std::{
    cell::OnceCell,
    collections::{BTreeMap, BTreeSet},
    fmt::Debug,
};

use itertools::Itertools;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::{
    assortativity, betweenness, clustering, edge::Edge, eigenvector, error::MetricError, paths,
};

/// The position of a vertex in the graph's internal storage.
pub type GraphIndex = usize;

/// Named scalar attributes attached to a vertex, e.g. `age` or `population`.
pub type Attributes = BTreeMap<String, f64>;

/// Whether the edges of a graph are ordered pairs or not. Fixed for the lifetime of a graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Undirected,
    Directed,
}

/// Which incident edges count towards a vertex's degree. Undirected graphs ignore the distinction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegreeMode {
    In,
    Out,
    #[default]
    Total,
}

/// Which neighbours a traversal follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Traversal {
    Outgoing,
    Incoming,
    Either,
}

/// A graph of vertices and weighted edges, either undirected or directed.
///
/// Graphs are built once, from [`Records`](crate::ingest::Records) or [`Graph::from_edges`], and
/// are read-only afterwards. Every metric is a pure function of the graph.
#[derive(Clone, Debug)]
pub struct Graph<T> {
    kind: Kind,
    /// A mapping of vertices to their storage index.
    ///
    /// The use of a `BTreeMap` means we need the `Ord` bound on `T`. The sorted collection gives
    /// every per-vertex result the same, id-sorted, order.
    index: BTreeMap<T, GraphIndex>,
    /// Vertices in storage order.
    vertices: Vec<T>,
    attributes: Vec<Attributes>,
    /// Outgoing neighbours and edge weights. Mirrors `predecessors` for undirected graphs.
    successors: Vec<BTreeMap<GraphIndex, f64>>,
    predecessors: Vec<BTreeMap<GraphIndex, f64>>,
    edge_count: usize,
    /// Cache the adjacency matrix when possible.
    adjacency_matrix: OnceCell<DMatrix<f64>>,
}

impl<T> Graph<T>
where
    T: Clone + Ord + Debug,
{
    /// Creates an empty graph of the given kind.
    pub(crate) fn empty(kind: Kind) -> Self {
        Self {
            kind,
            index: BTreeMap::new(),
            vertices: Vec::new(),
            attributes: Vec::new(),
            successors: Vec::new(),
            predecessors: Vec::new(),
            edge_count: 0,
            adjacency_matrix: OnceCell::new(),
        }
    }

    /// Builds a graph from a set of edges, creating vertices as they're referenced. Self-loops
    /// are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::edge::Edge;
    /// use sociogram::graph::{Graph, Kind};
    ///
    /// let graph = Graph::from_edges(Kind::Undirected, [Edge::new("a", "b"), Edge::new("b", "a")]);
    ///
    /// assert_eq!(graph.vertex_count(), 2);
    /// assert_eq!(graph.edge_count(), 1);
    /// ```
    pub fn from_edges<I>(kind: Kind, edges: I) -> Self
    where
        I: IntoIterator<Item = Edge<T>>,
    {
        let mut graph = Self::empty(kind);
        for edge in edges {
            graph.insert(edge);
        }

        graph
    }

    /// Inserts a vertex if it isn't present yet and returns its index. Attributes of an existing
    /// vertex are left untouched.
    pub(crate) fn insert_vertex(&mut self, vertex: T, attributes: Attributes) -> GraphIndex {
        if let Some(i) = self.index.get(&vertex) {
            return *i;
        }

        let i = self.vertices.len();
        self.index.insert(vertex.clone(), i);
        self.vertices.push(vertex);
        self.attributes.push(attributes);
        self.successors.push(BTreeMap::new());
        self.predecessors.push(BTreeMap::new());
        self.clear_cache();

        i
    }

    /// Inserts an edge, creating missing endpoints, and returns whether it is new. Re-inserting an
    /// existing edge overwrites its weight. Self-loops only create their vertex.
    pub(crate) fn insert(&mut self, edge: Edge<T>) -> bool {
        if edge.is_loop() {
            self.insert_vertex(edge.source().clone(), Attributes::new());
            warn!(vertex = ?edge.source(), "dropping self-loop");
            return false;
        }

        let weight = edge.weight();
        let source = self.insert_vertex(edge.source().clone(), Attributes::new());
        let target = self.insert_vertex(edge.target().clone(), Attributes::new());

        self.insert_indexed(source, target, weight)
    }

    /// Inserts an edge between two existing vertices.
    pub(crate) fn insert_indexed(
        &mut self,
        source: GraphIndex,
        target: GraphIndex,
        weight: f64,
    ) -> bool {
        let is_new = self.successors[source].insert(target, weight).is_none();
        self.predecessors[target].insert(source, weight);

        if self.kind == Kind::Undirected {
            self.successors[target].insert(source, weight);
            self.predecessors[source].insert(target, weight);
        }

        if is_new {
            self.edge_count += 1;
        }
        self.clear_cache();

        is_new
    }

    /// Returns the storage index of a vertex.
    pub(crate) fn vertex_index(&self, vertex: &T) -> Option<GraphIndex> {
        self.index.get(vertex).copied()
    }

    /// Returns whether the graph is undirected or directed.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn is_directed(&self) -> bool {
        self.kind == Kind::Directed
    }

    /// Returns the vertices in sorted order.
    pub fn vertices(&self) -> impl Iterator<Item = &T> {
        self.index.keys()
    }

    /// Returns the edges of the graph, ordered by source. Undirected edges are reported once,
    /// with the smaller vertex as the source.
    pub fn edges(&self) -> Vec<Edge<T>> {
        let mut edges = Vec::with_capacity(self.edge_count);
        for (vertex, &i) in &self.index {
            for (&j, &weight) in &self.successors[i] {
                let other = &self.vertices[j];
                if self.is_directed() || vertex < other {
                    edges.push(Edge::weighted(vertex.clone(), other.clone(), weight));
                }
            }
        }

        edges
    }

    /// Returns the vertex count of the graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::edge::Edge;
    /// use sociogram::graph::{Graph, Kind};
    ///
    /// let graph = Graph::from_edges(Kind::Undirected, [Edge::new("a", "b")]);
    ///
    /// assert_eq!(graph.vertex_count(), 2);
    /// ```
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the edge count of the graph.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Checks if the graph contains a vertex.
    pub fn contains_vertex(&self, vertex: &T) -> bool {
        self.index.contains_key(vertex)
    }

    /// Checks if the graph contains an edge. Orientation only matters for directed graphs.
    pub fn contains_edge(&self, source: &T, target: &T) -> bool {
        match (self.vertex_index(source), self.vertex_index(target)) {
            (Some(i), Some(j)) => self.successors[i].contains_key(&j),
            _ => false,
        }
    }

    /// Returns the attributes of a vertex.
    pub fn attributes(&self, vertex: &T) -> Option<&Attributes> {
        self.vertex_index(vertex).map(|i| &self.attributes[i])
    }

    /// Returns a mapping of vertices carrying the named attribute to its value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::ingest::{attributes, Records};
    ///
    /// let graph = Records::new()
    ///     .node("a", attributes([("age", 8.0)]))
    ///     .edge("a", "b")
    ///     .undirected()
    ///     .unwrap();
    ///
    /// let ages = graph.attribute_values("age");
    /// assert_eq!(ages.get("a"), Some(&8.0));
    /// assert_eq!(ages.get("b"), None);
    /// ```
    pub fn attribute_values(&self, name: &str) -> BTreeMap<T, f64> {
        self.index
            .iter()
            .filter_map(|(vertex, &i)| {
                self.attributes[i]
                    .get(name)
                    .map(|value| (vertex.clone(), *value))
            })
            .collect()
    }

    /// Returns the vertices an edge leads to from the given vertex, in sorted order.
    pub fn neighbours(&self, vertex: &T) -> Option<Vec<&T>> {
        self.vertex_index(vertex).map(|i| {
            self.successors[i]
                .keys()
                .map(|&j| &self.vertices[j])
                .sorted()
                .collect()
        })
    }

    /// Computes the density of the graph, the ratio of edges with respect to the maximum possible
    /// edges. Graphs with fewer than two vertices have a density of `0.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::edge::Edge;
    /// use sociogram::graph::{Graph, Kind};
    ///
    /// let graph = Graph::from_edges(Kind::Undirected, [Edge::new("a", "b"), Edge::new("a", "c")]);
    /// assert_eq!(graph.density(), 2.0 / 3.0);
    /// ```
    pub fn density(&self) -> f64 {
        let vc = self.vertex_count() as f64;
        let ec = self.edge_count() as f64;

        if vc < 2.0 {
            return 0.0;
        }

        // Calculate the total number of possible edges given a vertex count.
        let pec = match self.kind {
            Kind::Undirected => vc * (vc - 1.0) / 2.0,
            Kind::Directed => vc * (vc - 1.0),
        };

        ec / pec
    }

    /// Returns the unweighted adjacency matrix of the graph, rows and columns in storage order.
    /// Row `i` holds the edges leaving vertex `i`.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use sociogram::edge::Edge;
    /// use sociogram::graph::{Graph, Kind};
    ///
    /// let graph = Graph::from_edges(Kind::Directed, [Edge::new("a", "b")]);
    /// assert_eq!(
    ///     graph.adjacency_matrix(),
    ///     &dmatrix![0.0, 1.0;
    ///               0.0, 0.0]
    /// );
    /// ```
    pub fn adjacency_matrix(&self) -> &DMatrix<f64> {
        self.adjacency_matrix.get_or_init(|| {
            let n = self.vertex_count();
            let mut matrix = DMatrix::<f64>::zeros(n, n);

            for (i, successors) in self.successors.iter().enumerate() {
                for &j in successors.keys() {
                    matrix[(i, j)] = 1.0;
                }
            }

            matrix
        })
    }

    /// Returns the degree of a vertex, `None` if it isn't part of the graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::edge::Edge;
    /// use sociogram::graph::{DegreeMode, Graph, Kind};
    ///
    /// let graph = Graph::from_edges(Kind::Directed, [Edge::new("a", "b"), Edge::new("c", "b")]);
    ///
    /// assert_eq!(graph.degree(&"b", DegreeMode::In), Some(2));
    /// assert_eq!(graph.degree(&"b", DegreeMode::Out), Some(0));
    /// assert_eq!(graph.degree(&"d", DegreeMode::Total), None);
    /// ```
    pub fn degree(&self, vertex: &T, mode: DegreeMode) -> Option<usize> {
        self.vertex_index(vertex).map(|i| self.degree_at(i, mode))
    }

    /// Returns a mapping of vertices to their degree.
    pub fn degrees(&self, mode: DegreeMode) -> BTreeMap<T, usize> {
        self.per_vertex(|i| self.degree_at(i, mode))
    }

    /// Returns the degrees of all vertices, highest first.
    pub fn degree_sequence(&self, mode: DegreeMode) -> Vec<usize> {
        (0..self.vertex_count())
            .map(|i| self.degree_at(i, mode))
            .sorted_by(|a, b| b.cmp(a))
            .collect()
    }

    /// Returns a mapping of each degree present in the graph to the number of vertices having it.
    pub fn degree_histogram(&self, mode: DegreeMode) -> BTreeMap<usize, usize> {
        (0..self.vertex_count())
            .map(|i| self.degree_at(i, mode))
            .counts()
            .into_iter()
            .collect()
    }

    /// Returns a mapping of vertices to their degree centrality, the fraction of the other vertices
    /// they are connected to. Directed graphs count both in and out edges.
    ///
    /// Graphs with a single vertex give it a centrality of `1.0`.
    #[instrument(skip(self), fields(vertices = self.vertex_count()))]
    pub fn degree_centrality(&self) -> BTreeMap<T, f64> {
        let n = self.vertex_count();
        if n <= 1 {
            return self.per_vertex(|_| 1.0);
        }

        let others = (n - 1) as f64;
        self.per_vertex(|i| self.degree_at(i, DegreeMode::Total) as f64 / others)
    }

    /// Returns a mapping of vertices to their eigenvector centrality (the relative importance of
    /// the vertex), normalised to a unit euclidean norm.
    ///
    /// In a directed graph a vertex draws its importance from the vertices pointing at it.
    #[instrument(skip(self), fields(vertices = self.vertex_count()))]
    pub fn eigenvector_centrality(
        &self,
        max_iter: usize,
        tolerance: f64,
    ) -> Result<BTreeMap<T, f64>, MetricError> {
        let scores = eigenvector::power_iteration(self.adjacency_matrix(), max_iter, tolerance)?;

        Ok(self.per_vertex(|i| scores[i]))
    }

    /// Returns a mapping of vertices to their betweenness centrality, the fraction of shortest
    /// paths between other vertices passing through them.
    ///
    /// When `normalize` is false undirected values count each unordered pair of endpoints once.
    #[instrument(skip(self), fields(vertices = self.vertex_count()))]
    pub fn betweenness_centrality(&self, normalize: bool) -> BTreeMap<T, f64> {
        let indices = self.neighbour_lists(Traversal::Outgoing);
        let centralities = betweenness::compute_betweenness(&indices, normalize, self.is_directed());

        self.per_vertex(|i| centralities[i])
    }

    /// Returns a mapping of vertices to their local clustering coefficient, the density of
    /// triangles around them.
    ///
    /// Directed graphs count every directed triangle through the vertex against the number it
    /// could be part of, given its in, out and reciprocal edges.
    #[instrument(skip(self), fields(vertices = self.vertex_count()))]
    pub fn clustering(&self) -> BTreeMap<T, f64> {
        let coefficients = clustering::local_clustering(self.adjacency_matrix(), self.is_directed());

        self.per_vertex(|i| coefficients[i])
    }

    /// Returns the mean of the local clustering coefficients, `0.0` for an empty graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::edge::Edge;
    /// use sociogram::graph::{Graph, Kind};
    ///
    /// let triangle = Graph::from_edges(
    ///     Kind::Undirected,
    ///     [Edge::new(1, 2), Edge::new(2, 3), Edge::new(1, 3)],
    /// );
    /// assert_eq!(triangle.average_clustering(), 1.0);
    /// ```
    pub fn average_clustering(&self) -> f64 {
        let n = self.vertex_count();
        if n == 0 {
            return 0.0;
        }

        self.clustering().values().sum::<f64>() / n as f64
    }

    /// Returns the Pearson correlation of the degrees at either end of every edge.
    ///
    /// Undirected graphs count each edge in both orientations, directed graphs correlate the
    /// source's out-degree with the target's in-degree.
    #[instrument(skip(self), fields(edges = self.edge_count()))]
    pub fn degree_assortativity(&self) -> Result<f64, MetricError> {
        const METRIC: &str = "degree assortativity";

        let mut pairs = Vec::with_capacity(2 * self.edge_count);
        for (i, successors) in self.successors.iter().enumerate() {
            for &j in successors.keys() {
                match self.kind {
                    Kind::Undirected => pairs.push((
                        self.degree_at(i, DegreeMode::Total) as f64,
                        self.degree_at(j, DegreeMode::Total) as f64,
                    )),
                    Kind::Directed => pairs.push((
                        self.degree_at(i, DegreeMode::Out) as f64,
                        self.degree_at(j, DegreeMode::In) as f64,
                    )),
                }
            }
        }

        if pairs.is_empty() {
            return Err(MetricError::Undefined {
                metric: METRIC,
                reason: "graph has no edges",
            });
        }

        assortativity::pearson(&pairs).ok_or(MetricError::Undefined {
            metric: METRIC,
            reason: "degrees at the edge endpoints don't vary",
        })
    }

    /// Returns the mean number of hops along the shortest path between every ordered pair of
    /// distinct vertices.
    ///
    /// Only defined for connected undirected graphs and strongly connected directed graphs.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::edge::Edge;
    /// use sociogram::graph::{Graph, Kind};
    ///
    /// let disjoint = Graph::from_edges(Kind::Undirected, [Edge::new(1, 2), Edge::new(3, 4)]);
    /// assert!(disjoint.average_shortest_path_length().is_err());
    /// ```
    #[instrument(skip(self), fields(vertices = self.vertex_count()))]
    pub fn average_shortest_path_length(&self) -> Result<f64, MetricError> {
        const METRIC: &str = "average shortest path length";

        let n = self.vertex_count();
        match n {
            0 => {
                return Err(MetricError::Undefined {
                    metric: METRIC,
                    reason: "graph has no vertices",
                })
            }
            1 => return Ok(0.0),
            _ => (),
        }

        match self.kind {
            Kind::Undirected if !self.is_connected() => {
                return Err(MetricError::Undefined {
                    metric: METRIC,
                    reason: "graph is not connected",
                })
            }
            Kind::Directed if !self.is_strongly_connected() => {
                return Err(MetricError::Undefined {
                    metric: METRIC,
                    reason: "graph is not strongly connected",
                })
            }
            _ => (),
        }

        let total = paths::total_path_length(&self.neighbour_lists(Traversal::Outgoing));

        Ok(total as f64 / (n * (n - 1)) as f64)
    }

    /// Returns the connected components of the graph, largest first and ties broken by their
    /// smallest vertex. Edge direction is ignored.
    pub fn connected_components(&self) -> Vec<BTreeSet<T>> {
        paths::components(&self.neighbour_lists(Traversal::Either))
            .into_iter()
            .map(|component| {
                component
                    .into_iter()
                    .map(|i| self.vertices[i].clone())
                    .collect::<BTreeSet<T>>()
            })
            .sorted_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.first().cmp(&b.first())))
            .collect()
    }

    /// Returns whether every vertex can reach every other, ignoring edge direction. Empty graphs
    /// aren't connected.
    pub fn is_connected(&self) -> bool {
        self.vertex_count() > 0 && self.connected_components().len() == 1
    }

    /// Returns whether every vertex can reach every other following edge direction. For
    /// undirected graphs this is the same as [`Graph::is_connected`].
    pub fn is_strongly_connected(&self) -> bool {
        let n = self.vertex_count();
        if n == 0 {
            return false;
        }

        let forwards = paths::reachable_count(0, &self.neighbour_lists(Traversal::Outgoing));
        let backwards = paths::reachable_count(0, &self.neighbour_lists(Traversal::Incoming));

        forwards == n && backwards == n
    }

    /// Returns the subgraph induced by the given vertices, keeping their attributes. Vertices not
    /// in the graph are ignored.
    pub fn subgraph(&self, vertices: &BTreeSet<T>) -> Self {
        let mut graph = Self::empty(self.kind);

        for vertex in vertices {
            if let Some(i) = self.vertex_index(vertex) {
                graph.insert_vertex(vertex.clone(), self.attributes[i].clone());
            }
        }

        for edge in self.edges() {
            if let (Some(source), Some(target)) = (
                graph.vertex_index(edge.source()),
                graph.vertex_index(edge.target()),
            ) {
                graph.insert_indexed(source, target, edge.weight());
            }
        }

        graph
    }

    /// Returns the subgraph induced by the largest connected component.
    pub fn largest_component(&self) -> Self {
        match self.connected_components().first() {
            Some(component) => self.subgraph(component),
            None => Self::empty(self.kind),
        }
    }

    //
    // Private
    //

    /// Clears the computed state.
    ///
    /// This should be called every time the graph is extended since the cached state won't
    /// correspond to the new graph.
    fn clear_cache(&mut self) {
        self.adjacency_matrix = OnceCell::new();
    }

    fn degree_at(&self, i: GraphIndex, mode: DegreeMode) -> usize {
        match (self.kind, mode) {
            (Kind::Undirected, _) => self.successors[i].len(),
            (Kind::Directed, DegreeMode::In) => self.predecessors[i].len(),
            (Kind::Directed, DegreeMode::Out) => self.successors[i].len(),
            (Kind::Directed, DegreeMode::Total) => {
                self.predecessors[i].len() + self.successors[i].len()
            }
        }
    }

    /// Maps every vertex, in sorted order, to a value computed from its storage index.
    fn per_vertex<V>(&self, f: impl Fn(GraphIndex) -> V) -> BTreeMap<T, V> {
        self.index
            .iter()
            .map(|(vertex, &i)| (vertex.clone(), f(i)))
            .collect()
    }

    /// Returns the neighbour lists followed by a traversal, indexed by storage order.
    pub(crate) fn neighbour_lists(&self, traversal: Traversal) -> Vec<Vec<GraphIndex>> {
        (0..self.vertex_count())
            .map(|i| match traversal {
                Traversal::Outgoing => self.successors[i].keys().copied().collect(),
                Traversal::Incoming => self.predecessors[i].keys().copied().collect(),
                Traversal::Either => self.successors[i]
                    .keys()
                    .chain(self.predecessors[i].keys())
                    .copied()
                    .unique()
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::dmatrix;

    use super::*;

    macro_rules! graph {
          ($kind:expr; $($path:expr),*) => {{
              let mut graph = Graph::empty($kind);

              $(
                  let mut iter = $path.into_iter().peekable();
                  while let (Some(a), Some(b)) = (iter.next(), iter.peek()) {
                      graph.insert(Edge::new(a, *b));
                  }

              )*

              graph
          }}
      }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn insert() {
        let mut graph = Graph::empty(Kind::Undirected);

        assert!(graph.insert(Edge::new("a", "b")));
        assert!(!graph.insert(Edge::new("a", "b")));
        assert!(!graph.insert(Edge::new("b", "a")));

        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn insert_directed() {
        let mut graph = Graph::empty(Kind::Directed);

        assert!(graph.insert(Edge::new("a", "b")));
        assert!(graph.insert(Edge::new("b", "a")));

        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains_edge(&"a", &"b"));
        assert!(graph.contains_edge(&"b", &"a"));
    }

    #[test]
    fn insert_overwrites_weight() {
        let mut graph = Graph::empty(Kind::Undirected);
        graph.insert(Edge::weighted("a", "b", 3.0));
        graph.insert(Edge::weighted("b", "a", 5.0));

        assert_eq!(graph.edges(), vec![Edge::weighted("a", "b", 5.0)]);
    }

    #[test]
    fn insert_drops_self_loops() {
        let mut graph = Graph::empty(Kind::Undirected);

        assert!(!graph.insert(Edge::new("a", "a")));
        assert_eq!(graph.vertex_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.degree(&"a", DegreeMode::Total), Some(0));
    }

    #[test]
    fn insert_vertex_keeps_first_attributes() {
        let mut graph = Graph::empty(Kind::Undirected);
        let attrs: Attributes = [("age".to_string(), 8.0)].into();

        let i = graph.insert_vertex("a", attrs.clone());
        let j = graph.insert_vertex("a", Attributes::new());

        assert_eq!(i, j);
        assert_eq!(graph.attributes(&"a"), Some(&attrs));
    }

    #[test]
    fn contains_edge() {
        let undirected = graph!(Kind::Undirected; ["a", "b"]);
        assert!(undirected.contains_edge(&"a", &"b"));
        assert!(undirected.contains_edge(&"b", &"a"));
        assert!(!undirected.contains_edge(&"a", &"c"));

        let directed = graph!(Kind::Directed; ["a", "b"]);
        assert!(directed.contains_edge(&"a", &"b"));
        assert!(!directed.contains_edge(&"b", &"a"));
    }

    #[test]
    fn edges() {
        let graph = graph!(Kind::Undirected; ["c", "a", "b"]);

        assert_eq!(graph.edges(), vec![Edge::new("a", "b"), Edge::new("a", "c")]);
    }

    #[test]
    fn vertex_count() {
        let mut graph = Graph::empty(Kind::Undirected);
        assert_eq!(graph.vertex_count(), 0);

        // Verify two new vertices get added when they don't yet exist in the graph.
        graph.insert(Edge::new("a", "b"));
        assert_eq!(graph.vertex_count(), 2);

        // Verify only one new vertex is added when one of them already exists in the graph.
        graph.insert(Edge::new("a", "c"));
        assert_eq!(graph.vertex_count(), 3);
    }

    #[test]
    fn vertices_are_sorted() {
        let graph = graph!(Kind::Undirected; ["c", "a", "b"]);

        assert_eq!(graph.vertices().collect::<Vec<_>>(), vec![&"a", &"b", &"c"]);
    }

    #[test]
    fn neighbours() {
        let graph = graph!(Kind::Directed; ["a", "c"], ["a", "b"], ["d", "a"]);

        assert_eq!(graph.neighbours(&"a"), Some(vec![&"b", &"c"]));
        assert_eq!(graph.neighbours(&"e"), None);
    }

    #[test]
    fn density() {
        let mut graph = Graph::empty(Kind::Undirected);
        assert_eq!(graph.density(), 0.0);

        graph.insert(Edge::new("a", "b"));
        assert_eq!(graph.density(), 1.0);

        graph.insert(Edge::new("a", "c"));
        assert_eq!(graph.density(), 2.0 / 3.0);

        let directed = graph!(Kind::Directed; ["a", "b"]);
        assert_eq!(directed.density(), 0.5);
    }

    #[test]
    fn adjacency_matrix() {
        let mut graph = Graph::empty(Kind::Undirected);
        assert_eq!(graph.adjacency_matrix(), &DMatrix::<f64>::zeros(0, 0));

        graph.insert(Edge::new("a", "b"));
        assert_eq!(
            graph.adjacency_matrix(),
            &dmatrix![0.0, 1.0;
                      1.0, 0.0]
        );

        graph.insert(Edge::new("a", "c"));
        assert_eq!(
            graph.adjacency_matrix(),
            &dmatrix![0.0, 1.0, 1.0;
                      1.0, 0.0, 0.0;
                      1.0, 0.0, 0.0]
        );
    }

    #[test]
    fn clear_cache_on_insert() {
        let mut graph = Graph::empty(Kind::Undirected);
        graph.insert(Edge::new("a", "b"));

        graph.adjacency_matrix();
        assert!(graph.adjacency_matrix.get().is_some());

        graph.insert(Edge::new("a", "c"));
        assert!(graph.adjacency_matrix.get().is_none());
    }

    #[test]
    fn degree() {
        let graph = graph!(Kind::Undirected; ["a", "b", "c"]);

        assert_eq!(graph.degree(&"a", DegreeMode::Total), Some(1));
        assert_eq!(graph.degree(&"b", DegreeMode::Total), Some(2));
        // The mode has no effect on undirected graphs.
        assert_eq!(graph.degree(&"b", DegreeMode::In), Some(2));
    }

    #[test]
    fn degree_sequence_and_histogram() {
        let graph = graph!(Kind::Undirected; ["a", "b"], ["a", "c"], ["a", "d"]);

        assert_eq!(graph.degree_sequence(DegreeMode::Total), vec![3, 1, 1, 1]);
        assert_eq!(
            graph.degree_histogram(DegreeMode::Total),
            BTreeMap::from([(1, 3), (3, 1)])
        );
    }

    #[test]
    fn degree_centrality() {
        let graph = Graph::<&str>::empty(Kind::Undirected);
        assert!(graph.degree_centrality().is_empty());

        let graph = graph!(Kind::Undirected; ["a", "b"], ["a", "c"]);
        let degree_centrality = graph.degree_centrality();

        assert_eq!(degree_centrality.get("a"), Some(&1.0));
        assert_eq!(degree_centrality.get("b"), Some(&0.5));
        assert_eq!(degree_centrality.get("c"), Some(&0.5));
    }

    #[test]
    fn degree_centrality_single_vertex() {
        let mut graph = Graph::empty(Kind::Undirected);
        graph.insert_vertex("a", Attributes::new());

        assert_eq!(graph.degree_centrality().get("a"), Some(&1.0));
    }

    #[test]
    fn degree_centrality_directed_counts_both_directions() {
        let graph = graph!(Kind::Directed; ["a", "b", "c"]);
        let degree_centrality = graph.degree_centrality();

        assert_eq!(degree_centrality.get("b"), Some(&1.0));
        assert_eq!(degree_centrality.get("a"), Some(&0.5));
    }

    #[test]
    fn eigenvector_centrality() {
        let graph = graph!(Kind::Undirected; ["a", "b"], ["a", "c"], ["a", "d"]);
        let centrality = graph.eigenvector_centrality(100, 1e-9).unwrap();

        assert!((centrality["a"] - 1.0 / 2f64.sqrt()).abs() < 1e-6);
        for leaf in ["b", "c", "d"] {
            assert!((centrality[leaf] - 1.0 / 6f64.sqrt()).abs() < 1e-6);
        }
    }

    #[test]
    fn eigenvector_centrality_directed_uses_in_edges() {
        // Nothing points at "d", so its importance fades while the cycle's doesn't.
        let graph = graph!(Kind::Directed; ["a", "b", "c", "a"], ["d", "a"]);
        let centrality = graph.eigenvector_centrality(100, 1e-6).unwrap();

        assert!(centrality["d"] < 1e-3);
        assert!((centrality["a"] - centrality["b"]).abs() < 1e-4);
        assert!((centrality["b"] - centrality["c"]).abs() < 1e-4);
    }

    #[test]
    fn eigenvector_centrality_does_not_converge() {
        let graph = graph!(Kind::Undirected; ["a", "b"], ["a", "c"]);

        assert_eq!(
            graph.eigenvector_centrality(1, 1e-6),
            Err(MetricError::Convergence {
                metric: "eigenvector centrality",
                iterations: 1
            })
        );
    }

    #[test]
    fn betweenness() {
        let (a, b, c, d) = ("a", "b", "c", "d");
        let graph = graph!(Kind::Undirected; [a, b, c, d]);

        let betweenness_centrality = graph.betweenness_centrality(false);

        assert_eq!(betweenness_centrality.get_key_value(a), Some((&a, &0.0)));
        assert_eq!(betweenness_centrality.get_key_value(b), Some((&b, &2.0)));
        assert_eq!(betweenness_centrality.get_key_value(c), Some((&c, &2.0)));
        assert_eq!(betweenness_centrality.get_key_value(d), Some((&d, &0.0)));

        let normalized = graph.betweenness_centrality(true);
        assert_close(normalized[b], 2.0 / 3.0);
    }

    #[test]
    fn betweenness_directed() {
        let graph = graph!(Kind::Directed; ["a", "b", "c"]);
        let betweenness_centrality = graph.betweenness_centrality(false);

        assert_eq!(betweenness_centrality["b"], 1.0);
        assert_eq!(betweenness_centrality["a"], 0.0);
    }

    #[test]
    fn clustering() {
        let graph = graph!(Kind::Undirected; ["a", "b", "c", "a"], ["a", "d"]);
        let clustering = graph.clustering();

        assert_close(clustering["a"], 1.0 / 3.0);
        assert_close(clustering["b"], 1.0);
        assert_close(clustering["d"], 0.0);
    }

    #[test]
    fn clustering_directed_cycle() {
        let graph = graph!(Kind::Directed; ["a", "b", "c", "a"]);

        for value in graph.clustering().values() {
            assert_close(*value, 0.5);
        }
    }

    #[test]
    fn average_clustering() {
        let graph = graph!(Kind::Undirected; ["a", "b", "c", "a"], ["a", "d"]);
        let mean = graph.clustering().values().sum::<f64>() / 4.0;

        assert_close(graph.average_clustering(), mean);
        assert_eq!(Graph::<&str>::empty(Kind::Undirected).average_clustering(), 0.0);
    }

    #[test]
    fn degree_assortativity() {
        let star = graph!(Kind::Undirected; ["a", "b"], ["a", "c"], ["a", "d"]);
        assert_close(star.degree_assortativity().unwrap(), -1.0);

        let path = graph!(Kind::Undirected; ["a", "b", "c", "d"]);
        assert_close(path.degree_assortativity().unwrap(), -0.5);
    }

    #[test]
    fn directed_degree_assortativity() {
        // Source out-degree against target in-degree: (2, 1), (2, 2) and (1, 2).
        let graph = graph!(Kind::Directed; ["a", "b", "c"], ["a", "c"]);
        assert_close(graph.degree_assortativity().unwrap(), -0.5);
    }

    #[test]
    fn degree_assortativity_undefined() {
        let empty = Graph::<&str>::empty(Kind::Undirected);
        assert!(matches!(
            empty.degree_assortativity(),
            Err(MetricError::Undefined { .. })
        ));

        // Every endpoint has the same degree.
        let cycle = graph!(Kind::Undirected; ["a", "b", "c", "a"]);
        assert!(matches!(
            cycle.degree_assortativity(),
            Err(MetricError::Undefined { .. })
        ));
    }

    #[test]
    fn average_shortest_path_length() {
        let path = graph!(Kind::Undirected; ["a", "b", "c"]);
        // Distances: a-b 1, b-c 1, a-c 2, counted in both directions.
        assert_close(path.average_shortest_path_length().unwrap(), 4.0 / 3.0);

        let cycle = graph!(Kind::Directed; ["a", "b", "c", "a"]);
        assert_close(cycle.average_shortest_path_length().unwrap(), 1.5);
    }

    #[test]
    fn average_shortest_path_length_undefined() {
        let disjoint = graph!(Kind::Undirected; [1, 2], [3, 4]);
        assert_eq!(
            disjoint.average_shortest_path_length(),
            Err(MetricError::Undefined {
                metric: "average shortest path length",
                reason: "graph is not connected"
            })
        );

        let path = graph!(Kind::Directed; ["a", "b", "c"]);
        assert_eq!(
            path.average_shortest_path_length(),
            Err(MetricError::Undefined {
                metric: "average shortest path length",
                reason: "graph is not strongly connected"
            })
        );

        assert!(Graph::<&str>::empty(Kind::Undirected)
            .average_shortest_path_length()
            .is_err());
    }

    #[test]
    fn connected_components() {
        let graph = graph!(Kind::Directed; ["d", "e"], ["a", "b", "c"]);
        let components = graph.connected_components();

        assert_eq!(components.len(), 2);
        assert_eq!(components[0], BTreeSet::from(["a", "b", "c"]));
        assert_eq!(components[1], BTreeSet::from(["d", "e"]));

        assert!(!graph.is_connected());
        assert!(!Graph::<&str>::empty(Kind::Undirected).is_connected());
    }

    #[test]
    fn is_strongly_connected() {
        let path = graph!(Kind::Directed; ["a", "b", "c"]);
        assert!(path.is_connected());
        assert!(!path.is_strongly_connected());

        let cycle = graph!(Kind::Directed; ["a", "b", "c", "a"]);
        assert!(cycle.is_strongly_connected());
    }

    #[test]
    fn largest_component() {
        let graph = graph!(Kind::Undirected; ["x", "y"], ["a", "b", "c"]);
        let largest = graph.largest_component();

        assert_eq!(largest.vertex_count(), 3);
        assert_eq!(largest.edge_count(), 2);
        assert!(largest.contains_edge(&"b", &"c"));
        assert!(!largest.contains_vertex(&"x"));
    }

    #[test]
    fn subgraph_keeps_attributes() {
        let mut graph = Graph::empty(Kind::Undirected);
        graph.insert_vertex("a", [("population".to_string(), 3.0)].into());
        graph.insert(Edge::new("a", "b"));
        graph.insert(Edge::new("b", "c"));

        let subgraph = graph.subgraph(&BTreeSet::from(["a", "b"]));

        assert_eq!(subgraph.edge_count(), 1);
        assert_eq!(subgraph.attribute_values("population").get("a"), Some(&3.0));
    }
}
