//! A module for working with edges.

/// The weight given to edges that don't specify one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// An edge record between two vertices, carrying a weight.
///
/// The `source`-`target` orientation is only meaningful once the edge is inserted into a directed
/// graph, undirected graphs ignore it.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge<T> {
    source: T,
    target: T,
    weight: f64,
}

impl<T> Edge<T> {
    /// Creates a new edge from two vertices with the default weight.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert_eq!(edge.weight(), 1.0);
    /// ```
    pub fn new(source: T, target: T) -> Self {
        Self::weighted(source, target, DEFAULT_WEIGHT)
    }

    /// Creates a new edge from two vertices and a weight.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::edge::Edge;
    ///
    /// let edge = Edge::weighted("a", "b", 3.0);
    /// assert_eq!(edge.weight(), 3.0);
    /// ```
    pub fn weighted(source: T, target: T, weight: f64) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }

    /// Returns the first vertice forming the edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert_eq!(edge.source(), &"a");
    /// ```
    pub fn source(&self) -> &T {
        &self.source
    }

    /// Returns the second vertice forming the edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert_eq!(edge.target(), &"b");
    /// ```
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Returns the weight of the edge.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Returns whether the edge contains the given vertice.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    ///
    /// assert_eq!(edge.contains(&"a"), true);
    /// assert_eq!(edge.contains(&"b"), true);
    /// assert_eq!(edge.contains(&"c"), false);
    /// ```
    pub fn contains(&self, vertex: &T) -> bool
    where
        T: PartialEq,
    {
        self.source() == vertex || self.target() == vertex
    }

    /// Returns whether both ends of the edge are the same vertice.
    pub fn is_loop(&self) -> bool
    where
        T: PartialEq,
    {
        self.source == self.target
    }

    /// Returns the same edge pointing the other way.
    pub fn reversed(self) -> Self {
        Self {
            source: self.target,
            target: self.source,
            weight: self.weight,
        }
    }
}
