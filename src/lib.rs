//! Sociogram is a small toolkit for analysing small social networks: it computes the standard
//! structural metrics of a graph and maps them to the colours and sizes a renderer needs.
//!
//! # Basic usage
//!
//! Graphs are built from [`Records`](ingest::Records), either declared inline or read from an
//! edge-list file, as undirected or directed [`Graph`](graph::Graph)s. Once constructed, metrics
//! can be computed on the graph and turned into analysis steps.
//!
//! ```rust
//! use sociogram::color::{color_mapping, Normalization, Palette};
//! use sociogram::ingest::{attributes, Records};
//! use sociogram::pipeline::node_sizes;
//!
//! // Declare a few organisations and how they're linked, ids can be any `Clone + Ord` type.
//! let records = Records::new()
//!     .node("arts", attributes([("age", 8.0), ("population", 3.0)]))
//!     .node("childcare", attributes([("age", 37.0), ("population", 15.0)]))
//!     .node("enrichment", attributes([("age", 17.0), ("population", 50.0)]))
//!     .weighted_edge("enrichment", "arts", 3.0)
//!     .weighted_edge("enrichment", "childcare", 5.0);
//!
//! let graph = records.undirected().unwrap();
//!
//! // Compute some metrics on the graph.
//! let degree_centrality = graph.degree_centrality();
//! let betweenness = graph.betweenness_centrality(true);
//! assert_eq!(degree_centrality["enrichment"], 1.0);
//! assert_eq!(betweenness["enrichment"], 1.0);
//!
//! // Colour by any per-vertex value, here an attribute, and size by degree and population.
//! let colors = color_mapping(&graph.attribute_values("age"), Palette::Rainbow, Normalization::with_padding(0.0));
//! let sizes = node_sizes(&graph, 100.0, Some("population"));
//! assert_eq!(colors["childcare"], Palette::Rainbow.sample(1.0));
//! assert_eq!(sizes["enrichment"], 10_000.0);
//! ```

mod assortativity;
mod betweenness;
mod clustering;
pub mod color;
pub mod edge;
mod eigenvector;
pub mod error;
pub mod frame;
pub mod graph;
pub mod ingest;
mod paths;
pub mod pipeline;
pub mod report;
