//! Error types returned by ingestion and metric computations.

use std::io;

/// Errors raised while building a graph from records or an edge-list file.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The edge-list file couldn't be read.
    #[error("failed to read edge list: {0}")]
    Io(#[from] io::Error),

    /// A line or record doesn't follow the expected format.
    #[error("malformed record on line {line}: {reason}")]
    Format { line: usize, reason: String },

    /// The same node id was declared more than once in the node records.
    #[error("duplicate node `{0}` in node records")]
    DuplicateNode(String),

    /// An edge references a node that wasn't declared while endpoint auto-creation is disabled.
    #[error("edge references undeclared node `{0}`")]
    UnknownNode(String),
}

/// Errors raised by a single metric computation.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum MetricError {
    /// An iterative metric didn't stabilise within its iteration cap.
    #[error("{metric} did not converge within {iterations} iterations")]
    Convergence {
        metric: &'static str,
        iterations: usize,
    },

    /// The metric requires a graph property that doesn't hold.
    #[error("{metric} is undefined: {reason}")]
    Undefined {
        metric: &'static str,
        reason: &'static str,
    },
}

/// Any error raised by the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Metric(#[from] MetricError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_display() {
        let err = IngestError::Format {
            line: 3,
            reason: "expected two columns".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "malformed record on line 3: expected two columns"
        );
    }

    #[test]
    fn metric_display() {
        let err = MetricError::Undefined {
            metric: "average shortest path length",
            reason: "graph is not connected",
        };

        assert_eq!(
            err.to_string(),
            "average shortest path length is undefined: graph is not connected"
        );
    }

    #[test]
    fn crate_error_wraps_both() {
        let err = Error::from(IngestError::DuplicateNode("1".to_string()));
        assert!(matches!(err, Error::Ingest(IngestError::DuplicateNode(_))));
        assert_eq!(err.to_string(), "duplicate node `1` in node records");

        let err = Error::from(MetricError::Convergence {
            metric: "eigenvector centrality",
            iterations: 100,
        });
        assert_eq!(
            err.to_string(),
            "eigenvector centrality did not converge within 100 iterations"
        );
    }
}
