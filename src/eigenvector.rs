//! Eigenvector centrality via power iteration.

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::error::MetricError;

const METRIC: &str = "eigenvector centrality";

/// Iterates `x <- (I + Aᵀ) x` from the uniform vector, normalising to a unit L2 norm each round,
/// until the L1 change drops below `n * tolerance`.
///
/// A vertex accumulates the scores of the vertices with an edge pointing at it.
pub fn power_iteration(
    adjacency: &DMatrix<f64>,
    max_iter: usize,
    tolerance: f64,
) -> Result<DVector<f64>, MetricError> {
    let n = adjacency.nrows();

    if n == 0 {
        return Err(MetricError::Undefined {
            metric: METRIC,
            reason: "graph has no vertices",
        });
    }

    let shifted = adjacency.transpose() + DMatrix::<f64>::identity(n, n);
    let mut scores = DVector::<f64>::from_element(n, 1.0 / n as f64);

    for iteration in 1..=max_iter {
        let mut next = &shifted * &scores;

        let norm = next.norm();
        if norm > 0.0 {
            next.unscale_mut(norm);
        }

        let change: f64 = next
            .iter()
            .zip(scores.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        scores = next;

        debug!(iteration, change, "power iteration");

        if change < n as f64 * tolerance {
            return Ok(scores);
        }
    }

    Err(MetricError::Convergence {
        metric: METRIC,
        iterations: max_iter,
    })
}
