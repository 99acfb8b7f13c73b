//! A module for computing betweenness centrality.

use std::collections::VecDeque;

use crate::graph::GraphIndex;

/// this is an implementation of Ulrik Brandes's
/// A Faster Algorithm for Betweenness Centrality
/// http://snap.stanford.edu/class/cs224w-readings/brandes01centrality.pdf
/// page 10, "Algorithm 1: Betweenness centrality in unweighted graphs"
fn betweenness_for_node(index: usize, indices: &[Vec<GraphIndex>], betweenness_count: &mut [f64]) {
    let num_nodes = indices.len();

    let mut sigma: Vec<f64> = vec![0.0; num_nodes];
    let mut distance: Vec<Option<usize>> = vec![None; num_nodes];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); num_nodes];
    let mut delta: Vec<f64> = vec![0.0; num_nodes];
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut stack: Vec<usize> = Vec::new();

    sigma[index] = 1.0;
    distance[index] = Some(0);
    queue.push_back(index);

    while let Some(v) = queue.pop_front() {
        stack.push(v);
        let next = distance[v].map(|d| d + 1);

        for &w in &indices[v] {
            if distance[w].is_none() {
                distance[w] = next;
                queue.push_back(w);
            }
            if distance[w] == next {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    // Pop in order of non-increasing distance so dependencies accumulate from the leaves.
    while let Some(w) = stack.pop() {
        for &v in &predecessors[w] {
            delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
        }
        if w != index {
            betweenness_count[w] += delta[w];
        }
    }
}

/// Computes the betweenness of every vertex from its neighbour lists.
///
/// Normalised values are scaled by `1 / ((n - 1)(n - 2))` when there are more than two vertices.
/// Otherwise undirected values are halved, as each pair of endpoints is visited from both ends.
pub fn compute_betweenness(
    indices: &[Vec<GraphIndex>],
    normalize: bool,
    directed: bool,
) -> Vec<f64> {
    let num_nodes = indices.len();

    let mut betweenness_count: Vec<f64> = vec![0.0; num_nodes];
    for index in 0..num_nodes {
        betweenness_for_node(index, indices, &mut betweenness_count);
    }

    let scale = if normalize {
        (num_nodes > 2).then(|| 1.0 / ((num_nodes - 1) * (num_nodes - 2)) as f64)
    } else if directed {
        None
    } else {
        // non-normalized: everything is counted twice, so we must divide by two
        Some(0.5)
    };

    if let Some(scale) = scale {
        for value in betweenness_count.iter_mut() {
            *value *= scale;
        }
    }

    betweenness_count
}
