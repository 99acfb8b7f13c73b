//! Breadth-first searches over neighbour lists: distances, reachability and components.

use std::collections::VecDeque;

use crate::graph::GraphIndex;

/// Returns the hop distance from `index` to every vertex, `None` where unreachable.
fn distances_from(index: usize, indices: &[Vec<GraphIndex>]) -> Vec<Option<usize>> {
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut deltas: Vec<Option<usize>> = vec![None; indices.len()];

    deltas[index] = Some(0);
    queue.push_back(index);

    while let Some(current) = queue.pop_front() {
        let next = deltas[current].map(|d| d + 1);
        for &j in &indices[current] {
            if deltas[j].is_none() {
                deltas[j] = next;
                queue.push_back(j);
            }
        }
    }

    deltas
}

/// Returns the number of vertices reachable from `index`, itself included.
pub fn reachable_count(index: usize, indices: &[Vec<GraphIndex>]) -> usize {
    distances_from(index, indices)
        .iter()
        .filter(|d| d.is_some())
        .count()
}

/// Returns the sum of the hop distances between every ordered pair of reachable vertices.
pub fn total_path_length(indices: &[Vec<GraphIndex>]) -> usize {
    (0..indices.len())
        .map(|index| distances_from(index, indices).into_iter().flatten().sum::<usize>())
        .sum()
}

/// Partitions the vertices into the sets reachable from one another. The neighbour lists are
/// expected to be symmetric.
pub fn components(indices: &[Vec<GraphIndex>]) -> Vec<Vec<GraphIndex>> {
    let mut assigned = vec![false; indices.len()];
    let mut components = Vec::new();

    for start in 0..indices.len() {
        if assigned[start] {
            continue;
        }

        let component: Vec<GraphIndex> = distances_from(start, indices)
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.map(|_| i))
            .collect();

        for &i in &component {
            assigned[i] = true;
        }
        components.push(component);
    }

    components
}
