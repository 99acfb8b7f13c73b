//! Local clustering coefficients from powers of the adjacency matrix.

use nalgebra::DMatrix;

/// Computes the clustering coefficient of every vertex of an unweighted adjacency matrix without
/// self-loops.
///
/// Undirected: `(A³)ᵤᵤ / (k(k - 1))`, twice the triangles through `u` over twice the pairs of its
/// neighbours.
///
/// Directed (Fagiolo, 2007): with `S = A + Aᵀ`, the directed triangles through `u` are
/// `(S³)ᵤᵤ / 2` and they are measured against `k_tot(k_tot - 1) - 2 k_recip`, where `k_tot` is the
/// in plus out degree and `k_recip = (A²)ᵤᵤ` the number of reciprocated edges.
///
/// Vertices which can't close a triangle get `0.0`.
pub fn local_clustering(adjacency: &DMatrix<f64>, directed: bool) -> Vec<f64> {
    let n = adjacency.nrows();

    if directed {
        let symmetric = adjacency.clone() + adjacency.transpose();
        let cubed = &symmetric * &symmetric * &symmetric;
        let squared = adjacency * adjacency;

        (0..n)
            .map(|u| {
                let total = adjacency.row(u).sum() + adjacency.column(u).sum();
                let reciprocal = squared[(u, u)];
                let possible = 2.0 * (total * (total - 1.0) - 2.0 * reciprocal);

                ratio(cubed[(u, u)], possible)
            })
            .collect()
    } else {
        let cubed = adjacency * adjacency * adjacency;

        (0..n)
            .map(|u| {
                let degree = adjacency.row(u).sum();

                ratio(cubed[(u, u)], degree * (degree - 1.0))
            })
            .collect()
    }
}

fn ratio(triangles: f64, possible: f64) -> f64 {
    if triangles == 0.0 || possible <= 0.0 {
        0.0
    } else {
        triangles / possible
    }
}
