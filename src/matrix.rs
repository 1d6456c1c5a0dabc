//! Pairwise shortest-path distance matrix over the points of interest.
//!
//! Built once per solve with one single-source Dijkstra run per point, then
//! projected onto the point set. All tour solvers operate on this small
//! complete k-point graph instead of re-traversing the full network inside
//! their inner loops, so evaluating a candidate tour costs O(k) rather than
//! O(graph size).

use std::collections::HashMap;
use std::time::Instant;

use crate::error::Result;
use crate::network::Graph;
use crate::shortest_path::single_source;

/// Dense k×k matrix of shortest-path distances among the points of interest,
/// stored row-major. Symmetric for an undirected graph, zero diagonal,
/// `f64::INFINITY` for unreachable pairs.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    ids: Vec<String>,
    index: HashMap<String, usize>,
}

impl DistanceMatrix {
    /// Build the matrix for the given points by repeated single-source search.
    ///
    /// Validates the points against the graph first; fails with
    /// [`crate::error::Error::InvalidPoints`] naming every missing id.
    pub fn from_graph(graph: &Graph, points: &[String]) -> Result<Self> {
        graph.validate_points(points)?;
        let start = Instant::now();

        let k = points.len();
        let ids: Vec<String> = points.to_vec();
        let index: HashMap<String, usize> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        let mut data = vec![f64::INFINITY; k * k];

        for (i, id) in ids.iter().enumerate() {
            let dist = single_source(graph, id);
            for (j, other) in ids.iter().enumerate() {
                data[i * k + j] = dist.get(other).copied().unwrap_or(f64::INFINITY);
            }
        }

        log::debug!(
            "Built {k}x{k} distance matrix in {:.3}s",
            start.elapsed().as_secs_f64()
        );

        Ok(DistanceMatrix { data, ids, index })
    }

    /// Distance between points `i` and `j` (matrix indices).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.ids.len() + j]
    }

    /// Number of points of interest.
    pub fn size(&self) -> usize {
        self.ids.len()
    }

    /// Point ids in matrix-index order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Matrix index of the given point id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Total distance of a tour given as a sequence of matrix indices.
    ///
    /// Returns `f64::INFINITY` as soon as any consecutive pair is
    /// unreachable; the tour is a path, so no closing edge is added.
    pub fn tour_distance(&self, tour: &[usize]) -> f64 {
        let mut total = 0.0;
        for pair in tour.windows(2) {
            let d = self.get(pair[0], pair[1]);
            if d.is_infinite() {
                return f64::INFINITY;
            }
            total += d;
        }
        total
    }

    /// Whether the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        let k = self.ids.len();
        for i in 0..k {
            for j in (i + 1)..k {
                let a = self.get(i, j);
                let b = self.get(j, i);
                if a.is_infinite() != b.is_infinite() || (a.is_finite() && (a - b).abs() > tol) {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::network::{Edge, NetworkData, Node};

    fn triangle_matrix() -> DistanceMatrix {
        let network = NetworkData {
            nodes: vec![
                Node::new("a", 0.0, 0.0),
                Node::new("b", 0.0, 1.0),
                Node::new("c", 0.0, 2.0),
            ],
            edges: vec![
                Edge::new("a", "b", 1.0),
                Edge::new("b", "c", 1.0),
                Edge::new("a", "c", 5.0),
            ],
        };
        let graph = Graph::from_network(&network).unwrap();
        DistanceMatrix::from_graph(&graph, &["a".into(), "b".into(), "c".into()]).unwrap()
    }

    #[test]
    fn test_matrix_uses_shortest_paths_not_direct_edges() {
        let m = triangle_matrix();
        let (a, c) = (m.index_of("a").unwrap(), m.index_of("c").unwrap());
        // a-c direct edge is 5, but via b it is 2
        assert!((m.get(a, c) - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_matrix_symmetric_with_zero_diagonal() {
        let m = triangle_matrix();
        assert!(m.is_symmetric(1e-10));
        for i in 0..m.size() {
            assert_eq!(m.get(i, i), 0.0);
        }
    }

    #[test]
    fn test_unreachable_pair_is_infinite() {
        let network = NetworkData {
            nodes: vec![Node::new("a", 0.0, 0.0), Node::new("island", 9.0, 9.0)],
            edges: vec![],
        };
        let graph = Graph::from_network(&network).unwrap();
        let m = DistanceMatrix::from_graph(&graph, &["a".into(), "island".into()]).unwrap();
        assert!(m.get(0, 1).is_infinite());
        assert!(m.get(1, 0).is_infinite());
        assert!(m.is_symmetric(1e-10));
    }

    #[test]
    fn test_tour_distance_propagates_infinity() {
        let network = NetworkData {
            nodes: vec![Node::new("a", 0.0, 0.0), Node::new("island", 9.0, 9.0)],
            edges: vec![],
        };
        let graph = Graph::from_network(&network).unwrap();
        let m = DistanceMatrix::from_graph(&graph, &["a".into(), "island".into()]).unwrap();
        assert!(m.tour_distance(&[0, 1]).is_infinite());
        assert_eq!(m.tour_distance(&[0]), 0.0);
    }

    #[test]
    fn test_missing_point_rejected() {
        let network = NetworkData {
            nodes: vec![Node::new("a", 0.0, 0.0)],
            edges: vec![],
        };
        let graph = Graph::from_network(&network).unwrap();
        let err = DistanceMatrix::from_graph(&graph, &["a".into(), "nope".into()]).unwrap_err();
        match err {
            Error::InvalidPoints(ids) => assert_eq!(ids, vec!["nope".to_string()]),
            other => panic!("unexpected error: {other}"),
        }
    }
}
