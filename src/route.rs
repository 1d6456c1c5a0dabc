//! Route result and node-level reconstruction.
//!
//! Solvers order the points of interest; the reconstructor expands that
//! abstract order into a concrete node path by re-running point-to-point
//! shortest-path search for each consecutive pair and concatenating the
//! segments. The reported distance stays the matrix sum the solver optimized
//! against, so it matches the search objective exactly even where re-summing
//! the expanded path would differ by a floating-point epsilon.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::matrix::DistanceMatrix;
use crate::network::Graph;
use crate::shortest_path::point_to_point;
use crate::solvers::{SearchStatus, SolvedTour};

/// Final result of a solve: the full node-level path of the winning tour.
#[derive(Debug, Clone, Serialize)]
pub struct RouteResult {
    /// Every graph node along the tour, points of interest and intermediate
    /// nodes alike
    pub path: Vec<String>,
    /// Total distance as optimized by the solver (matrix sum)
    pub distance: f64,
    /// Wall-clock seconds for the whole solve pipeline
    pub computation_time: f64,
    /// Solver that produced the ordering
    pub algorithm: String,
    pub status: SearchStatus,
    /// Generations or node expansions, where the solver counts them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,
}

impl std::fmt::Display for RouteResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Route ({})", self.algorithm)?;
        writeln!(f, "  Distance: {:.2}", self.distance)?;
        writeln!(f, "  Status: {:?}", self.status)?;
        writeln!(f, "  Time: {:.4}s", self.computation_time)?;
        if let Some(iter) = self.iterations {
            writeln!(f, "  Iterations: {iter}")?;
        }
        writeln!(f, "  Nodes: {}", self.path.len())?;
        write!(f, "  Path: {}", self.path.join(" -> "))
    }
}

/// Expand a solved point ordering into a full node path.
///
/// For each consecutive point pair the point-to-point search is re-run with
/// predecessor tracking; segments are concatenated with the duplicated
/// boundary node dropped (segment i ends where segment i+1 starts). Solvers
/// only hand over finite tours, so an unreachable segment means the graph
/// changed underneath us and is reported as [`Error::NoFeasibleRoute`].
pub fn reconstruct_route(
    graph: &Graph,
    matrix: &DistanceMatrix,
    solved: &SolvedTour,
    algorithm: &str,
) -> Result<RouteResult> {
    let ids = matrix.ids();
    let mut path: Vec<String> = Vec::new();

    for pair in solved.tour.windows(2) {
        let from = &ids[pair[0]];
        let to = &ids[pair[1]];
        let segment = point_to_point(graph, from, to);
        if !segment.is_reachable() {
            return Err(Error::NoFeasibleRoute);
        }

        if path.is_empty() {
            path.extend(segment.path);
        } else {
            // path already ends with `from`
            path.extend(segment.path.into_iter().skip(1));
        }
    }

    if path.is_empty() {
        // Zero or one point: the route is the point itself
        path = solved.tour.iter().map(|&i| ids[i].clone()).collect();
    }

    Ok(RouteResult {
        path,
        distance: solved.distance,
        computation_time: solved.computation_time,
        algorithm: algorithm.to_string(),
        status: solved.status,
        iterations: solved.iterations,
    })
}
