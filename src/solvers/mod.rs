//! Tour solvers and the solve pipeline.
//!
//! Three interchangeable strategies over the same distance matrix:
//! exact branch-and-bound, greedy nearest-neighbor, and genetic search.

pub mod exact;
pub mod genetic;
pub mod local_search;
pub mod nearest_neighbor;

use std::time::Instant;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::matrix::DistanceMatrix;
use crate::network::{Graph, NetworkData};
use crate::route::{reconstruct_route, RouteResult};

pub use exact::{BranchAndBoundSolver, ExactConfig};
pub use genetic::{GaConfig, GeneticSolver};
pub use local_search::two_opt;
pub use nearest_neighbor::NearestNeighborSolver;

/// How a solver arrived at its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchStatus {
    /// The exact search exhausted its space: the tour is proven optimal.
    Optimal,
    /// The exact search hit its deadline: the tour is valid but optimality
    /// is unproven.
    TimeLimited,
    /// A heuristic or stochastic solver: no optimality claim.
    Heuristic,
}

/// A solved point ordering, before route reconstruction.
#[derive(Debug, Clone)]
pub struct SolvedTour {
    /// Permutation of matrix indices, each point exactly once
    pub tour: Vec<usize>,
    /// Sum of consecutive matrix distances
    pub distance: f64,
    pub status: SearchStatus,
    /// Generations or node expansions, where the solver counts them
    pub iterations: Option<usize>,
    /// Seconds spent inside the solver
    pub computation_time: f64,
}

/// Common interface for all tour solvers.
///
/// Solvers consume only the distance matrix, never the raw graph: every
/// candidate tour evaluation is O(k) over the precomputed point distances.
pub trait TourSolver {
    fn solve(&self, matrix: &DistanceMatrix) -> Result<SolvedTour>;
    fn name(&self) -> &str;
}

/// Solver selection for the CLI and the facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Branch-and-bound exact search (small point sets)
    Exact,
    /// Greedy nearest-neighbor construction
    NearestNeighbor,
    /// Genetic search with 2-opt refinement
    Genetic,
}

/// Options for a full solve run.
#[derive(Debug, Clone)]
pub struct SolveOptions {
    pub algorithm: Algorithm,
    pub exact: ExactConfig,
    pub ga: GaConfig,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            algorithm: Algorithm::Genetic,
            exact: ExactConfig::default(),
            ga: GaConfig::default(),
        }
    }
}

impl SolveOptions {
    fn build_solver(&self) -> Box<dyn TourSolver> {
        match self.algorithm {
            Algorithm::Exact => Box::new(BranchAndBoundSolver::new(self.exact.clone())),
            Algorithm::NearestNeighbor => Box::new(NearestNeighborSolver::new()),
            Algorithm::Genetic => Box::new(GeneticSolver::new(self.ga.clone())),
        }
    }
}

/// Run the full pipeline: build the graph, validate the points, build the
/// distance matrix, solve the point ordering, and expand it into a
/// node-level route.
///
/// The genetic solver reports an infinite-distance winner instead of failing
/// on disconnected points; that case is mapped to
/// [`Error::NoFeasibleRoute`] here so reconstruction never sees an
/// unreachable tour.
pub fn solve_tour(
    network: &NetworkData,
    points: &[String],
    options: &SolveOptions,
) -> Result<RouteResult> {
    let start = Instant::now();

    let graph = Graph::from_network(network)?;
    let matrix = DistanceMatrix::from_graph(&graph, points)?;

    let solver = options.build_solver();
    let solved = solver.solve(&matrix)?;

    if solved.distance.is_infinite() {
        return Err(Error::NoFeasibleRoute);
    }

    let mut result = reconstruct_route(&graph, &matrix, &solved, solver.name())?;
    result.computation_time = start.elapsed().as_secs_f64();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Edge, Node};

    fn triangle_network() -> NetworkData {
        NetworkData {
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
        }
    }

    #[test]
    fn test_pipeline_exact_triangle() {
        let network = triangle_network();
        let points = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let options = SolveOptions {
            algorithm: Algorithm::Exact,
            ..SolveOptions::default()
        };
        let result = solve_tour(&network, &points, &options).unwrap();
        assert!((result.distance - 2.0).abs() < 1e-10);
        assert_eq!(result.path.len(), 3);
    }

    #[test]
    fn test_pipeline_all_algorithms_agree_on_small_input() {
        let network = triangle_network();
        let points = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        for algorithm in [Algorithm::Exact, Algorithm::NearestNeighbor, Algorithm::Genetic] {
            let options = SolveOptions {
                algorithm,
                ..SolveOptions::default()
            };
            let result = solve_tour(&network, &points, &options).unwrap();
            assert!((result.distance - 2.0).abs() < 1e-10, "{algorithm:?}");
        }
    }

    #[test]
    fn test_pipeline_genetic_disconnected_maps_to_no_feasible_route() {
        let network = NetworkData {
            nodes: vec![Node::new("a", 0.0, 0.0), Node::new("island", 9.0, 9.0)],
            edges: vec![],
        };
        let points = vec!["a".to_string(), "island".to_string()];
        let options = SolveOptions {
            algorithm: Algorithm::Genetic,
            ..SolveOptions::default()
        };
        let err = solve_tour(&network, &points, &options).unwrap_err();
        assert!(matches!(err, Error::NoFeasibleRoute));
    }

    #[test]
    fn test_pipeline_rejects_unknown_points() {
        let network = triangle_network();
        let points = vec!["a".to_string(), "zz".to_string()];
        let err = solve_tour(&network, &points, &SolveOptions::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidPoints(_)));
    }
}
