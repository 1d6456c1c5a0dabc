//! Road Network Tour Solver
//!
//! Computes an efficient visiting order over a subset of locations embedded
//! in a weighted undirected road-network graph, where travel cost between
//! two locations is the shortest-path distance along the graph.
//!
//! # Pipeline
//!
//! 1. [`network`] - compile a node/edge list into an adjacency graph
//! 2. [`shortest_path`] - Dijkstra single-source and point-to-point search
//! 3. [`matrix`] - pairwise shortest distances among the points of interest
//! 4. [`solvers`] - exact branch-and-bound, nearest-neighbor, or genetic
//!    search over the matrix
//! 5. [`route`] - expand the winning point order into a full node path
//!
//! # Example
//!
//! ```
//! use road_tour_solver::network::{NetworkData, Node, Edge};
//! use road_tour_solver::solvers::{solve_tour, Algorithm, SolveOptions};
//!
//! let network = NetworkData {
//!     nodes: vec![
//!         Node::new("a", 0.0, 0.0),
//!         Node::new("b", 0.0, 1.0),
//!         Node::new("c", 0.0, 2.0),
//!     ],
//!     edges: vec![
//!         Edge::new("a", "b", 1.0),
//!         Edge::new("b", "c", 1.0),
//!         Edge::new("a", "c", 5.0),
//!     ],
//! };
//!
//! let points = vec!["a".to_string(), "b".to_string(), "c".to_string()];
//! let options = SolveOptions {
//!     algorithm: Algorithm::Exact,
//!     ..SolveOptions::default()
//! };
//!
//! let route = solve_tour(&network, &points, &options).unwrap();
//! assert!((route.distance - 2.0).abs() < 1e-10);
//! ```

pub mod error;
pub mod matrix;
pub mod network;
pub mod route;
pub mod shortest_path;
pub mod solvers;

pub use error::{Error, Result};
pub use matrix::DistanceMatrix;
pub use network::{Edge, Graph, NetworkData, Node};
pub use route::RouteResult;
pub use solvers::{solve_tour, Algorithm, SearchStatus, SolveOptions};
