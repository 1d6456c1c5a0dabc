//! Error types for the tour solver.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while building the graph or solving a tour.
#[derive(Debug, Error)]
pub enum Error {
    /// An edge references a node id that is not in the node list.
    /// Raised during graph construction, before any search runs.
    #[error("malformed graph: edge {from} -> {to} references unknown node {unknown}")]
    MalformedGraph {
        from: String,
        to: String,
        unknown: String,
    },

    /// One or more requested points of interest are absent from the graph.
    /// Lists every offending id.
    #[error("points not found in network: {}", .0.join(", "))]
    InvalidPoints(Vec<String>),

    /// No tour connecting all requested points exists.
    #[error("no feasible route through the requested points")]
    NoFeasibleRoute,

    /// The exact solver's time budget expired before any complete tour was
    /// found. Distinct from [`Error::NoFeasibleRoute`]: a route may well
    /// exist, the search just never got far enough to build one.
    #[error("time limit expired before any complete tour was found")]
    TimeLimitExceeded,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
