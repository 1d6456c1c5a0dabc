//! Road network representation.
//!
//! A network is supplied as flat node and edge lists (the validated output of
//! an upstream ingestion layer) and compiled once per solve into an adjacency
//! graph used by the shortest-path engine.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A node in the road network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Node identifier
    pub id: String,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
}

impl Node {
    pub fn new(id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Node {
            id: id.into(),
            lat,
            lon,
        }
    }
}

/// An undirected weighted edge between two nodes.
///
/// The edge list stores one entry per connection; the graph builder inserts
/// both directions into the adjacency map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    /// Travel distance, precomputed upstream. Non-negative.
    pub distance: f64,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, distance: f64) -> Self {
        Edge {
            from: from.into(),
            to: to.into(),
            distance,
        }
    }
}

/// A complete road network: node list plus edge list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkData {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Adjacency representation of the network.
///
/// Maps node id -> (neighbor id -> distance). Built once per solve and
/// read-only afterward. Every node id appears as a key, including isolated
/// nodes, which map to an empty neighbor set. Duplicate directed entries for
/// the same ordered pair overwrite each other (last write wins).
#[derive(Debug, Clone)]
pub struct Graph {
    adjacency: HashMap<String, HashMap<String, f64>>,
}

impl Graph {
    /// Build the adjacency graph from a network description.
    ///
    /// Inserts both directions for every edge with equal distance. Fails with
    /// [`Error::MalformedGraph`] if an edge references a node id absent from
    /// the node list.
    pub fn from_network(network: &NetworkData) -> Result<Self> {
        let mut adjacency: HashMap<String, HashMap<String, f64>> =
            HashMap::with_capacity(network.nodes.len());

        for node in &network.nodes {
            adjacency.entry(node.id.clone()).or_default();
        }

        for edge in &network.edges {
            for endpoint in [&edge.from, &edge.to] {
                if !adjacency.contains_key(endpoint.as_str()) {
                    return Err(Error::MalformedGraph {
                        from: edge.from.clone(),
                        to: edge.to.clone(),
                        unknown: endpoint.clone(),
                    });
                }
            }

            adjacency
                .get_mut(&edge.from)
                .unwrap()
                .insert(edge.to.clone(), edge.distance);
            adjacency
                .get_mut(&edge.to)
                .unwrap()
                .insert(edge.from.clone(), edge.distance);
        }

        log::debug!(
            "Built graph: {} nodes, {} edges",
            adjacency.len(),
            network.edges.len()
        );

        Ok(Graph { adjacency })
    }

    /// Neighbors of a node with their edge distances.
    pub fn neighbors(&self, id: &str) -> Option<&HashMap<String, f64>> {
        self.adjacency.get(id)
    }

    /// Whether the given node id exists in the graph.
    pub fn contains(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Number of nodes, including isolated ones.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Iterator over all node ids.
    pub fn node_ids(&self) -> impl Iterator<Item = &String> {
        self.adjacency.keys()
    }

    /// Verify that every requested point of interest exists in the graph.
    ///
    /// Fails with [`Error::InvalidPoints`] naming every offending id.
    pub fn validate_points(&self, points: &[String]) -> Result<()> {
        let missing: Vec<String> = points
            .iter()
            .filter(|id| !self.contains(id))
            .cloned()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidPoints(missing))
        }
    }
}
