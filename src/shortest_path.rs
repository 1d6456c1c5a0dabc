//! Shortest-path engine.
//!
//! Dijkstra search over the adjacency graph, in two flavors: single-source
//! distances to every reachable node, and point-to-point search with
//! predecessor tracking for path reconstruction. Edge weights are
//! non-negative, so distances are finalized in non-decreasing order and the
//! point-to-point search can stop as soon as the target is popped.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use ordered_float::OrderedFloat;

use crate::network::Graph;

/// Result of a point-to-point search.
///
/// An unreachable target yields an empty path and infinite distance rather
/// than an error; callers decide whether that is fatal.
#[derive(Debug, Clone)]
pub struct PathResult {
    /// Node ids from source to target inclusive. Empty if unreachable.
    pub path: Vec<String>,
    /// Shortest distance, or `f64::INFINITY` if unreachable.
    pub distance: f64,
}

impl PathResult {
    /// No path exists between the endpoints.
    pub fn unreachable() -> Self {
        PathResult {
            path: Vec::new(),
            distance: f64::INFINITY,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.distance.is_finite()
    }
}

/// Shortest distances from `source` to every reachable node.
///
/// Unreachable nodes are omitted from the returned map. O((V+E) log V).
pub fn single_source(graph: &Graph, source: &str) -> HashMap<String, f64> {
    let mut dist: HashMap<String, f64> = HashMap::new();
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, String)>> = BinaryHeap::new();

    if !graph.contains(source) {
        return dist;
    }

    dist.insert(source.to_string(), 0.0);
    heap.push(Reverse((OrderedFloat(0.0), source.to_string())));

    while let Some(Reverse((OrderedFloat(d), node))) = heap.pop() {
        // Lazy deletion: skip entries superseded by a shorter path
        if d > dist[&node] {
            continue;
        }

        if let Some(neighbors) = graph.neighbors(&node) {
            for (next, &weight) in neighbors {
                let candidate = d + weight;
                let improved = match dist.get(next) {
                    Some(&best) => candidate < best,
                    None => true,
                };
                if improved {
                    dist.insert(next.clone(), candidate);
                    heap.push(Reverse((OrderedFloat(candidate), next.clone())));
                }
            }
        }
    }

    dist
}

/// Shortest path from `source` to `target` with the full node sequence.
///
/// Maintains a predecessor map and terminates as soon as the target is popped
/// from the frontier. A same-node query returns a single-node path with
/// distance 0.
pub fn point_to_point(graph: &Graph, source: &str, target: &str) -> PathResult {
    if !graph.contains(source) || !graph.contains(target) {
        return PathResult::unreachable();
    }

    if source == target {
        return PathResult {
            path: vec![source.to_string()],
            distance: 0.0,
        };
    }

    let mut dist: HashMap<String, f64> = HashMap::new();
    let mut prev: HashMap<String, String> = HashMap::new();
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, String)>> = BinaryHeap::new();

    dist.insert(source.to_string(), 0.0);
    heap.push(Reverse((OrderedFloat(0.0), source.to_string())));

    while let Some(Reverse((OrderedFloat(d), node))) = heap.pop() {
        if d > dist[&node] {
            continue;
        }

        if node == target {
            return PathResult {
                path: trace_path(&prev, source, target),
                distance: d,
            };
        }

        if let Some(neighbors) = graph.neighbors(&node) {
            for (next, &weight) in neighbors {
                let candidate = d + weight;
                let improved = match dist.get(next) {
                    Some(&best) => candidate < best,
                    None => true,
                };
                if improved {
                    dist.insert(next.clone(), candidate);
                    prev.insert(next.clone(), node.clone());
                    heap.push(Reverse((OrderedFloat(candidate), next.clone())));
                }
            }
        }
    }

    PathResult::unreachable()
}

/// Walk the predecessor map backward from target to source.
fn trace_path(prev: &HashMap<String, String>, source: &str, target: &str) -> Vec<String> {
    let mut path = vec![target.to_string()];
    let mut current = target;

    while current != source {
        match prev.get(current) {
            Some(p) => {
                path.push(p.clone());
                current = p;
            }
            None => return Vec::new(),
        }
    }

    path.reverse();
    path
}
