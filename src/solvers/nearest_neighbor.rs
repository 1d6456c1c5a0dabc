//! Nearest-neighbor construction heuristic.

use std::collections::HashSet;
use std::time::Instant;

use ordered_float::OrderedFloat;

use crate::error::{Error, Result};
use crate::matrix::DistanceMatrix;

use super::{SearchStatus, SolvedTour, TourSolver};

/// Greedy nearest-neighbor solver.
///
/// Starts at the point set's first element and repeatedly appends the
/// unvisited point closest to the current one. O(k²), deterministic for a
/// fixed point order and matrix. Fails with
/// [`Error::NoFeasibleRoute`] when every remaining candidate is unreachable.
pub struct NearestNeighborSolver;

impl NearestNeighborSolver {
    pub fn new() -> Self {
        NearestNeighborSolver
    }

    fn find_nearest(
        &self,
        matrix: &DistanceMatrix,
        current: usize,
        visited: &HashSet<usize>,
    ) -> Option<usize> {
        (0..matrix.size())
            .filter(|p| !visited.contains(p))
            .filter(|&p| matrix.get(current, p).is_finite())
            .min_by_key(|&p| OrderedFloat(matrix.get(current, p)))
    }
}

impl Default for NearestNeighborSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TourSolver for NearestNeighborSolver {
    fn solve(&self, matrix: &DistanceMatrix) -> Result<SolvedTour> {
        let start = Instant::now();
        let k = matrix.size();

        if k == 0 {
            return Err(Error::NoFeasibleRoute);
        }

        let mut tour = vec![0];
        let mut visited: HashSet<usize> = HashSet::from([0]);
        let mut current = 0;
        let mut total = 0.0;

        while visited.len() < k {
            let next = self
                .find_nearest(matrix, current, &visited)
                .ok_or(Error::NoFeasibleRoute)?;
            total += matrix.get(current, next);
            tour.push(next);
            visited.insert(next);
            current = next;
        }

        log::info!(
            "{}: distance {:.3} over {} points in {:.3}s",
            self.name(),
            total,
            k,
            start.elapsed().as_secs_f64()
        );

        Ok(SolvedTour {
            tour,
            distance: total,
            status: SearchStatus::Heuristic,
            iterations: None,
            computation_time: start.elapsed().as_secs_f64(),
        })
    }

    fn name(&self) -> &str {
        "NearestNeighbor"
    }
}
