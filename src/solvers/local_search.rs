//! 2-opt local search.
//!
//! Reverses tour segments to remove crossing or inefficient legs. Tours are
//! Hamiltonian paths over the points of interest, not cycles, so there is no
//! wrap-around edge: a reversal touches at most the two boundary edges of the
//! reversed segment and the matrix is symmetric, so the move cost is
//! evaluated in O(1).

use crate::matrix::DistanceMatrix;

/// Cost change of reversing `tour[i..=j]`.
///
/// Requires a finite current tour; an infinite candidate edge makes the delta
/// infinite and the move non-improving.
fn reversal_delta(tour: &[usize], matrix: &DistanceMatrix, i: usize, j: usize) -> f64 {
    let n = tour.len();
    let mut delta = 0.0;

    if i > 0 {
        delta += matrix.get(tour[i - 1], tour[j]) - matrix.get(tour[i - 1], tour[i]);
    }
    if j + 1 < n {
        delta += matrix.get(tour[i], tour[j + 1]) - matrix.get(tour[j], tour[j + 1]);
    }

    delta
}

/// Full 2-opt improvement: repeatedly apply the best improving segment
/// reversal until a complete sweep finds none.
///
/// Returns the refined tour and its total distance. Tours with unreachable
/// legs (infinite distance) are returned unchanged; there is no finite cost
/// to improve against.
pub fn two_opt(tour: &[usize], matrix: &DistanceMatrix) -> (Vec<usize>, f64) {
    let mut best = tour.to_vec();
    let mut best_dist = matrix.tour_distance(&best);
    let n = best.len();

    if n < 3 || best_dist.is_infinite() {
        return (best, best_dist);
    }

    let mut improved = true;
    while improved {
        improved = false;
        let mut best_delta = 0.0;
        let mut best_move = (0, 0);

        for i in 0..n - 1 {
            for j in (i + 1)..n {
                if i == 0 && j == n - 1 {
                    continue; // full reversal, same path cost
                }
                let delta = reversal_delta(&best, matrix, i, j);
                if delta < best_delta - 1e-9 {
                    best_delta = delta;
                    best_move = (i, j);
                }
            }
        }

        if best_delta < -1e-9 {
            let (i, j) = best_move;
            best[i..=j].reverse();
            best_dist += best_delta;
            improved = true;
        }
    }

    (best, best_dist)
}
