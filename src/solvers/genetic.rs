//! Genetic algorithm solver.
//!
//! Population-based search over point permutations with:
//! - tournament selection
//! - order crossover (OX)
//! - segment-reversal mutation
//! - elitism with full 2-opt refinement of the elites
//! - diversity injection on full convergence
//! - stagnation-based early stop
//!
//! Tours containing an unreachable leg evaluate to infinite fitness and are
//! bred out by selection instead of raising an error. All randomness flows
//! through a ChaCha8 generator seeded from the configuration, so identical
//! seeds reproduce identical runs.

use std::time::Instant;

use ordered_float::OrderedFloat;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::error::{Error, Result};
use crate::matrix::DistanceMatrix;

use super::local_search::two_opt;
use super::{SearchStatus, SolvedTour, TourSolver};

/// Member of the GA population.
#[derive(Debug, Clone)]
struct Individual {
    /// Permutation of matrix indices
    tour: Vec<usize>,
    /// Sum of consecutive matrix distances; lower is better
    fitness: f64,
}

impl Individual {
    fn new(tour: Vec<usize>, matrix: &DistanceMatrix) -> Self {
        let fitness = matrix.tour_distance(&tour);
        Individual { tour, fitness }
    }
}

/// Genetic algorithm configuration. All fields are caller-overridable.
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Population size
    pub population_size: usize,
    /// Number of generations
    pub generations: usize,
    /// Per-offspring probability of a segment-reversal mutation
    pub mutation_rate: f64,
    /// Count of fittest individuals refined and carried over unchanged
    pub elite_size: usize,
    /// Sample size for tournament selection
    pub tournament_size: usize,
    /// Stop after this many generations without improvement
    pub early_stop_generations: usize,
    /// Random seed
    pub seed: u64,
}

impl Default for GaConfig {
    fn default() -> Self {
        GaConfig {
            population_size: 50,
            generations: 100,
            mutation_rate: 0.02,
            elite_size: 5,
            tournament_size: 3,
            early_stop_generations: 20,
            seed: 42,
        }
    }
}

/// Evolutionary tour solver.
pub struct GeneticSolver {
    config: GaConfig,
}

impl GeneticSolver {
    pub fn new(config: GaConfig) -> Self {
        GeneticSolver { config }
    }

    fn random_tour(&self, k: usize, rng: &mut ChaCha8Rng) -> Vec<usize> {
        let mut tour: Vec<usize> = (0..k).collect();
        tour.shuffle(rng);
        tour
    }

    fn tournament_select<'a>(
        &self,
        population: &'a [Individual],
        rng: &mut ChaCha8Rng,
    ) -> &'a Individual {
        let mut best = &population[rng.gen_range(0..population.len())];
        for _ in 1..self.config.tournament_size {
            let candidate = &population[rng.gen_range(0..population.len())];
            if candidate.fitness < best.fitness {
                best = candidate;
            }
        }
        best
    }

    /// Order crossover (OX): keep a random contiguous slice of the first
    /// parent in place, then fill the remaining positions left to right with
    /// the second parent's points in their original relative order.
    fn order_crossover(
        &self,
        parent1: &[usize],
        parent2: &[usize],
        rng: &mut ChaCha8Rng,
    ) -> Vec<usize> {
        let n = parent1.len();
        if n < 2 {
            return parent1.to_vec();
        }

        let start = rng.gen_range(0..n);
        let end = rng.gen_range(start..n);

        let mut child = vec![usize::MAX; n];
        let mut in_slice = vec![false; n];
        for i in start..=end {
            child[i] = parent1[i];
            in_slice[parent1[i]] = true;
        }

        let mut fill = parent2.iter().filter(|p| !in_slice[**p]);
        for slot in child.iter_mut() {
            if *slot == usize::MAX {
                *slot = *fill.next().expect("OX fill exhausted");
            }
        }

        child
    }

    /// Segment-reversal mutation, applied with probability `mutation_rate`.
    fn mutate(&self, tour: &mut [usize], rng: &mut ChaCha8Rng) {
        let n = tour.len();
        if n < 2 || rng.gen::<f64>() >= self.config.mutation_rate {
            return;
        }
        let i = rng.gen_range(0..n - 1);
        let j = rng.gen_range(i + 1..n);
        tour[i..=j].reverse();
    }
}

impl Default for GeneticSolver {
    fn default() -> Self {
        Self::new(GaConfig::default())
    }
}

impl TourSolver for GeneticSolver {
    fn solve(&self, matrix: &DistanceMatrix) -> Result<SolvedTour> {
        let start = Instant::now();
        let k = matrix.size();

        if k == 0 {
            return Err(Error::NoFeasibleRoute);
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);

        let mut population: Vec<Individual> = (0..self.config.population_size)
            .map(|_| Individual::new(self.random_tour(k, &mut rng), matrix))
            .collect();
        population.sort_by_key(|ind| OrderedFloat(ind.fitness));

        let mut best = population[0].clone();
        let mut no_improve_count = 0;
        let mut generation = 0;

        while generation < self.config.generations
            && no_improve_count < self.config.early_stop_generations
        {
            let mut next: Vec<Individual> = Vec::with_capacity(self.config.population_size);

            // Elites: refine with full 2-opt, carry over unchanged
            for elite in population.iter().take(self.config.elite_size) {
                let (tour, fitness) = two_opt(&elite.tour, matrix);
                next.push(Individual { tour, fitness });
            }

            // Diversity safeguard against premature convergence
            let converged = population
                .last()
                .map(|worst| worst.fitness == population[0].fitness)
                .unwrap_or(false);
            if converged {
                for _ in 0..self.config.elite_size {
                    next.push(Individual::new(self.random_tour(k, &mut rng), matrix));
                }
            }

            while next.len() < self.config.population_size {
                let parent1 = self.tournament_select(&population, &mut rng);
                let parent2 = self.tournament_select(&population, &mut rng);
                let mut child_tour = self.order_crossover(&parent1.tour, &parent2.tour, &mut rng);
                self.mutate(&mut child_tour, &mut rng);
                next.push(Individual::new(child_tour, matrix));
            }

            next.sort_by_key(|ind| OrderedFloat(ind.fitness));

            if next[0].fitness < best.fitness {
                best = next[0].clone();
                no_improve_count = 0;
            } else {
                no_improve_count += 1;
            }

            population = next;
            generation += 1;

            log::debug!(
                "Gen {generation}: best {:.3}, stagnant {no_improve_count}",
                best.fitness
            );
        }

        log::info!(
            "{}: distance {:.3} after {} generations in {:.3}s",
            self.name(),
            best.fitness,
            generation,
            start.elapsed().as_secs_f64()
        );

        Ok(SolvedTour {
            tour: best.tour,
            distance: best.fitness,
            status: SearchStatus::Heuristic,
            iterations: Some(generation),
            computation_time: start.elapsed().as_secs_f64(),
        })
    }

    fn name(&self) -> &str {
        "GeneticAlgorithm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Edge, NetworkData, Node};

    fn matrix_from(nodes: Vec<Node>, edges: Vec<Edge>) -> DistanceMatrix {
        let ids: Vec<String> = nodes.iter().map(|n| n.id.clone()).collect();
        let graph = crate::network::Graph::from_network(&NetworkData { nodes, edges }).unwrap();
        DistanceMatrix::from_graph(&graph, &ids).unwrap()
    }

    fn line_matrix(k: usize) -> DistanceMatrix {
        let nodes: Vec<Node> = (0..k)
            .map(|i| Node::new(format!("n{i}"), 0.0, i as f64))
            .collect();
        let edges: Vec<Edge> = (0..k - 1)
            .map(|i| Edge::new(format!("n{i}"), format!("n{}", i + 1), 1.0))
            .collect();
        matrix_from(nodes, edges)
    }

    #[test]
    fn test_order_crossover_is_permutation() {
        let solver = GeneticSolver::default();
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let p1: Vec<usize> = {
                let mut t: Vec<usize> = (0..8).collect();
                t.shuffle(&mut rng);
                t
            };
            let p2: Vec<usize> = {
                let mut t: Vec<usize> = (0..8).collect();
                t.shuffle(&mut rng);
                t
            };
            let child = solver.order_crossover(&p1, &p2, &mut rng);
            let mut sorted = child.clone();
            sorted.sort();
            assert_eq!(sorted, (0..8).collect::<Vec<usize>>());
        }
    }

    #[test]
    fn test_mutation_preserves_permutation() {
        let solver = GeneticSolver::new(GaConfig {
            mutation_rate: 1.0,
            ..GaConfig::default()
        });
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut tour: Vec<usize> = (0..10).collect();
        solver.mutate(&mut tour, &mut rng);
        let mut sorted = tour.clone();
        sorted.sort();
        assert_eq!(sorted, (0..10).collect::<Vec<usize>>());
    }

    #[test]
    fn test_finds_optimal_on_line() {
        // On a 6-point line the optimal path walks end to end: distance 5
        let m = line_matrix(6);
        let result = GeneticSolver::default().solve(&m).unwrap();
        assert!((result.distance - 5.0).abs() < 1e-10);
        assert!((m.tour_distance(&result.tour) - result.distance).abs() < 1e-10);
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let m = line_matrix(7);
        let config = GaConfig {
            seed: 1234,
            generations: 40,
            ..GaConfig::default()
        };
        let a = GeneticSolver::new(config.clone()).solve(&m).unwrap();
        let b = GeneticSolver::new(config).solve(&m).unwrap();
        assert_eq!(a.tour, b.tour);
        assert_eq!(a.distance, b.distance);
    }

    #[test]
    fn test_disconnected_points_yield_infinite_fitness() {
        let m = matrix_from(
            vec![Node::new("a", 0.0, 0.0), Node::new("island", 9.0, 9.0)],
            vec![],
        );
        let result = GeneticSolver::default().solve(&m).unwrap();
        assert!(result.distance.is_infinite());
        assert_eq!(result.tour.len(), 2);
    }
}
