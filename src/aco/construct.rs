//! Probabilistic tour construction for a single ant.
//!
//! From the current city `c`, every unvisited city `u` gets the score
//!
//! ```text
//! s(c, u) = tau(c, u)^alpha * (1 / d(c, u))^beta
//! ```
//!
//! and the next city is drawn by roulette wheel over the normalized scores.
//! Candidates are scanned in ascending city index, so a seeded generator
//! reproduces the same tour.
//!
//! # Reference
//!
//! Dorigo & Stützle (2004), *Ant Colony Optimization*, Section 3.3.1.

use super::types::Tour;
use crate::error::AcoError;
use crate::graph::{DistanceGraph, Edge};
use crate::pheromone::PheromoneModel;
use rand::Rng;

/// Builds tours from read-only views of the graph and the trail levels.
///
/// Holds shared borrows only, so any number of constructors can run at
/// once against the same snapshot.
#[derive(Debug, Clone, Copy)]
pub struct TourConstructor<'a> {
    graph: &'a DistanceGraph,
    pheromone: &'a PheromoneModel,
    alpha: f64,
    beta: f64,
}

impl<'a> TourConstructor<'a> {
    /// Creates a constructor over a graph and a matching pheromone model.
    pub fn new(
        graph: &'a DistanceGraph,
        pheromone: &'a PheromoneModel,
        alpha: f64,
        beta: f64,
    ) -> Result<Self, AcoError> {
        if pheromone.city_count() != graph.city_count() {
            return Err(AcoError::parameter(
                "pheromone",
                format!(
                    "covers {} cities but the graph has {}",
                    pheromone.city_count(),
                    graph.city_count()
                ),
            ));
        }
        Ok(Self {
            graph,
            pheromone,
            alpha,
            beta,
        })
    }

    /// Builds one closed tour.
    pub fn construct<R: Rng>(&self, rng: &mut R) -> Result<Tour, AcoError> {
        let n = self.graph.city_count();
        let start = rng.random_range(0..n);

        let mut path = Vec::with_capacity(n);
        path.push(start);
        let mut unvisited: Vec<usize> = (0..n).filter(|&c| c != start).collect();
        let mut scores = Vec::with_capacity(unvisited.len());
        let mut distance = 0.0;
        let mut current = start;

        while !unvisited.is_empty() {
            let pick = self.select_next(current, &unvisited, &mut scores, rng)?;
            let next = unvisited.remove(pick);
            distance += self.leg(current, next);
            path.push(next);
            current = next;
        }
        distance += self.leg(current, start);

        Ok(Tour { path, distance })
    }

    /// Roulette-wheel choice among `unvisited`; returns a position in it.
    fn select_next<R: Rng>(
        &self,
        current: usize,
        unvisited: &[usize],
        scores: &mut Vec<f64>,
        rng: &mut R,
    ) -> Result<usize, AcoError> {
        scores.clear();
        scores.extend(unvisited.iter().map(|&u| self.score(current, u)));

        let total: f64 = scores.iter().sum();
        if !(total > 0.0 && total.is_finite()) {
            return Err(AcoError::DegenerateProbability {
                city: self.graph.label(current).unwrap_or_default().to_string(),
                total,
            });
        }

        let r: f64 = rng.random();
        let mut cumulative = 0.0;
        for (pos, score) in scores.iter().enumerate() {
            cumulative += score / total;
            if cumulative >= r {
                return Ok(pos);
            }
        }
        // Rounding left the cumulative sum just short of r.
        Ok(unvisited.len() - 1)
    }

    fn score(&self, from: usize, to: usize) -> f64 {
        match Edge::new(from, to) {
            Some(edge) => {
                let tau = self.pheromone.edge_level(edge);
                let eta = 1.0 / self.graph.edge_distance(edge);
                tau.powf(self.alpha) * eta.powf(self.beta)
            }
            None => 0.0,
        }
    }

    fn leg(&self, from: usize, to: usize) -> f64 {
        Edge::new(from, to).map_or(0.0, |edge| self.graph.edge_distance(edge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::square_graph;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn line_graph() -> DistanceGraph {
        // From city 0: city 1 at distance 1, city 2 at distance 2.
        DistanceGraph::from_pairs([(("0", "1"), 1.0), (("0", "2"), 2.0), (("1", "2"), 2.5)])
            .unwrap()
    }

    #[test]
    fn test_tour_is_permutation_with_matching_length() {
        let graph = square_graph();
        let pheromone = PheromoneModel::new(4);
        let ant = TourConstructor::new(&graph, &pheromone, 1.0, 2.0).unwrap();
        let mut rng = create_rng(42);

        for _ in 0..100 {
            let tour = ant.construct(&mut rng).unwrap();
            assert!(tour.is_permutation_of(4));
            let expected = graph.tour_length(&tour.path).unwrap();
            assert!((tour.distance - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_seeded_construction_reproducible() {
        let graph = square_graph();
        let pheromone = PheromoneModel::new(4);
        let ant = TourConstructor::new(&graph, &pheromone, 1.0, 2.0).unwrap();

        let a = ant.construct(&mut create_rng(9)).unwrap();
        let b = ant.construct(&mut create_rng(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_two_city_tour() {
        let graph = DistanceGraph::from_pairs([(("x", "y"), 4.0)]).unwrap();
        let pheromone = PheromoneModel::new(2);
        let ant = TourConstructor::new(&graph, &pheromone, 1.0, 2.0).unwrap();

        let tour = ant.construct(&mut create_rng(1)).unwrap();
        assert!(tour.is_permutation_of(2));
        assert_eq!(tour.distance, 8.0);
    }

    #[test]
    fn test_selection_follows_scores() {
        let graph = line_graph();
        let pheromone = PheromoneModel::new(3);
        // beta = 1: scores 1/1 and 1/2, so city 1 wins two times in three.
        let ant = TourConstructor::new(&graph, &pheromone, 1.0, 1.0).unwrap();
        let mut rng = create_rng(2024);
        let mut scores = Vec::new();

        let draws = 20_000;
        let mut first = 0;
        for _ in 0..draws {
            if ant.select_next(0, &[1, 2], &mut scores, &mut rng).unwrap() == 0 {
                first += 1;
            }
        }
        let share = first as f64 / draws as f64;
        assert!((share - 2.0 / 3.0).abs() < 0.02, "share = {share}");
    }

    #[test]
    fn test_pheromone_biases_selection() {
        let graph = line_graph();
        let mut pheromone = PheromoneModel::new(3);
        // A two-city path closes on itself, so edge 1-2 is reinforced twice.
        let trail = Tour {
            path: vec![1, 2],
            distance: 1.0,
        };
        pheromone.reinforce(&trail, 10.0).unwrap();
        assert_eq!(pheromone.level(1, 2), 21.0);

        let ant = TourConstructor::new(&graph, &pheromone, 1.0, 1.0).unwrap();
        let mut rng = create_rng(5);
        let mut scores = Vec::new();

        // From city 1: city 0 scores 1 * 1/1, city 2 scores 21 * 1/2.5.
        let toward_two = (0..2000)
            .filter(|_| ant.select_next(1, &[0, 2], &mut scores, &mut rng).unwrap() == 1)
            .count();
        assert!(toward_two > 1600, "toward_two = {toward_two}");
    }

    #[test]
    fn test_degenerate_probability() {
        let graph = square_graph();
        let mut pheromone = PheromoneModel::new(4);
        for _ in 0..200 {
            pheromone.evaporate(0.99).unwrap();
        }
        assert_eq!(pheromone.bounds(), (0.0, 0.0));

        let ant = TourConstructor::new(&graph, &pheromone, 1.0, 2.0).unwrap();
        let result = ant.construct(&mut create_rng(3));
        assert!(matches!(
            result,
            Err(AcoError::DegenerateProbability { total, .. }) if total == 0.0
        ));
    }

    #[test]
    fn test_mismatched_pheromone_rejected() {
        let graph = square_graph();
        let pheromone = PheromoneModel::new(5);
        assert!(TourConstructor::new(&graph, &pheromone, 1.0, 2.0).is_err());
    }

    proptest! {
        /// Every constructed tour is Hamiltonian and its length is the
        /// closed path length.
        #[test]
        fn prop_hamiltonian(
            points in prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), 2..15),
            seed in 0u64..10_000,
            alpha in 0.0f64..3.0,
            beta in 0.0f64..5.0,
        ) {
            let labelled = points
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| (format!("c{i}"), (x + i as f64 * 1e-3, y)));
            let graph = DistanceGraph::from_coordinates(labelled).unwrap();
            let pheromone = PheromoneModel::new(graph.city_count());
            let ant = TourConstructor::new(&graph, &pheromone, alpha, beta).unwrap();

            let tour = ant.construct(&mut create_rng(seed)).unwrap();
            prop_assert!(tour.is_permutation_of(graph.city_count()));
            let expected = graph.tour_length(&tour.path).unwrap();
            prop_assert!((tour.distance - expected).abs() < 1e-6 * expected.max(1.0));
        }
    }
}
