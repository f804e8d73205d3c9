//! Symmetric pheromone trail levels.
//!
//! One level per canonical [`Edge`], so `level(a, b)` and `level(b, a)`
//! read the same slot and every update is a single write.
//!
//! # Update rule
//!
//! Each iteration applies, in order:
//!
//! ```text
//! tau_e <- (1 - rho) * tau_e                    (evaporate)
//! tau_e <- tau_e + sum_k [e in T_k] / L(T_k)    (reinforce, once per ant)
//! ```
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"

use crate::aco::Tour;
use crate::error::AcoError;
use crate::graph::{edge_count, Edge};

/// Level assigned to every edge at construction.
pub const INITIAL_PHEROMONE: f64 = 1.0;

/// Learned edge desirability over a complete graph.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneModel {
    n_cities: usize,
    levels: Vec<f64>,
}

impl PheromoneModel {
    /// Creates a model over `n_cities` cities with every edge at
    /// [`INITIAL_PHEROMONE`].
    pub fn new(n_cities: usize) -> Self {
        let mut model = Self {
            n_cities,
            levels: vec![0.0; edge_count(n_cities)],
        };
        model.initialize();
        model
    }

    /// Resets every edge to [`INITIAL_PHEROMONE`].
    pub fn initialize(&mut self) {
        self.levels.fill(INITIAL_PHEROMONE);
    }

    /// Number of cities the model covers.
    pub fn city_count(&self) -> usize {
        self.n_cities
    }

    /// Level on edge `{a, b}`. Self pairs and out-of-range cities read as 0.
    pub fn level(&self, a: usize, b: usize) -> f64 {
        match Edge::new(a, b) {
            Some(edge) if a < self.n_cities && b < self.n_cities => self.edge_level(edge),
            _ => 0.0,
        }
    }

    #[inline]
    pub(crate) fn edge_level(&self, edge: Edge) -> f64 {
        self.levels[edge.slot()]
    }

    /// Multiplies every level by `1 - decay`.
    ///
    /// `decay` must lie in `[0, 1)`; a decay of 1 would zero every level
    /// and leave the next selection step without a distribution.
    pub fn evaporate(&mut self, decay: f64) -> Result<(), AcoError> {
        check_decay(decay)?;
        let keep = 1.0 - decay;
        for level in &mut self.levels {
            *level *= keep;
        }
        Ok(())
    }

    /// Adds `amount` to every edge of the closed tour.
    ///
    /// Each undirected edge is one slot, so both travel directions see the
    /// increase at once. An edge traversed twice (only possible on a
    /// two-city tour) is reinforced twice.
    pub fn reinforce(&mut self, tour: &Tour, amount: f64) -> Result<(), AcoError> {
        if !(amount.is_finite() && amount >= 0.0) {
            return Err(AcoError::parameter(
                "amount",
                format!("must be finite and non-negative, got {amount}"),
            ));
        }
        for edge in tour.edges() {
            let (_, hi) = edge.endpoints();
            if hi >= self.n_cities {
                return Err(AcoError::parameter(
                    "tour",
                    format!("city index {hi} outside graph of {} cities", self.n_cities),
                ));
            }
        }
        for edge in tour.edges() {
            self.levels[edge.slot()] += amount;
        }
        Ok(())
    }

    /// Deposits `1 / L` for a tour of length `L`.
    pub fn deposit(&mut self, tour: &Tour) -> Result<(), AcoError> {
        self.reinforce(tour, 1.0 / tour.distance)
    }

    /// Raises every level below `floor` up to `floor`.
    pub fn apply_floor(&mut self, floor: f64) {
        for level in &mut self.levels {
            if *level < floor {
                *level = floor;
            }
        }
    }

    /// Smallest and largest level.
    pub fn bounds(&self) -> (f64, f64) {
        self.levels
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &l| {
                (lo.min(l), hi.max(l))
            })
    }
}

pub(crate) fn check_decay(decay: f64) -> Result<(), AcoError> {
    if (0.0..1.0).contains(&decay) {
        Ok(())
    } else {
        Err(AcoError::parameter(
            "decay",
            format!("must be in [0, 1), got {decay}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tour(path: Vec<usize>, distance: f64) -> Tour {
        Tour { path, distance }
    }

    #[test]
    fn test_initialized_to_one() {
        let model = PheromoneModel::new(5);
        assert_eq!(model.bounds(), (1.0, 1.0));
        assert_eq!(model.level(4, 0), 1.0);
    }

    #[test]
    fn test_self_pair_reads_zero() {
        let model = PheromoneModel::new(3);
        assert_eq!(model.level(1, 1), 0.0);
        assert_eq!(model.level(1, 9), 0.0);
    }

    #[test]
    fn test_evaporate_scales() {
        let mut model = PheromoneModel::new(4);
        model.evaporate(0.25).unwrap();
        assert!((model.level(0, 3) - 0.75).abs() < 1e-12);
        model.evaporate(0.5).unwrap();
        assert!((model.level(2, 1) - 0.375).abs() < 1e-12);
    }

    #[test]
    fn test_evaporate_rejects_out_of_range() {
        let mut model = PheromoneModel::new(3);
        for decay in [1.0, 1.5, -0.1, f64::NAN] {
            assert!(matches!(
                model.evaporate(decay),
                Err(AcoError::InvalidParameter { name: "decay", .. })
            ));
        }
        assert_eq!(model.bounds(), (1.0, 1.0));
    }

    #[test]
    fn test_reinforce_closed_tour() {
        let mut model = PheromoneModel::new(4);
        model.reinforce(&tour(vec![0, 1, 3, 2], 80.0), 0.5).unwrap();

        // Used edges, including the closing edge C-A.
        for (a, b) in [(0, 1), (1, 3), (3, 2), (2, 0)] {
            assert!((model.level(a, b) - 1.5).abs() < 1e-12);
            assert!((model.level(b, a) - 1.5).abs() < 1e-12);
        }
        // Unused diagonals.
        assert_eq!(model.level(0, 3), 1.0);
        assert_eq!(model.level(1, 2), 1.0);
    }

    #[test]
    fn test_reinforce_accumulates_order_free() {
        let t1 = tour(vec![0, 1, 2, 3], 95.0);
        let t2 = tour(vec![0, 1, 3, 2], 80.0);

        let mut forward = PheromoneModel::new(4);
        forward.deposit(&t1).unwrap();
        forward.deposit(&t2).unwrap();

        let mut backward = PheromoneModel::new(4);
        backward.deposit(&t2).unwrap();
        backward.deposit(&t1).unwrap();

        let shared = 1.0 + 1.0 / 95.0 + 1.0 / 80.0;
        assert!((forward.level(0, 1) - shared).abs() < 1e-12);
        for a in 0..4 {
            for b in 0..4 {
                assert!((forward.level(a, b) - backward.level(a, b)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_reinforce_rejects_foreign_tour() {
        let mut model = PheromoneModel::new(3);
        let result = model.reinforce(&tour(vec![0, 1, 5], 3.0), 1.0);
        assert!(result.is_err());
        assert_eq!(model.bounds(), (1.0, 1.0));
    }

    #[test]
    fn test_floor() {
        let mut model = PheromoneModel::new(3);
        for _ in 0..50 {
            model.evaporate(0.5).unwrap();
        }
        model.apply_floor(1e-6);
        assert_eq!(model.bounds(), (1e-6, 1e-6));
    }

    proptest! {
        /// Zero decay never changes any level.
        #[test]
        fn prop_zero_decay_is_noop(n in 2usize..12, rounds in 1usize..20) {
            let mut model = PheromoneModel::new(n);
            let path: Vec<usize> = (0..n).collect();
            model.reinforce(&tour(path, 1.0), 0.3).unwrap();
            let before = model.clone();
            for _ in 0..rounds {
                model.evaporate(0.0).unwrap();
            }
            prop_assert_eq!(model, before);
        }

        /// Reads are symmetric after arbitrary updates.
        #[test]
        fn prop_symmetric(n in 2usize..10, decay in 0.0f64..0.99, amount in 0.0f64..5.0) {
            let mut model = PheromoneModel::new(n);
            let path: Vec<usize> = (0..n).rev().collect();
            model.reinforce(&tour(path, 1.0), amount).unwrap();
            model.evaporate(decay).unwrap();
            for a in 0..n {
                for b in 0..n {
                    prop_assert_eq!(model.level(a, b), model.level(b, a));
                }
            }
        }
    }
}
