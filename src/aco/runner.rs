//! ACO iteration loop.
//!
//! [`ColonySolver`] owns the graph, the pheromone model, and the running
//! best. Each iteration:
//!
//! 1. builds `n_ants` tours against the current (pre-update) trail levels,
//!    each ant with its own generator seeded from `(master, iteration, ant)`
//! 2. replaces the best tour only on a strictly shorter distance
//! 3. appends the best distance to the history
//! 4. evaporates every level by `decay`
//! 5. deposits `1 / L` on every edge of every tour built this iteration
//!
//! Steps 1–3 read shared state only and may run ants on the rayon pool;
//! steps 4–5 run on the calling thread after all ants have finished.

use super::config::AcoConfig;
use super::construct::TourConstructor;
use super::types::{AcoObserver, IterationStats, Tour};
use crate::error::AcoError;
use crate::graph::DistanceGraph;
use crate::pheromone::PheromoneModel;
use crate::random::{ant_seed, create_rng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Result of an ACO run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoResult {
    /// Best tour found so far. `None` if no iteration has completed.
    pub best: Option<Tour>,

    /// Length of `best`, or `f64::INFINITY` when there is none.
    pub best_distance: f64,

    /// Iterations completed by this call.
    pub iterations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the run hit the configured time limit.
    pub timed_out: bool,

    /// Best distance at the end of every iteration completed so far.
    pub history: Vec<f64>,
}

/// Drives the colony and tracks the best tour.
///
/// # Usage
///
/// ```
/// use u_antcolony::aco::{AcoConfig, ColonySolver};
/// use u_antcolony::graph::DistanceGraph;
///
/// let graph = DistanceGraph::from_pairs([
///     (("A", "B"), 10.0),
///     (("A", "C"), 15.0),
///     (("A", "D"), 20.0),
///     (("B", "C"), 35.0),
///     (("B", "D"), 25.0),
///     (("C", "D"), 30.0),
/// ])
/// .unwrap();
///
/// let mut solver = ColonySolver::new(graph, AcoConfig::default().with_seed(42)).unwrap();
/// let result = solver.run().unwrap();
///
/// assert_eq!(result.best_distance, 80.0);
/// assert_eq!(result.history.len(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct ColonySolver {
    graph: DistanceGraph,
    config: AcoConfig,
    pheromone: PheromoneModel,
    best: Option<Tour>,
    best_distance: f64,
    history: Vec<f64>,
}

impl ColonySolver {
    /// Creates a solver. Fails if the configuration is invalid.
    pub fn new(graph: DistanceGraph, config: AcoConfig) -> Result<Self, AcoError> {
        config.validate()?;
        let pheromone = PheromoneModel::new(graph.city_count());
        Ok(Self {
            graph,
            config,
            pheromone,
            best: None,
            best_distance: f64::INFINITY,
            history: Vec::new(),
        })
    }

    /// Runs `n_iterations` iterations.
    pub fn run(&mut self) -> Result<AcoResult, AcoError> {
        self.run_observed(&(), None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// The flag is checked before each iteration; an iteration in progress
    /// always finishes, including its pheromone update.
    pub fn run_with_cancel(
        &mut self,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoResult, AcoError> {
        self.run_observed(&(), cancel)
    }

    /// Runs with progress callbacks and an optional cancellation token.
    ///
    /// Repeated calls continue from the current trail levels and best tour.
    /// On error the failing iteration leaves the pheromone model untouched
    /// and adds nothing to the history.
    pub fn run_observed<O: AcoObserver + ?Sized>(
        &mut self,
        observer: &O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoResult, AcoError> {
        let master = self.config.seed.unwrap_or_else(rand::random);
        let start = Instant::now();
        let mut completed = 0usize;
        let mut cancelled = false;
        let mut timed_out = false;

        for _ in 0..self.config.n_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if let Some(limit) = self.config.time_limit_ms {
                if start.elapsed().as_millis() >= u128::from(limit) {
                    timed_out = true;
                    break;
                }
            }

            self.iterate(master, observer)?;
            completed += 1;
        }

        Ok(AcoResult {
            best: self.best.clone(),
            best_distance: self.best_distance,
            iterations: completed,
            cancelled,
            timed_out,
            history: self.history.clone(),
        })
    }

    /// One full iteration: construct, track best, evaporate, reinforce.
    fn iterate<O: AcoObserver + ?Sized>(
        &mut self,
        master: u64,
        observer: &O,
    ) -> Result<IterationStats, AcoError> {
        let iteration = self.history.len();
        let tours = self.construct_tours(master, iteration)?;

        let mut iteration_best = f64::INFINITY;
        let mut total = 0.0;
        for tour in &tours {
            total += tour.distance;
            iteration_best = iteration_best.min(tour.distance);
            if tour.distance < self.best_distance {
                self.best_distance = tour.distance;
                self.best = Some(tour.clone());
                observer.on_improvement(iteration, tour);
            }
        }
        self.history.push(self.best_distance);

        let stats = IterationStats {
            iteration,
            iteration_best,
            iteration_mean: total / tours.len() as f64,
            best_distance: self.best_distance,
        };
        observer.on_iteration(&stats);

        self.pheromone.evaporate(self.config.decay)?;
        if self.config.pheromone_floor > 0.0 {
            self.pheromone.apply_floor(self.config.pheromone_floor);
        }
        for tour in &tours {
            self.pheromone.deposit(tour)?;
        }

        Ok(stats)
    }

    /// Builds this iteration's tours against the current trail levels.
    fn construct_tours(&self, master: u64, iteration: usize) -> Result<Vec<Tour>, AcoError> {
        let ant = TourConstructor::new(
            &self.graph,
            &self.pheromone,
            self.config.alpha,
            self.config.beta,
        )?;
        let build = |k: usize| {
            let mut rng = create_rng(ant_seed(master, iteration, k));
            ant.construct(&mut rng)
        };
        construct_all(self.config.n_ants, self.config.parallel, build)
    }

    /// The distance graph.
    pub fn graph(&self) -> &DistanceGraph {
        &self.graph
    }

    /// Current trail levels.
    pub fn pheromone(&self) -> &PheromoneModel {
        &self.pheromone
    }

    /// The validated configuration.
    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    /// Best tour found so far.
    pub fn best_tour(&self) -> Option<&Tour> {
        self.best.as_ref()
    }

    /// Length of the best tour, or `f64::INFINITY`.
    pub fn best_distance(&self) -> f64 {
        self.best_distance
    }

    /// Best distance after each completed iteration.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Iterations completed over the solver's lifetime.
    pub fn iterations_completed(&self) -> usize {
        self.history.len()
    }
}

#[cfg(feature = "parallel")]
fn construct_all<F>(n_ants: usize, parallel: bool, build: F) -> Result<Vec<Tour>, AcoError>
where
    F: Fn(usize) -> Result<Tour, AcoError> + Send + Sync,
{
    if parallel {
        (0..n_ants).into_par_iter().map(build).collect()
    } else {
        (0..n_ants).map(build).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn construct_all<F>(n_ants: usize, _parallel: bool, build: F) -> Result<Vec<Tour>, AcoError>
where
    F: Fn(usize) -> Result<Tour, AcoError>,
{
    (0..n_ants).map(build).collect()
}

// ============================================================================
// Tests
// ============================================================================
