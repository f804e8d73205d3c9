//! Ant Colony Optimization for the Traveling Salesman Problem.
//!
//! Provides an Ant System solver over a complete, symmetric graph of
//! labelled cities:
//!
//! - **Graph**: [`graph::DistanceGraph`], an immutable, validated store of
//!   pairwise distances keyed by canonical unordered [`graph::Edge`]s.
//! - **Pheromone**: [`pheromone::PheromoneModel`], symmetric trail levels
//!   with evaporation and additive reinforcement.
//! - **ACO**: [`aco::TourConstructor`] builds one ant's tour by roulette
//!   wheel selection; [`aco::ColonySolver`] drives the iterations, keeps the
//!   best tour, and records convergence history.
//!
//! Randomness is always injected: every ant draws from its own generator
//! seeded by the run's master seed, so a seeded run is reproducible whether
//! ants are built sequentially or in parallel (cargo feature `parallel`).
//!
//! The solver is a heuristic; it does not prove optimality.
//!
//! # Example
//!
//! ```
//! use u_antcolony::aco::{AcoConfig, ColonySolver};
//! use u_antcolony::graph::DistanceGraph;
//!
//! let graph = DistanceGraph::from_coordinates([
//!     ("A", (0.0, 0.0)),
//!     ("B", (10.0, 0.0)),
//!     ("C", (5.0, 10.0)),
//!     ("D", (15.0, 5.0)),
//! ])
//! .unwrap();
//!
//! let mut solver = ColonySolver::new(graph, AcoConfig::fast().with_seed(1)).unwrap();
//! let result = solver.run().unwrap();
//! let best = result.best.unwrap();
//!
//! assert_eq!(best.len(), 4);
//! println!("{} ({:.2})", best.route(solver.graph()), result.best_distance);
//! ```

pub mod aco;
pub mod error;
pub mod graph;
pub mod pheromone;
pub mod random;

pub use error::AcoError;
