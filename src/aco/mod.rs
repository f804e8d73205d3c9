//! Ant Colony Optimization (Ant System) for the symmetric TSP.
//!
//! A colony of ants repeatedly builds closed tours over a complete graph.
//! Each ant chooses its next city with probability proportional to
//! `pheromone^alpha * (1 / distance)^beta`; after every iteration the trail
//! levels evaporate and each tour deposits `1 / length` on its edges.
//!
//! # Key Types
//!
//! - [`AcoConfig`]: Colony parameters (ants, iterations, decay, exponents, seed)
//! - [`TourConstructor`]: Builds one ant's tour from read-only state
//! - [`ColonySolver`]: Runs the iteration loop and tracks the best tour
//! - [`AcoResult`]: Best tour, its length, and the convergence history
//! - [`AcoObserver`]: Optional per-iteration progress hook
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*

mod config;
mod construct;
mod runner;
mod types;

pub use config::AcoConfig;
pub use construct::TourConstructor;
pub use runner::{AcoResult, ColonySolver};
pub use types::{AcoObserver, IterationStats, Tour};
