//! Tours and the per-iteration observation hook.

use crate::graph::{DistanceGraph, Edge};

/// A closed tour: every city exactly once, implicitly returning from the
/// last city to the first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    /// City indices in visiting order.
    pub path: Vec<usize>,

    /// Total length including the closing edge.
    pub distance: f64,
}

impl Tour {
    /// Number of cities visited.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Returns `true` if the tour visits no city.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Edges traversed, in order, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let n = self.path.len();
        (0..n).filter_map(move |k| Edge::new(self.path[k], self.path[(k + 1) % n]))
    }

    /// Whether the path is a permutation of `0..n`.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        if self.path.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &city in &self.path {
            if city >= n || seen[city] {
                return false;
            }
            seen[city] = true;
        }
        true
    }

    /// City labels in visiting order.
    pub fn labels<'g>(&self, graph: &'g DistanceGraph) -> Vec<&'g str> {
        self.path.iter().filter_map(|&i| graph.label(i)).collect()
    }

    /// Human-readable closed route, e.g. `A -> B -> D -> C -> A`.
    pub fn route(&self, graph: &DistanceGraph) -> String {
        let mut labels = self.labels(graph);
        if let Some(&first) = labels.first() {
            labels.push(first);
        }
        labels.join(" -> ")
    }
}

/// Summary of one completed iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationStats {
    /// Zero-based iteration index over the solver's lifetime.
    pub iteration: usize,

    /// Shortest tour built this iteration.
    pub iteration_best: f64,

    /// Mean tour length this iteration.
    pub iteration_mean: f64,

    /// Best distance known after this iteration.
    pub best_distance: f64,
}

/// Receives progress callbacks from a running colony.
///
/// Both hooks default to no-ops. Called on the driving thread, after the
/// round's tours are built and before the pheromone update.
pub trait AcoObserver: Send + Sync {
    /// Called once per completed iteration.
    fn on_iteration(&self, _stats: &IterationStats) {}

    /// Called whenever a strictly shorter tour becomes the running best.
    fn on_improvement(&self, _iteration: usize, _tour: &Tour) {}
}

impl AcoObserver for () {}
