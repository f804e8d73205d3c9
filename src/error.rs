//! Error type shared by every fallible operation in the crate.
//!
//! Construction-time problems (graph shape, distance values, hyperparameter
//! ranges) are reported before any iteration runs. Tour construction can
//! only fail with [`AcoError::DegenerateProbability`].

use thiserror::Error;

/// Errors raised while building or running an ant colony.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcoError {
    /// A distance was requested for a self pair or a pair not in the graph.
    #[error("unknown edge {a} - {b}")]
    UnknownEdge {
        /// First endpoint as supplied.
        a: String,
        /// Second endpoint as supplied.
        b: String,
    },

    /// A distance entry names a city that was not declared.
    #[error("unknown city '{0}'")]
    UnknownCity(String),

    /// The same city label was declared twice.
    #[error("duplicate city '{0}'")]
    DuplicateCity(String),

    /// Some pair of distinct cities has no distance entry.
    #[error("incomplete graph: missing distance for {a} - {b}")]
    IncompleteGraph {
        /// First endpoint of the missing pair.
        a: String,
        /// Second endpoint of the missing pair.
        b: String,
    },

    /// A supplied distance is not a finite, strictly positive number.
    #[error("invalid distance {distance} for {a} - {b}: must be finite and positive")]
    InvalidDistance {
        /// First endpoint.
        a: String,
        /// Second endpoint.
        b: String,
        /// The rejected value.
        distance: f64,
    },

    /// Fewer than two cities were declared; no closed tour exists.
    #[error("at least 2 cities are required, found {found}")]
    TooFewCities {
        /// Number of cities declared.
        found: usize,
    },

    /// A hyperparameter is outside its valid domain.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Name of the offending field.
        name: &'static str,
        /// What the valid domain is.
        reason: String,
    },

    /// Every candidate score was zero (or the sum was not finite) while
    /// choosing the next city.
    #[error("degenerate selection probabilities at city '{city}' (score sum {total})")]
    DegenerateProbability {
        /// Label of the city the ant was standing on.
        city: String,
        /// The offending sum of scores.
        total: f64,
    },
}

impl AcoError {
    /// Shorthand for an [`AcoError::InvalidParameter`].
    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
