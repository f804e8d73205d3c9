//! ACO configuration.
//!
//! [`AcoConfig`] holds every parameter that controls the colony loop.

use crate::error::AcoError;
use crate::pheromone::check_decay;

/// Configuration for the Ant Colony solver.
///
/// # Defaults
///
/// ```
/// use u_antcolony::aco::AcoConfig;
///
/// let config = AcoConfig::default();
/// assert_eq!(config.n_ants, 10);
/// assert_eq!(config.n_iterations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_antcolony::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_n_ants(20)
///     .with_decay(0.2)
///     .with_beta(3.0)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Ants that build a tour each iteration. Must be at least 1.
    pub n_ants: usize,

    /// Number of iterations per [`run`](crate::aco::ColonySolver::run).
    ///
    /// Zero is allowed and yields no tour.
    pub n_iterations: usize,

    /// Evaporation rate in `[0, 1)`.
    pub decay: f64,

    /// Pheromone exponent. Higher = follow learned trails more.
    pub alpha: f64,

    /// Inverse-distance exponent. Higher = greedier.
    pub beta: f64,

    /// Master seed. `None` draws one at random per run.
    pub seed: Option<u64>,

    /// Build the ants of one iteration on the rayon pool.
    ///
    /// Results do not depend on this flag. Without the `parallel` cargo
    /// feature it is ignored.
    pub parallel: bool,

    /// Optional wall-clock limit in milliseconds, checked between
    /// iterations.
    pub time_limit_ms: Option<u64>,

    /// Lower bound applied to every level after evaporation.
    ///
    /// `0.0` disables the floor, so levels decay without bound.
    pub pheromone_floor: f64,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            n_ants: 10,
            n_iterations: 100,
            decay: 0.1,
            alpha: 1.0,
            beta: 2.0,
            seed: None,
            parallel: true,
            time_limit_ms: None,
            pheromone_floor: 0.0,
        }
    }
}

impl AcoConfig {
    /// Sets the number of ants per iteration.
    pub fn with_n_ants(mut self, n: usize) -> Self {
        self.n_ants = n;
        self
    }

    /// Sets the number of iterations.
    pub fn with_n_iterations(mut self, n: usize) -> Self {
        self.n_iterations = n;
        self
    }

    /// Sets the evaporation rate.
    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    /// Sets the pheromone exponent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the inverse-distance exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the master seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel tour construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Sets the pheromone floor (`0.0` disables it).
    pub fn with_pheromone_floor(mut self, floor: f64) -> Self {
        self.pheromone_floor = floor;
        self
    }

    /// Preset for quick answers on small instances.
    ///
    /// - Ants: 10, Iterations: 50, Time limit: 10s
    pub fn fast() -> Self {
        Self {
            n_ants: 10,
            n_iterations: 50,
            time_limit_ms: Some(10_000),
            ..Self::default()
        }
    }

    /// Preset balancing quality and run time.
    ///
    /// - Ants: 20, Iterations: 200, Time limit: 30s
    pub fn balanced() -> Self {
        Self {
            n_ants: 20,
            n_iterations: 200,
            time_limit_ms: Some(30_000),
            ..Self::default()
        }
    }

    /// Preset for larger instances: more ants, more iterations, slower
    /// evaporation.
    ///
    /// - Ants: 50, Iterations: 500, Decay: 0.05, Time limit: 60s
    pub fn quality() -> Self {
        Self {
            n_ants: 50,
            n_iterations: 500,
            decay: 0.05,
            time_limit_ms: Some(60_000),
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), AcoError> {
        if self.n_ants == 0 {
            return Err(AcoError::parameter("n_ants", "must be at least 1"));
        }
        check_decay(self.decay)?;
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return Err(AcoError::parameter(
                "alpha",
                format!("must be finite and non-negative, got {}", self.alpha),
            ));
        }
        if !(self.beta.is_finite() && self.beta >= 0.0) {
            return Err(AcoError::parameter(
                "beta",
                format!("must be finite and non-negative, got {}", self.beta),
            ));
        }
        if !(self.pheromone_floor.is_finite() && self.pheromone_floor >= 0.0) {
            return Err(AcoError::parameter(
                "pheromone_floor",
                format!(
                    "must be finite and non-negative, got {}",
                    self.pheromone_floor
                ),
            ));
        }
        Ok(())
    }
}
