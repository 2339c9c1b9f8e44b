//! Solver configuration.

use serde::{Deserialize, Serialize};

/// Default cap on branching steps.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Parameters of a branch-and-bound run.
///
/// # Examples
///
/// ```
/// use cvrp_bnb::bnb::BnbConfig;
///
/// let config = BnbConfig::default()
///     .with_max_iterations(500)
///     .with_initial_upper_bound(120.0)
///     .with_warm_start(true);
/// assert_eq!(config.max_iterations(), 500);
/// assert_eq!(config.initial_upper_bound(), Some(120.0));
/// assert!(config.warm_start());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BnbConfig {
    max_iterations: usize,
    initial_upper_bound: Option<f64>,
    warm_start: bool,
}

impl BnbConfig {
    /// Caps the number of branching steps. Reaching the cap ends the search
    /// with the best solution found so far.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Prunes every node whose bound is not below `bound` from the start.
    pub fn with_initial_upper_bound(mut self, bound: f64) -> Self {
        self.initial_upper_bound = Some(bound);
        self
    }

    /// Seeds the incumbent with a nearest-neighbor solution when it uses the
    /// whole fleet.
    pub fn with_warm_start(mut self, enabled: bool) -> Self {
        self.warm_start = enabled;
        self
    }

    /// Maximum branching steps.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Upper bound known before the search, if any.
    pub fn initial_upper_bound(&self) -> Option<f64> {
        self.initial_upper_bound
    }

    /// Whether the nearest-neighbor warm start runs.
    pub fn warm_start(&self) -> bool {
        self.warm_start
    }
}

impl Default for BnbConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            initial_upper_bound: None,
            warm_start: false,
        }
    }
}
