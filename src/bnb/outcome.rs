//! Result of a branch-and-bound run.

use serde::{Deserialize, Serialize};

use super::SearchStatistics;
use crate::models::{NodeId, Solution};

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Every open node was branched or discarded.
    Exhausted,
    /// The iteration cap was reached with open nodes left.
    IterationLimit,
}

/// Incumbent, bookkeeping and statistics after termination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BnbOutcome {
    solution: Option<Solution>,
    upper_bound: Option<f64>,
    iterations: usize,
    termination: Termination,
    statistics: SearchStatistics,
}

impl BnbOutcome {
    pub(crate) fn new(
        solution: Option<Solution>,
        upper_bound: f64,
        iterations: usize,
        termination: Termination,
        statistics: SearchStatistics,
    ) -> Self {
        Self {
            solution,
            upper_bound: upper_bound.is_finite().then_some(upper_bound),
            iterations,
            termination,
            statistics,
        }
    }

    /// Best solution found, if any.
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Total distance of the best solution found.
    pub fn best_distance(&self) -> Option<f64> {
        self.solution.as_ref().map(Solution::total_cost)
    }

    /// Routes of the best solution, each starting and ending at the depot.
    pub fn routes(&self) -> Vec<Vec<NodeId>> {
        self.solution
            .as_ref()
            .map(Solution::route_node_ids)
            .unwrap_or_default()
    }

    /// Final pruning threshold, `None` if nothing bounded the search.
    pub fn upper_bound(&self) -> Option<f64> {
        self.upper_bound
    }

    /// Branching steps performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Why the search stopped.
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Counters collected during the search.
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Returns `true` if the search finished with a solution, which is then
    /// optimal among those better than the initial upper bound.
    pub fn is_optimal(&self) -> bool {
        self.termination == Termination::Exhausted && self.solution.is_some()
    }
}
