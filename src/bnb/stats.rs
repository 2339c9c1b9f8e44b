//! Search statistics and node fates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a node left the pool without being branched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeFate {
    /// Solved, feasible and better than the incumbent.
    Accepted,
    /// Solved but infeasible or no better than the incumbent.
    Rejected,
    /// Lower bound not below the incumbent.
    PrunedBound,
    /// Cannot be completed.
    PrunedInfeasible,
}

impl fmt::Display for NodeFate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeFate::Accepted => "accepted",
            NodeFate::Rejected => "rejected",
            NodeFate::PrunedBound => "pruned (bound)",
            NodeFate::PrunedInfeasible => "pruned (infeasible)",
        };
        f.write_str(name)
    }
}

/// Counters collected during a branch-and-bound run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStatistics {
    /// Nodes created, root included.
    pub nodes_created: u64,
    /// Nodes split into an include and an exclude child.
    pub nodes_branched: u64,
    /// Solved nodes that became the incumbent.
    pub solutions_accepted: u64,
    /// Solved nodes discarded as infeasible or not improving.
    pub solutions_rejected: u64,
    /// Nodes discarded because their bound reached the incumbent.
    pub prunings_bound: u64,
    /// Nodes discarded because they cannot be completed.
    pub prunings_infeasible: u64,
    /// Largest number of open nodes held at once.
    pub peak_pool_size: usize,
    /// Lower bound of the root node.
    pub root_lower_bound: f64,
}

impl SearchStatistics {
    /// Counts a node added to the tree.
    #[inline]
    pub fn on_node_created(&mut self) {
        self.nodes_created = self.nodes_created.saturating_add(1);
    }

    /// Counts a branching step; `pool_size` is the open-node count after the
    /// children were added.
    #[inline]
    pub fn on_branch(&mut self, pool_size: usize) {
        self.nodes_branched = self.nodes_branched.saturating_add(1);
        self.peak_pool_size = self.peak_pool_size.max(pool_size);
    }

    /// Counts a node that left the pool.
    pub fn on_fate(&mut self, fate: NodeFate) {
        let counter = match fate {
            NodeFate::Accepted => &mut self.solutions_accepted,
            NodeFate::Rejected => &mut self.solutions_rejected,
            NodeFate::PrunedBound => &mut self.prunings_bound,
            NodeFate::PrunedInfeasible => &mut self.prunings_infeasible,
        };
        *counter = counter.saturating_add(1);
    }

    /// Nodes that left the pool without being branched.
    pub fn nodes_discarded(&self) -> u64 {
        self.solutions_accepted
            + self.solutions_rejected
            + self.prunings_bound
            + self.prunings_infeasible
    }
}
