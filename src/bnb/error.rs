//! Errors that abort a branch-and-bound run.
//!
//! Node-local problems (capacity overflow, ambiguous leaves, repeated
//! branching decisions) never surface here; they only mark the node
//! infeasible. What remains are invalid inputs and internal bookkeeping
//! violations.

use thiserror::Error;

use crate::distance::Edge;

/// Errors raised by the branch-and-bound solver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BnbError {
    /// The instance has no vehicles.
    #[error("fleet is empty")]
    EmptyFleet,
    /// The instance has no customers to route.
    #[error("instance has no customers")]
    NoCustomers,
    /// The distance matrix does not cover every node.
    #[error("distance matrix is {matrix}x{matrix} but the instance has {nodes} nodes")]
    DimensionMismatch {
        /// Side length of the distance matrix.
        matrix: usize,
        /// Number of nodes, depot included.
        nodes: usize,
    },
    /// A branching edge no longer has a row or column in the node's matrix.
    #[error("edge {edge} not found in the reduced matrix")]
    EdgeLookup {
        /// Edge that could not be located.
        edge: Edge,
    },
    /// The matrix shrank below the two-row leaf size.
    #[error("reduced matrix shrank to {size} rows")]
    DegenerateMatrix {
        /// Data rows left.
        size: usize,
    },
    /// A bounded matrix offered no zero-cost cell to branch on.
    #[error("no zero-cost edge to branch on in a {size}x{size} matrix")]
    NoBranchingEdge {
        /// Data rows of the offending matrix.
        size: usize,
    },
}
