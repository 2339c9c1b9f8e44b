//! Search-tree node of the branch-and-bound.
//!
//! Every node owns its reduced matrix and edge sets outright; children are
//! deep copies of their parent with exactly one branching decision applied.

use serde::{Deserialize, Serialize};

use super::reconstruct::{reconstruct, routes_of, Fragment};
use super::{reduce, select_edge, BnbError};
use crate::distance::{Edge, ReducedMatrix};
use crate::evaluation::{FeasibilityChecker, RouteEvaluator};
use crate::models::{Route, RoutingProblem};

/// Data rows left in a matrix whose completion is forced.
pub const LEAF_SIZE: usize = 2;

/// Whether a node can still lead to a capacity-respecting tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feasibility {
    /// No constraint is violated so far.
    Feasible,
    /// The node cannot be completed into a valid solution.
    Infeasible,
    /// The node has been derived but not checked yet.
    Undetermined,
}

/// A node of the search tree.
#[derive(Debug, Clone)]
pub struct PartialSolution {
    matrix: ReducedMatrix,
    included: Vec<Edge>,
    excluded: Vec<Edge>,
    lower_bound: f64,
    feasibility: Feasibility,
    solved: bool,
    routes: Vec<Route>,
    capacity: i32,
    vertex_count: usize,
}

impl PartialSolution {
    /// Builds the bounded root node of `problem`.
    ///
    /// # Errors
    ///
    /// Fails on an empty fleet, an instance without customers, or a distance
    /// matrix that does not match the node list.
    pub fn root<P: RoutingProblem>(problem: &P) -> Result<Self, BnbError> {
        let capacity = problem.capacity().ok_or(BnbError::EmptyFleet)?;
        if problem.num_customers() == 0 {
            return Err(BnbError::NoCustomers);
        }
        let nodes = problem.customers().len();
        let matrix_size = problem.distances().size();
        if matrix_size != nodes {
            return Err(BnbError::DimensionMismatch {
                matrix: matrix_size,
                nodes,
            });
        }

        let mut matrix = ReducedMatrix::augment(problem.distances(), problem.vehicles().len());
        let lower_bound = reduce(&mut matrix);
        let mut root = Self {
            vertex_count: matrix.size(),
            matrix,
            included: Vec::new(),
            excluded: Vec::new(),
            lower_bound,
            feasibility: Feasibility::Undetermined,
            solved: false,
            routes: Vec::new(),
            capacity,
        };

        if root.matrix.size() == LEAF_SIZE {
            root.solve_leaf(problem);
        } else {
            root.check(problem);
        }
        Ok(root)
    }

    /// Child that commits to `edge`.
    ///
    /// # Errors
    ///
    /// Fails if `edge` has no row or column left, or if the matrix would
    /// shrink below [`LEAF_SIZE`].
    pub fn with_edge<P: RoutingProblem>(&self, edge: Edge, problem: &P) -> Result<Self, BnbError> {
        let mut child = self.derive();
        if child.included.contains(&edge) {
            child.feasibility = Feasibility::Infeasible;
            return Ok(child);
        }

        let (row, col) = child
            .matrix
            .locate(&edge)
            .ok_or(BnbError::EdgeLookup { edge })?;
        child.lower_bound += child.matrix.get(row, col);
        child.included.push(edge);
        child.matrix.remove(row, col);

        match child.matrix.size() {
            LEAF_SIZE => child.solve_leaf(problem),
            size if size < LEAF_SIZE => return Err(BnbError::DegenerateMatrix { size }),
            _ => {
                child.forbid_subtours();
                child.lower_bound += reduce(&mut child.matrix);
                child.check(problem);
            }
        }
        Ok(child)
    }

    /// Child that forbids `edge`.
    ///
    /// # Errors
    ///
    /// Fails if `edge` has no row or column left.
    pub fn without_edge(&self, edge: Edge) -> Result<Self, BnbError> {
        let mut child = self.derive();
        if child.excluded.contains(&edge) {
            child.feasibility = Feasibility::Infeasible;
            return Ok(child);
        }

        let (row, col) = child
            .matrix
            .locate(&edge)
            .ok_or(BnbError::EdgeLookup { edge })?;
        child.excluded.push(edge);
        child.matrix.forbid(row, col);
        child.lower_bound += reduce(&mut child.matrix);
        // no edge was committed, so the routes keep the parent's verdict
        child.feasibility = if child.matrix.has_blocked_line() {
            Feasibility::Infeasible
        } else {
            self.feasibility
        };
        Ok(child)
    }

    /// Edge this node should branch on next.
    ///
    /// # Errors
    ///
    /// Fails if the matrix holds no zero-cost cell.
    pub fn select_edge(&self) -> Result<Edge, BnbError> {
        select_edge(&self.matrix)
    }

    /// Total original distance of the node's routes.
    pub fn total_distance<P: RoutingProblem>(&self, problem: &P) -> f64 {
        let evaluator = RouteEvaluator::new(problem);
        self.routes
            .iter()
            .map(|route| evaluator.distance_of(route.nodes()))
            .sum()
    }

    /// Accumulated lower bound on any completion of this node.
    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    /// Committed edges, in commitment order.
    pub fn included(&self) -> &[Edge] {
        &self.included
    }

    /// Forbidden edges, in decision order.
    pub fn excluded(&self) -> &[Edge] {
        &self.excluded
    }

    /// Number of committed edges.
    pub fn depth(&self) -> usize {
        self.included.len()
    }

    /// Feasibility verdict.
    pub fn feasibility(&self) -> Feasibility {
        self.feasibility
    }

    /// Returns `true` if the node is known to be feasible.
    pub fn is_feasible(&self) -> bool {
        self.feasibility == Feasibility::Feasible
    }

    /// Returns `true` if the node is known to be infeasible.
    pub fn is_infeasible(&self) -> bool {
        self.feasibility == Feasibility::Infeasible
    }

    /// Returns `true` once every vertex has an outgoing edge.
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Routes implied by the committed edges; tentative until solved.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// The node's reduced matrix.
    pub fn matrix(&self) -> &ReducedMatrix {
        &self.matrix
    }

    /// Uniform vehicle capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    fn derive(&self) -> Self {
        let mut child = self.clone();
        child.feasibility = Feasibility::Undetermined;
        child
    }

    /// Forbids closing any open fragment onto itself before it spans every
    /// vertex, and refreshes the tentative routes.
    fn forbid_subtours(&mut self) {
        let fragments = reconstruct(&self.included);
        for fragment in &fragments {
            if fragment.is_closed() || fragment.len() >= self.vertex_count {
                continue;
            }
            let closing = Edge::new(fragment.tail(), fragment.head());
            if let Some((row, col)) = self.matrix.locate(&closing) {
                self.matrix.forbid(row, col);
            }
        }
        self.routes = fragments.iter().flat_map(Fragment::routes).collect();
    }

    /// Completes a two-row matrix. Each row must keep exactly one allowed
    /// cell, in distinct columns; anything else leaves the node infeasible.
    fn solve_leaf<P: RoutingProblem>(&mut self, problem: &P) {
        self.forbid_subtours();

        let mut completing = Vec::with_capacity(LEAF_SIZE);
        for row in 0..LEAF_SIZE {
            let mut allowed = (0..LEAF_SIZE).filter(|&col| self.matrix.get(row, col).is_finite());
            match (allowed.next(), allowed.next()) {
                (Some(col), None) => completing.push((row, col)),
                _ => {
                    self.feasibility = Feasibility::Infeasible;
                    return;
                }
            }
        }
        if completing[0].1 == completing[1].1 {
            self.feasibility = Feasibility::Infeasible;
            return;
        }

        for (row, col) in completing {
            self.lower_bound += self.matrix.get(row, col);
            self.included
                .push(Edge::new(self.matrix.row_label(row), self.matrix.col_label(col)));
        }
        self.solved = true;
        self.routes = routes_of(&self.included);
        self.check_capacity(problem);
    }

    fn check<P: RoutingProblem>(&mut self, problem: &P) {
        if self.matrix.has_blocked_line() {
            self.feasibility = Feasibility::Infeasible;
        } else {
            self.check_capacity(problem);
        }
    }

    fn check_capacity<P: RoutingProblem>(&mut self, problem: &P) {
        let checker = FeasibilityChecker::new(self.capacity);
        self.feasibility = match checker.check(&self.routes, |id| problem.demand(id)) {
            Some(_) => Feasibility::Infeasible,
            None => Feasibility::Feasible,
        };
    }
}
