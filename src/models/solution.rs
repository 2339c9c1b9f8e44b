//! Solution and violation types.

use serde::{Deserialize, Serialize};

use super::{NodeId, Route};

/// A type of constraint violation in a route or solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Vehicle capacity exceeded.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Load at the point capacity was first exceeded.
        load: i32,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// A customer is not visited by any route.
    CustomerUnserved {
        /// Customer left out.
        customer_id: NodeId,
    },
    /// A customer is visited more than once across the route set.
    CustomerRevisited {
        /// Customer visited repeatedly.
        customer_id: NodeId,
    },
    /// A route does not start and end at the depot.
    RouteNotClosed {
        /// Route index in the solution.
        route_index: usize,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// A complete solution to a routing problem.
///
/// # Examples
///
/// ```
/// use cvrp_bnb::models::{Route, Solution};
///
/// let mut sol = Solution::new();
/// sol.add_route(Route::new(vec![1, 2, 1]));
/// assert_eq!(sol.num_routes(), 1);
/// assert_eq!(sol.num_served(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    routes: Vec<Route>,
    total_cost: f64,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            total_cost: 0.0,
        }
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Returns the routes as plain node-id sequences.
    pub fn route_node_ids(&self) -> Vec<Vec<NodeId>> {
        self.routes.iter().map(|r| r.nodes().to_vec()).collect()
    }

    /// Returns the total cost of this solution.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Sets the total cost.
    pub fn set_total_cost(&mut self, cost: f64) {
        self.total_cost = cost;
    }

    /// Total distance across all routes.
    pub fn total_distance(&self) -> f64 {
        self.routes.iter().map(|r| r.total_distance()).sum()
    }

    /// Total number of customers served (across all routes).
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }
}

impl Default for Solution {
    fn default() -> Self {
        Self::new()
    }
}
