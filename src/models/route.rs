//! Route type.

use serde::{Deserialize, Serialize};

use super::{NodeId, DEPOT_ID};

/// An ordered sequence of node ids travelled by a single vehicle.
///
/// A complete route starts and ends at the depot. Routes reconstructed from
/// a partial edge set may be open at either end.
///
/// # Examples
///
/// ```
/// use cvrp_bnb::models::Route;
///
/// let route = Route::new(vec![1, 3, 2, 1]);
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.customer_ids(), vec![3, 2]);
/// assert!(route.is_closed());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    nodes: Vec<NodeId>,
    total_distance: f64,
    total_load: i32,
}

impl Route {
    /// Creates a route over the given node sequence.
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self {
            nodes,
            total_distance: 0.0,
            total_load: 0,
        }
    }

    /// Returns the node ids in visiting order, depot included.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Returns the customer ids in visiting order (depot excluded).
    pub fn customer_ids(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .copied()
            .filter(|&id| id != DEPOT_ID)
            .collect()
    }

    /// Returns the number of customer visits (excluding depot).
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|&&id| id != DEPOT_ID).count()
    }

    /// Returns `true` if this route has no customer visits.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the route leaves from and returns to the depot.
    pub fn is_closed(&self) -> bool {
        self.nodes.len() >= 2
            && self.nodes.first() == Some(&DEPOT_ID)
            && self.nodes.last() == Some(&DEPOT_ID)
    }

    /// Total distance of this route (set by evaluator).
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Total load served by this route (set by evaluator).
    pub fn total_load(&self) -> i32 {
        self.total_load
    }

    /// Sets the total distance (used by evaluator).
    pub fn set_total_distance(&mut self, d: f64) {
        self.total_distance = d;
    }

    /// Sets the total load (used by evaluator).
    pub fn set_total_load(&mut self, load: i32) {
        self.total_load = load;
    }
}
