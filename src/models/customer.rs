//! Customer (node) type.

use serde::{Deserialize, Serialize};

/// Identifier of a node in the original problem.
///
/// Ids are 1-based: the depot is [`DEPOT_ID`], customers are `2..=n`.
pub type NodeId = usize;

/// Node id of the (single) depot.
pub const DEPOT_ID: NodeId = 1;

/// A customer (or the depot) in a capacitated routing problem.
///
/// Customers carry a demand and, optionally, coordinates used to derive a
/// Euclidean distance matrix.
///
/// # Examples
///
/// ```
/// use cvrp_bnb::models::{Customer, DEPOT_ID};
///
/// let depot = Customer::depot(35.0, 35.0);
/// assert_eq!(depot.id(), DEPOT_ID);
/// assert_eq!(depot.demand(), 0);
///
/// let c = Customer::new(2, 41.0, 49.0, 10);
/// assert_eq!(c.id(), 2);
/// assert_eq!(c.demand(), 10);
/// assert!(!c.is_depot());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    id: NodeId,
    x: f64,
    y: f64,
    demand: i32,
}

impl Customer {
    /// Creates a new customer.
    pub fn new(id: NodeId, x: f64, y: f64, demand: i32) -> Self {
        Self { id, x, y, demand }
    }

    /// Creates the depot at the given coordinates (id = [`DEPOT_ID`], demand = 0).
    pub fn depot(x: f64, y: f64) -> Self {
        Self::new(DEPOT_ID, x, y, 0)
    }

    /// Node id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Demand at this customer.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Returns `true` for the depot.
    pub fn is_depot(&self) -> bool {
        self.id == DEPOT_ID
    }

    /// Euclidean distance to another customer.
    pub fn distance_to(&self, other: &Customer) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_new() {
        let c = Customer::new(3, 10.0, 20.0, 5);
        assert_eq!(c.id(), 3);
        assert_eq!(c.x(), 10.0);
        assert_eq!(c.y(), 20.0);
        assert_eq!(c.demand(), 5);
        assert!(!c.is_depot());
    }

    #[test]
    fn test_customer_depot() {
        let d = Customer::depot(35.0, 35.0);
        assert_eq!(d.id(), DEPOT_ID);
        assert_eq!(d.demand(), 0);
        assert!(d.is_depot());
    }

    #[test]
    fn test_customer_distance() {
        let a = Customer::depot(0.0, 0.0);
        let b = Customer::new(2, 3.0, 4.0, 0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-10);
    }
}
