//! Routing problem trait and a ready-made instance.

use serde::{Deserialize, Serialize};

use super::{Customer, NodeId, Vehicle};
use crate::distance::DistanceMatrix;

/// Defines a capacitated vehicle routing problem instance.
///
/// This trait is the read-only interface solvers use to access problem data:
/// the raw distance matrix (depot at node id 1), the fleet and per-node
/// demands.
///
/// # Examples
///
/// ```
/// use cvrp_bnb::models::{Customer, RoutingProblem, Vehicle};
/// use cvrp_bnb::distance::DistanceMatrix;
///
/// struct MyProblem {
///     customers: Vec<Customer>,
///     vehicles: Vec<Vehicle>,
///     distances: DistanceMatrix,
/// }
///
/// impl RoutingProblem for MyProblem {
///     fn customers(&self) -> &[Customer] { &self.customers }
///     fn vehicles(&self) -> &[Vehicle] { &self.vehicles }
///     fn distances(&self) -> &DistanceMatrix { &self.distances }
/// }
///
/// let customers = vec![Customer::depot(0.0, 0.0), Customer::new(2, 3.0, 4.0, 7)];
/// let problem = MyProblem {
///     distances: DistanceMatrix::from_customers(&customers),
///     customers,
///     vehicles: vec![Vehicle::new(0, 10)],
/// };
/// assert_eq!(problem.num_customers(), 1);
/// assert_eq!(problem.demand(2), 7);
/// assert_eq!(problem.capacity(), Some(10));
/// ```
pub trait RoutingProblem {
    /// Returns all locations ordered by node id (index 0 = depot).
    fn customers(&self) -> &[Customer];

    /// Returns the available vehicles.
    fn vehicles(&self) -> &[Vehicle];

    /// Returns the raw distance matrix.
    fn distances(&self) -> &DistanceMatrix;

    /// Number of customers (excluding depot).
    fn num_customers(&self) -> usize {
        self.customers().len().saturating_sub(1)
    }

    /// Travel distance between two node ids.
    fn distance(&self, from: NodeId, to: NodeId) -> f64 {
        self.distances().between(from, to)
    }

    /// Demand of the given node, zero for unknown ids.
    fn demand(&self, id: NodeId) -> i32 {
        id.checked_sub(1)
            .and_then(|idx| self.customers().get(idx))
            .map_or(0, Customer::demand)
    }

    /// Uniform vehicle capacity, read from the first vehicle.
    fn capacity(&self) -> Option<i32> {
        self.vehicles().first().map(Vehicle::capacity)
    }
}

/// A plain CVRP instance owning its data.
///
/// # Examples
///
/// ```
/// use cvrp_bnb::models::{Customer, Instance, RoutingProblem, Vehicle};
///
/// let instance = Instance::euclidean(
///     vec![Customer::depot(0.0, 0.0), Customer::new(2, 0.0, 3.0, 1)],
///     Vehicle::fleet(1, 5),
/// );
/// assert!((instance.distance(1, 2) - 3.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    customers: Vec<Customer>,
    vehicles: Vec<Vehicle>,
    distances: DistanceMatrix,
}

impl Instance {
    /// Creates an instance from explicit parts.
    pub fn new(customers: Vec<Customer>, vehicles: Vec<Vehicle>, distances: DistanceMatrix) -> Self {
        Self {
            customers,
            vehicles,
            distances,
        }
    }

    /// Creates an instance whose distances are Euclidean between coordinates.
    pub fn euclidean(customers: Vec<Customer>, vehicles: Vec<Vehicle>) -> Self {
        let distances = DistanceMatrix::from_customers(&customers);
        Self::new(customers, vehicles, distances)
    }

    /// Creates an instance from a distance grid and per-node demands.
    ///
    /// `demands[i]` belongs to node id `i + 1`; the depot's entry is ignored.
    /// Returns `None` if the grid is not square or disagrees with `demands`.
    pub fn from_matrix(rows: &[Vec<f64>], demands: &[i32], vehicles: Vec<Vehicle>) -> Option<Self> {
        let distances = DistanceMatrix::from_rows(rows)?;
        if distances.size() != demands.len() {
            return None;
        }
        let customers = demands
            .iter()
            .enumerate()
            .map(|(idx, &demand)| match idx {
                0 => Customer::depot(0.0, 0.0),
                _ => Customer::new(idx + 1, 0.0, 0.0, demand),
            })
            .collect();
        Some(Self::new(customers, vehicles, distances))
    }
}

impl RoutingProblem for Instance {
    fn customers(&self) -> &[Customer] {
        &self.customers
    }

    fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }
}
