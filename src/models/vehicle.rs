//! Vehicle type with a capacity constraint.

use serde::{Deserialize, Serialize};

/// A vehicle of the fleet.
///
/// The fleet is assumed homogeneous: solvers read the first vehicle's
/// capacity as the uniform constraint.
///
/// # Examples
///
/// ```
/// use cvrp_bnb::models::Vehicle;
///
/// let v = Vehicle::new(0, 200);
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.capacity(), 200);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    id: usize,
    capacity: i32,
}

impl Vehicle {
    /// Creates a vehicle with the given ID and capacity.
    pub fn new(id: usize, capacity: i32) -> Self {
        Self { id, capacity }
    }

    /// Creates `count` identical vehicles numbered from zero.
    pub fn fleet(count: usize, capacity: i32) -> Vec<Self> {
        (0..count).map(|id| Self::new(id, capacity)).collect()
    }

    /// Vehicle ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum load capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }
}
