//! Dense distance matrix.

use serde::{Deserialize, Serialize};

use crate::models::{Customer, NodeId};

/// A dense n×n distance matrix stored in row-major order.
///
/// Row and column `i` belong to node id `i + 1`, so the depot occupies
/// index 0. Asymmetric distances are allowed.
///
/// # Examples
///
/// ```
/// use cvrp_bnb::models::Customer;
/// use cvrp_bnb::distance::DistanceMatrix;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(2, 3.0, 4.0, 10),
///     Customer::new(3, 6.0, 8.0, 20),
/// ];
/// let dm = DistanceMatrix::from_customers(&customers);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert!((dm.between(1, 2) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a Euclidean distance matrix from customer coordinates.
    ///
    /// `customers` must be ordered by node id, depot first.
    pub fn from_customers(customers: &[Customer]) -> Self {
        let n = customers.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = customers[i].distance_to(&customers[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Creates a distance matrix from nested rows.
    ///
    /// Returns `None` if the rows do not form a square grid.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Self::from_data(size, rows.concat())
    }

    /// Returns the distance between dense indices `from` and `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Returns the distance between two node ids.
    ///
    /// # Panics
    ///
    /// Panics if either id is zero or beyond the matrix.
    pub fn between(&self, from: NodeId, to: NodeId) -> f64 {
        self.get(from - 1, to - 1)
    }

    /// Sets the distance between dense indices `from` and `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the nearest node among `candidates`, measured from `from`.
    ///
    /// Ties keep the earlier candidate. Returns `None` if `candidates` is empty.
    pub fn nearest_neighbor(&self, from: NodeId, candidates: &[NodeId]) -> Option<NodeId> {
        candidates.iter().copied().fold(None, |best, id| match best {
            Some(b) if self.between(from, b) <= self.between(from, id) => Some(b),
            _ => Some(id),
        })
    }
}
