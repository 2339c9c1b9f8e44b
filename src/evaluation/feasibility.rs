//! Capacity feasibility of (possibly partial) routes.

use crate::models::{Route, Violation, ViolationType, DEPOT_ID};

/// Checks routes against a uniform vehicle capacity.
///
/// Demand is accumulated in visiting order and the check stops at the first
/// overflow, so partial routes can be rejected as soon as their committed
/// prefix is too heavy.
///
/// # Examples
///
/// ```
/// use cvrp_bnb::evaluation::FeasibilityChecker;
/// use cvrp_bnb::models::Route;
///
/// let checker = FeasibilityChecker::new(10);
/// let demand = |id: usize| if id == 1 { 0 } else { 4 };
/// assert!(checker.check(&[Route::new(vec![1, 2, 3, 1])], demand).is_none());
/// assert!(checker.check(&[Route::new(vec![1, 2, 3, 4])], demand).is_some());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FeasibilityChecker {
    capacity: i32,
}

impl FeasibilityChecker {
    /// Creates a checker for the given capacity.
    pub fn new(capacity: i32) -> Self {
        Self { capacity }
    }

    /// Vehicle capacity in use.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Returns the first capacity violation among `routes`, if any.
    pub fn check<F>(&self, routes: &[Route], demand: F) -> Option<Violation>
    where
        F: Fn(usize) -> i32,
    {
        routes.iter().enumerate().find_map(|(route_index, route)| {
            let mut load = 0;
            for &id in route.nodes().iter().filter(|&&id| id != DEPOT_ID) {
                load += demand(id);
                if load > self.capacity {
                    return Some(Violation::new(ViolationType::CapacityExceeded {
                        route_index,
                        load,
                        capacity: self.capacity,
                    }));
                }
            }
            None
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn demand(id: usize) -> i32 {
        match id {
            DEPOT_ID => 0,
            2 => 5,
            3 => 6,
            _ => 3,
        }
    }

    #[test]
    fn test_within_capacity() {
        let checker = FeasibilityChecker::new(11);
        let routes = [Route::new(vec![1, 2, 3, 1]), Route::new(vec![1, 4, 1])];
        assert!(checker.check(&routes, demand).is_none());
    }

    #[test]
    fn test_reports_offending_route() {
        let checker = FeasibilityChecker::new(10);
        let routes = [Route::new(vec![1, 4, 1]), Route::new(vec![1, 2, 3, 1])];
        let violation = checker.check(&routes, demand).expect("overloaded");
        assert_eq!(
            violation.kind,
            ViolationType::CapacityExceeded {
                route_index: 1,
                load: 11,
                capacity: 10,
            }
        );
    }

    #[test]
    fn test_open_fragment_checked() {
        let checker = FeasibilityChecker::new(10);
        // customer-only chain with no depot yet
        assert!(checker.check(&[Route::new(vec![2, 3])], demand).is_some());
    }

    #[test]
    fn test_short_circuits() {
        let checker = FeasibilityChecker::new(4);
        let calls = Cell::new(0);
        let counting = |id: usize| {
            calls.set(calls.get() + 1);
            demand(id)
        };
        assert!(checker
            .check(&[Route::new(vec![1, 2, 3, 4, 1])], counting)
            .is_some());
        assert_eq!(calls.get(), 1);
    }
}
