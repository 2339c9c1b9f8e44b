//! Nearest-neighbor constructive heuristic.
//!
//! Builds routes greedily, one vehicle at a time: starting from the depot,
//! always visit the nearest unvisited customer that still fits the vehicle.
//! When nothing fits, the vehicle returns to the depot and the next one
//! starts.
//!
//! # Complexity
//!
//! O(n²) where n = number of customers.

use crate::evaluation::RouteEvaluator;
use crate::models::{NodeId, RoutingProblem, Solution, DEPOT_ID};

/// Constructs a CVRP solution using the nearest-neighbor heuristic.
///
/// Customers left over once the fleet is used up stay unserved; the caller
/// detects that through [`RouteEvaluator::evaluate_solution`].
///
/// # Examples
///
/// ```
/// use cvrp_bnb::models::{Customer, Instance, Vehicle};
/// use cvrp_bnb::constructive::nearest_neighbor;
///
/// let instance = Instance::euclidean(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(2, 1.0, 0.0, 10),
///         Customer::new(3, 2.0, 0.0, 10),
///         Customer::new(4, 3.0, 0.0, 10),
///     ],
///     Vehicle::fleet(1, 30),
/// );
///
/// let solution = nearest_neighbor(&instance);
/// assert_eq!(solution.num_served(), 3);
/// assert_eq!(solution.route_node_ids(), vec![vec![1, 2, 3, 4, 1]]);
/// ```
pub fn nearest_neighbor<P: RoutingProblem>(problem: &P) -> Solution {
    let mut unvisited: Vec<NodeId> = problem
        .customers()
        .iter()
        .filter(|c| !c.is_depot())
        .map(|c| c.id())
        .collect();
    let mut routes: Vec<Vec<NodeId>> = Vec::new();

    for vehicle in problem.vehicles() {
        if unvisited.is_empty() {
            break;
        }

        let mut route = vec![DEPOT_ID];
        let mut current = DEPOT_ID;
        let mut load: i32 = 0;

        loop {
            let fitting: Vec<NodeId> = unvisited
                .iter()
                .copied()
                .filter(|&id| load + problem.demand(id) <= vehicle.capacity())
                .collect();
            let Some(next) = problem.distances().nearest_neighbor(current, &fitting) else {
                break;
            };
            unvisited.retain(|&id| id != next);
            load += problem.demand(next);
            route.push(next);
            current = next;
        }

        if route.len() > 1 {
            route.push(DEPOT_ID);
            routes.push(route);
        }
    }

    RouteEvaluator::new(problem).build_solution(&routes)
}
