//! Route evaluator that computes distance, load, and feasibility.

use std::collections::HashSet;

use crate::models::{NodeId, Route, RoutingProblem, Solution, Violation, ViolationType, DEPOT_ID};

/// Evaluates node sequences against the original (non-augmented) distances,
/// computing total distance and load and checking capacity and coverage.
///
/// # Examples
///
/// ```
/// use cvrp_bnb::models::{Customer, Instance, Vehicle};
/// use cvrp_bnb::evaluation::RouteEvaluator;
///
/// let instance = Instance::euclidean(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(2, 3.0, 4.0, 10),
///         Customer::new(3, 6.0, 8.0, 20),
///     ],
///     Vehicle::fleet(1, 100),
/// );
///
/// let evaluator = RouteEvaluator::new(&instance);
/// let (route, violations) = evaluator.build_route(&[1, 2, 3, 1]);
/// assert_eq!(route.len(), 2);
/// assert!((route.total_distance() - 20.0).abs() < 1e-10);
/// assert!(violations.is_empty());
/// ```
pub struct RouteEvaluator<'a, P: RoutingProblem> {
    problem: &'a P,
    capacity: i32,
}

impl<'a, P: RoutingProblem> RouteEvaluator<'a, P> {
    /// Creates a new evaluator for the given problem.
    ///
    /// Capacity is taken from the first vehicle; an empty fleet is unbounded.
    pub fn new(problem: &'a P) -> Self {
        Self {
            problem,
            capacity: problem.capacity().unwrap_or(i32::MAX),
        }
    }

    /// Sum of original distances along consecutive nodes of `nodes`.
    pub fn distance_of(&self, nodes: &[NodeId]) -> f64 {
        nodes
            .windows(2)
            .map(|pair| self.problem.distance(pair[0], pair[1]))
            .sum()
    }

    /// Total customer demand along `nodes`.
    pub fn load_of(&self, nodes: &[NodeId]) -> i32 {
        nodes
            .iter()
            .filter(|&&id| id != DEPOT_ID)
            .map(|&id| self.problem.demand(id))
            .sum()
    }

    /// Builds a route from a node sequence, computing distance and load.
    ///
    /// Returns the constructed route and any constraint violations found.
    pub fn build_route(&self, nodes: &[NodeId]) -> (Route, Vec<Violation>) {
        let mut route = Route::new(nodes.to_vec());
        let mut violations = Vec::new();

        let load = self.load_of(nodes);
        route.set_total_distance(self.distance_of(nodes));
        route.set_total_load(load);

        if !route.is_closed() {
            violations.push(Violation::new(ViolationType::RouteNotClosed {
                route_index: 0,
            }));
        }
        if load > self.capacity {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index: 0,
                load,
                capacity: self.capacity,
            }));
        }

        (route, violations)
    }

    /// Builds a solution from node sequences, with its total cost set.
    pub fn build_solution(&self, routes: &[Vec<NodeId>]) -> Solution {
        let mut solution = Solution::new();
        for nodes in routes {
            let (route, _) = self.build_route(nodes);
            solution.add_route(route);
        }
        let total = solution.total_distance();
        solution.set_total_cost(total);
        solution
    }

    /// Evaluates an entire solution, returning its distance and all violations,
    /// including customers left unserved or visited twice.
    pub fn evaluate_solution(&self, solution: &Solution) -> (f64, Vec<Violation>) {
        let mut total_cost = 0.0;
        let mut all_violations = Vec::new();
        let mut seen = HashSet::new();

        for (idx, route) in solution.routes().iter().enumerate() {
            let (built, mut violations) = self.build_route(route.nodes());

            for v in &mut violations {
                match &mut v.kind {
                    ViolationType::CapacityExceeded { route_index, .. }
                    | ViolationType::RouteNotClosed { route_index } => {
                        *route_index = idx;
                    }
                    ViolationType::CustomerUnserved { .. }
                    | ViolationType::CustomerRevisited { .. } => {}
                }
            }
            for customer_id in built.customer_ids() {
                if !seen.insert(customer_id) {
                    violations.push(Violation::new(ViolationType::CustomerRevisited {
                        customer_id,
                    }));
                }
            }

            total_cost += built.total_distance();
            all_violations.append(&mut violations);
        }

        for customer in self.problem.customers().iter().filter(|c| !c.is_depot()) {
            if !seen.contains(&customer.id()) {
                all_violations.push(Violation::new(ViolationType::CustomerUnserved {
                    customer_id: customer.id(),
                }));
            }
        }

        (total_cost, all_violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Instance, Vehicle};

    fn setup(capacity: i32) -> Instance {
        Instance::euclidean(
            vec![
                Customer::depot(0.0, 0.0),
                Customer::new(2, 3.0, 4.0, 10),
                Customer::new(3, 6.0, 8.0, 20),
                Customer::new(4, 0.0, 10.0, 15),
            ],
            Vehicle::fleet(2, capacity),
        )
    }

    #[test]
    fn test_build_route_single() {
        let instance = setup(50);
        let eval = RouteEvaluator::new(&instance);
        let (route, violations) = eval.build_route(&[1, 2, 1]);
        assert_eq!(route.len(), 1);
        assert!(violations.is_empty());
        // depot->2 = 5.0, 2->depot = 5.0
        assert!((route.total_distance() - 10.0).abs() < 1e-10);
        assert_eq!(route.total_load(), 10);
    }

    #[test]
    fn test_build_route_capacity_violated() {
        let instance = setup(25);
        let eval = RouteEvaluator::new(&instance);
        // 10 + 20 + 15 = 45 > 25
        let (route, violations) = eval.build_route(&[1, 2, 3, 4, 1]);
        assert_eq!(route.len(), 3);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0].kind,
            ViolationType::CapacityExceeded {
                load: 45,
                capacity: 25,
                ..
            }
        ));
    }

    #[test]
    fn test_build_route_open() {
        let instance = setup(50);
        let eval = RouteEvaluator::new(&instance);
        let (_, violations) = eval.build_route(&[1, 2]);
        assert!(matches!(
            violations[0].kind,
            ViolationType::RouteNotClosed { route_index: 0 }
        ));
    }

    #[test]
    fn test_evaluate_solution_coverage() {
        let instance = setup(50);
        let eval = RouteEvaluator::new(&instance);

        let complete = eval.build_solution(&[vec![1, 2, 3, 1], vec![1, 4, 1]]);
        let (cost, violations) = eval.evaluate_solution(&complete);
        assert!(violations.is_empty());
        assert!((cost - complete.total_cost()).abs() < 1e-10);

        let broken = eval.build_solution(&[vec![1, 2, 3, 1], vec![1, 3, 1]]);
        let (_, violations) = eval.evaluate_solution(&broken);
        assert!(violations
            .iter()
            .any(|v| v.kind == ViolationType::CustomerRevisited { customer_id: 3 }));
        assert!(violations
            .iter()
            .any(|v| v.kind == ViolationType::CustomerUnserved { customer_id: 4 }));
    }

    #[test]
    fn test_capacity_violation_route_index() {
        let instance = setup(20);
        let eval = RouteEvaluator::new(&instance);
        let solution = eval.build_solution(&[vec![1, 2, 1], vec![1, 3, 4, 1]]);
        let (_, violations) = eval.evaluate_solution(&solution);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0].kind,
            ViolationType::CapacityExceeded { route_index: 1, load: 35, .. }
        ));
    }
}
